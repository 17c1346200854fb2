//! Driven port for user persistence.

use async_trait::async_trait;

use crate::domain::User;

use super::{RepositoryError, ResourceRepository};

/// User store: the generic CRUD contract plus a credential lookup.
#[async_trait]
pub trait UserRepository: ResourceRepository<User> {
    /// User whose username and password both match.
    async fn get_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError>;
}
