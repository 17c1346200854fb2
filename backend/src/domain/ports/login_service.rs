//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without importing
//! the backing store, which keeps handler tests deterministic.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching user without its
    /// password.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
