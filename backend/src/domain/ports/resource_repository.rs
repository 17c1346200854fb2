//! Driven port for resource persistence and its error type.
//!
//! Adapters signal a lookup miss with `Ok(None)`; errors are reserved for
//! failures of the store itself.

use async_trait::async_trait;

use crate::domain::{EntityId, Resource};

use super::define_port_error;

define_port_error! {
    /// Errors raised by resource repository adapters.
    pub enum RepositoryError {
        /// Store connection could not be established or was lost.
        Connection { message: String } => "repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "repository query failed: {message}",
        /// Write violates a uniqueness or referential constraint.
        Conflict { message: String } => "repository rejected write: {message}",
        /// Adapter does not support the operation.
        Unsupported { operation: String } => "repository operation not supported: {operation}",
    }
}

/// CRUD contract every resource store implements.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceRepository<R: Resource>: Send + Sync {
    /// Every stored record, ordered by identifier.
    async fn get_all(&self) -> Result<Vec<R>, RepositoryError>;

    /// Record with the given identifier.
    async fn get_by_id(&self, id: EntityId) -> Result<Option<R>, RepositoryError>;

    /// First record whose wire property `key` equals `value`.
    ///
    /// Callers only pass keys drawn from [`Resource::FIELDS`]; adapters may
    /// still refuse keys they cannot query.
    async fn get_by_unique_key(&self, key: &str, value: &str)
    -> Result<Option<R>, RepositoryError>;

    /// Insert a record and return the identifier assigned by the store.
    async fn save(&self, entity: &R) -> Result<EntityId, RepositoryError>;

    /// Replace the record `id` with `entity`. `false` when nothing changed.
    async fn update(&self, id: EntityId, entity: &R) -> Result<bool, RepositoryError>;

    /// Remove the record `id`. `false` when nothing was removed.
    async fn delete(&self, id: EntityId) -> Result<bool, RepositoryError>;
}
