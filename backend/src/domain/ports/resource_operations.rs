//! Driving port exposing the resource use-cases to inbound adapters.
//!
//! HTTP handlers depend on this trait rather than on the concrete service so
//! they can be exercised against test doubles.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::domain::{Error, IdCandidate, Resource};

/// Validated CRUD operations over one resource type.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceOperations<R: Resource>: Send + Sync {
    /// Every record; fails with `not_found` when the store is empty.
    async fn get_all(&self) -> Result<Vec<R>, Error>;

    /// Record with the given identifier.
    async fn get_by_id(&self, id: IdCandidate) -> Result<R, Error>;

    /// Record matching a single `{key: value}` query.
    async fn get_by_unique_key(&self, query: &BTreeMap<String, String>) -> Result<R, Error>;

    /// Persist a new record; `None` models a missing payload.
    async fn add_new(&self, entity: Option<R>) -> Result<R, Error>;

    /// Replace an existing record.
    async fn update(&self, entity: Option<R>) -> Result<bool, Error>;

    /// Remove an existing record.
    async fn delete(&self, entity: Option<R>) -> Result<bool, Error>;
}
