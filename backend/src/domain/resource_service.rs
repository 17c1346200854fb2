//! Generic resource service.
//!
//! One implementation of the validated CRUD pipeline shared by users,
//! accounts and transactions. Each operation validates its input first, so a
//! rejected input never reaches the repository, then performs at most one
//! outstanding repository call at a time and classifies every failure into
//! the closed [`Error`] taxonomy.

use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::domain::ports::{
    LoginService, RepositoryError, ResourceOperations, ResourceRepository, UserRepository,
};
use crate::domain::validation::{
    is_complete_resource, is_property_of, is_valid_object, is_valid_string, is_valid_strings,
};
use crate::domain::{
    Account, EntityId, Error, IdCandidate, LoginCredentials, Resource, Transaction, User,
};

/// Validated CRUD service over the resource `R` backed by the store `P`.
pub struct ResourceService<R, P: ?Sized> {
    repository: Arc<P>,
    resource: PhantomData<fn() -> R>,
}

/// Service over users, backed by any user store.
pub type UserService = ResourceService<User, dyn UserRepository>;
/// Service over accounts, backed by any account store.
pub type AccountService = ResourceService<Account, dyn ResourceRepository<Account>>;
/// Service over transactions, backed by any transaction store.
pub type TransactionService = ResourceService<Transaction, dyn ResourceRepository<Transaction>>;

impl<R, P: ?Sized> Clone for ResourceService<R, P> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            resource: PhantomData,
        }
    }
}

impl<R, P: ?Sized> ResourceService<R, P> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<P>) -> Self {
        Self {
            repository,
            resource: PhantomData,
        }
    }
}

impl<R, P> ResourceService<R, P>
where
    R: Resource,
    P: ResourceRepository<R> + ?Sized,
{
    fn map_repository_error(error: RepositoryError) -> Error {
        warn!(resource = R::NAME, error = %error, "repository call failed");
        match error {
            RepositoryError::Connection { message } => {
                Error::internal(format!("{} store unavailable: {message}", R::NAME))
            }
            RepositoryError::Query { message } => {
                Error::internal(format!("{} store error: {message}", R::NAME))
            }
            RepositoryError::Conflict { message } => Error::conflict(message),
            RepositoryError::Unsupported { operation } => Error::not_implemented(format!(
                "{operation} is not supported for {}",
                R::NAME
            )),
        }
    }

    fn invalid_payload() -> Error {
        Error::invalid_request(format!("Invalid property values found in provided {}.", R::NAME))
    }

    /// Every stored record.
    ///
    /// Fails with `not_found` when the store holds nothing.
    pub async fn get_all(&self) -> Result<Vec<R>, Error> {
        let records = self
            .repository
            .get_all()
            .await
            .map_err(Self::map_repository_error)?;
        if records.is_empty() {
            return Err(Error::not_found(format!("No {} records found.", R::NAME)));
        }
        debug!(resource = R::NAME, count = records.len(), "listed records");
        Ok(records.into_iter().map(Resource::redacted).collect())
    }

    /// Record with the given identifier.
    pub async fn get_by_id(&self, id: impl Into<IdCandidate>) -> Result<R, Error> {
        let candidate = id.into();
        let Some(id) = candidate.validate() else {
            return Err(Error::invalid_request(format!(
                "Invalid {} id provided.",
                R::NAME
            ))
            .with_details(json!({ "field": "id" })));
        };
        self.find_existing(id).await.map(Resource::redacted)
    }

    async fn find_existing(&self, id: EntityId) -> Result<R, Error> {
        match self
            .repository
            .get_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
        {
            Some(record) => Ok(record),
            None => Err(Error::not_found(format!("No {} found with id {id}.", R::NAME))),
        }
    }

    /// Record matching a single `{key: value}` query.
    ///
    /// The key must name a property of `R`. An `id` key takes the same path
    /// as [`Self::get_by_id`].
    pub async fn get_by_unique_key(&self, query: &BTreeMap<String, String>) -> Result<R, Error> {
        let mut entries = query.iter();
        let (Some((key, value)), None) = (entries.next(), entries.next()) else {
            return Err(Error::invalid_request(
                "Exactly one search key must be provided.",
            ));
        };
        if !is_property_of::<R>(key) {
            return Err(
                Error::invalid_request(format!("{key} is not a {} property.", R::NAME))
                    .with_details(json!({ "field": key })),
            );
        }
        if key == "id" {
            return self.get_by_id(value).await;
        }
        if !is_valid_string(value) {
            return Err(Error::invalid_request(format!("A value for {key} is required."))
                .with_details(json!({ "field": key })));
        }

        match self
            .repository
            .get_by_unique_key(key, value)
            .await
            .map_err(Self::map_repository_error)?
        {
            Some(record) => Ok(record.redacted()),
            None => Err(Error::not_found(format!(
                "No {} found with {key} {value}.",
                R::NAME
            ))),
        }
    }

    /// Persist a new record and return it with its assigned identifier.
    ///
    /// Any caller-supplied identifier is ignored. Resources with a natural
    /// key are probed for an existing holder of that key first.
    pub async fn add_new(&self, entity: Option<R>) -> Result<R, Error> {
        let Some(entity) = entity.filter(|e| is_complete_resource(Some(e), &["id"])) else {
            return Err(Self::invalid_payload());
        };

        if let Some((key, value)) = entity.natural_key() {
            let existing = self
                .repository
                .get_by_unique_key(key, &value)
                .await
                .map_err(Self::map_repository_error)?;
            if existing.is_some() {
                return Err(Error::conflict(format!(
                    "The provided {key} is already taken."
                ))
                .with_details(json!({ "field": key })));
            }
        }

        let id = self
            .repository
            .save(&entity)
            .await
            .map_err(Self::map_repository_error)?;
        debug!(resource = R::NAME, %id, "record created");
        Ok(entity.with_id(id).redacted())
    }

    /// Replace an existing record in full.
    pub async fn update(&self, entity: Option<R>) -> Result<bool, Error> {
        let (id, entity) = self.existing_target(entity).await?;
        let updated = self
            .repository
            .update(id, &entity)
            .await
            .map_err(Self::map_repository_error)?;
        if !updated {
            return Err(Error::not_found(format!("No {} found with id {id}.", R::NAME)));
        }
        debug!(resource = R::NAME, %id, "record updated");
        Ok(true)
    }

    /// Remove an existing record.
    pub async fn delete(&self, entity: Option<R>) -> Result<bool, Error> {
        let (id, _) = self.existing_target(entity).await?;
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(Self::map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(format!("No {} found with id {id}.", R::NAME)));
        }
        debug!(resource = R::NAME, %id, "record deleted");
        Ok(true)
    }

    /// Shape-check a mutation payload and confirm its target exists.
    async fn existing_target(&self, entity: Option<R>) -> Result<(EntityId, R), Error> {
        let Some(entity) = entity.filter(|e| e.id().is_some() && is_valid_object(Some(e), &[]))
        else {
            return Err(Self::invalid_payload());
        };
        let candidate = entity.id().map_or(IdCandidate::from(0_i64), IdCandidate::from);
        let found = self.get_by_id(candidate).await?;
        let id = found
            .id()
            .and_then(EntityId::new)
            .ok_or_else(|| Error::internal(format!("stored {} has no id", R::NAME)))?;
        Ok((id, entity))
    }
}

impl<P> ResourceService<User, P>
where
    P: UserRepository + ?Sized,
{
    /// User matching both credentials.
    ///
    /// A miss is an authentication failure rather than `not_found`, so a
    /// caller cannot tell an unknown username from a wrong password.
    pub async fn get_by_credentials(&self, username: &str, password: &str) -> Result<User, Error> {
        if !is_valid_strings(&[username, password]) {
            return Err(Error::invalid_request("Username and password are required."));
        }
        match self
            .repository
            .get_by_credentials(username, password)
            .await
            .map_err(Self::map_repository_error)?
        {
            Some(user) => {
                debug!(resource = User::NAME, user_id = ?user.id, "credentials accepted");
                Ok(user.redacted())
            }
            None => Err(Error::unauthorized("Invalid credentials provided.")),
        }
    }
}

#[async_trait]
impl<R, P> ResourceOperations<R> for ResourceService<R, P>
where
    R: Resource,
    P: ResourceRepository<R> + ?Sized,
{
    async fn get_all(&self) -> Result<Vec<R>, Error> {
        ResourceService::get_all(self).await
    }

    async fn get_by_id(&self, id: IdCandidate) -> Result<R, Error> {
        ResourceService::get_by_id(self, id).await
    }

    async fn get_by_unique_key(&self, query: &BTreeMap<String, String>) -> Result<R, Error> {
        ResourceService::get_by_unique_key(self, query).await
    }

    async fn add_new(&self, entity: Option<R>) -> Result<R, Error> {
        ResourceService::add_new(self, entity).await
    }

    async fn update(&self, entity: Option<R>) -> Result<bool, Error> {
        ResourceService::update(self, entity).await
    }

    async fn delete(&self, entity: Option<R>) -> Result<bool, Error> {
        ResourceService::delete(self, entity).await
    }
}

#[async_trait]
impl<P> LoginService for ResourceService<User, P>
where
    P: UserRepository + ?Sized,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        self.get_by_credentials(credentials.username(), credentials.password())
            .await
    }
}

#[cfg(test)]
#[path = "resource_service_tests.rs"]
mod tests;
