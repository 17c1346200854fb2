//! In-memory repositories seeded with fixture data.
//!
//! Used when no database is configured and by the HTTP integration tests.
//! Every repository keeps its rows behind a mutex and assigns identifiers
//! sequentially, mirroring a `serial` column. Referential integrity between
//! collections is not checked here.

pub mod fixtures;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{RepositoryError, ResourceRepository, UserRepository};
use crate::domain::{Account, EntityId, Resource, Transaction, User};

struct Table<R> {
    rows: BTreeMap<EntityId, R>,
    next_id: i64,
}

/// Mutex-guarded table of `R` records keyed by identifier.
pub struct InMemoryRepository<R> {
    table: Mutex<Table<R>>,
}

impl<R: Resource> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self {
            table: Mutex::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl<R: Resource> InMemoryRepository<R> {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository holding `records`, numbered from 1 in order.
    pub fn with_records(records: impl IntoIterator<Item = R>) -> Self {
        let repository = Self::new();
        if let Ok(mut table) = repository.table.lock() {
            for record in records {
                if let Some(id) = EntityId::new(table.next_id) {
                    table.rows.insert(id, record.with_id(id));
                    table.next_id += 1;
                }
            }
        }
        repository
    }

    fn lock(&self) -> Result<MutexGuard<'_, Table<R>>, RepositoryError> {
        self.table
            .lock()
            .map_err(|_| RepositoryError::connection(format!("{} table lock poisoned", R::NAME)))
    }
}

/// Whether the wire property `key` of `record` equals `value`.
///
/// Numbers compare numerically so `ownerId=1` matches `1` and `1.0`.
fn property_matches<R: Resource>(record: &R, key: &str, value: &str) -> bool {
    let Ok(Value::Object(properties)) = serde_json::to_value(record) else {
        return false;
    };
    match properties.get(key) {
        Some(Value::String(text)) => text == value,
        Some(Value::Number(number)) => number
            .as_f64()
            .zip(value.trim().parse::<f64>().ok())
            .is_some_and(|(stored, wanted)| (stored - wanted).abs() < f64::EPSILON),
        Some(Value::Bool(flag)) => value.parse::<bool>().is_ok_and(|wanted| wanted == *flag),
        _ => false,
    }
}

fn natural_key_taken<R: Resource>(table: &Table<R>, candidate: &R, except: Option<EntityId>) -> bool {
    let Some((key, value)) = candidate.natural_key() else {
        return false;
    };
    table
        .rows
        .iter()
        .filter(|(id, _)| Some(**id) != except)
        .any(|(_, row)| property_matches(row, key, &value))
}

#[async_trait]
impl<R: Resource> ResourceRepository<R> for InMemoryRepository<R> {
    async fn get_all(&self) -> Result<Vec<R>, RepositoryError> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<R>, RepositoryError> {
        Ok(self.lock()?.rows.get(&id).cloned())
    }

    async fn get_by_unique_key(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Option<R>, RepositoryError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|row| property_matches(*row, key, value))
            .cloned())
    }

    async fn save(&self, entity: &R) -> Result<EntityId, RepositoryError> {
        let mut table = self.lock()?;
        if natural_key_taken(&table, entity, None) {
            return Err(RepositoryError::conflict(format!(
                "{} natural key already in use",
                R::NAME
            )));
        }
        let id = EntityId::new(table.next_id)
            .ok_or_else(|| RepositoryError::query(format!("{} id sequence exhausted", R::NAME)))?;
        table.rows.insert(id, entity.clone().with_id(id));
        table.next_id += 1;
        debug!(resource = R::NAME, %id, "stored record in memory");
        Ok(id)
    }

    async fn update(&self, id: EntityId, entity: &R) -> Result<bool, RepositoryError> {
        let mut table = self.lock()?;
        if natural_key_taken(&table, entity, Some(id)) {
            return Err(RepositoryError::conflict(format!(
                "{} natural key already in use",
                R::NAME
            )));
        }
        let Some(slot) = table.rows.get_mut(&id) else {
            return Ok(false);
        };
        *slot = entity.clone().with_id(id).retain_secrets(slot);
        Ok(true)
    }

    async fn delete(&self, id: EntityId) -> Result<bool, RepositoryError> {
        Ok(self.lock()?.rows.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn get_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .lock()?
            .rows
            .values()
            .find(|user| user.username == username && user.password.as_deref() == Some(password))
            .cloned())
    }
}

/// The three repositories backing the API.
#[derive(Clone)]
pub struct InMemoryStore {
    users: Arc<InMemoryRepository<User>>,
    accounts: Arc<InMemoryRepository<Account>>,
    transactions: Arc<InMemoryRepository<Transaction>>,
}

impl InMemoryStore {
    /// Store preloaded with [`fixtures`].
    pub fn seeded() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::with_records(fixtures::users())),
            accounts: Arc::new(InMemoryRepository::with_records(fixtures::accounts())),
            transactions: Arc::new(InMemoryRepository::with_records(fixtures::transactions())),
        }
    }

    /// Store without any records.
    pub fn empty() -> Self {
        Self {
            users: Arc::new(InMemoryRepository::new()),
            accounts: Arc::new(InMemoryRepository::new()),
            transactions: Arc::new(InMemoryRepository::new()),
        }
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    pub fn accounts(&self) -> Arc<dyn ResourceRepository<Account>> {
        self.accounts.clone()
    }

    pub fn transactions(&self) -> Arc<dyn ResourceRepository<Transaction>> {
        self.transactions.clone()
    }
}
