//! PostgreSQL-backed account repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RepositoryError, ResourceRepository};
use crate::domain::{Account, EntityId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::lookup_values;
use super::models::{AccountRow, AccountValues};
use super::pool::DbPool;
use super::schema::accounts;

/// Diesel implementation of `ResourceRepository<Account>`.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_account(row: AccountRow) -> Account {
    Account {
        id: Some(i64::from(row.id)),
        balance: row.balance,
        account_type: row.account_type,
        owner_id: i64::from(row.owner_id),
    }
}

fn values(entity: &Account) -> Result<AccountValues<'_>, RepositoryError> {
    let owner_id = lookup_values::reference(entity.owner_id).ok_or_else(|| {
        RepositoryError::conflict(format!("owner {} does not exist", entity.owner_id))
    })?;
    Ok(AccountValues {
        balance: entity.balance,
        account_type: &entity.account_type,
        owner_id,
    })
}

#[async_trait]
impl ResourceRepository<Account> for DieselAccountRepository {
    async fn get_all(&self) -> Result<Vec<Account>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AccountRow> = accounts::table
            .select(AccountRow::as_select())
            .order(accounts::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_account).collect())
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<Account>, RepositoryError> {
        let Some(key) = lookup_values::primary_key(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AccountRow> = accounts::table
            .find(key)
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_account))
    }

    async fn get_by_unique_key(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Option<Account>, RepositoryError> {
        let mut query = accounts::table.select(AccountRow::as_select()).into_boxed();
        query = match key {
            "id" | "ownerId" => {
                let Some(number) = lookup_values::integer(value) else {
                    return Ok(None);
                };
                if key == "id" {
                    query.filter(accounts::id.eq(number))
                } else {
                    query.filter(accounts::owner_id.eq(number))
                }
            }
            "balance" => {
                let Some(balance) = lookup_values::float(value) else {
                    return Ok(None);
                };
                query.filter(accounts::balance.eq(balance))
            }
            "type" => query.filter(accounts::account_type.eq(value.to_owned())),
            other => {
                return Err(RepositoryError::unsupported(format!(
                    "account lookup by {other}"
                )));
            }
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AccountRow> = query
            .order(accounts::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_account))
    }

    async fn save(&self, entity: &Account) -> Result<EntityId, RepositoryError> {
        let row = values(entity)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: i32 = diesel::insert_into(accounts::table)
            .values(&row)
            .returning(accounts::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(account_id = id, owner_id = row.owner_id, "inserted account");
        EntityId::new(i64::from(id))
            .ok_or_else(|| RepositoryError::query(format!("store assigned invalid account id {id}")))
    }

    async fn update(&self, id: EntityId, entity: &Account) -> Result<bool, RepositoryError> {
        let Some(key) = lookup_values::primary_key(id) else {
            return Ok(false);
        };
        let changes = values(entity)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(accounts::table.find(key))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: EntityId) -> Result<bool, RepositoryError> {
        let Some(key) = lookup_values::primary_key(id) else {
            return Ok(false);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::delete(accounts::table.find(key))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
