//! PostgreSQL-backed transaction repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{RepositoryError, ResourceRepository};
use crate::domain::{EntityId, Transaction};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::lookup_values;
use super::models::{TransactionRow, TransactionValues};
use super::pool::DbPool;
use super::schema::transactions;

/// Diesel implementation of `ResourceRepository<Transaction>`.
#[derive(Clone)]
pub struct DieselTransactionRepository {
    pool: DbPool,
}

impl DieselTransactionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_transaction(row: TransactionRow) -> Transaction {
    Transaction {
        id: Some(i64::from(row.id)),
        amount: row.amount,
        description: row.description,
        account_id: i64::from(row.account_id),
    }
}

fn values(entity: &Transaction) -> Result<TransactionValues<'_>, RepositoryError> {
    let account_id = lookup_values::reference(entity.account_id).ok_or_else(|| {
        RepositoryError::conflict(format!("account {} does not exist", entity.account_id))
    })?;
    Ok(TransactionValues {
        amount: entity.amount,
        description: &entity.description,
        account_id,
    })
}

#[async_trait]
impl ResourceRepository<Transaction> for DieselTransactionRepository {
    async fn get_all(&self) -> Result<Vec<Transaction>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TransactionRow> = transactions::table
            .select(TransactionRow::as_select())
            .order(transactions::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(row_to_transaction).collect())
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<Transaction>, RepositoryError> {
        let Some(key) = lookup_values::primary_key(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TransactionRow> = transactions::table
            .find(key)
            .select(TransactionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_transaction))
    }

    async fn get_by_unique_key(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Option<Transaction>, RepositoryError> {
        let mut query = transactions::table
            .select(TransactionRow::as_select())
            .into_boxed();
        query = match key {
            "id" | "accountId" => {
                let Some(number) = lookup_values::integer(value) else {
                    return Ok(None);
                };
                if key == "id" {
                    query.filter(transactions::id.eq(number))
                } else {
                    query.filter(transactions::account_id.eq(number))
                }
            }
            "amount" => {
                let Some(amount) = lookup_values::float(value) else {
                    return Ok(None);
                };
                query.filter(transactions::amount.eq(amount))
            }
            "description" => query.filter(transactions::description.eq(value.to_owned())),
            other => {
                return Err(RepositoryError::unsupported(format!(
                    "transaction lookup by {other}"
                )));
            }
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TransactionRow> = query
            .order(transactions::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(row_to_transaction))
    }

    async fn save(&self, entity: &Transaction) -> Result<EntityId, RepositoryError> {
        let row = values(entity)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: i32 = diesel::insert_into(transactions::table)
            .values(&row)
            .returning(transactions::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(transaction_id = id, account_id = row.account_id, "inserted transaction");
        EntityId::new(i64::from(id)).ok_or_else(|| {
            RepositoryError::query(format!("store assigned invalid transaction id {id}"))
        })
    }

    async fn update(&self, id: EntityId, entity: &Transaction) -> Result<bool, RepositoryError> {
        let Some(key) = lookup_values::primary_key(id) else {
            return Ok(false);
        };
        let changes = values(entity)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let affected = diesel::update(transactions::table.find(key))
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
        let affected = diesel::delete(transactions::table.find(key))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
