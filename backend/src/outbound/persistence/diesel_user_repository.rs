//! PostgreSQL-backed `UserRepository`.
//!
//! Users live in `app_users` and reference their role through
//! `user_roles`; every read joins the two so the domain sees a [`Role`].

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{RepositoryError, ResourceRepository, UserRepository};
use crate::domain::{EntityId, Role, User};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::lookup_values;
use super::models::{NewUserRow, UserChanges, UserRow};
use super::pool::DbPool;
use super::schema::{app_users, user_roles};

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user((row, role_name): (UserRow, String)) -> Result<User, RepositoryError> {
    let role = Role::from_str(&role_name).map_err(|err| RepositoryError::query(err.to_string()))?;
    Ok(User {
        id: Some(i64::from(row.id)),
        username: row.username,
        password: Some(row.password),
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        role,
    })
}

async fn role_id(conn: &mut AsyncPgConnection, role: Role) -> Result<i32, RepositoryError> {
    user_roles::table
        .filter(user_roles::name.eq(role.as_str()))
        .select(user_roles::id)
        .first::<i32>(conn)
        .await
        .optional()
        .map_err(map_diesel_error)?
        .ok_or_else(|| RepositoryError::query(format!("role {role} is not provisioned")))
}

#[async_trait]
impl ResourceRepository<User> for DieselUserRepository {
    async fn get_all(&self) -> Result<Vec<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(UserRow, String)> = app_users::table
            .inner_join(user_roles::table)
            .select((UserRow::as_select(), user_roles::name))
            .order(app_users::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_user).collect()
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Option<User>, RepositoryError> {
        let Some(key) = lookup_values::primary_key(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(UserRow, String)> = app_users::table
            .inner_join(user_roles::table)
            .filter(app_users::id.eq(key))
            .select((UserRow::as_select(), user_roles::name))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn get_by_unique_key(
        &self,
        key: &str,
        value: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let mut query = app_users::table
            .inner_join(user_roles::table)
            .select((UserRow::as_select(), user_roles::name))
            .into_boxed();
        query = match key {
            "id" => {
                let Some(id) = lookup_values::integer(value) else {
                    return Ok(None);
                };
                query.filter(app_users::id.eq(id))
            }
            "username" => query.filter(app_users::username.eq(value.to_owned())),
            "password" => query.filter(app_users::password.eq(value.to_owned())),
            "firstName" => query.filter(app_users::first_name.eq(value.to_owned())),
            "lastName" => query.filter(app_users::last_name.eq(value.to_owned())),
            "email" => query.filter(app_users::email.eq(value.to_owned())),
            "role" => query.filter(user_roles::name.eq(value.to_owned())),
            other => return Err(RepositoryError::unsupported(format!("user lookup by {other}"))),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(UserRow, String)> = query
            .order(app_users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn save(&self, entity: &User) -> Result<EntityId, RepositoryError> {
        let password = entity
            .password
            .as_deref()
            .ok_or_else(|| RepositoryError::query("new users need a password"))?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            username: &entity.username,
            password,
            first_name: &entity.first_name,
            last_name: &entity.last_name,
            email: &entity.email,
            role_id: role_id(&mut conn, entity.role).await?,
        };

        let id: i32 = diesel::insert_into(app_users::table)
            .values(&row)
            .returning(app_users::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(user_id = id, "inserted user");
        EntityId::new(i64::from(id))
            .ok_or_else(|| RepositoryError::query(format!("store assigned invalid user id {id}")))
    }

    async fn update(&self, id: EntityId, entity: &User) -> Result<bool, RepositoryError> {
        let Some(key) = lookup_values::primary_key(id) else {
            return Ok(false);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserChanges {
            username: &entity.username,
            password: entity.password.as_deref(),
            first_name: &entity.first_name,
            last_name: &entity.last_name,
            email: &entity.email,
            role_id: role_id(&mut conn, entity.role).await?,
        };

        let affected = diesel::update(app_users::table.find(key))
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
        let affected = diesel::delete(app_users::table.find(key))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn get_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<(UserRow, String)> = app_users::table
            .inner_join(user_roles::table)
            .filter(app_users::username.eq(username))
            .filter(app_users::password.eq(password))
            .select((UserRow::as_select(), user_roles::name))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }
}
