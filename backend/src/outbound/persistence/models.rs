//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them to
//! domain records.

use diesel::prelude::*;

use super::schema::{accounts, app_users, transactions};

/// Row read from `app_users`; the role name comes from the joined
/// `user_roles` row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = app_users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = app_users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub role_id: i32,
}

/// Changeset for `app_users`. A `None` password leaves the column untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = app_users)]
pub(crate) struct UserChanges<'a> {
    pub username: &'a str,
    pub password: Option<&'a str>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub role_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: i32,
    pub balance: f64,
    pub account_type: String,
    pub owner_id: i32,
}

/// Column values written on insert and on replace.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = accounts)]
pub(crate) struct AccountValues<'a> {
    pub balance: f64,
    pub account_type: &'a str,
    pub owner_id: i32,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = transactions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TransactionRow {
    pub id: i32,
    pub amount: f64,
    pub description: String,
    pub account_id: i32,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = transactions)]
pub(crate) struct TransactionValues<'a> {
    pub amount: f64,
    pub description: &'a str,
    pub account_id: i32,
}
