//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `backend/migrations` exactly; `diesel print-schema`
//! against a migrated database regenerates them.

diesel::table! {
    /// Lookup table of role names (`client`, `admin`).
    user_roles (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Registered users. `username` carries a unique index.
    app_users (id) {
        id -> Int4,
        username -> Varchar,
        /// Stored as supplied; the store is trusted.
        password -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        email -> Varchar,
        role_id -> Int4,
    }
}

diesel::table! {
    /// Accounts; `owner_id` references `app_users` and cascades on delete.
    accounts (id) {
        id -> Int4,
        balance -> Float8,
        #[sql_name = "type"]
        account_type -> Varchar,
        owner_id -> Int4,
    }
}

diesel::table! {
    /// Transactions; `account_id` references `accounts` and cascades on delete.
    transactions (id) {
        id -> Int4,
        amount -> Float8,
        description -> Varchar,
        account_id -> Int4,
    }
}

diesel::joinable!(app_users -> user_roles (role_id));
diesel::joinable!(accounts -> app_users (owner_id));
diesel::joinable!(transactions -> accounts (account_id));

diesel::allow_tables_to_appear_in_same_query!(user_roles, app_users, accounts, transactions);
