//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories translate between Diesel rows and domain records and carry no
//! business rules. Row structs and table definitions stay private to this
//! module. Connections come from a `bb8` pool driven by `diesel-async`.
//!
//! ```no_run
//! use banking_backend::outbound::persistence::{
//!     DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://bank@localhost/bank";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
mod diesel_error_mapping;
mod diesel_transaction_repository;
mod diesel_user_repository;
mod lookup_values;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_transaction_repository::DieselTransactionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
