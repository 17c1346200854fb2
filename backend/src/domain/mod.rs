//! Domain primitives, ports and services.
//!
//! Purpose: define the resources exposed by the API (users, accounts,
//! transactions), the predicates that guard them, the closed error taxonomy
//! and the generic service that ties validation to persistence. Nothing here
//! knows about HTTP or SQL.
//!
//! Public surface:
//! - `User`, `Account`, `Transaction`: resource records; see [`Resource`].
//! - `EntityId` / `IdCandidate`: validated and untrusted identifiers.
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - `ResourceService`: the validated CRUD pipeline.

pub mod account;
pub mod auth;
pub mod error;
pub mod id;
pub mod ports;
pub mod resource;
pub mod resource_service;
pub mod trace_id;
pub mod transaction;
pub mod user;
pub mod validation;

pub use self::account::Account;
pub use self::auth::{LoginCredentials, LoginValidationError, Principal};
pub use self::error::{Error, ErrorCode};
pub use self::id::{EntityId, IdCandidate};
pub use self::resource::Resource;
pub use self::resource_service::{
    AccountService, ResourceService, TransactionService, UserService,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::transaction::Transaction;
pub use self::user::{Role, UnknownRole, User};
