//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`ResourceRepository`, `UserRepository`) are implemented by
//! outbound adapters. Driving ports (`ResourceOperations`, `LoginService`) are
//! implemented by the domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod login_service;
mod resource_operations;
mod resource_repository;
mod user_repository;

pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use resource_operations::ResourceOperations;
#[cfg(test)]
pub use resource_operations::MockResourceOperations;
pub use resource_repository::{RepositoryError, ResourceRepository};
#[cfg(test)]
pub use resource_repository::MockResourceRepository;
pub use user_repository::UserRepository;
