//! Outbound adapters implementing the repository ports.
//!
//! - **memory**: mutex-guarded tables seeded with fixture data
//! - **persistence**: PostgreSQL repositories using Diesel
//!
//! Adapters translate between domain records and their storage
//! representation. They contain no business rules.

pub mod memory;
pub mod persistence;
