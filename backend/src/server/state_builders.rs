//! Selection of the repositories behind the HTTP state.

use std::sync::Arc;

use tracing::info;

use banking_backend::inbound::http::state::HttpState;
use banking_backend::outbound::memory::InMemoryStore;
use banking_backend::outbound::persistence::{
    DieselAccountRepository, DieselTransactionRepository, DieselUserRepository,
};

use super::ServerConfig;

/// PostgreSQL repositories when a pool is configured, otherwise a freshly
/// seeded in-memory store.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "serving from database");
            HttpState::from_repositories(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselAccountRepository::new(pool.clone())),
                Arc::new(DieselTransactionRepository::new(pool.clone())),
            )
        }
        None => {
            info!(store = "memory", "serving from seeded in-memory store");
            let store = InMemoryStore::seeded();
            HttpState::from_repositories(store.users(), store.accounts(), store.transactions())
        }
    }
}
