//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and only depend on the
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, ResourceOperations, ResourceRepository, UserRepository};
use crate::domain::{Account, AccountService, Transaction, TransactionService, User, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub users: Arc<dyn ResourceOperations<User>>,
    pub accounts: Arc<dyn ResourceOperations<Account>>,
    pub transactions: Arc<dyn ResourceOperations<Transaction>>,
}

impl HttpState {
    /// Bundle the ports used by the handlers.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use banking_backend::domain::{AccountService, ResourceService, TransactionService, UserService};
    /// use banking_backend::inbound::http::state::HttpState;
    /// use banking_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = InMemoryStore::seeded();
    /// let users: Arc<UserService> = Arc::new(ResourceService::new(store.users()));
    /// let accounts: AccountService = ResourceService::new(store.accounts());
    /// let transactions: TransactionService = ResourceService::new(store.transactions());
    /// let state = HttpState::new(users.clone(), users, Arc::new(accounts), Arc::new(transactions));
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        users: Arc<dyn ResourceOperations<User>>,
        accounts: Arc<dyn ResourceOperations<Account>>,
        transactions: Arc<dyn ResourceOperations<Transaction>>,
    ) -> Self {
        Self {
            login,
            users,
            accounts,
            transactions,
        }
    }

    /// Wrap each repository in its resource service. The user service also
    /// answers logins.
    pub fn from_repositories(
        users: Arc<dyn UserRepository>,
        accounts: Arc<dyn ResourceRepository<Account>>,
        transactions: Arc<dyn ResourceRepository<Transaction>>,
    ) -> Self {
        let users = Arc::new(UserService::new(users));
        Self::new(
            users.clone(),
            users,
            Arc::new(AccountService::new(accounts)),
            Arc::new(TransactionService::new(transactions)),
        )
    }
}
