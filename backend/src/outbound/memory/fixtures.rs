//! Seed records loaded into the in-memory store.

use crate::domain::{Account, Role, Transaction, User};

const SEED_PASSWORD: &str = "password";

fn user(username: &str, first: &str, last: &str, role: Role) -> User {
    User::new(
        username,
        SEED_PASSWORD,
        first,
        last,
        format!("{username}@revature.com"),
        role,
    )
}

/// Five users; `ddavis` is the only admin.
pub fn users() -> Vec<User> {
    vec![
        user("aanderson", "Alice", "Anderson", Role::Client),
        user("bbailey", "Bob", "Bailey", Role::Client),
        user("ccountryman", "Charlie", "Countryman", Role::Client),
        user("ddavis", "Daniel", "Davis", Role::Admin),
        user("eeinstein", "Emily", "Einstein", Role::Client),
    ]
}

/// Eight accounts spread over users 1, 2, 3 and 5.
pub fn accounts() -> Vec<Account> {
    vec![
        Account::new(14233.0, "Savings", 1),
        Account::new(1736.0, "Checking", 1),
        Account::new(6523.0, "Checking", 2),
        Account::new(1235.0, "Savings", 3),
        Account::new(45641.0, "Savings", 5),
        Account::new(526.0, "Checking", 3),
        Account::new(341.0, "Checking", 5),
        Account::new(57461.0, "Savings", 2),
    ]
}

/// Twelve transactions, three per account 1, 2, 3 and 5.
pub fn transactions() -> Vec<Transaction> {
    [1_i64, 2, 3, 5]
        .into_iter()
        .zip([
            [825.0, 216.12, 64.45],
            [1250.0, 415.12, 561.10],
            [975.0, 323.56, 112.48],
            [700.0, 113.57, 84.25],
        ])
        .flat_map(|(account_id, [rent, electric, debit])| {
            [
                Transaction::new(rent, "Rent Bill", account_id),
                Transaction::new(electric, "Electric Bill", account_id),
                Transaction::new(debit, "Debit Transaction", account_id),
            ]
        })
        .collect()
}
