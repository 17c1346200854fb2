//! Bank account data model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EntityId, Resource};

/// Account owned by a user.
///
/// `owner_id` must reference an existing user; the store enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub balance: f64,
    /// Account category such as `Savings` or `Checking`.
    #[serde(rename = "type")]
    pub account_type: String,
    pub owner_id: i64,
}

impl Account {
    /// Build an unsaved account.
    pub fn new(balance: f64, account_type: impl Into<String>, owner_id: i64) -> Self {
        Self {
            id: None,
            balance,
            account_type: account_type.into(),
            owner_id,
        }
    }
}

impl Resource for Account {
    const NAME: &'static str = "account";
    const FIELDS: &'static [&'static str] = &["id", "balance", "type", "ownerId"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id.as_i64());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn category_travels_as_type() {
        let account = Account::new(14233.0, "Savings", 1);
        let value = serde_json::to_value(&account).expect("json");
        assert_eq!(value, json!({"balance": 14233.0, "type": "Savings", "ownerId": 1}));
    }

    #[rstest]
    fn accepts_fractional_balances() {
        let account: Account =
            serde_json::from_value(json!({"id": 3, "balance": 12.5, "type": "Checking", "ownerId": 2}))
                .expect("account");
        assert_eq!(account.id, Some(3));
        assert!((account.balance - 12.5).abs() < f64::EPSILON);
    }

    #[rstest]
    fn has_no_natural_key() {
        assert!(Account::new(1.0, "Savings", 1).natural_key().is_none());
    }
}
