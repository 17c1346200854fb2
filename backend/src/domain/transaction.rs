//! Account transaction data model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EntityId, Resource};

/// Movement of money recorded against an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub amount: f64,
    pub description: String,
    pub account_id: i64,
}

impl Transaction {
    /// Build an unsaved transaction.
    pub fn new(amount: f64, description: impl Into<String>, account_id: i64) -> Self {
        Self {
            id: None,
            amount,
            description: description.into(),
            account_id,
        }
    }
}

impl Resource for Transaction {
    const NAME: &'static str = "transaction";
    const FIELDS: &'static [&'static str] = &["id", "amount", "description", "accountId"];

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
    use serde_json::json;

    #[test]
    fn serialises_account_reference_in_camel_case() {
        let tx = Transaction::new(825.0, "Rent Bill", 1).with_id(EntityId::new(1).expect("id"));
        let value = serde_json::to_value(&tx).expect("json");
        assert_eq!(
            value,
            json!({"id": 1, "amount": 825.0, "description": "Rent Bill", "accountId": 1})
        );
    }
}
