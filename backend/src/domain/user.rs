//! User data model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{EntityId, Resource};

/// Role granted to a user; gates admin-only endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account holder.
    Client,
    /// Operator allowed to list and delete resources.
    Admin,
}

impl Role {
    /// Name stored in the `user_roles` table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole(s.to_owned())),
        }
    }
}

/// Application user.
///
/// ## Invariants
/// - `username` is unique across the store.
/// - `password` never leaves the service boundary; see [`User::redacted`].
///
/// # Examples
/// ```
/// use banking_backend::domain::{Role, User};
///
/// let user = User::new("aanderson", "password", "Alice", "Anderson", "aanderson@revature.com", Role::Admin);
/// let json = serde_json::to_value(user.redacted()).expect("serialise user");
/// assert!(json.get("password").is_none());
/// assert_eq!(json["firstName"], "Alice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// Build an unsaved user.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: Some(password.into()),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            role,
        }
    }

    /// Copy of the user without the password.
    #[must_use]
    pub fn redacted(mut self) -> Self {
        self.password = None;
        self
    }
}

impl Resource for User {
    const NAME: &'static str = "user";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "username",
        "password",
        "firstName",
        "lastName",
        "email",
        "role",
    ];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id.as_i64());
        self
    }

    fn redacted(self) -> Self {
        User::redacted(self)
    }

    fn natural_key(&self) -> Option<(&'static str, String)> {
        Some(("username", self.username.clone()))
    }

    fn retain_secrets(mut self, stored: &Self) -> Self {
        if self.password.is_none() {
            self.password.clone_from(&stored.password);
        }
        self
    }
}
