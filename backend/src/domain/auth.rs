//! Authentication primitives: login credentials and the authenticated
//! principal.
//!
//! Inbound payload parsing stays outside the domain; handlers build
//! credentials through [`LoginCredentials::try_from_parts`] before calling the
//! login port.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{EntityId, Role, User};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `username` is trimmed and non-empty.
/// - `password` is non-blank; caller whitespace is kept verbatim.
///
/// # Examples
/// ```
/// use banking_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" aanderson ", "password").unwrap();
/// assert_eq!(creds.username(), "aanderson");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.trim().is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username used for the lookup.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Authenticated user as stored in the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    #[schema(value_type = i64)]
    pub id: EntityId,
    pub username: String,
    pub role: Role,
}

impl Principal {
    /// Whether the principal may reach admin-only endpoints.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl TryFrom<&User> for Principal {
    type Error = super::Error;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        let id = user
            .id
            .and_then(EntityId::new)
            .ok_or_else(|| super::Error::internal("authenticated user has no identifier"))?;
        Ok(Self {
            id,
            username: user.username.clone(),
            role: user.role,
        })
    }
}
