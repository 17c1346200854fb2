//! Domain-level error taxonomy.
//!
//! Every service operation either yields a value or fails with exactly one
//! [`Error`]. The taxonomy is closed: each [`ErrorCode`] carries a fixed HTTP
//! status and a default message. Errors stay transport agnostic here; the
//! HTTP adapter turns them into responses.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed shape, type, or id validation.
    InvalidRequest,
    /// Credential check failed or no principal is present.
    Unauthorized,
    /// The principal lacks the role required by the endpoint.
    Forbidden,
    /// A structurally valid lookup matched nothing.
    NotFound,
    /// A write violates a uniqueness or consistency rule.
    Conflict,
    /// The operation is intentionally unsupported by the current backend.
    NotImplemented,
    /// Unclassified failure from the data access layer.
    InternalError,
}

impl ErrorCode {
    /// HTTP status paired with this code.
    ///
    /// # Examples
    /// ```
    /// use banking_backend::domain::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::Conflict.http_status(), 409);
    /// ```
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::InvalidRequest => 400,
            Self::Unauthorized => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::InternalError => 500,
            Self::NotImplemented => 501,
        }
    }

    /// Message used when a caller does not supply one.
    #[must_use]
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "Invalid parameters provided!",
            Self::Unauthorized => "Authentication failed!",
            Self::Forbidden => "Insufficient privileges for this operation.",
            Self::NotFound => "No resource found using provided parameters!",
            Self::Conflict => "The resource was not persisted.",
            Self::NotImplemented => "No implementation for this operation.",
            Self::InternalError => "An unexpected error occurred.",
        }
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is never blank; blank input falls back to
///   [`ErrorCode::default_message`].
///
/// # Examples
/// ```
/// use banking_backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("no account with id 9999");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.status_code(), 404);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

impl Error {
    /// Create an error, capturing the trace identifier in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    /// Create an error carrying the default message for `code`.
    pub fn of(code: ErrorCode) -> Self {
        Self::new(code, code.default_message())
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// HTTP status paired with the error code.
    pub fn status_code(&self) -> u16 {
        self.code.http_status()
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured at construction, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Supplementary structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the trace identifier.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.trace_id = Some(id.into());
        self
    }

    /// Attach structured details to the error.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Convenience constructor for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Convenience constructor for [`ErrorCode::NotImplemented`].
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotImplemented, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Copy of this error that is safe to show to clients.
    ///
    /// Internal errors lose their message and details; the trace id survives
    /// so operators can correlate the response with logs.
    #[must_use]
    pub fn redacted(&self) -> Self {
        if self.code != ErrorCode::InternalError {
            return self.clone();
        }
        Self {
            code: ErrorCode::InternalError,
            message: "Internal server error".to_owned(),
            trace_id: self.trace_id.clone(),
            details: None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    #[serde(default)]
    status_code: Option<u16>,
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        Self {
            status_code: Some(value.code.http_status()),
            code: value.code,
            message: value.message,
            trace_id: value.trace_id,
            details: value.details,
        }
    }
}

impl From<ErrorDto> for Error {
    fn from(value: ErrorDto) -> Self {
        let ErrorDto {
            code,
            message,
            trace_id,
            details,
            ..
        } = value;
        let message = if message.trim().is_empty() {
            code.default_message().to_owned()
        } else {
            message
        };
        // Payloads are taken at face value; the ambient trace id is ignored.
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

#[cfg(test)]
mod tests;
