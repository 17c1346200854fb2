//! OpenAPI schema for the error payload.
//!
//! [`crate::domain::Error`] serialises through a private wire struct, so its
//! documented shape is declared here instead of derived.

use utoipa::ToSchema;

use crate::domain::ErrorCode;

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// HTTP status mirrored in the body.
    #[schema(example = 404)]
    status_code: u16,
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCode,
    /// Human-readable message. Internal errors always read
    /// `Internal server error`.
    #[schema(example = "No resource found using provided parameters!")]
    message: String,
    /// Request trace identifier, also sent in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}
