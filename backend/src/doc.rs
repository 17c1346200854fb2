//! OpenAPI documentation.
//!
//! The resource routes are registered generically and cannot carry
//! `utoipa::path` annotations, so the document lists the authentication and
//! health paths and publishes the resource records as component schemas.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Account, ErrorCode, Principal, Role, Transaction, User};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::schemas::ErrorSchema;

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth.",
            ))),
        );
    }
}

/// OpenAPI document served to Swagger UI in debug builds.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Banking backend API",
        description = "Users, accounts and transactions behind a session-authenticated REST API."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Role,
        Account,
        Transaction,
        Principal,
        LoginRequest,
        ErrorSchema,
        ErrorCode
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
