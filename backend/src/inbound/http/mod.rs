//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod resources;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

use crate::domain::{Account, Transaction, User};

pub use error::ApiResult;

/// Register the authentication and resource routes, plus extractor
/// configuration that reports malformed input as `invalid_request`.
///
/// Mount it inside the `/api/v1` scope, wrapped by the session middleware.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use banking_backend::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::PathConfig::default().error_handler(error::path_error_handler))
        .service(auth::login)
        .service(auth::logout)
        .configure(resources::configure::<User>)
        .configure(resources::configure::<Account>)
        .configure(resources::configure::<Transaction>);
}
