//! Resource API handlers shared by users, accounts and transactions.
//!
//! ```text
//! GET    /api/v1/accounts              (admin) list, or search with ?type=Savings
//! GET    /api/v1/accounts/{id}
//! POST   /api/v1/accounts              201 with the stored record
//! PUT    /api/v1/accounts              202 true
//! DELETE /api/v1/accounts              (admin) 202 true
//! ```
//!
//! Every handler is generic over [`RoutedResource`]; [`configure`] registers
//! the table above for one resource.

use std::collections::BTreeMap;
use std::sync::Arc;

use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::debug;

use crate::domain::ports::ResourceOperations;
use crate::domain::validation::is_empty_map;
use crate::domain::{Account, Error, IdCandidate, Resource, Transaction, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Resource reachable through the REST boundary.
pub trait RoutedResource: Resource {
    /// Collection path relative to the API scope, e.g. `/users`.
    const COLLECTION: &'static str;

    /// Service handling this resource.
    fn operations(state: &HttpState) -> Arc<dyn ResourceOperations<Self>>;
}

impl RoutedResource for User {
    const COLLECTION: &'static str = "/users";

    fn operations(state: &HttpState) -> Arc<dyn ResourceOperations<Self>> {
        Arc::clone(&state.users)
    }
}

impl RoutedResource for Account {
    const COLLECTION: &'static str = "/accounts";

    fn operations(state: &HttpState) -> Arc<dyn ResourceOperations<Self>> {
        Arc::clone(&state.accounts)
    }
}

impl RoutedResource for Transaction {
    const COLLECTION: &'static str = "/transactions";

    fn operations(state: &HttpState) -> Arc<dyn ResourceOperations<Self>> {
        Arc::clone(&state.transactions)
    }
}

/// Register the collection and item routes for `R`.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use banking_backend::domain::Account;
/// use banking_backend::inbound::http::resources::configure;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure::<Account>));
/// ```
pub fn configure<R: RoutedResource>(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(R::COLLECTION)
            .route(web::get().to(list_or_search::<R>))
            .route(web::post().to(create::<R>))
            .route(web::put().to(update::<R>))
            .route(web::delete().to(remove::<R>)),
    )
    .service(
        web::resource(format!("{}/{{id}}", R::COLLECTION)).route(web::get().to(get_by_id::<R>)),
    );
}

/// Collect query pairs into a map, rejecting keys given more than once.
fn single_valued(pairs: Vec<(String, String)>) -> ApiResult<BTreeMap<String, String>> {
    let mut query = BTreeMap::new();
    for (key, value) in pairs {
        if query.contains_key(&key) {
            return Err(Error::invalid_request(format!("{key} may only be given once."))
                .with_details(json!({ "field": key })));
        }
        query.insert(key, value);
    }
    Ok(query)
}

/// List every record, or look one up when a single query key is given.
async fn list_or_search<R: RoutedResource>(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<Vec<(String, String)>>,
) -> ApiResult<HttpResponse> {
    let principal = session.require_admin()?;
    let operations = R::operations(&state);
    let query = single_valued(query.into_inner())?;
    if is_empty_map(&query) {
        debug!(resource = R::NAME, admin = %principal.username, "listing records");
        let records = operations.get_all().await?;
        return Ok(HttpResponse::Ok().json(records));
    }
    let record = operations.get_by_unique_key(&query).await?;
    Ok(HttpResponse::Ok().json(record))
}

async fn get_by_id<R: RoutedResource>(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<web::Json<R>> {
    let record = R::operations(&state)
        .get_by_id(IdCandidate::from(id.as_str()))
        .await?;
    Ok(web::Json(record))
}

async fn create<R: RoutedResource>(
    state: web::Data<HttpState>,
    payload: web::Json<Option<R>>,
) -> ApiResult<HttpResponse> {
    let record = R::operations(&state).add_new(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(record))
}

async fn update<R: RoutedResource>(
    state: web::Data<HttpState>,
    payload: web::Json<Option<R>>,
) -> ApiResult<HttpResponse> {
    let updated = R::operations(&state).update(payload.into_inner()).await?;
    Ok(HttpResponse::Accepted().json(updated))
}

async fn remove<R: RoutedResource>(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Option<R>>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    let deleted = R::operations(&state).delete(payload.into_inner()).await?;
    Ok(HttpResponse::Accepted().json(deleted))
}
