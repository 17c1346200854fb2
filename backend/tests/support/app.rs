//! Full API application over a seeded in-memory store.

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use banking_backend::Trace;
use banking_backend::inbound::http::configure_api;
use banking_backend::inbound::http::state::HttpState;
use banking_backend::outbound::memory::InMemoryStore;
use serde_json::json;

/// Every seeded user shares this password.
pub const SEED_PASSWORD: &str = "password";

/// The API scope wired as in production, minus `Secure` cookies.
pub async fn init_app(
    store: InMemoryStore,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let state = HttpState::from_repositories(store.users(), store.accounts(), store.transactions());
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(web::scope("/api/v1").wrap(session).configure(configure_api)),
    )
    .await
}

/// Log `username` in and return the session cookie.
pub async fn login<S, B>(app: &S, username: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth")
            .set_json(json!({ "username": username, "password": SEED_PASSWORD }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "login as {username}");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie")
}
