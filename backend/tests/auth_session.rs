//! Login, logout and session gating over the seeded store.

#[path = "support/app.rs"]
mod app_support;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use app_support::{SEED_PASSWORD, init_app, login};
use banking_backend::outbound::memory::InMemoryStore;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[actix_web::test]
async fn login_returns_the_user_without_password() {
    let app = init_app(InMemoryStore::seeded()).await;

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/v1/auth")
            .set_json(json!({"username": "ddavis", "password": SEED_PASSWORD}))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.response().cookies().any(|cookie| cookie.name() == "session"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], 4);
    assert_eq!(body["role"], "admin");
    assert!(body.get("password").is_none());
}

#[rstest]
#[case(json!({"username": "ddavis", "password": "wrong"}), StatusCode::UNAUTHORIZED, "unauthorized")]
#[case(json!({"username": "nobody", "password": "password"}), StatusCode::UNAUTHORIZED, "unauthorized")]
#[case(json!({"username": "  ", "password": "password"}), StatusCode::BAD_REQUEST, "invalid_request")]
#[case(json!({"username": "ddavis"}), StatusCode::BAD_REQUEST, "invalid_request")]
#[actix_web::test]
async fn failed_logins_set_no_session(
    #[case] payload: Value,
    #[case] status: StatusCode,
    #[case] code: &str,
) {
    let app = init_app(InMemoryStore::seeded()).await;

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/v1/auth")
            .set_json(payload)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), status);
    assert!(!res.response().cookies().any(|cookie| cookie.name() == "session"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], code);
}

#[rstest]
#[actix_web::test]
async fn logout_ends_the_session() {
    let app = init_app(InMemoryStore::seeded()).await;
    let cookie = login(&app, "ddavis").await;

    let res = test::call_service(
        &app,
        TestRequest::delete()
            .uri("/api/v1/auth")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let cleared = res
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(actix_web::cookie::Cookie::into_owned)
        .expect("removal cookie");
    assert!(cleared.value().is_empty());

    let res = test::call_service(
        &app,
        TestRequest::get()
            .uri("/api/v1/users")
            .cookie(cleared)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[actix_web::test]
async fn password_survives_an_update_that_omits_it() {
    let app = init_app(InMemoryStore::seeded()).await;

    let res = test::call_service(
        &app,
        TestRequest::put()
            .uri("/api/v1/users")
            .set_json(json!({
                "id": 5,
                "username": "eeinstein",
                "firstName": "Emmy",
                "lastName": "Einstein",
                "email": "eeinstein@revature.com",
                "role": "client"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::ACCEPTED);

    let cookie = login(&app, "eeinstein").await;
    assert_eq!(cookie.name(), "session");
}
