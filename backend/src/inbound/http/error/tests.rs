//! Tests for the error response payload formatting and propagation.

use super::*;
use actix_web::body::to_bytes;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body()).await.expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[case(ErrorCode::InvalidRequest, StatusCode::BAD_REQUEST)]
#[case(ErrorCode::Unauthorized, StatusCode::UNAUTHORIZED)]
#[case(ErrorCode::Forbidden, StatusCode::FORBIDDEN)]
#[case(ErrorCode::NotFound, StatusCode::NOT_FOUND)]
#[case(ErrorCode::Conflict, StatusCode::CONFLICT)]
#[case(ErrorCode::NotImplemented, StatusCode::NOT_IMPLEMENTED)]
#[case(ErrorCode::InternalError, StatusCode::INTERNAL_SERVER_ERROR)]
fn status_matches_error_code(#[case] code: ErrorCode, #[case] status: StatusCode) {
    assert_eq!(status_for(code), status);
    assert_eq!(ResponseError::status_code(&Error::of(code)), status);
    assert_eq!(Error::of(code).error_response().status(), status);
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_trace(expected_trace_id: String) {
    let error = Error::conflict("The provided username is already taken.")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "username"}));

    let response = error.error_response();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));

    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 409);
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "The provided username is already taken.");
    assert_eq!(body["details"], json!({"field": "username"}));
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("user store unavailable: connection refused")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": true}));

    let body = body_json(error.error_response()).await;
    assert_eq!(body["statusCode"], 500);
    assert_eq!(body["message"], "Internal server error");
    assert_eq!(body["traceId"], expected_trace_id);
    assert!(body.get("details").is_none());
}

#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let response = Error::not_found("missing").error_response();
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
    let body = body_json(response).await;
    assert!(body.get("traceId").is_none());
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();
    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.details(), None);
}

#[actix_web::test]
async fn json_errors_become_bad_requests() {
    let req = TestRequest::default().to_http_request();
    let err = json_error_handler(JsonPayloadError::ContentType, &req);
    assert_eq!(err.as_response_error().status_code(), StatusCode::BAD_REQUEST);
}
