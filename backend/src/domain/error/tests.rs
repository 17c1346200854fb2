//! Tests for the domain error taxonomy and its wire format.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest, 400)]
#[case(Error::unauthorized("no auth"), ErrorCode::Unauthorized, 401)]
#[case(Error::forbidden("denied"), ErrorCode::Forbidden, 403)]
#[case(Error::not_found("missing"), ErrorCode::NotFound, 404)]
#[case(Error::conflict("taken"), ErrorCode::Conflict, 409)]
#[case(Error::internal("boom"), ErrorCode::InternalError, 500)]
#[case(Error::not_implemented("nope"), ErrorCode::NotImplemented, 501)]
fn constructors_pair_code_and_status(
    #[case] err: Error,
    #[case] code: ErrorCode,
    #[case] status: u16,
) {
    assert_eq!(err.code(), code);
    assert_eq!(err.status_code(), status);
}

#[rstest]
#[case("")]
#[case("   ")]
fn blank_messages_fall_back_to_default(#[case] message: &str) {
    let err = Error::not_found(message);
    assert_eq!(err.message(), ErrorCode::NotFound.default_message());
}

#[rstest]
fn of_uses_default_message() {
    let err = Error::of(ErrorCode::Conflict);
    assert_eq!(err.message(), "The resource was not persisted.");
}

#[rstest]
fn new_has_no_trace_id_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn serializes_camel_case_payload_with_status(expected_trace_id: String) {
    let err = Error::invalid_request("bad")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"field": "username"}));

    let value = serde_json::to_value(&err).expect("serialize error");
    assert_eq!(
        value,
        json!({
            "statusCode": 400,
            "code": "invalid_request",
            "message": "bad",
            "traceId": expected_trace_id,
            "details": {"field": "username"}
        })
    );
}

#[rstest]
fn omits_absent_optional_fields() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialize error");
    assert!(value.get("traceId").is_none());
    assert!(value.get("details").is_none());
}

#[rstest]
#[tokio::test]
async fn deserializing_ignores_ambient_trace(expected_trace_id: String) {
    let trace_id: TraceId = expected_trace_id.parse().expect("valid UUID");
    let payload = json!({"code": "conflict", "message": "taken"});
    let err = TraceId::scope(trace_id, async move {
        serde_json::from_value::<Error>(payload).expect("deserialize error")
    })
    .await;

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert!(err.trace_id().is_none());
}

#[rstest]
fn redaction_hides_internal_details(expected_trace_id: String) {
    let err = Error::internal("connection refused by 10.0.0.4")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let redacted = err.redacted();
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());
    assert_eq!(redacted.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn redaction_keeps_client_errors() {
    let err = Error::invalid_request("bad").with_details(json!({"field": "id"}));
    assert_eq!(err.redacted(), err);
}
