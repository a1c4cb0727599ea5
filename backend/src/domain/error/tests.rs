//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

#[fixture]
fn invalid_request_case() -> Error {
    Error::invalid_request("bad").with_details(json!({"field": "seats"}))
}

#[rstest]
fn invalid_request_constructor_sets_code() {
    let err = Error::invalid_request("bad");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.message(), "bad");
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
#[case(Error::invalid_request("bad"), 400)]
#[case(Error::unauthorized("login required"), 401)]
#[case(Error::forbidden("denied"), 403)]
#[case(Error::not_found("missing"), 404)]
#[case(Error::internal("boom"), 500)]
#[case(Error::service_unavailable("down"), 503)]
fn each_kind_maps_to_a_distinct_status(#[case] err: Error, #[case] status: u16) {
    assert_eq!(err.code().http_status(), status);
}

#[rstest]
fn serialises_with_camel_case_and_snake_case_code(invalid_request_case: Error) {
    let value = serde_json::to_value(&invalid_request_case).expect("serialise error");
    assert_eq!(
        value,
        json!({
            "code": "invalid_request",
            "message": "bad",
            "details": {"field": "seats"},
        })
    );
}

#[rstest]
fn deserialising_blank_message_fails() {
    let payload = json!({"code": "not_found", "message": "  "});
    let result = serde_json::from_value::<Error>(payload);
    assert!(result.is_err());
}

#[rstest]
fn display_uses_message() {
    let err = Error::forbidden("not your ride");
    assert_eq!(err.to_string(), "not your ride");
}
