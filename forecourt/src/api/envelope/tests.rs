//! Tests for the response envelope shape.

use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::json;

use super::*;
use crate::domain::{ErrorClassifier, ErrorCode, Failure};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    pump_number: u8,
}

#[fixture]
fn observed_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("fixture timestamp is unambiguous")
}

#[rstest]
fn success_envelope_serialises_without_error_fields() {
    let response = ApiResponse::success(Payload { pump_number: 7 });
    let value = serde_json::to_value(response).expect("serialise envelope");
    assert_eq!(
        value,
        json!({
            "success": true,
            "data": { "pumpNumber": 7 },
        })
    );
}

#[rstest]
fn acknowledgement_omits_the_payload() {
    let response: ApiResponse<Payload> = ApiResponse::acknowledgement("Password reset successful");
    let value = serde_json::to_value(response).expect("serialise envelope");
    assert_eq!(
        value,
        json!({
            "success": true,
            "message": "Password reset successful",
        })
    );
}

#[rstest]
fn failure_envelope_round_trips(observed_at: DateTime<Utc>) {
    let error = ApiError::new(
        401,
        ErrorCode::AUTH_INVALID_CREDENTIALS,
        "Invalid email or password",
        observed_at,
    );
    let response: ApiResponse<Payload> = ApiResponse::failure(error.clone());

    let value = serde_json::to_value(response.clone()).expect("serialise envelope");
    assert_eq!(value.get("success"), Some(&json!(false)));

    let decoded: ApiResponse<Payload> =
        serde_json::from_value(value).expect("deserialise envelope");
    assert_eq!(decoded, response);
    assert_eq!(decoded.into_result(), Err(error));
}

#[rstest]
fn decoded_failures_feed_the_classifier_unchanged(observed_at: DateTime<Utc>) {
    let error = ApiError::new(
        503,
        ErrorCode::SYSTEM_MAINTENANCE,
        "Maintenance mode is active",
        observed_at,
    );
    let response: ApiResponse<Payload> = ApiResponse::failure(error.clone());
    let surfaced = response
        .into_result()
        .expect_err("failure arm yields the error");

    let classifier = ErrorClassifier::new();
    let classified = classifier.classify(Failure::Classified(surfaced));
    assert_eq!(classified, error);
}

#[rstest]
fn success_with_attached_error_is_rejected() {
    let payload = json!({
        "success": true,
        "data": { "pumpNumber": 7 },
        "error": {
            "status": 500,
            "message": "boom",
            "code": 1300,
            "timestamp": "2025-06-01T12:00:00Z",
        },
    });
    assert!(serde_json::from_value::<ApiResponse<Payload>>(payload).is_err());
}

#[rstest]
fn failure_without_error_is_rejected() {
    let payload = json!({ "success": false });
    assert!(serde_json::from_value::<ApiResponse<Payload>>(payload).is_err());
}

#[rstest]
fn success_message_survives_round_trips() {
    let response = ApiResponse::success_with_message(Payload { pump_number: 3 }, "Login successful");
    let value = serde_json::to_value(response.clone()).expect("serialise envelope");
    let decoded: ApiResponse<Payload> =
        serde_json::from_value(value).expect("deserialise envelope");
    assert_eq!(decoded, response);
    assert!(decoded.is_success());
}
