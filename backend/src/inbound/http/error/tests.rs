//! Tests for HTTP error mapping.

use super::*;
use crate::domain::ports::UserPersistenceError;
use crate::domain::{AdminError, ReportValidationError, UserId};
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id is valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

#[rstest]
#[case::invalid_period(
    AdminError::from(ReportValidationError::InvalidPeriod { value: "daily".to_owned() }),
    StatusCode::BAD_REQUEST
)]
#[case::missing_user(
    AdminError::UserNotFound { id: UserId::new(999).expect("positive id") },
    StatusCode::NOT_FOUND
)]
#[case::store_down(
    AdminError::from(UserPersistenceError::connection("refused")),
    StatusCode::SERVICE_UNAVAILABLE
)]
#[case::store_timeout(
    AdminError::from(UserPersistenceError::timeout("pool")),
    StatusCode::SERVICE_UNAVAILABLE
)]
#[case::query_failure(
    AdminError::from(UserPersistenceError::query("syntax")),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn admin_errors_map_to_statuses(#[case] error: AdminError, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&Error::from(error)), status);
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("user store query failed: relation \"users\" does not exist")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"sql": "SELECT 1"}));

    let payload = assert_error_response(
        error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;

    assert_eq!(payload.code(), ErrorCode::InternalError);
    assert_eq!(payload.message(), "Internal server error");
    assert!(payload.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_message_and_details(expected_trace_id: String) {
    let error = Error::invalid_request("Invalid report parameters: Start date must be before end date")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"code": "invalid_report_parameters"}));

    let payload =
        assert_error_response(error, StatusCode::BAD_REQUEST, Some(expected_trace_id.as_str()))
            .await;

    assert_eq!(
        payload.message(),
        "Invalid report parameters: Start date must be before end date"
    );
    assert_eq!(
        payload.details(),
        Some(&json!({"code": "invalid_report_parameters"}))
    );
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::not_found("User with ID 4 not found");

    let payload = assert_error_response(error, StatusCode::NOT_FOUND, None).await;

    assert_eq!(payload.code(), ErrorCode::NotFound);
    assert_eq!(payload.trace_id(), None);
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    let err: Error = actix_web::error::ErrorBadRequest("boom").into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}
