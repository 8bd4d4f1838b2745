//! Failures raised by the admin use cases.
//!
//! [`AdminError`] keeps the cause typed so tests can match on it. Adapters
//! convert it into the transport-agnostic [`Error`] payload.

use serde_json::json;

use super::ports::UserPersistenceError;
use super::{Error, IntervalOutOfRangeError, ReportValidationError, UserId};

/// Outcome of a failed admin query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
    /// The report filter was rejected before touching the store.
    #[error(transparent)]
    Validation(#[from] ReportValidationError),
    /// The report window could not be computed.
    #[error(transparent)]
    IntervalOutOfRange(#[from] IntervalOutOfRangeError),
    /// No non-deleted user has this identifier.
    #[error("User with ID {id} not found")]
    UserNotFound { id: UserId },
    /// The user store failed.
    #[error(transparent)]
    Persistence(#[from] UserPersistenceError),
}

/// Payload for a lookup that matched no live user.
///
/// Takes the raw identifier so well-formed ids that can never exist (zero or
/// negative) report the same way as ids that are simply absent.
pub fn user_not_found_error(id: i64) -> Error {
    Error::not_found(format!("User with ID {id} not found")).with_details(json!({ "id": id }))
}

impl From<AdminError> for Error {
    fn from(value: AdminError) -> Self {
        match value {
            AdminError::Validation(err) => {
                let details = match &err {
                    ReportValidationError::InvalidPeriod { value } => json!({
                        "field": "period",
                        "value": value,
                        "code": "invalid_period",
                    }),
                    ReportValidationError::InvalidReportParameters { reason } => json!({
                        "reason": reason,
                        "code": "invalid_report_parameters",
                    }),
                };
                Self::invalid_request(err.to_string()).with_details(details)
            }
            AdminError::UserNotFound { id } => user_not_found_error(id.as_i64()),
            AdminError::Persistence(UserPersistenceError::Connection { message }) => {
                Self::service_unavailable(format!("user store unavailable: {message}"))
            }
            AdminError::Persistence(UserPersistenceError::Timeout { message }) => {
                Self::service_unavailable(format!("user store timed out: {message}"))
                    .with_details(json!({ "code": "timeout" }))
            }
            AdminError::Persistence(UserPersistenceError::Query { message }) => {
                Self::internal(format!("user store query failed: {message}"))
            }
            AdminError::IntervalOutOfRange(err) => Self::internal(err.to_string()),
        }
    }
}
