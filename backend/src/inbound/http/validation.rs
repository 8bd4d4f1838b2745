//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::admin_error::user_not_found_error;
use crate::domain::{Error, UserId};

const INVALID_USER_ID: &str = "invalid_user_id";

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) fn invalid_user_id_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be an integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": INVALID_USER_ID,
    }))
}

/// Parse a path segment into a [`UserId`].
///
/// Malformed segments are a bad request. Integers that no user can hold
/// (zero or negative) are reported as not found.
pub(crate) fn parse_user_id(value: &str, field: FieldName) -> Result<UserId, Error> {
    let raw = value
        .parse::<i64>()
        .map_err(|_| invalid_user_id_error(field, value))?;
    UserId::new(raw).map_err(|_| user_not_found_error(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("999", 999)]
    fn parses_positive_ids(#[case] raw: &str, #[case] expected: i64) {
        let id = parse_user_id(raw, FieldName::new("id")).expect("valid id");
        assert_eq!(id.as_i64(), expected);
    }

    #[rstest]
    #[case("0", 0)]
    #[case("-4", -4)]
    fn unassignable_ids_are_not_found(#[case] raw: &str, #[case] id: i64) {
        let err = parse_user_id(raw, FieldName::new("id")).expect_err("no such user");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.details().expect("details")["id"], id);
    }

    #[rstest]
    #[case("abc")]
    #[case("1.5")]
    #[case("")]
    fn rejects_invalid_ids(#[case] raw: &str) {
        let err = parse_user_id(raw, FieldName::new("id")).expect_err("invalid id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("details");
        assert_eq!(details["field"], "id");
        assert_eq!(details["value"], raw);
        assert_eq!(details["code"], "invalid_user_id");
    }
}
