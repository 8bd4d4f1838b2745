//! User read model exposed to administrators.
//!
//! The user store owns these records; this crate only reads them. A record
//! with `deleted_at` set is soft deleted and must never surface in a listing,
//! a lookup, or a report.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Histogram key used for records without a recognised role.
pub const UNDEFINED_ROLE_LABEL: &str = "undefined";

/// Validation errors returned when constructing user primitives.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifiers are generated by the store and start at one.
    #[error("user id must be a positive integer, got {value}")]
    NonPositiveId { value: i64 },
    /// The stored role is not one of the known roles.
    #[error("unknown user role: {value}")]
    UnknownRole { value: String },
}

/// Store-assigned user identifier.
///
/// # Examples
/// ```
/// use admin_reporting::domain::UserId;
///
/// let id = UserId::new(42).expect("positive id");
/// assert_eq!(id.as_i64(), 42);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate and wrap a raw identifier.
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::NonPositiveId { value });
        }
        Ok(Self(value))
    }

    /// Raw integer value, as stored.
    #[must_use]
    pub const fn as_i64(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

/// Known user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// Regular account.
    User,
    /// Content moderation access.
    Moderator,
}

impl UserRole {
    /// Lowercase label used in storage and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
            Self::Moderator => "moderator",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            "moderator" => Ok(Self::Moderator),
            other => Err(UserValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

/// Read-only view of one stored user.
///
/// `role` is `None` when the stored value is unset or unrecognised; such users
/// are reported under [`UNDEFINED_ROLE_LABEL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Contact email address.
    pub email: String,
    /// Unique login name.
    pub username: String,
    /// Optional given name.
    pub first_name: Option<String>,
    /// Optional family name.
    pub last_name: Option<String>,
    /// Recognised role, if any.
    pub role: Option<UserRole>,
    /// Whether the account is enabled.
    pub is_active: bool,
    /// Creation timestamp; drives report periods.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Soft-deletion marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl UserView {
    /// True when the record is soft deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Histogram label for this user's role.
    #[must_use]
    pub const fn role_label(&self) -> &'static str {
        role_label(self.role)
    }
}

/// Label for an optional role, falling back to [`UNDEFINED_ROLE_LABEL`].
///
/// # Examples
/// ```
/// use admin_reporting::domain::{UserRole, role_label};
///
/// assert_eq!(role_label(Some(UserRole::Moderator)), "moderator");
/// assert_eq!(role_label(None), "undefined");
/// ```
#[must_use]
pub const fn role_label(role: Option<UserRole>) -> &'static str {
    match role {
        Some(role) => role.as_str(),
        None => UNDEFINED_ROLE_LABEL,
    }
}
