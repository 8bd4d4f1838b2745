//! Period-aware user reports.
//!
//! A report is built in three steps, each usable on its own:
//!
//! 1. [`ReportFilter`] is validated into a [`ReportRequest`]. Nothing touches
//!    the user store until this succeeds.
//! 2. [`resolve_interval`] turns the request and a frozen `now` into a closed
//!    [`ReportInterval`] on `created_at`.
//! 3. [`UserReport::aggregate`] reduces the users inside that interval into
//!    totals and a role histogram.
//!
//! ## Calendar policy
//! - `week` subtracts seven calendar days. All timestamps are UTC so this is
//!   exactly 168 hours.
//! - `month` and `year` subtract one and twelve calendar months. When the
//!   target month is shorter, the day is clamped to that month's last day:
//!   31 March becomes 28 (or 29) February, and 29 February becomes 28 February
//!   the year before.
//! - `custom` covers `[startDate, endDate]` inclusively. A bare date means
//!   midnight UTC; an RFC 3339 value keeps its offset.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserView;

/// Named report window selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    /// The last seven days.
    Week,
    /// The last calendar month.
    Month,
    /// The last calendar year.
    Year,
    /// An explicit `[start, end]` range.
    Custom,
}

impl ReportPeriod {
    /// Wire label of the period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportPeriod {
    type Err = ReportValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "custom" => Ok(Self::Custom),
            other => Err(ReportValidationError::InvalidPeriod {
                value: other.to_owned(),
            }),
        }
    }
}

/// Caller-input faults detected before any data access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportValidationError {
    /// The period is not one of `week`, `month`, `year`, `custom`.
    #[error("Period must be one of: week, month, year, custom (got {value:?})")]
    InvalidPeriod { value: String },
    /// Custom range bounds are missing, malformed, or out of order.
    #[error("Invalid report parameters: {reason}")]
    InvalidReportParameters { reason: String },
}

impl ReportValidationError {
    fn invalid_parameters(reason: impl Into<String>) -> Self {
        Self::InvalidReportParameters {
            reason: reason.into(),
        }
    }
}

/// Unvalidated report request as received from a caller.
///
/// # Examples
/// ```
/// use admin_reporting::domain::{ReportFilter, ReportPeriod};
///
/// let request = ReportFilter::new("custom")
///     .with_range("2023-01-01", "2023-12-31")
///     .validate()
///     .expect("valid custom range");
/// assert_eq!(request.period(), ReportPeriod::Custom);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    /// Raw period label.
    pub period: String,
    /// Raw ISO-8601 start date; only read for `custom`.
    pub start_date: Option<String>,
    /// Raw ISO-8601 end date; only read for `custom`.
    pub end_date: Option<String>,
}

impl ReportFilter {
    /// Filter for `period` without custom bounds.
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            start_date: None,
            end_date: None,
        }
    }

    /// Attach custom bounds.
    #[must_use]
    pub fn with_range(mut self, start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self.end_date = Some(end_date.into());
        self
    }

    /// Validate into a [`ReportRequest`].
    ///
    /// Bounds supplied alongside a preset period are ignored, not parsed.
    pub fn validate(&self) -> Result<ReportRequest, ReportValidationError> {
        match self.period.parse::<ReportPeriod>()? {
            ReportPeriod::Week => Ok(ReportRequest::Week),
            ReportPeriod::Month => Ok(ReportRequest::Month),
            ReportPeriod::Year => Ok(ReportRequest::Year),
            ReportPeriod::Custom => {
                let (Some(start), Some(end)) = (&self.start_date, &self.end_date) else {
                    return Err(ReportValidationError::invalid_parameters(
                        "Start date and end date are required for custom period",
                    ));
                };
                let start = parse_report_date("startDate", start)?;
                let end = parse_report_date("endDate", end)?;
                CustomRange::new(start, end).map(ReportRequest::Custom)
            }
        }
    }
}

impl TryFrom<ReportFilter> for ReportRequest {
    type Error = ReportValidationError;

    fn try_from(value: ReportFilter) -> Result<Self, Self::Error> {
        value.validate()
    }
}

fn parse_report_date(field: &str, raw: &str) -> Result<DateTime<Utc>, ReportValidationError> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| {
            ReportValidationError::invalid_parameters(format!(
                "{field} must be a valid ISO date string"
            ))
        })
}

/// Ordered custom bounds, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl CustomRange {
    /// Build a range; equal bounds are allowed.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, ReportValidationError> {
        if start > end {
            return Err(ReportValidationError::invalid_parameters(
                "Start date must be before end date",
            ));
        }
        Ok(Self { start, end })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Validated report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRequest {
    /// Last seven days.
    Week,
    /// Last calendar month.
    Month,
    /// Last calendar year.
    Year,
    /// Explicit inclusive range.
    Custom(CustomRange),
}

impl ReportRequest {
    /// The period this request selects.
    #[must_use]
    pub const fn period(&self) -> ReportPeriod {
        match self {
            Self::Week => ReportPeriod::Week,
            Self::Month => ReportPeriod::Month,
            Self::Year => ReportPeriod::Year,
            Self::Custom(_) => ReportPeriod::Custom,
        }
    }

    /// Custom bounds, present only for [`ReportRequest::Custom`].
    #[must_use]
    pub const fn custom_range(&self) -> Option<&CustomRange> {
        match self {
            Self::Custom(range) => Some(range),
            Self::Week | Self::Month | Self::Year => None,
        }
    }
}

/// Closed `created_at` interval a report covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ReportInterval {
    /// Build an interval, or `None` when `start > end`.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `timestamp` falls inside the interval.
    #[must_use]
    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Calendar arithmetic left chrono's representable range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cannot resolve {period} report window relative to {now}")]
pub struct IntervalOutOfRangeError {
    /// Period being resolved.
    pub period: ReportPeriod,
    /// Frozen reference time.
    pub now: DateTime<Utc>,
}

/// Resolve the `created_at` interval for `request` relative to `now`.
///
/// # Examples
/// ```
/// use admin_reporting::domain::{ReportRequest, resolve_interval};
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 31, 12, 0, 0).unwrap();
/// let interval = resolve_interval(&ReportRequest::Month, now).expect("in range");
/// assert_eq!(interval.start(), Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());
/// assert_eq!(interval.end(), now);
/// ```
pub fn resolve_interval(
    request: &ReportRequest,
    now: DateTime<Utc>,
) -> Result<ReportInterval, IntervalOutOfRangeError> {
    let floor = match request {
        ReportRequest::Week => now.checked_sub_days(Days::new(7)),
        ReportRequest::Month => now.checked_sub_months(Months::new(1)),
        ReportRequest::Year => now.checked_sub_months(Months::new(12)),
        ReportRequest::Custom(range) => {
            return ReportInterval::new(range.start(), range.end()).ok_or(
                IntervalOutOfRangeError {
                    period: ReportPeriod::Custom,
                    now,
                },
            );
        }
    };

    floor
        .and_then(|start| ReportInterval::new(start, now))
        .ok_or(IntervalOutOfRangeError {
            period: request.period(),
            now,
        })
}

/// Summary statistics over the users created inside a report window.
///
/// ## Invariants
/// - `inactive_users == total_users - active_users`.
/// - The `users_by_role` values sum to `total_users`, and only observed roles
///   appear as keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserReport {
    /// Non-deleted users created inside the window.
    pub total_users: u64,
    /// Subset of `total_users` with an active account.
    pub active_users: u64,
    /// `total_users - active_users`.
    pub inactive_users: u64,
    /// Counts keyed by role label, `"undefined"` for unrecognised roles.
    pub users_by_role: BTreeMap<String, u64>,
    /// Echo of the requested period.
    pub period: ReportPeriod,
    /// Custom lower bound; `None` for presets.
    pub start_date: Option<DateTime<Utc>>,
    /// Custom upper bound; `None` for presets.
    pub end_date: Option<DateTime<Utc>>,
    /// The frozen `now` the window was resolved against.
    pub generated_at: DateTime<Utc>,
}

impl UserReport {
    /// Reduce `users` into a report.
    ///
    /// Soft-deleted users and users created outside `interval` are skipped
    /// here as well, so the invariants hold whatever the store returned.
    pub fn aggregate<'a, I>(
        request: &ReportRequest,
        interval: &ReportInterval,
        users: I,
        generated_at: DateTime<Utc>,
    ) -> Self
    where
        I: IntoIterator<Item = &'a UserView>,
    {
        let mut total_users = 0_u64;
        let mut active_users = 0_u64;
        let mut users_by_role = BTreeMap::new();

        for user in users
            .into_iter()
            .filter(|user| !user.is_deleted() && interval.contains(user.created_at))
        {
            total_users += 1;
            if user.is_active {
                active_users += 1;
            }
            *users_by_role
                .entry(user.role_label().to_owned())
                .or_insert(0_u64) += 1;
        }

        let range = request.custom_range();
        Self {
            total_users,
            active_users,
            inactive_users: total_users - active_users,
            users_by_role,
            period: request.period(),
            start_date: range.map(CustomRange::start),
            end_date: range.map(CustomRange::end),
            generated_at,
        }
    }
}
