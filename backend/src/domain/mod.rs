//! Domain primitives, services, and ports.
//!
//! Purpose: hold the admin reporting rules independent of HTTP and the
//! database. Inbound adapters call [`ports::AdminUsersQuery`]; outbound
//! adapters implement [`ports::UserRepository`].
//!
//! Public surface:
//! - Error (alias to `error::Error`) — transport-agnostic error payload.
//! - UserView (alias to `user::UserView`) — read-only user record.
//! - ReportFilter / UserReport (from `report`) — report input and output.
//! - AdminService (from `admin_service`) — the admin use cases.

pub mod admin_error;
pub mod admin_service;
pub mod error;
pub mod ports;
pub mod report;
pub mod trace_id;
pub mod user;

pub use self::admin_error::AdminError;
pub use self::admin_service::AdminService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::report::{
    CustomRange, IntervalOutOfRangeError, ReportFilter, ReportInterval, ReportPeriod,
    ReportRequest, ReportValidationError, UserReport, resolve_interval,
};
pub use self::trace_id::TraceId;
pub use self::user::{
    UNDEFINED_ROLE_LABEL, UserId, UserRole, UserValidationError, UserView, role_label,
};
