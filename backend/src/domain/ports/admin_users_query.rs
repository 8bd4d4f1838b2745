//! Driving port for administrative user lookup and reporting.
//!
//! Inbound adapters call this port; they never see the repository. Failures
//! come back as [`AdminError`] so each adapter can choose its own mapping.

use async_trait::async_trait;

use crate::domain::{AdminError, ReportFilter, UserId, UserReport, UserView};

/// Use-case port behind the admin endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminUsersQuery: Send + Sync {
    /// Every non-deleted user, ordered by identifier.
    async fn list_users(&self) -> Result<Vec<UserView>, AdminError>;

    /// One non-deleted user.
    ///
    /// Returns [`AdminError::UserNotFound`] when the user is absent or soft
    /// deleted.
    async fn get_user(&self, id: UserId) -> Result<UserView, AdminError>;

    /// Validate `filter`, resolve its window, and aggregate matching users.
    async fn generate_report(&self, filter: ReportFilter) -> Result<UserReport, AdminError>;
}
