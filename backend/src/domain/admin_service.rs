//! Admin user lookup and reporting service.
//!
//! Implements [`AdminUsersQuery`] over any [`UserRepository`]. The clock is
//! read once per report so the window and `generated_at` agree.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{AdminUsersQuery, UserPersistenceError, UserRepository};
use crate::domain::{
    AdminError, ReportFilter, UserId, UserReport, UserView, resolve_interval,
};

fn log_persistence_failure(operation: &'static str) -> impl Fn(&UserPersistenceError) {
    move |err| error!(operation, error = %err, "user store request failed")
}

/// Domain service implementing the admin driving port.
#[derive(Clone)]
pub struct AdminService<R> {
    users: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> AdminService<R> {
    /// Create a service over `users`, reading time from `clock`.
    pub fn new(users: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

#[async_trait]
impl<R> AdminUsersQuery for AdminService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<UserView>, AdminError> {
        let mut users = self
            .users
            .list_active()
            .await
            .inspect_err(log_persistence_failure("list_users"))?;
        users.retain(|user| !user.is_deleted());
        users.sort_by_key(|user| user.id);
        debug!(count = users.len(), "listed users");
        Ok(users)
    }

    async fn get_user(&self, id: UserId) -> Result<UserView, AdminError> {
        let found = self
            .users
            .find_active_by_id(&id)
            .await
            .inspect_err(log_persistence_failure("get_user"))?;
        match found {
            Some(user) if user.id == id && !user.is_deleted() => Ok(user),
            _ => {
                debug!(%id, "user not found");
                Err(AdminError::UserNotFound { id })
            }
        }
    }

    async fn generate_report(&self, filter: ReportFilter) -> Result<UserReport, AdminError> {
        let request = filter.validate().inspect_err(|err| {
            warn!(period = %filter.period, error = %err, "rejected report filter");
        })?;

        let now = self.clock.utc();
        let interval = resolve_interval(&request, now).inspect_err(|err| {
            error!(error = %err, "report window out of range");
        })?;

        let users = self
            .users
            .find_active_created_within(&interval)
            .await
            .inspect_err(log_persistence_failure("generate_report"))?;
        let report = UserReport::aggregate(&request, &interval, &users, now);

        info!(
            period = %report.period,
            window_start = %interval.start(),
            window_end = %interval.end(),
            total_users = report.total_users,
            "generated user report"
        );
        Ok(report)
    }
}

#[cfg(test)]
#[path = "admin_service_tests.rs"]
mod tests;
