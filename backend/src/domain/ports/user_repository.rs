//! Driven port for reading user records.
//!
//! Every method returns non-deleted users only. Adapters enforce that filter
//! in the query itself; the domain still re-checks it before aggregating.

use async_trait::async_trait;

use crate::domain::{ReportInterval, UserId, UserView};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// No connection became available before the checkout deadline.
        Timeout { message: String } => "user repository timed out: {message}",
    }
}

/// Read access to the user store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every non-deleted user, ordered by identifier.
    async fn list_active(&self) -> Result<Vec<UserView>, UserPersistenceError>;

    /// Non-deleted users whose `created_at` lies inside `interval`.
    async fn find_active_created_within(
        &self,
        interval: &ReportInterval,
    ) -> Result<Vec<UserView>, UserPersistenceError>;

    /// A single non-deleted user, or `None` when absent or soft deleted.
    async fn find_active_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserView>, UserPersistenceError>;
}

const NOT_CONFIGURED: &str = "no database configured";

/// Store used when no database is configured.
///
/// Every call fails with [`UserPersistenceError::Connection`], so callers see
/// an unavailable store rather than an empty one.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredUserRepository;

#[async_trait]
impl UserRepository for UnconfiguredUserRepository {
    async fn list_active(&self) -> Result<Vec<UserView>, UserPersistenceError> {
        Err(UserPersistenceError::connection(NOT_CONFIGURED))
    }

    async fn find_active_created_within(
        &self,
        _interval: &ReportInterval,
    ) -> Result<Vec<UserView>, UserPersistenceError> {
        Err(UserPersistenceError::connection(NOT_CONFIGURED))
    }

    async fn find_active_by_id(
        &self,
        _id: &UserId,
    ) -> Result<Option<UserView>, UserPersistenceError> {
        Err(UserPersistenceError::connection(NOT_CONFIGURED))
    }
}
