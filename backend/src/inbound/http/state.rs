//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::AdminUsersQuery;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub admin: Arc<dyn AdminUsersQuery>,
}

impl HttpState {
    /// Construct state from the admin use-case port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use admin_reporting::domain::AdminService;
    /// use admin_reporting::domain::ports::UnconfiguredUserRepository;
    /// use admin_reporting::inbound::http::state::HttpState;
    /// use mockable::DefaultClock;
    ///
    /// let service = AdminService::new(Arc::new(UnconfiguredUserRepository), Arc::new(DefaultClock));
    /// let state = HttpState::new(Arc::new(service));
    /// let _admin = state.admin.clone();
    /// ```
    pub fn new(admin: Arc<dyn AdminUsersQuery>) -> Self {
        Self { admin }
    }
}
