//! Builders for the HTTP adapter state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use admin_reporting::domain::AdminService;
use admin_reporting::domain::ports::{AdminUsersQuery, UnconfiguredUserRepository};
use admin_reporting::inbound::http::state::HttpState;
use admin_reporting::outbound::persistence::DieselUserRepository;

use super::ServerConfig;

/// Build the admin query service from configuration.
///
/// Uses the Diesel-backed repository when a pool is configured. Without one
/// every admin request fails as a store outage.
fn build_admin_query(config: &ServerConfig) -> Arc<dyn AdminUsersQuery> {
    match &config.db_pool {
        Some(pool) => Arc::new(AdminService::new(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DefaultClock),
        )),
        None => {
            warn!("no database pool configured; admin endpoints will answer 503");
            Arc::new(AdminService::new(
                Arc::new(UnconfiguredUserRepository),
                Arc::new(DefaultClock),
            ))
        }
    }
}

pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(build_admin_query(config)))
}
