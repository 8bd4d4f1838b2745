//! Server settings loaded via OrthoConfig.
//!
//! Values come from `ADMIN_REPORTING_*` environment variables, an optional
//! configuration file, or command-line flags.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use admin_reporting::outbound::persistence::PoolConfig;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// The configured host is not an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host must be an IP address (got {host:?})")]
pub struct InvalidHostError {
    host: String,
}

/// Runtime settings for the admin reporting server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ADMIN_REPORTING")]
pub struct AppSettings {
    /// Listen address; defaults to all interfaces.
    pub host: Option<String>,
    /// Listen port.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Unset makes admin endpoints answer 503.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub db_max_connections: Option<u32>,
    /// Pool checkout timeout in seconds.
    pub db_connection_timeout_secs: Option<u64>,
}

impl AppSettings {
    /// Resolve the socket address to bind.
    ///
    /// # Errors
    /// Returns [`InvalidHostError`] when `host` is not an IP literal.
    pub fn bind_addr(&self) -> Result<SocketAddr, InvalidHostError> {
        let ip = match self.host.as_deref() {
            Some(host) => host.parse::<IpAddr>().map_err(|_| InvalidHostError {
                host: host.to_owned(),
            })?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(ip, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Pool configuration, or `None` when no database URL is set.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        let url = self.database_url.as_deref()?;
        let max_size = self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS);
        let timeout = self
            .db_connection_timeout_secs
            .unwrap_or(DEFAULT_CONNECTION_TIMEOUT_SECS);
        Some(
            PoolConfig::new(url)
                .with_max_size(max_size)
                .with_connection_timeout(Duration::from_secs(timeout)),
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "ADMIN_REPORTING_HOST",
        "ADMIN_REPORTING_PORT",
        "ADMIN_REPORTING_DATABASE_URL",
        "ADMIN_REPORTING_DB_MAX_CONNECTIONS",
        "ADMIN_REPORTING_DB_CONNECTION_TIMEOUT_SECS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("admin-reporting")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default host"),
            SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT)
        );
        assert!(settings.pool_config().is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("ADMIN_REPORTING_HOST", Some("127.0.0.1".to_owned())),
            ("ADMIN_REPORTING_PORT", Some("9090".to_owned())),
            (
                "ADMIN_REPORTING_DATABASE_URL",
                Some("postgres://admin@localhost/users".to_owned()),
            ),
            ("ADMIN_REPORTING_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            (
                "ADMIN_REPORTING_DB_CONNECTION_TIMEOUT_SECS",
                Some("5".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("valid host"),
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 9090)
        );
        let pool = settings.pool_config().expect("database configured");
        assert_eq!(pool.database_url(), "postgres://admin@localhost/users");
        assert_eq!(settings.db_max_connections, Some(4));
        assert_eq!(settings.db_connection_timeout_secs, Some(5));
    }

    #[rstest]
    fn hostname_is_rejected() {
        let settings = AppSettings {
            host: Some("localhost".to_owned()),
            port: None,
            database_url: None,
            db_max_connections: None,
            db_connection_timeout_secs: None,
        };

        let err = settings.bind_addr().expect_err("hostname is not an IP");

        assert_eq!(err.to_string(), "host must be an IP address (got \"localhost\")");
    }
}
