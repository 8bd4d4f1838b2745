//! Shared Diesel and pool error mapping for repositories.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors onto a repository's connection and timeout constructors.
pub fn map_basic_pool_error<E, C, T>(error: PoolError, connection: C, timeout: T) -> E
where
    C: FnOnce(String) -> E,
    T: FnOnce(String) -> E,
{
    match error {
        PoolError::Timeout { .. } => timeout(error.to_string()),
        PoolError::Checkout { message } | PoolError::Build { message } => connection(message),
    }
}

/// Map common Diesel error variants into query/connection constructors.
///
/// `NotFound` and query-builder failures map to query errors; a closed
/// connection maps to a connection error.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}
