//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Every query filters on `deleted_at IS NULL`. The report query bounds
//! `created_at` with `BETWEEN`, which is inclusive at both ends. A stored
//! row the domain cannot represent fails the read as a query error.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::error;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{ReportInterval, UserId, UserView};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(
        error,
        UserPersistenceError::connection,
        UserPersistenceError::timeout,
    )
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Convert rows to views, failing on the first row the domain cannot represent.
fn rows_to_views(rows: Vec<UserRow>) -> Result<Vec<UserView>, UserPersistenceError> {
    rows.into_iter().map(row_to_view).collect()
}

fn row_to_view(row: UserRow) -> Result<UserView, UserPersistenceError> {
    let id = row.id;
    UserView::try_from(row).map_err(|err| {
        error!(user_id = id, error = %err, "stored user row is invalid");
        UserPersistenceError::query(format!("invalid user row {id}: {err}"))
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_active(&self) -> Result<Vec<UserView>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::deleted_at.is_null())
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_views(rows)
    }

    async fn find_active_created_within(
        &self,
        interval: &ReportInterval,
    ) -> Result<Vec<UserView>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .filter(users::deleted_at.is_null())
            .filter(users::created_at.between(interval.start(), interval.end()))
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_views(rows)
    }

    async fn find_active_by_id(
        &self,
        id: &UserId,
    ) -> Result<Option<UserView>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_i64()))
            .filter(users::deleted_at.is_null())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_view).transpose()
    }
}
