//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::warn;

use crate::domain::{UserId, UserRole, UserValidationError, UserView};

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<UserRow> for UserView {
    type Error = UserValidationError;

    /// Fails only on a non-positive id; an unknown role degrades to `None`.
    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = UserId::new(row.id)?;
        let role = row.role.as_deref().and_then(|raw| match raw.parse::<UserRole>() {
            Ok(role) => Some(role),
            Err(err) => {
                warn!(user_id = row.id, error = %err, "unrecognised role, reporting as undefined");
                None
            }
        });

        Ok(Self {
            id,
            email: row.email,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            role,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}
