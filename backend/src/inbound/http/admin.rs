//! Admin user lookup and reporting handlers.
//!
//! ```text
//! GET /api/v1/admin/all-users
//! GET /api/v1/admin/users/{id}
//! GET /api/v1/admin/user/reports?period=custom&startDate=2023-01-01&endDate=2023-12-31
//! ```

use std::collections::BTreeMap;

use actix_web::{get, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ReportFilter, ReportPeriod, UserReport, UserView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id};

/// User payload returned by the admin endpoints.
///
/// Soft-deletion state is never exposed; deleted users are not returned.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    /// Store-assigned identifier.
    #[schema(example = 42)]
    pub id: i64,
    /// Contact address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Login name.
    #[schema(example = "ada")]
    pub username: String,
    /// Given name, when recorded.
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    /// Family name, when recorded.
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    /// Role label, `"undefined"` when the stored role is unset or unknown.
    #[schema(example = "admin")]
    pub role: String,
    /// Whether the account is enabled.
    pub is_active: bool,
    /// Creation time; decides which report periods include the user.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl From<UserView> for UserResponseBody {
    fn from(value: UserView) -> Self {
        let role = value.role_label().to_owned();
        Self {
            id: value.id.as_i64(),
            email: value.email,
            username: value.username,
            first_name: value.first_name,
            last_name: value.last_name,
            role,
            is_active: value.is_active,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Query string for `GET /api/v1/admin/user/reports`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ReportQuery {
    /// One of `week`, `month`, `year`, `custom`.
    #[param(example = "month")]
    pub period: Option<String>,
    /// Inclusive ISO-8601 start; required for `custom`.
    #[param(example = "2023-01-01")]
    pub start_date: Option<String>,
    /// Inclusive ISO-8601 end; required for `custom`.
    #[param(example = "2023-12-31")]
    pub end_date: Option<String>,
}

impl From<ReportQuery> for ReportFilter {
    fn from(value: ReportQuery) -> Self {
        // An absent period is reported like any other unknown value.
        Self {
            period: value.period.unwrap_or_default(),
            start_date: value.start_date,
            end_date: value.end_date,
        }
    }
}

/// Report payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponseBody {
    /// Live users created inside the window.
    #[schema(example = 120)]
    pub total_users: u64,
    /// Users counted in `totalUsers` with an enabled account.
    #[schema(example = 100)]
    pub active_users: u64,
    /// Users counted in `totalUsers` with a disabled account.
    #[schema(example = 20)]
    pub inactive_users: u64,
    /// Counts per role label; only observed roles appear.
    pub users_by_role: BTreeMap<String, u64>,
    /// Requested period.
    #[schema(value_type = String, example = "custom")]
    pub period: ReportPeriod,
    /// Custom range start, echoed only for `custom` reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,
    /// Custom range end, echoed only for `custom` reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Instant the window was computed from.
    pub generated_at: DateTime<Utc>,
}

impl From<UserReport> for ReportResponseBody {
    fn from(value: UserReport) -> Self {
        Self {
            total_users: value.total_users,
            active_users: value.active_users,
            inactive_users: value.inactive_users,
            users_by_role: value.users_by_role,
            period: value.period,
            start_date: value.start_date,
            end_date: value.end_date,
            generated_at: value.generated_at,
        }
    }
}

/// List every non-deleted user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use admin_reporting::inbound::http::admin::list_all_users;
///
/// let app = App::new().service(list_all_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/admin/all-users",
    responses(
        (status = 200, description = "Users", body = [UserResponseBody]),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "listAllUsers"
)]
#[get("/admin/all-users")]
pub async fn list_all_users(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<UserResponseBody>>> {
    let users = state.admin.list_users().await?;
    Ok(web::Json(users.into_iter().map(Into::into).collect()))
}

/// Fetch one non-deleted user by identifier.
#[utoipa::path(
    get,
    path = "/api/v1/admin/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponseBody),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "getUser"
)]
#[get("/admin/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponseBody>> {
    let id = parse_user_id(&path.into_inner(), FieldName::new("id"))?;
    let user = state.admin.get_user(id).await?;
    Ok(web::Json(user.into()))
}

/// Generate a user report for a preset or custom period.
#[utoipa::path(
    get,
    path = "/api/v1/admin/user/reports",
    params(ReportQuery),
    responses(
        (status = 200, description = "User report", body = ReportResponseBody),
        (status = 400, description = "Invalid report parameters", body = ErrorSchema),
        (status = 503, description = "User store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["admin"],
    operation_id = "generateUserReport"
)]
#[get("/admin/user/reports")]
pub async fn generate_user_report(
    state: web::Data<HttpState>,
    query: web::Query<ReportQuery>,
) -> ApiResult<web::Json<ReportResponseBody>> {
    let report = state.admin.generate_report(query.into_inner().into()).await?;
    Ok(web::Json(report.into()))
}
