//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the admin and health endpoints plus the error schema
//! wrappers from the inbound layer. Swagger UI serves it in debug builds.

use crate::inbound::http::admin::{ReportResponseBody, UserResponseBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Admin reporting API",
        description = "Administrative user lookup and period-aware user reports."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::admin::list_all_users,
        crate::inbound::http::admin::get_user,
        crate::inbound::http::admin::generate_user_report,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserResponseBody,
        ReportResponseBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "admin", description = "Administrative user lookup and reports"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
