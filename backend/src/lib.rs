//! Administrative user lookup and reporting service.
//!
//! The crate is laid out hexagonally: [`domain`] holds the reporting rules
//! and ports, [`inbound`] exposes them over HTTP, and [`outbound`] backs the
//! user store with PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
