//! Hostel backend library modules.
//!
//! The crate follows a ports-and-adapters layout: `domain` holds the request
//! lifecycles and the ports they depend on, `inbound` adapts HTTP requests
//! onto the domain services, and `outbound` provides the in-memory and
//! PostgreSQL repositories.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
