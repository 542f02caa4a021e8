//! Geo ingest backend library.
//!
//! Hexagonal layout: [`domain`] holds types, ports and the feature service;
//! [`inbound`] adapts HTTP requests onto the driving ports; [`outbound`]
//! implements the repository port against PostGIS.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
