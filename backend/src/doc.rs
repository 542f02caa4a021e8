//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the feature and health endpoints plus the schema
//! wrappers from [`crate::inbound::http::schemas`]. Swagger UI serves it in
//! debug builds and `cargo run --bin openapi-dump` prints it for tooling.

use utoipa::OpenApi;

use crate::inbound::http::features::{
    CreateFeatureRequestBody, CreateFeatureResponseBody, FeatureResponseBody,
    NearbyFeatureResponseBody, ProcessFeatureResponseBody,
};
use crate::inbound::http::health::ProbeBody;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, FeatureStatusSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geo ingest API",
        description = "Store point features, buffer them into footprints with PostGIS and run proximity searches."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::features::create_feature,
        crate::inbound::http::features::process_feature,
        crate::inbound::http::features::features_near,
        crate::inbound::http::features::get_feature,
        crate::inbound::http::health::healthz,
        crate::inbound::http::health::readyz,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        FeatureStatusSchema,
        CreateFeatureRequestBody,
        CreateFeatureResponseBody,
        ProcessFeatureResponseBody,
        FeatureResponseBody,
        NearbyFeatureResponseBody,
        ProbeBody,
    )),
    tags(
        (name = "features", description = "Feature ingestion, buffering and proximity search"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
