//! Feature HTTP handlers.
//!
//! ```text
//! POST /features
//! POST /features/{id}/process
//! GET  /features/near?lat=..&lon=..&radius_m=..
//! GET  /features/{id}
//! ```
//!
//! Register [`features_near`] before [`get_feature`] so the literal `near`
//! segment is not captured as an id.

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{HttpRequest, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateFeatureRequest, ProcessFeatureRequest};
use crate::domain::{Error, FeatureRecord, NearbyFeature, NearbyQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, FeatureStatusSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    LAT, LON, NAME, parse_coordinates, parse_f64_param, parse_feature_name, parse_search_radius,
    require,
};

/// Request payload for creating a feature.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateFeatureRequestBody {
    /// Display name, 1 to 200 characters.
    #[schema(example = "Site A")]
    pub name: Option<String>,
    /// Latitude in degrees, -90..=90.
    #[schema(example = 45.5017)]
    pub lat: Option<f64>,
    /// Longitude in degrees, -180..=180.
    #[schema(example = -73.5673)]
    pub lon: Option<f64>,
}

/// Response payload carrying a newly created feature id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFeatureResponseBody {
    /// Identifier of the queued feature.
    #[schema(format = "uuid")]
    pub id: String,
}

/// Response payload for a successful processing run.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProcessFeatureResponseBody {
    /// Always `true`; unprocessable features return 404.
    pub processed: bool,
}

/// Feature merged with its optional footprint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeatureResponseBody {
    /// Feature identifier.
    #[schema(format = "uuid")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// `queued` or `done`.
    #[schema(value_type = FeatureStatusSchema)]
    pub status: String,
    /// Successful processing runs.
    pub attempts: u32,
    /// Insertion time, RFC 3339.
    #[schema(format = "date-time")]
    pub created_at: String,
    /// Last state change, RFC 3339; null while queued.
    #[schema(format = "date-time")]
    pub updated_at: Option<String>,
    /// Footprint area in square metres; null until processed.
    pub buffer_area_m2: Option<f64>,
}

/// Feature returned by a proximity search.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NearbyFeatureResponseBody {
    /// Feature fields, flattened into the item.
    #[serde(flatten)]
    pub feature: FeatureResponseBody,
    /// Geodesic distance from the query point in metres.
    pub distance_m: f64,
}

/// Query parameters for proximity searches.
///
/// Values are taken as strings so malformed numbers produce the standard
/// validation envelope.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearQueryParams {
    /// Latitude of the search origin, -90..=90.
    #[param(value_type = f64)]
    pub lat: Option<String>,
    /// Longitude of the search origin, -180..=180.
    #[param(value_type = f64)]
    pub lon: Option<String>,
    /// Search radius in metres; defaults to 1000.
    #[param(value_type = Option<u32>, minimum = 1)]
    pub radius_m: Option<String>,
}

impl From<FeatureRecord> for FeatureResponseBody {
    fn from(value: FeatureRecord) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name,
            status: value.status.to_string(),
            attempts: value.attempts,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.map(|ts| ts.to_rfc3339()),
            buffer_area_m2: value.buffer_area_m2,
        }
    }
}

impl From<NearbyFeature> for NearbyFeatureResponseBody {
    fn from(value: NearbyFeature) -> Self {
        Self {
            feature: FeatureResponseBody::from(value.feature),
            distance_m: value.distance_m,
        }
    }
}

fn parse_create_request(payload: CreateFeatureRequestBody) -> Result<CreateFeatureRequest, Error> {
    let name = parse_feature_name(require(payload.name, NAME)?)?;
    let lat = require(payload.lat, LAT)?;
    let lon = require(payload.lon, LON)?;
    let coordinates = parse_coordinates(lat, lon)?;
    Ok(CreateFeatureRequest { name, coordinates })
}

fn parse_near_query(params: NearQueryParams) -> Result<NearbyQuery, Error> {
    let lat = parse_f64_param(params.lat, LAT)?;
    let lon = parse_f64_param(params.lon, LON)?;
    let origin = parse_coordinates(lat, lon)?;
    let radius = parse_search_radius(params.radius_m)?;
    Ok(NearbyQuery { origin, radius })
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid JSON body: {err}")).into()
}

/// JSON extractor configuration that reports body errors in the standard
/// error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {err}")).into()
}

/// Query extractor configuration that reports malformed query strings in the
/// standard error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

/// Create a queued feature at the given coordinates.
#[utoipa::path(
    post,
    path = "/features",
    request_body = CreateFeatureRequestBody,
    responses(
        (status = 200, description = "Feature queued", body = CreateFeatureResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["features"],
    operation_id = "createFeature"
)]
#[post("/features")]
pub async fn create_feature(
    state: web::Data<HttpState>,
    payload: web::Json<CreateFeatureRequestBody>,
) -> ApiResult<web::Json<CreateFeatureResponseBody>> {
    let request = parse_create_request(payload.into_inner())?;
    let id = state.features.create(request).await?;
    Ok(web::Json(CreateFeatureResponseBody { id: id.to_string() }))
}

/// Buffer a queued feature into its footprint.
///
/// Unknown, malformed and already processed ids all return 404.
#[utoipa::path(
    post,
    path = "/features/{id}/process",
    params(("id" = String, Path, description = "Feature identifier")),
    responses(
        (status = 200, description = "Feature processed", body = ProcessFeatureResponseBody),
        (status = 404, description = "Feature not found or already processed", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["features"],
    operation_id = "processFeature"
)]
#[post("/features/{id}/process")]
pub async fn process_feature(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProcessFeatureResponseBody>> {
    let processed = state
        .features
        .process(ProcessFeatureRequest {
            feature_id: path.into_inner(),
            buffer_radius: None,
        })
        .await?;

    if processed {
        Ok(web::Json(ProcessFeatureResponseBody { processed }))
    } else {
        Err(Error::not_found("feature not found or already processed"))
    }
}

/// List features within `radius_m` metres of a point, nearest first.
#[utoipa::path(
    get,
    path = "/features/near",
    params(NearQueryParams),
    responses(
        (status = 200, description = "Features in range", body = [NearbyFeatureResponseBody]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["features"],
    operation_id = "featuresNear"
)]
#[get("/features/near")]
pub async fn features_near(
    state: web::Data<HttpState>,
    params: web::Query<NearQueryParams>,
) -> ApiResult<web::Json<Vec<NearbyFeatureResponseBody>>> {
    let query = parse_near_query(params.into_inner())?;
    let features = state.features_query.near(query).await?;
    Ok(web::Json(
        features
            .into_iter()
            .map(NearbyFeatureResponseBody::from)
            .collect(),
    ))
}

/// Fetch a feature and its footprint area.
#[utoipa::path(
    get,
    path = "/features/{id}",
    params(("id" = String, Path, description = "Feature identifier")),
    responses(
        (status = 200, description = "Feature", body = FeatureResponseBody),
        (status = 404, description = "Feature not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["features"],
    operation_id = "getFeature"
)]
#[get("/features/{id}")]
pub async fn get_feature(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<FeatureResponseBody>> {
    let feature_id = path.into_inner();
    let record = state
        .features_query
        .get(&feature_id)
        .await?
        .ok_or_else(|| Error::not_found("feature not found"))?;
    Ok(web::Json(FeatureResponseBody::from(record)))
}

/// Register the feature routes in the required order.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_feature)
        .service(process_feature)
        .service(features_near)
        .service(get_feature);
}

#[cfg(test)]
#[path = "features_tests.rs"]
mod tests;
