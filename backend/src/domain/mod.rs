//! Domain primitives, ports and services.
//!
//! Purpose: Define strongly typed feature entities used by the HTTP and
//! persistence layers. Validation lives in constructors so adapters only
//! handle values that already satisfy the domain invariants.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - FeatureService: implements the feature driving ports.
//! - TraceId: per-request correlation identifier.

pub mod error;
pub mod feature;
pub mod feature_service;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::feature::{
    BufferRadius, Coordinates, CoordinatesValidationError, DEFAULT_BUFFER_RADIUS_M,
    DEFAULT_SEARCH_RADIUS_M, FEATURE_NAME_MAX, FeatureId, FeatureName,
    FeatureNameValidationError, FeatureRecord, FeatureStatus, NearbyFeature, NearbyQuery,
    NewFeature, RadiusValidationError, SearchRadius, UnknownFeatureStatus,
};
pub use self::feature_service::FeatureService;
pub use self::trace_id::TraceId;

/// HTTP header name used to propagate trace identifiers.
pub const TRACE_ID_HEADER: &str = "trace-id";

