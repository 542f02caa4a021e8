//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper returns an `invalid_request` [`Error`] whose details name the
//! offending field, a machine-readable code and, where useful, the raw value.

use serde_json::json;

use crate::domain::{
    Coordinates, CoordinatesValidationError, Error, FEATURE_NAME_MAX, FeatureName,
    FeatureNameValidationError, SearchRadius,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidName,
    InvalidNumber,
    OutOfRange,
    InvalidRadius,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidName => "invalid_name",
            ErrorCode::InvalidNumber => "invalid_number",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidRadius => "invalid_radius",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const LAT: FieldName = FieldName::new("lat");
pub(crate) const LON: FieldName = FieldName::new("lon");
pub(crate) const RADIUS_M: FieldName = FieldName::new("radius_m");

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<serde_json::Value>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_feature_name(value: String) -> Result<FeatureName, Error> {
    let field = NAME.as_str();
    FeatureName::new(value).map_err(|err| {
        let message = match err {
            FeatureNameValidationError::Empty => format!("{field} must not be blank"),
            FeatureNameValidationError::TooLong { .. } => {
                format!("{field} must be at most {FEATURE_NAME_MAX} characters")
            }
            FeatureNameValidationError::ControlCharacter => {
                format!("{field} must not contain control characters")
            }
        };
        ValidationError::new(field, message).with_code(ErrorCode::InvalidName)
    })
}

pub(crate) fn parse_coordinates(lat: f64, lon: f64) -> Result<Coordinates, Error> {
    Coordinates::new(lat, lon).map_err(|err| match err {
        CoordinatesValidationError::LatitudeOutOfRange(value) => out_of_range(LAT, -90, 90, value),
        CoordinatesValidationError::LongitudeOutOfRange(value) => {
            out_of_range(LON, -180, 180, value)
        }
    })
}

fn out_of_range(field: FieldName, min: i32, max: i32, value: f64) -> Error {
    let field = field.as_str();
    let value = if value.is_finite() {
        json!(value)
    } else {
        json!(value.to_string())
    };
    ValidationError::new(field, format!("{field} must be between {min} and {max}"))
        .with_value(ErrorCode::OutOfRange, value)
}

/// Parse a required floating point query parameter.
pub(crate) fn parse_f64_param(value: Option<String>, field: FieldName) -> Result<f64, Error> {
    let raw = require(value, field)?;
    raw.trim().parse::<f64>().map_err(|_| {
        let name = field.as_str();
        ValidationError::new(name, format!("{name} must be a number"))
            .with_value(ErrorCode::InvalidNumber, raw.clone())
    })
}

/// Parse the optional search radius; absent means the default radius.
pub(crate) fn parse_search_radius(value: Option<String>) -> Result<SearchRadius, Error> {
    let Some(raw) = value else {
        return Ok(SearchRadius::default());
    };

    raw.trim()
        .parse::<u32>()
        .ok()
        .and_then(|metres| SearchRadius::new(metres).ok())
        .ok_or_else(|| {
            let name = RADIUS_M.as_str();
            ValidationError::new(name, format!("{name} must be a positive integer"))
                .with_value(ErrorCode::InvalidRadius, raw.clone())
        })
}
