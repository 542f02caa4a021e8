//! Feature data model.
//!
//! A feature is a named point on the WGS 84 ellipsoid. Processing buffers the
//! point into a circular footprint polygon whose area is recorded alongside
//! the feature. The types here hold validated values only; range checks run
//! in the constructors so adapters cannot build out-of-range inputs.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum feature name length, counted in characters.
pub const FEATURE_NAME_MAX: usize = 200;
/// Buffer radius applied by `process` when the caller does not pick one.
pub const DEFAULT_BUFFER_RADIUS_M: f64 = 500.0;
/// Search radius applied by `near` when the caller does not pick one.
pub const DEFAULT_SEARCH_RADIUS_M: u32 = 1000;

/// Validation errors raised by [`FeatureName::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureNameValidationError {
    /// Name was empty or whitespace only.
    #[error("name must not be empty")]
    Empty,
    /// Name exceeded [`FEATURE_NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    TooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Name contained a control character such as NUL, which the store
    /// cannot hold in a text column.
    #[error("name must not contain control characters")]
    ControlCharacter,
}

/// Validation errors raised by [`Coordinates::new`].
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum CoordinatesValidationError {
    /// Latitude outside `[-90, 90]` or not finite.
    #[error("lat must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),
    /// Longitude outside `[-180, 180]` or not finite.
    #[error("lon must be between -180 and 180, got {0}")]
    LongitudeOutOfRange(f64),
}

/// Validation errors raised by the radius constructors.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RadiusValidationError {
    /// Radius was zero, negative, or not finite.
    #[error("radius must be a positive number of metres")]
    NotPositive,
}

/// Stable feature identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(Uuid);

impl FeatureId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for FeatureId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Human readable feature name of 1 to [`FEATURE_NAME_MAX`] characters.
///
/// # Examples
/// ```
/// use geo_ingest::domain::FeatureName;
///
/// let name = FeatureName::new("Site A").expect("valid name");
/// assert_eq!(name.as_str(), "Site A");
/// assert!(FeatureName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureName(String);

impl FeatureName {
    /// Validate and construct a name.
    pub fn new(name: impl Into<String>) -> Result<Self, FeatureNameValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FeatureNameValidationError::Empty);
        }
        if name.chars().count() > FEATURE_NAME_MAX {
            return Err(FeatureNameValidationError::TooLong {
                max: FEATURE_NAME_MAX,
            });
        }
        if name.chars().any(char::is_control) {
            return Err(FeatureNameValidationError::ControlCharacter);
        }
        Ok(Self(name))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for FeatureName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<FeatureName> for String {
    fn from(value: FeatureName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FeatureName {
    type Error = FeatureNameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Geographic position in SRID 4326 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lon: f64,
}

impl Coordinates {
    /// Validate latitude and longitude ranges.
    ///
    /// # Examples
    /// ```
    /// use geo_ingest::domain::Coordinates;
    ///
    /// let montreal = Coordinates::new(45.5017, -73.5673).expect("in range");
    /// assert_eq!(montreal.lon(), -73.5673);
    /// assert!(Coordinates::new(91.0, 0.0).is_err());
    /// ```
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinatesValidationError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinatesValidationError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinatesValidationError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

/// Distance in metres used to buffer a feature point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BufferRadius(f64);

impl BufferRadius {
    /// Validate a positive, finite radius.
    pub fn new(metres: f64) -> Result<Self, RadiusValidationError> {
        if metres.is_finite() && metres > 0.0 {
            Ok(Self(metres))
        } else {
            Err(RadiusValidationError::NotPositive)
        }
    }

    /// Radius in metres.
    pub fn metres(&self) -> f64 {
        self.0
    }
}

impl Default for BufferRadius {
    fn default() -> Self {
        Self(DEFAULT_BUFFER_RADIUS_M)
    }
}

/// Whole-metre radius for proximity searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRadius(u32);

impl SearchRadius {
    /// Validate a strictly positive radius.
    pub fn new(metres: u32) -> Result<Self, RadiusValidationError> {
        if metres == 0 {
            return Err(RadiusValidationError::NotPositive);
        }
        Ok(Self(metres))
    }

    /// Radius in metres.
    pub fn metres(&self) -> u32 {
        self.0
    }
}

impl Default for SearchRadius {
    fn default() -> Self {
        Self(DEFAULT_SEARCH_RADIUS_M)
    }
}

/// Processing lifecycle of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureStatus {
    /// Created and waiting to be buffered.
    Queued,
    /// Buffered; a footprint exists.
    Done,
}

impl FeatureStatus {
    /// Storage and wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for FeatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing an unknown status string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feature status: {0}")]
pub struct UnknownFeatureStatus(pub String);

impl FromStr for FeatureStatus {
    type Err = UnknownFeatureStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "queued" => Ok(Self::Queued),
            "done" => Ok(Self::Done),
            other => Err(UnknownFeatureStatus(other.to_owned())),
        }
    }
}

/// Validated input for inserting a feature.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFeature {
    /// Identifier assigned by the service.
    pub id: FeatureId,
    /// Validated display name.
    pub name: FeatureName,
    /// Point stored as the feature geometry.
    pub coordinates: Coordinates,
}

/// Merged view of a feature and its optional footprint.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    /// Feature identifier.
    pub id: FeatureId,
    /// Name as stored.
    pub name: String,
    /// Processing state.
    pub status: FeatureStatus,
    /// Successful processing runs.
    pub attempts: u32,
    /// Insertion time.
    pub created_at: DateTime<Utc>,
    /// Time of the last state change; `None` while queued.
    pub updated_at: Option<DateTime<Utc>>,
    /// Footprint area in square metres; `None` until processed.
    pub buffer_area_m2: Option<f64>,
}

/// Feature returned by a proximity search.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyFeature {
    /// The matched feature.
    pub feature: FeatureRecord,
    /// Geodesic distance from the query point in metres.
    pub distance_m: f64,
}

/// Parameters for a proximity search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    /// Centre of the search.
    pub origin: Coordinates,
    /// Maximum distance from `origin`.
    pub radius: SearchRadius,
}
