//! Driving port for feature mutations.
//!
//! Creation inserts a queued point; processing buffers it into a footprint.

use async_trait::async_trait;

use crate::domain::{BufferRadius, Coordinates, Error, FeatureId, FeatureName};

/// Request to create a feature.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFeatureRequest {
    /// Validated display name.
    pub name: FeatureName,
    /// Location of the feature.
    pub coordinates: Coordinates,
}

/// Request to buffer a queued feature.
///
/// `feature_id` is the raw identifier supplied by the caller; a value that
/// does not parse as a UUID is treated as "not processable".
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessFeatureRequest {
    /// Identifier exactly as the caller sent it.
    pub feature_id: String,
    /// Buffer radius override; the service default applies when `None`.
    pub buffer_radius: Option<BufferRadius>,
}

/// Driving port for feature write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureCommand: Send + Sync {
    /// Create a queued feature and return its identifier.
    async fn create(&self, request: CreateFeatureRequest) -> Result<FeatureId, Error>;

    /// Buffer a queued feature.
    ///
    /// Returns `Ok(false)` for malformed ids, unknown features and features
    /// that are already done. Callers cannot tell those cases apart.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use geo_ingest::domain::ports::{FeatureCommand, FixtureFeatureCommand, ProcessFeatureRequest};
    ///
    /// # async fn example() -> Result<(), geo_ingest::domain::Error> {
    /// let processed = FixtureFeatureCommand
    ///     .process(ProcessFeatureRequest {
    ///         feature_id: "not-a-uuid".to_owned(),
    ///         buffer_radius: None,
    ///     })
    ///     .await?;
    /// assert!(!processed);
    /// # Ok(())
    /// # }
    /// ```
    async fn process(&self, request: ProcessFeatureRequest) -> Result<bool, Error>;
}

/// Fixture command implementation for tests that do not need persistence.
///
/// Creation hands out fresh identifiers; processing never finds a feature.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeatureCommand;

#[async_trait]
impl FeatureCommand for FixtureFeatureCommand {
    async fn create(&self, _request: CreateFeatureRequest) -> Result<FeatureId, Error> {
        Ok(FeatureId::random())
    }

    async fn process(&self, _request: ProcessFeatureRequest) -> Result<bool, Error> {
        Ok(false)
    }
}
