//! Feature domain service.
//!
//! Implements the feature driving ports on top of a [`FeatureRepository`].
//! Identifier parsing happens here so malformed ids never reach the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    CreateFeatureRequest, FeatureCommand, FeatureQuery, FeatureRepository,
    FeatureRepositoryError, ProcessFeatureRequest,
};
use crate::domain::{
    BufferRadius, Error, FeatureId, FeatureRecord, NearbyFeature, NearbyQuery, NewFeature,
};

fn map_repository_error(error: FeatureRepositoryError) -> Error {
    match error {
        FeatureRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("feature repository unavailable: {message}"))
        }
        FeatureRepositoryError::Query { message } => {
            Error::internal(format!("feature repository error: {message}"))
        }
    }
}

fn parse_feature_id(raw: &str) -> Option<FeatureId> {
    match raw.parse::<FeatureId>() {
        Ok(id) => Some(id),
        Err(err) => {
            debug!(feature_id = raw, error = %err, "ignoring malformed feature id");
            None
        }
    }
}

/// Feature service implementing both command and query driving ports.
#[derive(Clone)]
pub struct FeatureService<R> {
    feature_repo: Arc<R>,
    default_buffer_radius: BufferRadius,
}

impl<R> FeatureService<R> {
    /// Create a service that buffers with [`BufferRadius::default`].
    pub fn new(feature_repo: Arc<R>) -> Self {
        Self::with_buffer_radius(feature_repo, BufferRadius::default())
    }

    /// Create a service with a configured default buffer radius.
    pub fn with_buffer_radius(feature_repo: Arc<R>, default_buffer_radius: BufferRadius) -> Self {
        Self {
            feature_repo,
            default_buffer_radius,
        }
    }
}

#[async_trait]
impl<R> FeatureCommand for FeatureService<R>
where
    R: FeatureRepository,
{
    async fn create(&self, request: CreateFeatureRequest) -> Result<FeatureId, Error> {
        let feature = NewFeature {
            id: FeatureId::random(),
            name: request.name,
            coordinates: request.coordinates,
        };

        self.feature_repo
            .insert(&feature)
            .await
            .map_err(map_repository_error)?;

        info!(feature_id = %feature.id, "feature queued");
        Ok(feature.id)
    }

    async fn process(&self, request: ProcessFeatureRequest) -> Result<bool, Error> {
        let Some(feature_id) = parse_feature_id(&request.feature_id) else {
            return Ok(false);
        };
        let radius = request.buffer_radius.unwrap_or(self.default_buffer_radius);

        let processed = self
            .feature_repo
            .buffer_if_queued(&feature_id, radius)
            .await
            .map_err(map_repository_error)?;

        if processed {
            info!(%feature_id, radius_m = radius.metres(), "feature buffered");
        } else {
            debug!(%feature_id, "feature not processable");
        }
        Ok(processed)
    }
}

#[async_trait]
impl<R> FeatureQuery for FeatureService<R>
where
    R: FeatureRepository,
{
    async fn get(&self, feature_id: &str) -> Result<Option<FeatureRecord>, Error> {
        let Some(feature_id) = parse_feature_id(feature_id) else {
            return Ok(None);
        };

        self.feature_repo
            .find_by_id(&feature_id)
            .await
            .map_err(map_repository_error)
    }

    async fn near(&self, query: NearbyQuery) -> Result<Vec<NearbyFeature>, Error> {
        self.feature_repo
            .find_within(&query)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "feature_service_tests.rs"]
mod tests;
