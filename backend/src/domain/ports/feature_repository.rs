//! Port for feature and footprint persistence in a geospatial store.

use async_trait::async_trait;

use crate::domain::{BufferRadius, FeatureId, FeatureRecord, NearbyFeature, NearbyQuery, NewFeature};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feature repository adapters.
    pub enum FeatureRepositoryError {
        /// Repository connection could not be established.
        Connection {
            /// Short description of the failure.
            message: String,
        } => "feature repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query {
            /// Short description of the failure.
            message: String,
        } => "feature repository query failed: {message}",
    }
}

/// Port for writing features and running spatial reads.
///
/// Every method commits its own transaction; a failure leaves no partial
/// writes behind.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureRepository: Send + Sync {
    /// Insert a queued feature whose point is built from `feature.coordinates`.
    async fn insert(&self, feature: &NewFeature) -> Result<(), FeatureRepositoryError>;

    /// Buffer a queued feature and mark it done in one atomic step.
    ///
    /// Returns `false` when the feature is missing, already done, or has no
    /// point; nothing is written in that case. Concurrent callers for the
    /// same id observe at most one `true`.
    async fn buffer_if_queued(
        &self,
        feature_id: &FeatureId,
        radius: BufferRadius,
    ) -> Result<bool, FeatureRepositoryError>;

    /// Load a feature merged with its optional footprint area.
    async fn find_by_id(
        &self,
        feature_id: &FeatureId,
    ) -> Result<Option<FeatureRecord>, FeatureRepositoryError>;

    /// List features within the query radius, nearest first.
    async fn find_within(
        &self,
        query: &NearbyQuery,
    ) -> Result<Vec<NearbyFeature>, FeatureRepositoryError>;
}
