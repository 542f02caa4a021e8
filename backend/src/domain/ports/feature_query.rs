//! Driving port for feature reads.

use async_trait::async_trait;

use crate::domain::{Error, FeatureRecord, NearbyFeature, NearbyQuery};

/// Driving port for feature read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeatureQuery: Send + Sync {
    /// Fetch a feature by raw identifier.
    ///
    /// A malformed identifier yields `Ok(None)` rather than an error.
    async fn get(&self, feature_id: &str) -> Result<Option<FeatureRecord>, Error>;

    /// List features within `query.radius` of `query.origin`, nearest first.
    async fn near(&self, query: NearbyQuery) -> Result<Vec<NearbyFeature>, Error>;
}

/// Fixture query implementation returning no features.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFeatureQuery;

#[async_trait]
impl FeatureQuery for FixtureFeatureQuery {
    async fn get(&self, _feature_id: &str) -> Result<Option<FeatureRecord>, Error> {
        Ok(None)
    }

    async fn near(&self, _query: NearbyQuery) -> Result<Vec<NearbyFeature>, Error> {
        Ok(Vec::new())
    }
}
