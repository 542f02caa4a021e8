//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{FeatureCommand, FeatureQuery};
#[cfg(test)]
use crate::domain::ports::{FixtureFeatureCommand, FixtureFeatureQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Write port for creating and processing features.
    pub features: Arc<dyn FeatureCommand>,
    /// Read port for lookups and proximity searches.
    pub features_query: Arc<dyn FeatureQuery>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use geo_ingest::domain::ports::{FixtureFeatureCommand, FixtureFeatureQuery};
    /// use geo_ingest::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureFeatureCommand), Arc::new(FixtureFeatureQuery));
    /// let _features = state.features.clone();
    /// ```
    pub fn new(features: Arc<dyn FeatureCommand>, features_query: Arc<dyn FeatureQuery>) -> Self {
        Self {
            features,
            features_query,
        }
    }

    /// Build state from one service implementing both feature ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: FeatureCommand + FeatureQuery + 'static,
    {
        Self::new(service.clone(), service)
    }
}

#[cfg(test)]
impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureFeatureCommand), Arc::new(FixtureFeatureQuery))
    }
}
