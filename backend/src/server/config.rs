//! HTTP server configuration object.

use std::net::SocketAddr;

use geo_ingest::domain::BufferRadius;
use geo_ingest::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) buffer_radius: BufferRadius,
}

impl ServerConfig {
    /// Construct a configuration binding `bind_addr` and serving features
    /// from `db_pool`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool) -> Self {
        Self {
            bind_addr,
            db_pool,
            buffer_radius: BufferRadius::default(),
        }
    }

    /// Set the default buffer radius used when processing features.
    #[must_use]
    pub fn with_buffer_radius(mut self, radius: BufferRadius) -> Self {
        self.buffer_radius = radius;
        self
    }
}
