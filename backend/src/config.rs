//! Service configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `GEO_INGEST_*` environment variables over an
//! optional configuration file. Every key is optional; accessors supply the
//! defaults.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{BufferRadius, DEFAULT_BUFFER_RADIUS_M, RadiusValidationError};
use crate::outbound::persistence::{DEFAULT_POOL_MAX_SIZE, PoolConfig};

const DEFAULT_DATABASE_URL: &str = "postgres://postgres:postgres@db:5432/appdb";
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
const DEFAULT_PORT: u16 = 8000;

/// Errors raised when settings hold unusable values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    /// `host` is not an IP address.
    #[error("host must be an IP address, got {0:?}")]
    InvalidHost(String),
    /// `buffer_radius_m` is zero, negative or not finite.
    #[error("buffer_radius_m must be a positive number of metres: {0}")]
    InvalidBufferRadius(#[from] RadiusValidationError),
}

/// Runtime settings for the geo ingest service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GEO_INGEST")]
pub struct AppSettings {
    /// PostgreSQL connection URL; the database needs PostGIS.
    pub database_url: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    pub port: Option<u16>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections the pool keeps open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait when checking out a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Default buffer radius applied when processing features.
    pub buffer_radius_m: Option<f64>,
    /// Leave the schema alone at start-up instead of applying migrations.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl AppSettings {
    /// Database URL, falling back to the compose default.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidHost`] when `host` does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = match self.host.as_deref() {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| SettingsError::InvalidHost(raw.to_owned()))?,
            None => DEFAULT_HOST,
        };
        Ok(SocketAddr::new(host, self.port.unwrap_or(DEFAULT_PORT)))
    }

    /// Pool configuration derived from the database settings.
    pub fn pool_config(&self) -> PoolConfig {
        let config = PoolConfig::new(self.database_url())
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_min_idle(self.pool_min_idle);
        match self.pool_timeout_secs {
            Some(secs) => config.with_connection_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    /// Default buffer radius for processing.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBufferRadius`] for non-positive values.
    pub fn buffer_radius(&self) -> Result<BufferRadius, SettingsError> {
        let metres = self.buffer_radius_m.unwrap_or(DEFAULT_BUFFER_RADIUS_M);
        Ok(BufferRadius::new(metres)?)
    }

    /// Whether migrations run at start-up; true unless `skip_migrations` is set.
    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }
}
