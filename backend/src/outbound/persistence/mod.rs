//! PostgreSQL/PostGIS persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel rows and domain types.
//! Row structs (`models.rs`) and table definitions (`schema.rs`) stay private
//! to this module. Connections come from a `bb8` pool through `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use geo_ingest::outbound::persistence::{DbPool, DieselFeatureRepository, PoolConfig};
//!
//! # async fn example() -> Result<(), geo_ingest::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/appdb")).await?;
//! let repo = DieselFeatureRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_feature_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_feature_repository::DieselFeatureRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_MAX_SIZE, DbPool, PoolConfig, PoolError};
