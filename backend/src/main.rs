//! Service entry-point: loads settings, prepares the database and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use geo_ingest::config::AppSettings;
use geo_ingest::inbound::http::health::HealthState;
use geo_ingest::outbound::persistence::{DbPool, run_pending_migrations};
use server::{ServerConfig, create_server};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
}

async fn apply_migrations(database_url: String) -> color_eyre::Result<()> {
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&database_url))
        .await
        .map_err(|err| eyre!("migration task panicked: {err}"))?
        .wrap_err("running database migrations")?;
    info!(applied, "database schema up to date");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).wrap_err("loading configuration")?;
    let bind_addr = settings.bind_addr()?;
    let buffer_radius = settings.buffer_radius()?;

    if settings.run_migrations() {
        apply_migrations(settings.database_url().to_owned()).await?;
    } else {
        info!("skipping database migrations");
    }

    let pool = DbPool::new(settings.pool_config())
        .await
        .wrap_err("building database pool")?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, pool).with_buffer_radius(buffer_radius);

    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, radius_m = buffer_radius.metres(), "geo ingest listening");

    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome.wrap_err("HTTP server failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_settings_enable_migrations_by_default() {
        let _guard = env_lock::lock_env([
            ("GEO_INGEST_SKIP_MIGRATIONS", None::<String>),
            ("GEO_INGEST_HOST", None::<String>),
            ("GEO_INGEST_BUFFER_RADIUS_M", None::<String>),
        ]);

        let settings = AppSettings::load_from_iter([std::ffi::OsString::from("geo-ingest")])
            .expect("settings load");
        assert!(settings.run_migrations());
        assert!(settings.bind_addr().is_ok());
        assert!(settings.buffer_radius().is_ok());
    }

    #[tokio::test]
    async fn migrations_report_connection_failures() {
        let error = apply_migrations("postgres://invalid host/none".to_owned())
            .await
            .expect_err("unreachable database");
        assert!(format!("{error:?}").contains("running database migrations"));
    }
}
