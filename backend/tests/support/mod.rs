//! Shared helper utilities for backend integration tests.
//!
//! The suites need a PostgreSQL server with PostGIS available. Point
//! `GEO_INGEST_TEST_DATABASE_URL` at one; without it every suite prints a
//! skip marker and returns early.

use std::sync::OnceLock;

use geo_ingest::outbound::persistence::run_pending_migrations;

/// Environment variable naming the PostGIS database used by integration tests.
pub const TEST_DATABASE_URL_ENV: &str = "GEO_INGEST_TEST_DATABASE_URL";

/// Return the configured test database URL, or print a skip marker.
pub fn test_database_url(test_name: &str) -> Option<String> {
    match std::env::var(TEST_DATABASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {test_name} skipped; {TEST_DATABASE_URL_ENV} is unset");
            None
        }
    }
}

/// Apply the embedded migrations once per test binary.
///
/// # Panics
///
/// Panics when migrations fail so a misconfigured database is not mistaken
/// for a skipped suite.
pub fn ensure_migrated(url: &str) {
    static MIGRATED: OnceLock<Result<usize, String>> = OnceLock::new();
    let outcome = MIGRATED.get_or_init(|| run_pending_migrations(url).map_err(|err| err.to_string()));
    if let Err(reason) = outcome {
        panic!("test database migration failed: {reason}");
    }
}

/// Render a `postgres` error with enough detail to be useful in CI logs.
///
/// The `postgres::Error` `Display` implementation often collapses database
/// errors to a generic `db error`, hiding the message and SQLSTATE.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    let Some(db_error) = error.as_db_error() else {
        return error.to_string();
    };

    let mut summary = format!(
        "postgres error {:?}: {}",
        db_error.code(),
        db_error.message()
    );
    if let Some(detail) = db_error.detail() {
        summary.push_str("; detail: ");
        summary.push_str(detail);
    }
    if let Some(hint) = db_error.hint() {
        summary.push_str("; hint: ");
        summary.push_str(hint);
    }
    summary
}
