//! PostGIS-backed `FeatureRepository` implementation.
//!
//! The keyed read uses the Diesel DSL. Statements that build, buffer or
//! measure geography values use parameterised `sql_query`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Double, Text, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{FeatureRepository, FeatureRepositoryError};
use crate::domain::{
    BufferRadius, FeatureId, FeatureRecord, FeatureStatus, NearbyFeature, NearbyQuery, NewFeature,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{BufferedRow, FeatureRow, NearbyRow};
use super::pool::{DbPool, PoolError};
use super::schema::{features, footprints};

const INSERT_FEATURE_SQL: &str = r#"
INSERT INTO features (id, name, status, attempts, created_at, geom)
VALUES ($1, $2, 'queued', 0, NOW(), ST_SetSRID(ST_MakePoint($3, $4), 4326)::geography)
"#;

// The conditional UPDATE takes the row lock; a concurrent caller re-checks
// `status` after the lock is released and claims nothing.
const BUFFER_IF_QUEUED_SQL: &str = r#"
WITH claimed AS (
    UPDATE features
    SET status = 'done', updated_at = NOW(), attempts = attempts + 1
    WHERE id = $1 AND status = 'queued' AND geom IS NOT NULL
    RETURNING id, geom
),
buffered AS (
    SELECT id AS feature_id, ST_Buffer(geom, $2) AS geom
    FROM claimed
)
INSERT INTO footprints (feature_id, geom, buffer_area_m2)
SELECT feature_id, geom, ST_Area(geom)
FROM buffered
ON CONFLICT (feature_id) DO UPDATE SET
    geom = EXCLUDED.geom,
    buffer_area_m2 = EXCLUDED.buffer_area_m2
RETURNING feature_id, buffer_area_m2
"#;

const FIND_WITHIN_SQL: &str = r#"
SELECT
    f.id,
    f.name,
    f.status,
    f.attempts,
    f.created_at,
    f.updated_at,
    fp.buffer_area_m2,
    ST_Distance(f.geom, origin.geog) AS distance_m
FROM features f
CROSS JOIN (
    SELECT ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography AS geog
) AS origin
LEFT JOIN footprints fp ON fp.feature_id = f.id
WHERE f.geom IS NOT NULL
  AND ST_DWithin(f.geom, origin.geog, $3)
ORDER BY distance_m ASC, f.id ASC
"#;

/// Diesel-backed implementation of the feature repository port.
#[derive(Clone)]
pub struct DieselFeatureRepository {
    pool: DbPool,
}

impl DieselFeatureRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FeatureRepositoryError {
    map_basic_pool_error(error, FeatureRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FeatureRepositoryError {
    map_basic_diesel_error(
        error,
        FeatureRepositoryError::query,
        FeatureRepositoryError::connection,
    )
}

/// Rebuild a domain record from stored columns.
fn to_record(
    row: FeatureRow,
    buffer_area_m2: Option<f64>,
) -> Result<FeatureRecord, FeatureRepositoryError> {
    let FeatureRow {
        id,
        name,
        status,
        attempts,
        created_at,
        updated_at,
    } = row;

    let status = status
        .parse::<FeatureStatus>()
        .map_err(|err| FeatureRepositoryError::query(err.to_string()))?;
    let attempts = u32::try_from(attempts).map_err(|_| {
        FeatureRepositoryError::query(format!("negative attempts for feature {id}"))
    })?;

    Ok(FeatureRecord {
        id: FeatureId::from_uuid(id),
        name,
        status,
        attempts,
        created_at,
        updated_at,
        buffer_area_m2,
    })
}

fn nearby_from_row(row: NearbyRow) -> Result<NearbyFeature, FeatureRepositoryError> {
    let NearbyRow {
        id,
        name,
        status,
        attempts,
        created_at,
        updated_at,
        buffer_area_m2,
        distance_m,
    } = row;

    let feature = to_record(
        FeatureRow {
            id,
            name,
            status,
            attempts,
            created_at,
            updated_at,
        },
        buffer_area_m2,
    )?;
    Ok(NearbyFeature {
        feature,
        distance_m,
    })
}

#[async_trait]
impl FeatureRepository for DieselFeatureRepository {
    async fn insert(&self, feature: &NewFeature) -> Result<(), FeatureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        sql_query(INSERT_FEATURE_SQL)
            .bind::<SqlUuid, _>(*feature.id.as_uuid())
            .bind::<Text, _>(feature.name.as_str())
            .bind::<Double, _>(feature.coordinates.lon())
            .bind::<Double, _>(feature.coordinates.lat())
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(())
    }

    async fn buffer_if_queued(
        &self,
        feature_id: &FeatureId,
        radius: BufferRadius,
    ) -> Result<bool, FeatureRepositoryError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let id: Uuid = *feature_id.as_uuid();
        let radius_m = radius.metres();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    sql_query(BUFFER_IF_QUEUED_SQL)
                        .bind::<SqlUuid, _>(id)
                        .bind::<Double, _>(radius_m)
                        .load::<BufferedRow>(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        match rows.into_iter().next() {
            Some(row) => {
                debug!(
                    feature_id = %row.feature_id,
                    buffer_area_m2 = row.buffer_area_m2,
                    "footprint stored"
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_by_id(
        &self,
        feature_id: &FeatureId,
    ) -> Result<Option<FeatureRecord>, FeatureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = features::table
            .left_join(footprints::table)
            .filter(features::id.eq(*feature_id.as_uuid()))
            .select((
                FeatureRow::as_select(),
                footprints::buffer_area_m2.nullable(),
            ))
            .first::<(FeatureRow, Option<f64>)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|(feature, area)| to_record(feature, area))
            .transpose()
    }

    async fn find_within(
        &self,
        query: &NearbyQuery,
    ) -> Result<Vec<NearbyFeature>, FeatureRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = sql_query(FIND_WITHIN_SQL)
            .bind::<Double, _>(query.origin.lon())
            .bind::<Double, _>(query.origin.lat())
            .bind::<Double, _>(f64::from(query.radius.metres()))
            .load::<NearbyRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(nearby_from_row).collect()
    }
}
