//! Internal Diesel row structs for feature queries.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{Double, Int4, Nullable, Text, Timestamptz, Uuid as SqlUuid};
use uuid::Uuid;

use super::schema::features;

/// Row struct for reading from the features table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = features)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FeatureRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub attempts: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Row returned by the proximity query.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct NearbyRow {
    #[diesel(sql_type = SqlUuid)]
    pub id: Uuid,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = Text)]
    pub status: String,
    #[diesel(sql_type = Int4)]
    pub attempts: i32,
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
    #[diesel(sql_type = Nullable<Timestamptz>)]
    pub updated_at: Option<DateTime<Utc>>,
    #[diesel(sql_type = Nullable<Double>)]
    pub buffer_area_m2: Option<f64>,
    #[diesel(sql_type = Double)]
    pub distance_m: f64,
}

/// Row returned by the buffering statement when a feature was claimed.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct BufferedRow {
    #[diesel(sql_type = SqlUuid)]
    pub feature_id: Uuid,
    #[diesel(sql_type = Double)]
    pub buffer_area_m2: f64,
}
