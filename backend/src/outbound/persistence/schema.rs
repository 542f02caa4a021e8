//! Diesel table definitions for the feature schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! The PostGIS `geom` columns are not listed here: Diesel has no native
//! geography type, so every statement that reads or writes geometry goes
//! through `sql_query` in the repository.

diesel::table! {
    /// Submitted point features.
    features (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable name, at most 200 characters.
        name -> Text,
        /// Lifecycle state: `queued` or `done`.
        status -> Text,
        /// Number of successful buffering runs (0 or 1).
        attempts -> Int4,
        /// Insertion timestamp.
        created_at -> Timestamptz,
        /// Set when the feature is processed.
        updated_at -> Nullable<Timestamptz>,
    }
}

diesel::table! {
    /// Buffered polygons derived from processed features.
    footprints (feature_id) {
        /// Primary key and foreign key to `features.id`.
        feature_id -> Uuid,
        /// Geodesic area of the buffered polygon in square metres.
        buffer_area_m2 -> Float8,
    }
}

diesel::joinable!(footprints -> features (feature_id));
diesel::allow_tables_to_appear_in_same_query!(features, footprints);
