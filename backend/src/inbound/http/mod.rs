//! HTTP inbound adapter exposing the feature REST endpoints.

pub mod error;
pub mod features;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
