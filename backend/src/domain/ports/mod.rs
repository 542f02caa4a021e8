//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod feature_command;
mod feature_query;
mod feature_repository;

#[cfg(test)]
pub use feature_command::MockFeatureCommand;
pub use feature_command::{
    CreateFeatureRequest, FeatureCommand, FixtureFeatureCommand, ProcessFeatureRequest,
};
#[cfg(test)]
pub use feature_query::MockFeatureQuery;
pub use feature_query::{FeatureQuery, FixtureFeatureQuery};
#[cfg(test)]
pub use feature_repository::MockFeatureRepository;
pub use feature_repository::{FeatureRepository, FeatureRepositoryError};
