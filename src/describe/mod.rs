//! Schema description from constraint metadata
//!
//! The mapper folds a property's declared constraints into its schema node;
//! the describer drives one full pass over a class.

pub mod describer;
pub mod mapper;

/// Error while applying constraints to a schema
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("No callback registered for choice resolver '{0}'")]
    UnknownCallback(String),
}

pub use describer::ClassDescriber;
pub use mapper::ConstraintMapper;
