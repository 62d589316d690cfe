//! Errors surfaced by factory operations.

use factory_core::{LedgerError, RegistryError, ValidationError};
use factory_econ::ResolveError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FactoryError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Recipes that consume each other, directly or transitively.
    #[error("recipes form a cycle and cannot be ordered: {}", .0.join(", "))]
    CyclicRecipes(Vec<String>),
    #[error("invalid scenario: {0}")]
    Scenario(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for FactoryError {
    fn from(e: std::io::Error) -> Self {
        FactoryError::Io(e.to_string())
    }
}

impl From<serde_yaml::Error> for FactoryError {
    fn from(e: serde_yaml::Error) -> Self {
        FactoryError::Scenario(e.to_string())
    }
}
