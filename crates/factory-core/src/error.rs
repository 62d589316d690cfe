//! Error types for domain invariants.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Validation errors raised while constructing domain values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// A mandatory field was absent or blank.
    #[error("missing required field: {0}")]
    MissingRequired(&'static str),
    /// A field was present but outside its domain.
    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl ValidationError {
    pub(crate) fn invalid(field: &'static str, value: impl ToString) -> Self {
        Self::InvalidValue {
            field,
            value: value.to_string(),
        }
    }
}

/// Errors produced by [`crate::Registry`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistryError {
    /// The entry or the key used to address it was blank.
    #[error("entry name is required")]
    MissingRequired,
    /// An entry with the same name is already registered.
    #[error("an entry named {0} already exists")]
    DuplicateKey(String),
}

/// Errors produced by [`crate::PriceLedger`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// A price with a later effective date is already recorded.
    #[error("a more recent price exists for {name}: recorded {recorded}, requested {requested}")]
    StaleUpdate {
        name: String,
        recorded: DateTime<Utc>,
        requested: DateTime<Utc>,
    },
}

/// Errors produced by [`crate::Inventory`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Removing more units than are in stock.
    #[error("cannot remove {requested} {name}: only {available} available")]
    InsufficientStock {
        name: String,
        requested: u64,
        available: u64,
    },
}
