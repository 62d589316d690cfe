#![deny(warnings)]

//! Core domain models and invariants for the production economy.
//!
//! This crate defines the validated building blocks consumed by product
//! resolution:
//! - [`Registry`]: uniqueness-enforced catalog of named entities
//! - [`PriceLedger`]: current market price per object
//! - [`Recipe`]: how an object is produced from ingredients
//! - [`Inventory`]: stock counts

pub mod error;
pub mod inventory;
pub mod ledger;
pub mod recipe;
pub mod registry;
pub mod units;

pub use error::{InventoryError, LedgerError, RegistryError, ValidationError};
pub use inventory::Inventory;
pub use ledger::{PriceLedger, PriceRecord};
pub use recipe::{IngredientLine, Recipe, RecipeSpec};
pub use registry::{Named, Registry};
pub use units::{positive_units, whole_units};
