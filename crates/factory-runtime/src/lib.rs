#![deny(warnings)]

//! Factory runtime: batch ingestion, dependency ordering and market studies.
//!
//! A market study rebuilds the whole product catalog from the recipe book and
//! the price ledger, resolving each recipe only after every sibling recipe it
//! consumes, so manufactured ingredients can be costed at their cost basis.

pub mod error;
pub mod factory;
pub mod ordering;
pub mod scenario;

pub use error::FactoryError;
pub use factory::{Factory, FactorySetup, PriceEntry, StockEntry};
pub use ordering::resolution_order;
pub use scenario::Scenario;
