#![deny(warnings)]

//! Economic models: cost basis and profitability of manufactured products.
//!
//! A [`Product`] is resolved from one recipe against the market prices and the
//! products already resolved in the same pass, so an ingredient that is cheaper
//! to manufacture than to buy is costed at its manufacturing cost.

pub mod product;

pub use product::{Assessment, Product, ProductStatus, ResolveError};
