//! Stock counting.

use crate::error::{InventoryError, ValidationError};
use serde::Serialize;
use std::collections::BTreeMap;

/// Units held per object name.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    counts: BTreeMap<String, u64>,
}

fn check(name: &str, quantity: u64) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingRequired("name"));
    }
    if quantity == 0 {
        return Err(ValidationError::invalid("quantity", quantity));
    }
    Ok(())
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units of `name` in stock, 0 when never seen.
    pub fn stock(&self, name: &str) -> u64 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// Add units and return the new total.
    pub fn add(&mut self, name: &str, quantity: u64) -> Result<u64, InventoryError> {
        check(name, quantity)?;
        let current = self.stock(name);
        let total = current
            .checked_add(quantity)
            .ok_or_else(|| ValidationError::invalid("quantity", quantity))?;
        self.counts.insert(name.to_string(), total);
        Ok(total)
    }

    /// Remove units and return what is left.
    pub fn remove(&mut self, name: &str, quantity: u64) -> Result<u64, InventoryError> {
        check(name, quantity)?;
        let available = self.stock(name);
        if available < quantity {
            return Err(InventoryError::InsufficientStock {
                name: name.to_string(),
                requested: quantity,
                available,
            });
        }
        let left = available - quantity;
        self.counts.insert(name.to_string(), left);
        Ok(left)
    }

    /// Snapshot of every tracked count.
    pub fn entries(&self) -> Vec<(String, u64)> {
        self.counts
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn add_and_remove() {
        let mut inv = Inventory::new();
        assert_eq!(inv.stock("Bolt"), 0);
        assert_eq!(inv.add("Bolt", 10).unwrap(), 10);
        assert_eq!(inv.add("Bolt", 5).unwrap(), 15);
        assert_eq!(inv.remove("Bolt", 15).unwrap(), 0);
        assert_eq!(inv.entries(), vec![("Bolt".to_string(), 0)]);
    }

    #[test]
    fn over_removal_is_rejected() {
        let mut inv = Inventory::new();
        inv.add("Bolt", 3).unwrap();
        let err = inv.remove("Bolt", 4).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                name: "Bolt".to_string(),
                requested: 4,
                available: 3
            }
        );
        assert_eq!(inv.stock("Bolt"), 3);
    }

    #[test]
    fn zero_and_blank_are_invalid() {
        let mut inv = Inventory::new();
        assert!(matches!(inv.add("Bolt", 0), Err(InventoryError::Invalid(_))));
        assert!(matches!(inv.add(" ", 1), Err(InventoryError::Invalid(_))));
        assert!(inv.entries().is_empty());
    }

    proptest! {
        #[test]
        fn stock_never_goes_negative(ops in proptest::collection::vec((any::<bool>(), 1u64..50), 0..40)) {
            let mut inv = Inventory::new();
            let mut expected = 0u64;
            for (adding, q) in ops {
                if adding {
                    expected += q;
                    prop_assert_eq!(inv.add("Ore", q).unwrap(), expected);
                } else if q <= expected {
                    expected -= q;
                    prop_assert_eq!(inv.remove("Ore", q).unwrap(), expected);
                } else {
                    prop_assert!(inv.remove("Ore", q).is_err());
                }
            }
            prop_assert_eq!(inv.stock("Ore"), expected);
        }
    }
}
