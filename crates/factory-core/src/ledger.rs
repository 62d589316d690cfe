//! Market price ledger: one current price per object.

use crate::error::{LedgerError, ValidationError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Immutable market price of an object, effective from a given instant.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PriceRecord {
    name: String,
    price: Decimal,
    effective_date: DateTime<Utc>,
}

impl PriceRecord {
    /// Build a validated record. Prices must be strictly positive.
    pub fn new(
        name: &str,
        price: Decimal,
        effective_date: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("name"));
        }
        if price <= Decimal::ZERO {
            return Err(ValidationError::invalid("price", price));
        }
        Ok(Self {
            name: name.to_string(),
            price,
            effective_date,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// Effective date, returned by value.
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.effective_date
    }
}

/// Single-slot price ledger keyed by object name.
///
/// An update replaces the current record; no history is kept. Backdating below
/// an already recorded later price is rejected.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct PriceLedger {
    records: BTreeMap<String, PriceRecord>,
}

impl PriceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `price` for `name`, effective at `date`.
    ///
    /// Fails with [`LedgerError::StaleUpdate`] when the recorded price is
    /// effective strictly after `date`; the ledger is left untouched.
    pub fn update(
        &mut self,
        name: &str,
        price: Decimal,
        date: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let record = PriceRecord::new(name, price, date)?;
        if let Some(current) = self.records.get(name) {
            if current.effective_date > date {
                return Err(LedgerError::StaleUpdate {
                    name: name.to_string(),
                    recorded: current.effective_date,
                    requested: date,
                });
            }
        }
        self.records.insert(record.name.clone(), record);
        Ok(())
    }

    /// Record `price` for `name`, effective now.
    pub fn update_now(&mut self, name: &str, price: Decimal) -> Result<(), LedgerError> {
        self.update(name, price, Utc::now())
    }

    /// Current price of `name`, if any.
    pub fn current_price(&self, name: &str) -> Option<&PriceRecord> {
        self.records.get(name)
    }

    pub fn records(&self) -> impl Iterator<Item = &PriceRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
