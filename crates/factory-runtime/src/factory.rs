//! The factory: recipe book, price ledger, inventory and product catalog.

use crate::error::FactoryError;
use crate::ordering::resolution_order;
use chrono::{DateTime, Utc};
use factory_core::{
    positive_units, Inventory, InventoryError, Named, PriceLedger, Recipe, RecipeSpec, Registry,
};
use factory_econ::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A market price as supplied in bulk. Without a date the price is effective now.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub effective_date: Option<DateTime<Utc>>,
}

/// Units of an object held at setup. Only positive whole quantities are kept.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub name: String,
    pub quantity: Decimal,
}

/// Raw data a factory is built from. Entries are validated one by one on ingestion.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorySetup {
    #[serde(default)]
    pub recipes: Vec<RecipeSpec>,
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
    #[serde(default)]
    pub stock: Vec<StockEntry>,
}

/// Production site evaluating which recipes are worth industrializing.
#[derive(Debug)]
pub struct Factory {
    name: String,
    inventory: Inventory,
    recipes: Registry<Recipe>,
    catalog: Registry<Product>,
    ledger: PriceLedger,
}

impl Factory {
    /// Build a factory and run an initial market study.
    ///
    /// Malformed stock, recipe or price entries are logged and skipped; a failing
    /// market study fails construction.
    pub fn new(name: &str, setup: FactorySetup) -> Result<Self, FactoryError> {
        let mut factory = Self {
            name: name.to_string(),
            inventory: Inventory::new(),
            recipes: Registry::new(),
            catalog: Registry::new(),
            ledger: PriceLedger::new(),
        };
        factory.ingest(setup);
        factory.market_study()?;
        Ok(factory)
    }

    fn ingest(&mut self, setup: FactorySetup) {
        for entry in setup.stock {
            let added = positive_units("quantity", entry.quantity)
                .map_err(InventoryError::from)
                .and_then(|units| self.inventory.add(&entry.name, units));
            if let Err(err) = added {
                warn!(factory = %self.name, item = %entry.name, quantity = %entry.quantity, %err, "stock entry skipped");
            }
        }
        for spec in setup.recipes {
            let label = spec.name.clone().unwrap_or_default();
            let inserted = Recipe::try_from(spec)
                .map_err(FactoryError::from)
                .and_then(|recipe| self.recipes.insert(recipe).map_err(FactoryError::from));
            if let Err(err) = inserted {
                warn!(factory = %self.name, recipe = %label, %err, "recipe skipped");
            }
        }
        for entry in setup.prices {
            let date = entry.effective_date.unwrap_or_else(Utc::now);
            if let Err(err) = self.ledger.update(&entry.name, entry.price, date) {
                warn!(factory = %self.name, item = %entry.name, price = %entry.price, %err, "price skipped");
            }
        }
    }

    /// Register a recipe and rebuild the catalog.
    ///
    /// If the new recipe makes the book unorderable it is withdrawn again and the
    /// error is returned.
    pub fn add_recipe(&mut self, recipe: Recipe) -> Result<usize, FactoryError> {
        let name = recipe.name().to_string();
        self.recipes.insert(recipe)?;
        match self.market_study() {
            Ok(count) => Ok(count),
            Err(err) => {
                warn!(factory = %self.name, recipe = %name, %err, "recipe withdrawn");
                self.recipes.remove(&name)?;
                self.market_study()?;
                Err(err)
            }
        }
    }

    /// Record a market price. The catalog is refreshed by the next market study.
    pub fn appraise(
        &mut self,
        name: &str,
        price: Decimal,
        date: DateTime<Utc>,
    ) -> Result<(), FactoryError> {
        self.ledger.update(name, price, date)?;
        Ok(())
    }

    /// Rebuild the product catalog from scratch. Returns the number of products.
    pub fn market_study(&mut self) -> Result<usize, FactoryError> {
        self.market_study_at(Utc::now())
    }

    /// [`Factory::market_study`] with an explicit resolution instant.
    ///
    /// The previous catalog is discarded first; the new one is published only if
    /// every recipe resolves.
    pub fn market_study_at(&mut self, now: DateTime<Utc>) -> Result<usize, FactoryError> {
        if !self.catalog.is_empty() {
            info!(factory = %self.name, products = self.catalog.len(), "discarding previous catalog");
        }
        self.catalog = Registry::new();

        let order = resolution_order(&self.recipes)?;
        let mut catalog = Registry::new();
        for name in &order {
            let product = Product::resolve(name, &self.recipes, &catalog, &self.ledger, now)?;
            catalog.insert(product)?;
        }

        self.catalog = catalog;
        info!(factory = %self.name, products = self.catalog.len(), "new catalog built");
        Ok(self.catalog.len())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn recipes(&self) -> &Registry<Recipe> {
        &self.recipes
    }

    pub fn products(&self) -> &Registry<Product> {
        &self.catalog
    }

    pub fn product(&self, name: &str) -> Option<&Product> {
        self.catalog.lookup(name)
    }

    pub fn prices(&self) -> &PriceLedger {
        &self.ledger
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }
}
