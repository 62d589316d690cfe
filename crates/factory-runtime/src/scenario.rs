//! YAML scenario files describing a factory's recipes, prices and stock.

use crate::error::FactoryError;
use crate::factory::{Factory, FactorySetup, PriceEntry, StockEntry};
use factory_core::RecipeSpec;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// A named factory setup as written in a scenario file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub recipes: Vec<RecipeSpec>,
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
    #[serde(default)]
    pub stock: Vec<StockEntry>,
}

impl Scenario {
    pub fn from_yaml(text: &str) -> Result<Self, FactoryError> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, FactoryError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let scenario = Self::from_yaml(&text)?;
        info!(path = %path.display(), name = %scenario.name, "scenario loaded");
        Ok(scenario)
    }

    /// Build the factory described by this scenario.
    pub fn build(self) -> Result<Factory, FactoryError> {
        let setup = FactorySetup {
            recipes: self.recipes,
            prices: self.prices,
            stock: self.stock,
        };
        Factory::new(&self.name, setup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const WORKSHOP: &str = r#"
name: Workshop
recipes:
  - name: Widget
    fee: 5
    ingredients:
      - { name: Bolt, quantity: 1 }
      - { name: Screw, quantity: 2 }
  - name: Batch
    fee: 0
    ingredients: [{ name: Bolt, quantity: 10 }]
    output_quantity: 4
    success_chance: 0.5
  - name: Broken
    ingredients: [{ name: Bolt, quantity: 1 }]
prices:
  - { name: Bolt, price: 1, effective_date: "2024-01-01T00:00:00Z" }
  - { name: Screw, price: 2 }
  - { name: Widget, price: 13 }
  - { name: Batch, price: 6.5 }
stock:
  - { name: Bolt, quantity: 40 }
"#;

    #[test]
    fn parses_and_builds() {
        let scenario = Scenario::from_yaml(WORKSHOP).unwrap();
        assert_eq!(scenario.name, "Workshop");
        assert_eq!(scenario.recipes.len(), 3);
        assert_eq!(scenario.recipes[2].fee, None);
        assert_eq!(scenario.prices[3].price, Decimal::new(65, 1));
        assert!(scenario.prices[1].effective_date.is_none());

        let factory = scenario.build().unwrap();
        // The recipe without a fee is skipped at ingestion.
        assert_eq!(factory.recipes().keys(), vec!["Batch", "Widget"]);
        assert_eq!(factory.inventory().stock("Bolt"), 40);
        let widget = factory.product("Widget").unwrap();
        assert_eq!(widget.profitability(), Some(Decimal::new(3, 1)));
        let batch = factory.product("Batch").unwrap();
        // (6.5 * 4) / (10 / 0.5) - 1 = 0.3
        assert_eq!(batch.profitability(), Some(Decimal::new(3, 1)));
    }

    #[test]
    fn out_of_domain_numbers_skip_only_their_entry() {
        let text = r#"
name: Lenient
recipes:
  - name: Half
    fee: 1.5
    ingredients: [{ name: Bolt, quantity: 1 }]
  - name: Negative
    fee: 1
    ingredients: [{ name: Bolt, quantity: -2 }]
  - name: Widget
    fee: 5
    ingredients: [{ name: Bolt, quantity: 1 }, { name: Screw, quantity: 2 }]
prices:
  - { name: Bolt, price: 1 }
  - { name: Screw, price: 2 }
stock:
  - { name: Bolt, quantity: -1 }
  - { name: Screw, quantity: 2.5 }
  - { name: Nut, quantity: 7 }
"#;
        let scenario = Scenario::from_yaml(text).unwrap();
        assert_eq!(scenario.recipes[0].fee, Some(Decimal::new(15, 1)));
        assert_eq!(scenario.stock[0].quantity, Decimal::NEGATIVE_ONE);

        let factory = scenario.build().unwrap();
        assert_eq!(factory.recipes().keys(), vec!["Widget"]);
        assert_eq!(factory.products().len(), 1);
        assert_eq!(factory.inventory().entries(), vec![("Nut".to_string(), 7)]);
    }

    #[test]
    fn malformed_yaml_is_a_scenario_error() {
        let err = Scenario::from_yaml("name: [unterminated").unwrap_err();
        assert!(matches!(err, FactoryError::Scenario(_)));
        let err = Scenario::from_yaml("recipes: []").unwrap_err();
        assert!(matches!(err, FactoryError::Scenario(_)));
    }

    #[test]
    fn bundled_workshop_scenario_builds() {
        let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../../assets/scenarios/workshop.yaml");
        let factory = Scenario::load(path).unwrap().build().unwrap();
        assert_eq!(factory.products().len(), 5);
        assert_eq!(
            factory.product("Gizmo").unwrap().comment(),
            "profitability uncomputable: cost basis unknown"
        );
        assert_eq!(
            factory.product("Crate of bolts").unwrap().comment(),
            "for internal consumption"
        );
        assert_eq!(factory.product("Gadget").unwrap().cost_basis(), Some(Decimal::new(20, 0)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Scenario::load("/nonexistent/scenario.yaml").unwrap_err();
        assert!(matches!(err, FactoryError::Io(_)));
    }
}
