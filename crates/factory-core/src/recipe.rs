//! Recipes: how one named object is produced.

use crate::error::ValidationError;
use crate::registry::Named;
use crate::units::{positive_units, whole_units};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One ingredient line as supplied by a caller; names may repeat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: Decimal,
}

fn default_output_quantity() -> Decimal {
    Decimal::ONE
}

fn default_success_chance() -> Decimal {
    Decimal::ONE
}

/// Unvalidated recipe input, e.g. straight from a scenario file.
///
/// Counts are kept as decimals so fractional or negative values reach validation
/// instead of failing deserialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fee: Option<Decimal>,
    #[serde(default)]
    pub ingredients: Vec<IngredientLine>,
    #[serde(default = "default_output_quantity")]
    pub output_quantity: Decimal,
    #[serde(default = "default_success_chance")]
    pub success_chance: Decimal,
}

impl RecipeSpec {
    pub fn new(name: &str, fee: i64, ingredients: &[(&str, i64)]) -> Self {
        Self {
            name: Some(name.to_string()),
            fee: Some(Decimal::from(fee)),
            ingredients: ingredients
                .iter()
                .map(|(n, q)| IngredientLine {
                    name: n.to_string(),
                    quantity: Decimal::from(*q),
                })
                .collect(),
            output_quantity: default_output_quantity(),
            success_chance: default_success_chance(),
        }
    }

    pub fn output_quantity(mut self, quantity: i64) -> Self {
        self.output_quantity = Decimal::from(quantity);
        self
    }

    pub fn success_chance(mut self, chance: Decimal) -> Self {
        self.success_chance = chance;
        self
    }
}

/// Validated, immutable recipe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecipeSpec")]
pub struct Recipe {
    name: String,
    /// Manufacturing fee per cycle, excluding ingredients.
    fee: u64,
    ingredients: BTreeMap<String, u64>,
    /// Units produced by one cycle.
    output_quantity: u64,
    /// Probability in (0, 1] that a cycle succeeds.
    success_chance: Decimal,
}

impl Recipe {
    /// Build a recipe with one output per cycle and a guaranteed success.
    pub fn new(name: &str, fee: i64, ingredients: &[(&str, i64)]) -> Result<Self, ValidationError> {
        Self::try_from(RecipeSpec::new(name, fee, ingredients))
    }

    pub fn fee(&self) -> u64 {
        self.fee
    }

    /// Ingredient quantities by name, duplicates already summed.
    pub fn ingredients(&self) -> &BTreeMap<String, u64> {
        &self.ingredients
    }

    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.ingredients.keys().map(String::as_str)
    }

    pub fn output_quantity(&self) -> u64 {
        self.output_quantity
    }

    pub fn success_chance(&self) -> Decimal {
        self.success_chance
    }
}

impl Named for Recipe {
    fn name(&self) -> &str {
        &self.name
    }
}

impl TryFrom<RecipeSpec> for Recipe {
    type Error = ValidationError;

    fn try_from(spec: RecipeSpec) -> Result<Self, Self::Error> {
        let fee = spec.fee.ok_or(ValidationError::MissingRequired("fee"))?;
        let fee = whole_units("fee", fee)?;
        let name = match spec.name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Err(ValidationError::MissingRequired("name")),
        };
        if spec.ingredients.is_empty() {
            return Err(ValidationError::MissingRequired("ingredients"));
        }
        let output_quantity = positive_units("output_quantity", spec.output_quantity)?;
        if spec.success_chance <= Decimal::ZERO || spec.success_chance > Decimal::ONE {
            return Err(ValidationError::invalid(
                "success_chance",
                spec.success_chance,
            ));
        }

        let mut ingredients: BTreeMap<String, u64> = BTreeMap::new();
        for line in spec.ingredients {
            if line.name.trim().is_empty() {
                return Err(ValidationError::MissingRequired("ingredient name"));
            }
            let quantity = positive_units("ingredient quantity", line.quantity)?;
            let total = ingredients.entry(line.name).or_insert(0);
            *total = total
                .checked_add(quantity)
                .ok_or_else(|| ValidationError::invalid("ingredient quantity", quantity))?;
        }

        Ok(Self {
            name,
            fee,
            ingredients,
            output_quantity,
            success_chance: spec.success_chance,
        })
    }
}
