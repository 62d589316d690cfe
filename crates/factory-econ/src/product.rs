//! Product resolution: cost basis, profitability and assessment of one recipe.

use chrono::{DateTime, Utc};
use factory_core::{Named, PriceLedger, Recipe, Registry};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors raised while resolving a product. No partial product is ever returned.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResolveError {
    #[error("product name is required")]
    NameRequired,
    /// The catalog being built already holds this product.
    #[error("product {0} is already in the catalog")]
    DuplicateProduct(String),
    #[error("no recipe found to manufacture {0}")]
    RecipeNotFound(String),
    /// Monetary arithmetic left the representable range.
    #[error("arithmetic overflow while costing {0}")]
    Overflow(String),
}

/// Lifecycle stage of a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Some price or cost is still unknown.
    Init,
    /// Every input is known; profitability is computed.
    Industrialized,
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("INIT"),
            Self::Industrialized => f.write_str("INDUSTRIALIZED"),
        }
    }
}

/// Human-readable classification of a product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assessment {
    EstimatedPriceUnknown,
    CostBasisUnknown,
    /// Profitability above the marketable threshold.
    Marketable,
    /// Profitable, but not enough to sell.
    InternalConsumption,
    DoNotProduce,
}

impl Assessment {
    /// Margin above which a product is worth selling (15%).
    pub fn marketable_threshold() -> Decimal {
        Decimal::new(15, 2)
    }

    pub fn from_profitability(profitability: Decimal) -> Self {
        if profitability > Self::marketable_threshold() {
            Self::Marketable
        } else if profitability > Decimal::ZERO {
            Self::InternalConsumption
        } else {
            Self::DoNotProduce
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EstimatedPriceUnknown => "profitability uncomputable: estimated price unknown",
            Self::CostBasisUnknown => "profitability uncomputable: cost basis unknown",
            Self::Marketable => "marketable",
            Self::InternalConsumption => "for internal consumption",
            Self::DoNotProduce => "do not produce, buying is preferable",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Assessment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Computed economics of one recipe, immutable once resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Product {
    name: String,
    status: ProductStatus,
    cost_basis: Option<Decimal>,
    #[serde(skip)]
    estimated_price: Option<Decimal>,
    profitability: Option<Decimal>,
    effective_date: DateTime<Utc>,
    #[serde(rename = "comment")]
    assessment: Assessment,
}

impl Product {
    /// Resolve the product manufactured by the recipe called `name`.
    ///
    /// Each ingredient is costed at its market price, or at the cost basis of an
    /// already resolved product in `catalog` when that is strictly cheaper. A
    /// single ingredient without any cost makes the whole cost basis unknown.
    /// The effective date is the oldest date among `now` and every price or
    /// product cost actually used.
    pub fn resolve(
        name: &str,
        recipes: &Registry<Recipe>,
        catalog: &Registry<Product>,
        ledger: &PriceLedger,
        now: DateTime<Utc>,
    ) -> Result<Self, ResolveError> {
        if name.trim().is_empty() {
            return Err(ResolveError::NameRequired);
        }
        if catalog.contains(name) {
            return Err(ResolveError::DuplicateProduct(name.to_string()));
        }
        let recipe = recipes
            .lookup(name)
            .ok_or_else(|| ResolveError::RecipeNotFound(name.to_string()))?;
        let overflow = || ResolveError::Overflow(name.to_string());

        let estimated_price = ledger.current_price(name).map(|r| r.price());
        let mut cost_basis = Some(Decimal::from(recipe.fee()));
        let mut effective_date = now;

        for (ingredient, quantity) in recipe.ingredients() {
            let mut unit_cost = None;
            if let Some(record) = ledger.current_price(ingredient) {
                unit_cost = Some(record.price());
                effective_date = effective_date.min(record.effective_date());
            }

            if let Some(made) = catalog.lookup(ingredient) {
                if let Some(made_cost) = made.cost_basis {
                    match unit_cost {
                        Some(bought) if bought <= made_cost => {
                            debug!(
                                product = name,
                                ingredient = ingredient.as_str(),
                                %bought,
                                %made_cost,
                                "cheaper to buy than to manufacture, using market price"
                            );
                        }
                        _ => {
                            unit_cost = Some(made_cost);
                            effective_date = effective_date.min(made.effective_date);
                        }
                    }
                }
            }

            cost_basis = match (cost_basis, unit_cost) {
                (Some(total), Some(unit)) => Some(
                    unit.checked_mul(Decimal::from(*quantity))
                        .and_then(|line| total.checked_add(line))
                        .ok_or_else(overflow)?,
                ),
                (_, None) => {
                    debug!(
                        product = name,
                        ingredient = ingredient.as_str(),
                        "no price available for ingredient"
                    );
                    None
                }
                (None, Some(_)) => None,
            };
        }

        let mut product = Self {
            name: name.to_string(),
            status: ProductStatus::Init,
            cost_basis,
            estimated_price,
            profitability: None,
            effective_date,
            assessment: Assessment::EstimatedPriceUnknown,
        };
        product.classify(recipe).ok_or_else(overflow)?;
        Ok(product)
    }

    /// Settle status, profitability and assessment once the cost basis is final.
    /// `None` on arithmetic overflow.
    fn classify(&mut self, recipe: &Recipe) -> Option<()> {
        match (self.estimated_price, self.cost_basis) {
            (None, _) => self.assessment = Assessment::EstimatedPriceUnknown,
            (_, None) => self.assessment = Assessment::CostBasisUnknown,
            (Some(price), Some(cost)) => {
                let p = compute_profitability(price, cost, recipe)?;
                self.status = ProductStatus::Industrialized;
                self.profitability = Some(p);
                self.assessment = Assessment::from_profitability(p);
            }
        }
        Some(())
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    /// Cost of one production cycle, if every ingredient could be priced.
    pub fn cost_basis(&self) -> Option<Decimal> {
        self.cost_basis
    }

    pub fn profitability(&self) -> Option<Decimal> {
        self.profitability
    }

    pub fn effective_date(&self) -> DateTime<Utc> {
        self.effective_date
    }

    pub fn assessment(&self) -> Assessment {
        self.assessment
    }

    pub fn comment(&self) -> &'static str {
        self.assessment.as_str()
    }
}

impl Named for Product {
    fn name(&self) -> &str {
        &self.name
    }
}

/// (price × output) / (cost / success chance) − 1. `None` on overflow or zero cost.
fn compute_profitability(price: Decimal, cost_basis: Decimal, recipe: &Recipe) -> Option<Decimal> {
    let revenue = price.checked_mul(Decimal::from(recipe.output_quantity()))?;
    let expected_cost = cost_basis.checked_div(recipe.success_chance())?;
    revenue
        .checked_div(expected_cost)?
        .checked_sub(Decimal::ONE)
}
