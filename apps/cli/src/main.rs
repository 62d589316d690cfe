#![deny(warnings)]

//! Headless CLI: build a factory from a scenario and print its product catalog.

use anyhow::{bail, Result};
use factory_core::{Named, RecipeSpec};
use factory_runtime::{Factory, FactorySetup, PriceEntry, Scenario, StockEntry};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<(Option<String>, bool)> {
    let mut scenario: Option<String> = None;
    let mut json = false;
    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--scenario" => match it.next() {
                Some(path) => scenario = Some(path),
                None => bail!("--scenario requires a path"),
            },
            "--json" => json = true,
            _ => {}
        }
    }
    Ok((scenario, json))
}

fn price(name: &str, price: i64) -> PriceEntry {
    PriceEntry {
        name: name.to_string(),
        price: Decimal::new(price, 0),
        effective_date: None,
    }
}

fn demo_factory() -> Result<Factory> {
    let setup = FactorySetup {
        recipes: vec![
            RecipeSpec::new("Widget", 5, &[("Bolt", 1), ("Screw", 2)]),
            RecipeSpec::new("Part", 6, &[("Bolt", 4)]),
            RecipeSpec::new("Gadget", 5, &[("Bolt", 5), ("Part", 1)]),
            RecipeSpec::new("Gizmo", 3, &[("Widget", 1), ("Spring", 1)]),
        ],
        prices: vec![
            price("Bolt", 1),
            price("Screw", 2),
            price("Widget", 13),
            price("Part", 15),
            price("Gadget", 18),
            price("Gizmo", 20),
        ],
        stock: vec![StockEntry {
            name: "Bolt".to_string(),
            quantity: Decimal::new(40, 0),
        }],
    };
    Ok(Factory::new("Demo workshop", setup)?)
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (scenario, json) = parse_args(std::env::args().skip(1))?;
    info!(?scenario, json, "starting CLI");

    let factory = match scenario {
        Some(path) => Scenario::load(path)?.build()?,
        None => demo_factory()?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(factory.products())?);
        return Ok(());
    }

    println!(
        "Factory OK | {} | recipes: {} | prices: {} | products: {}",
        factory.name(),
        factory.recipes().len(),
        factory.prices().len(),
        factory.products().len()
    );
    for product in factory.products().iter() {
        let cost = product
            .cost_basis()
            .map_or_else(|| "?".to_string(), |c| c.to_string());
        let profitability = product
            .profitability()
            .map_or_else(|| "?".to_string(), |p| format!("{:.1}%", p * Decimal::ONE_HUNDRED));
        println!(
            "{} | {} | cost: {} | profitability: {} | {}",
            product.name(),
            product.status(),
            cost,
            profitability,
            product.comment()
        );
    }

    Ok(())
}
