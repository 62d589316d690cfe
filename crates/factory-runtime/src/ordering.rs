//! Dependency ordering of the recipe book.
//!
//! A recipe depends on every *other* recipe of the book that appears among its
//! ingredients. Resolving in dependency order guarantees that when a product is
//! costed, every sibling product it could substitute for a market purchase is
//! already in the catalog.

use crate::error::FactoryError;
use factory_core::{Named, Recipe, Registry};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Recipe names in an order where each recipe comes after the recipes it consumes.
///
/// Uses Kahn's algorithm; ties are broken by the recipe book's iteration order.
/// A recipe listing itself as an ingredient does not depend on itself. Fails with
/// [`FactoryError::CyclicRecipes`] naming every recipe that lies on a cycle.
pub fn resolution_order(recipes: &Registry<Recipe>) -> Result<Vec<String>, FactoryError> {
    // recipe -> number of sibling recipes it still waits for
    let mut waiting: BTreeMap<&str, usize> = BTreeMap::new();
    // recipe -> recipes consuming it
    let mut consumers: BTreeMap<&str, Vec<&str>> = BTreeMap::new();

    for recipe in recipes.iter() {
        let name = recipe.name();
        let mut count = 0;
        for dep in siblings(recipe, recipes) {
            consumers.entry(dep).or_default().push(name);
            count += 1;
        }
        waiting.insert(name, count);
    }

    let mut ready: VecDeque<&str> = recipes
        .iter()
        .map(|recipe| recipe.name())
        .filter(|name| waiting.get(name) == Some(&0))
        .collect();
    let mut order = Vec::with_capacity(recipes.len());

    while let Some(name) = ready.pop_front() {
        order.push(name.to_string());
        for consumer in consumers.get(name).into_iter().flatten() {
            if let Some(count) = waiting.get_mut(consumer) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    ready.push_back(*consumer);
                }
            }
        }
    }

    if order.len() == recipes.len() {
        return Ok(order);
    }

    let blocked: BTreeSet<&str> = waiting
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(name, _)| name)
        .collect();
    let cyclic = blocked
        .iter()
        .filter(|name| reaches_itself(name, &blocked, recipes))
        .map(|name| name.to_string())
        .collect();
    Err(FactoryError::CyclicRecipes(cyclic))
}

/// Ingredients of `recipe` that are other recipes of the book.
fn siblings<'a>(recipe: &'a Recipe, recipes: &'a Registry<Recipe>) -> impl Iterator<Item = &'a str> {
    recipe
        .ingredient_names()
        .filter(move |dep| *dep != recipe.name() && recipes.contains(dep))
}

/// Whether following ingredients inside `blocked` leads from `start` back to it.
fn reaches_itself(start: &str, blocked: &BTreeSet<&str>, recipes: &Registry<Recipe>) -> bool {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    let mut stack: Vec<&str> = vec![start];
    while let Some(current) = stack.pop() {
        let Some(recipe) = recipes.lookup(current) else {
            continue;
        };
        for dep in siblings(recipe, recipes) {
            if dep == start {
                return true;
            }
            if blocked.contains(dep) && seen.insert(dep) {
                stack.push(dep);
            }
        }
    }
    false
}
