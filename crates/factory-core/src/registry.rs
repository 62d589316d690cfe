//! Uniqueness-enforced catalog of named entities.

use crate::error::RegistryError;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Anything that can be filed in a [`Registry`] under a unique name.
pub trait Named {
    fn name(&self) -> &str;
}

/// Keyed catalog of entities. Used for the recipe book and the product catalog.
///
/// Entries are read-only once registered: lookups hand out shared references and
/// the only mutations are [`Registry::insert`] and [`Registry::remove`].
#[derive(Clone, Debug, Serialize)]
#[serde(transparent)]
pub struct Registry<T> {
    entries: BTreeMap<String, T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T: Named> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity under its own name.
    pub fn insert(&mut self, entity: T) -> Result<(), RegistryError> {
        let key = entity.name().to_string();
        if key.trim().is_empty() {
            return Err(RegistryError::MissingRequired);
        }
        if self.entries.contains_key(&key) {
            return Err(RegistryError::DuplicateKey(key));
        }
        self.entries.insert(key, entity);
        Ok(())
    }

    /// Look up an entity; absence is not an error.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Remove and return an entity, or `None` when nothing is filed under `name`.
    pub fn remove(&mut self, name: &str) -> Result<Option<T>, RegistryError> {
        if name.trim().is_empty() {
            return Err(RegistryError::MissingRequired);
        }
        let removed = self.entries.remove(name);
        if removed.is_none() {
            debug!(name, "no entry to remove");
        }
        Ok(removed)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Snapshot of the registered names.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Read-only view over every entity.
    pub fn all(&self) -> Vec<&T> {
        self.entries.values().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Entry(String, u32);

    impl Named for Entry {
        fn name(&self) -> &str {
            &self.0
        }
    }

    fn entry(name: &str, v: u32) -> Entry {
        Entry(name.to_string(), v)
    }

    #[test]
    fn insert_then_lookup() {
        let mut reg = Registry::new();
        reg.insert(entry("Bolt", 1)).unwrap();
        assert_eq!(reg.lookup("Bolt"), Some(&entry("Bolt", 1)));
        assert_eq!(reg.lookup("Screw"), None);
        assert!(reg.contains("Bolt"));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn duplicate_insert_is_rejected_and_keeps_first() {
        let mut reg = Registry::new();
        reg.insert(entry("Bolt", 1)).unwrap();
        let err = reg.insert(entry("Bolt", 2)).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateKey("Bolt".to_string()));
        assert_eq!(reg.lookup("Bolt").map(|e| e.1), Some(1));
    }

    #[test]
    fn blank_names_are_missing() {
        let mut reg = Registry::new();
        assert_eq!(reg.insert(entry("  ", 1)), Err(RegistryError::MissingRequired));
        assert_eq!(reg.remove(""), Err(RegistryError::MissingRequired));
        assert!(reg.is_empty());
    }

    #[test]
    fn remove_returns_entry_or_none() {
        let mut reg = Registry::new();
        reg.insert(entry("Bolt", 7)).unwrap();
        assert_eq!(reg.remove("Bolt").unwrap(), Some(entry("Bolt", 7)));
        assert_eq!(reg.remove("Bolt").unwrap(), None);
        assert!(reg.keys().is_empty());
    }

    proptest! {
        #[test]
        fn names_stay_unique(names in proptest::collection::vec("[a-c]{1,2}", 0..30)) {
            let mut reg = Registry::new();
            let mut accepted = std::collections::BTreeSet::new();
            for (i, n) in names.iter().enumerate() {
                let res = reg.insert(entry(n, i as u32));
                prop_assert_eq!(res.is_ok(), accepted.insert(n.clone()));
            }
            prop_assert_eq!(reg.len(), accepted.len());
            prop_assert_eq!(reg.keys(), accepted.into_iter().collect::<Vec<_>>());
        }
    }
}
