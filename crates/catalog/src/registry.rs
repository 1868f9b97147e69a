use crate::error::{CatalogError, Result};
use std::collections::BTreeMap;

/// Case-insensitive name index over the catalog.
///
/// Relation metadata records target class names with whatever casing the
/// backend used, so every lookup goes through a lowercased key. Values
/// are the capitalized catalog keys.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    index: BTreeMap<String, String>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model under its capitalized display name.
    ///
    /// Fails when another model already occupies the same name under
    /// case-insensitive comparison.
    pub fn insert(&mut self, display_name: &str) -> Result<()> {
        let key = display_name.to_lowercase();
        if self.index.contains_key(&key) {
            return Err(CatalogError::DuplicateModel(display_name.to_string()));
        }
        self.index.insert(key, display_name.to_string());
        Ok(())
    }

    /// Resolve a name of any casing to the catalog key it registers.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.index.get(&name.to_lowercase()).map(String::as_str)
    }
}
