//! The block catalog: a static table mapping a function type name to its pin
//! layout.
//!
//! Lookups are case-insensitive, so `"AND"`, `"and"` and `"And"` all resolve
//! to the same configuration.

mod defaults;
pub mod definition;

pub use defaults::DEFAULT_FUNCTION_TYPES;
pub use definition::{FunctionConfiguration, PinDefinition};

use crate::error::CatalogError;
use ahash::AHashMap;
use defaults::register_default_configurations;

pub struct Catalog {
    registry: AHashMap<String, FunctionConfiguration>,
}

pub struct CatalogBuilder {
    registry: AHashMap<String, FunctionConfiguration>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        let mut registry = AHashMap::new();
        register_default_configurations(&mut registry);
        Self { registry }
    }

    /// Starts from an empty table instead of the built-in function types.
    pub fn empty() -> Self {
        Self {
            registry: AHashMap::new(),
        }
    }

    /// Adds a configuration, replacing any built-in one with the same type.
    pub fn with_configuration(mut self, configuration: FunctionConfiguration) -> Self {
        self.registry
            .insert(configuration.function_type.to_lowercase(), configuration);
        self
    }

    pub fn build(self) -> Catalog {
        Catalog {
            registry: self.registry,
        }
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        CatalogBuilder::new().build()
    }
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    pub fn get(&self, function_type: &str) -> Result<&FunctionConfiguration, CatalogError> {
        self.registry
            .get(&function_type.to_lowercase())
            .ok_or_else(|| CatalogError::ConfigurationNotFound(function_type.to_string()))
    }

    pub fn contains(&self, function_type: &str) -> bool {
        self.registry.contains_key(&function_type.to_lowercase())
    }

    /// All registered configurations, sorted by type name.
    pub fn configurations(&self) -> Vec<&FunctionConfiguration> {
        let mut configurations: Vec<_> = self.registry.values().collect();
        configurations.sort_by(|a, b| a.function_type.cmp(&b.function_type));
        configurations
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}
