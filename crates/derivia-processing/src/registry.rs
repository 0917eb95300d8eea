//! Strategy registry
//!
//! Resolves strategy names to configured instances. Configuration is an
//! explicit per-registry value, never shared mutable state, so concurrent
//! pipelines with different settings stay isolated.

use crate::error::ProcessError;
use crate::strategies::{GrayscaleStrategy, ImageResizeStrategy, ImageRotateStrategy};
use crate::strategy::{StrategyOptions, VariantStrategy};
use std::collections::HashMap;

type StrategyBuilder = Box<dyn Fn() -> Box<dyn VariantStrategy> + Send + Sync>;

/// Per-strategy default options, keyed by strategy name.
pub type RegistryConfig = HashMap<String, StrategyOptions>;

/// Name-keyed factory for variant strategies.
#[derive(Default)]
pub struct StrategyRegistry {
    builders: HashMap<String, StrategyBuilder>,
    config: RegistryConfig,
}

impl StrategyRegistry {
    /// An empty registry with no strategies registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in image strategies registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("resize", || Box::new(ImageResizeStrategy::new()));
        registry.register("rotate", || Box::new(ImageRotateStrategy::new()));
        registry.register("grayscale", || Box::new(GrayscaleStrategy::new()));
        registry
    }

    /// Register a strategy builder under a name, replacing any existing one.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        builder: impl Fn() -> Box<dyn VariantStrategy> + Send + Sync + 'static,
    ) {
        self.builders.insert(name.into(), Box::new(builder));
    }

    /// Replace the per-strategy default options.
    pub fn set_config(&mut self, config: RegistryConfig) {
        self.config = config;
    }

    /// Resolve a name to a fresh strategy instance with defaults applied.
    pub fn make(&self, name: &str) -> Result<Box<dyn VariantStrategy>, ProcessError> {
        let builder = self
            .builders
            .get(name)
            .ok_or_else(|| ProcessError::UnknownStrategy(name.to_string()))?;

        let mut instance = builder();
        if let Some(defaults) = self.config.get(name) {
            instance.set_options(defaults);
        }

        Ok(instance)
    }
}
