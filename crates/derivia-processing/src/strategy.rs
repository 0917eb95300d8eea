//! Strategy capability trait and variant definitions

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Strategy-specific options, passed through the pipeline unexamined.
pub type StrategyOptions = serde_json::Map<String, serde_json::Value>;

/// A named, configurable unit of transformation.
///
/// A strategy mutates the file at the target path in place. Applicability is
/// judged per content type; the pipeline decides what an inapplicable
/// strategy means (skip or hard failure) via its force-apply policy.
#[async_trait]
pub trait VariantStrategy: Send + Sync {
    /// Whether this strategy applies to files of the given content type.
    fn should_apply_for_mime_type(&self, content_type: &str) -> bool;

    /// Merge options into the strategy's configuration.
    ///
    /// Later calls override earlier keys, so registry-level defaults can be
    /// layered under per-variant options. Values are validated by the
    /// strategy itself when applied, not here.
    fn set_options(&mut self, options: &StrategyOptions);

    /// Apply the transformation to the file at `target`, in place.
    async fn apply(&self, target: &Path) -> anyhow::Result<()>;
}

/// An ordered mapping of strategy name to options.
///
/// Order is significant: strategies apply sequentially, each operating on
/// the cumulative output of the previous one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantDefinition(IndexMap<String, StrategyOptions>);

impl VariantDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy, builder style.
    pub fn strategy(mut self, name: impl Into<String>, options: StrategyOptions) -> Self {
        self.0.insert(name.into(), options);
        self
    }

    /// Append a strategy with no options.
    pub fn strategy_with_defaults(self, name: impl Into<String>) -> Self {
        self.strategy(name, StrategyOptions::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StrategyOptions)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
