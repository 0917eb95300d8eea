//! Variant processing
//!
//! This crate turns a source file into named variants by applying an
//! ordered list of transformation strategies to an isolated working copy.
//! The source file is never mutated; each `process` call owns its own
//! temporary copy and returns it as the variant result.
//!
//! Strategies are resolved by name through a [`StrategyRegistry`] and
//! invoked uniformly through the [`VariantStrategy`] capability trait.
//! Built-in image strategies (resize, rotate, grayscale) live in
//! [`strategies`].

pub mod error;
pub mod pipeline;
pub mod registry;
pub mod strategies;
pub mod strategy;

pub use error::ProcessError;
pub use pipeline::{ProcessorConfig, VariantProcessor};
pub use registry::{RegistryConfig, StrategyRegistry};
pub use strategy::{StrategyOptions, VariantDefinition, VariantStrategy};
