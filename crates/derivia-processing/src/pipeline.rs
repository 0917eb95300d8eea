//! Variant pipeline
//!
//! `VariantProcessor::process` copies the source to a collision-resistant
//! temporary path, applies each configured strategy in declared order to
//! that copy, and returns the copy as the variant result. Applicability is
//! always judged against the original source's content type, not the
//! working copy's, so a fixed strategy list behaves predictably even when
//! an intermediate step converts the file to another type.

use crate::error::ProcessError;
use crate::registry::{RegistryConfig, StrategyRegistry};
use crate::strategy::VariantDefinition;
use derivia_core::LocalFile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Processor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessorConfig {
    /// When true, a strategy that declines applicability is a hard failure
    /// instead of a silent skip.
    pub force_apply: bool,
    /// Per-strategy default options, forwarded verbatim to the registry.
    pub factory: Option<RegistryConfig>,
}

/// Produces processed variants for source files.
pub struct VariantProcessor {
    registry: StrategyRegistry,
    force_apply: bool,
    tmp_dir: PathBuf,
}

impl VariantProcessor {
    pub fn new(registry: StrategyRegistry) -> Self {
        Self {
            registry,
            force_apply: false,
            tmp_dir: std::env::temp_dir(),
        }
    }

    /// Apply processor configuration, forwarding factory overrides to the
    /// registry. Not safe to call concurrently with in-flight processing;
    /// configure before use.
    pub fn set_config(&mut self, config: ProcessorConfig) {
        self.force_apply = config.force_apply;
        if let Some(factory) = config.factory {
            self.registry.set_config(factory);
        }
    }

    pub fn with_config(mut self, config: ProcessorConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Override the directory that working copies are created in.
    pub fn with_tmp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmp_dir = dir.into();
        self
    }

    /// Produce a processed variant for a given source file.
    ///
    /// `variant` is a free-form label used by callers for output routing;
    /// the pipeline passes it through and logs it, nothing more. Strategies
    /// apply sequentially in the order given by `strategies`; each operates
    /// on the cumulative output of the previous one. On any failure the
    /// partially-transformed working copy is removed from disk and no
    /// variant is returned.
    pub async fn process(
        &self,
        source: &LocalFile,
        variant: &str,
        strategies: &VariantDefinition,
    ) -> Result<LocalFile, ProcessError> {
        let copy = self.make_working_copy(source).await?;
        let source_type = source.content_type().await?;

        for (name, options) in strategies.iter() {
            let mut instance = self.registry.make(name)?;
            instance.set_options(options);

            if !instance.should_apply_for_mime_type(&source_type) {
                if self.force_apply {
                    return Err(ProcessError::StrategyNotApplied {
                        strategy: name.clone(),
                        path: source.path().to_path_buf(),
                        source: None,
                    });
                }

                tracing::debug!(
                    strategy = %name,
                    content_type = %source_type,
                    "Strategy not applicable, skipping"
                );
                continue;
            }

            instance
                .apply(copy.path())
                .await
                .map_err(|e| ProcessError::StrategyNotApplied {
                    strategy: name.clone(),
                    path: source.path().to_path_buf(),
                    source: Some(e.into()),
                })?;
        }

        let file = copy.into_file().await?;

        tracing::info!(
            variant = %variant,
            source = %source.path().display(),
            output = %file.path().display(),
            strategies = strategies.len(),
            "Processed variant"
        );

        Ok(file)
    }

    async fn make_working_copy(&self, source: &LocalFile) -> Result<WorkingCopy, ProcessError> {
        let path = self.tmp_dir.join(format!("variant-{}", Uuid::new_v4()));

        fs::copy(source.path(), &path)
            .await
            .map_err(|e| ProcessError::CopyFailed {
                path: path.clone(),
                source: e,
            })?;

        Ok(WorkingCopy { path, keep: false })
    }
}

/// Scoped working copy: removed from disk on drop unless handed to the
/// caller via `into_file`.
struct WorkingCopy {
    path: PathBuf,
    keep: bool,
}

impl WorkingCopy {
    fn path(&self) -> &Path {
        &self.path
    }

    async fn into_file(mut self) -> Result<LocalFile, ProcessError> {
        self.keep = true;
        let file = LocalFile::from_path(&self.path).await?;
        Ok(file)
    }
}

impl Drop for WorkingCopy {
    fn drop(&mut self) {
        if !self.keep {
            if let Err(e) = std::fs::remove_file(&self.path) {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove working copy"
                );
            }
        }
    }
}
