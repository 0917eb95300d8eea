use derivia_core::FileError;
use std::io;
use std::path::PathBuf;

/// Variant processing errors
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to make variant copy to '{path}'")]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("strategy '{strategy}' not applied to '{path}'")]
    StrategyNotApplied {
        strategy: String,
        path: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("unknown variant strategy '{0}'")]
    UnknownStrategy(String),

    #[error(transparent)]
    File(#[from] FileError),
}

/// Result type for variant processing
pub type ProcessResult<T> = Result<T, ProcessError>;
