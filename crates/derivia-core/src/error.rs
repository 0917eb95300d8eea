use std::io;
use std::path::PathBuf;

/// File handle errors
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("local file not found at {path}")]
    NotFound { path: PathBuf },

    #[error("failed to write file data to '{path}'")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to copy '{from}' to '{to}'")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to unlink '{path}'")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for file handle operations
pub type FileResult<T> = Result<T, FileError>;
