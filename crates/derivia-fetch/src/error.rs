use std::io;
use std::path::PathBuf;

/// Remote fetch errors
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),

    #[error("failed to download '{url}'")]
    Transfer {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("download of '{url}' returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to write downloaded file to '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to rename '{from}' to '{to}'")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for remote fetch operations
pub type FetchResult<T> = Result<T, FetchError>;
