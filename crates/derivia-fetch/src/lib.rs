//! Remote fetch collaborator
//!
//! Downloads a URL to a fresh local temp path. When the URL path carries no
//! file extension the downloaded file is renamed in place with one guessed
//! from its content, so downstream handling can rely on the extension.

pub mod downloader;
pub mod error;

pub use downloader::{FetchConfig, UrlDownloader};
pub use error::FetchError;
