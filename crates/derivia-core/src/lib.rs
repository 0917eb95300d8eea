//! Derivia core library
//!
//! This crate provides the file handle and MIME helpers shared by the
//! processing and fetch crates: a `LocalFile` wrapping one real file on
//! local storage, plus content sniffing used to resolve MIME types and
//! file extensions.

pub mod error;
pub mod file;
pub mod mime;

pub use error::FileError;
pub use file::LocalFile;
