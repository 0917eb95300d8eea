//! Local file handle
//!
//! `LocalFile` wraps one real file on local storage. The path is the
//! authoritative identity of the handle: construction fails if it does not
//! reference an existing regular file, and the backing file is only ever
//! removed by an explicit `delete` call.

use crate::error::{FileError, FileResult};
use crate::mime;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

/// How many leading bytes to read when sniffing a content type.
const SNIFF_LEN: usize = 32;

/// A handle to one regular file on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size: u64,
    content_type: OnceLock<String>,
}

impl LocalFile {
    /// Wrap an existing local file.
    ///
    /// Fails with [`FileError::NotFound`] if the path does not reference an
    /// existing regular file at call time. The logical name is derived from
    /// the basename.
    pub async fn from_path(path: impl Into<PathBuf>) -> FileResult<Self> {
        let path = path.into();

        let meta = match fs::metadata(&path).await {
            Ok(meta) => meta,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(FileError::NotFound { path });
            }
            Err(e) => return Err(FileError::Io(e)),
        };

        if !meta.is_file() {
            return Err(FileError::NotFound { path });
        }

        let path = fs::canonicalize(&path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(LocalFile {
            path,
            name,
            size: meta.len(),
            content_type: OnceLock::new(),
        })
    }

    /// Create a handle from raw bytes, written to a fresh temp path.
    pub async fn from_bytes(data: &[u8], name: impl Into<String>) -> FileResult<Self> {
        let path = std::env::temp_dir().join(format!("derivia-{}", Uuid::new_v4()));

        let mut file = fs::File::create(&path)
            .await
            .map_err(|e| FileError::WriteFailed {
                path: path.clone(),
                source: e,
            })?;
        file.write_all(data)
            .await
            .map_err(|e| FileError::WriteFailed {
                path: path.clone(),
                source: e,
            })?;
        file.sync_all()
            .await
            .map_err(|e| FileError::WriteFailed {
                path: path.clone(),
                source: e,
            })?;

        let mut handle = Self::from_path(path).await?;
        handle.name = name.into();
        Ok(handle)
    }

    /// Canonical resolved filesystem path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Logical display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes at construction time.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Pin the content type, bypassing lazy resolution.
    pub fn with_content_type(self, content_type: impl Into<String>) -> Self {
        let _ = self.content_type.set(content_type.into());
        self
    }

    /// Resolve the content type.
    ///
    /// Resolution order: explicitly set value, extension lookup, magic-number
    /// sniff of the leading bytes. Cached after the first resolution.
    pub async fn content_type(&self) -> FileResult<String> {
        if let Some(ct) = self.content_type.get() {
            return Ok(ct.clone());
        }

        let resolved = match mime::guess_from_path(&self.path) {
            Some(ct) => ct,
            None => {
                let mut head = vec![0u8; SNIFF_LEN];
                let mut file = fs::File::open(&self.path).await?;
                let n = file.read(&mut head).await?;
                head.truncate(n);
                mime::sniff(&head).to_string()
            }
        };

        let _ = self.content_type.set(resolved.clone());
        Ok(resolved)
    }

    /// Full byte content of the file. An empty file yields empty bytes.
    pub async fn content(&self) -> FileResult<Bytes> {
        let data = fs::read(&self.path).await?;
        Ok(Bytes::from(data))
    }

    /// Byte-for-byte duplication to a new path.
    pub async fn copy_to(&self, dest: &Path) -> FileResult<()> {
        fs::copy(&self.path, dest)
            .await
            .map_err(|e| FileError::CopyFailed {
                from: self.path.clone(),
                to: dest.to_path_buf(),
                source: e,
            })?;

        tracing::debug!(from = %self.path.display(), to = %dest.display(), "Copied file");
        Ok(())
    }

    /// Remove the backing file, consuming the handle.
    pub async fn delete(self) -> FileResult<()> {
        fs::remove_file(&self.path)
            .await
            .map_err(|e| FileError::DeleteFailed {
                path: self.path.clone(),
                source: e,
            })?;

        tracing::debug!(path = %self.path.display(), "Deleted file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PNG_HEAD: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[tokio::test]
    async fn test_from_path_missing_file() {
        let dir = tempdir().unwrap();
        let result = LocalFile::from_path(dir.path().join("nope.txt")).await;
        assert!(matches!(result, Err(FileError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_from_path_rejects_directory() {
        let dir = tempdir().unwrap();
        let result = LocalFile::from_path(dir.path()).await;
        assert!(matches!(result, Err(FileError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_from_bytes_round_trip() {
        let file = LocalFile::from_bytes(b"hello", "greeting.txt").await.unwrap();
        assert_eq!(file.name(), "greeting.txt");
        assert_eq!(file.size(), 5);
        assert_eq!(file.content().await.unwrap().as_ref(), b"hello");
        file.delete().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_file_content_is_empty() {
        let file = LocalFile::from_bytes(b"", "empty").await.unwrap();
        assert!(file.content().await.unwrap().is_empty());
        file.delete().await.unwrap();
    }

    #[tokio::test]
    async fn test_name_derived_from_basename() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.png");
        fs::write(&path, PNG_HEAD).await.unwrap();

        let file = LocalFile::from_path(&path).await.unwrap();
        assert_eq!(file.name(), "photo.png");
    }

    #[tokio::test]
    async fn test_content_type_from_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.png");
        fs::write(&path, PNG_HEAD).await.unwrap();

        let file = LocalFile::from_path(&path).await.unwrap();
        assert_eq!(file.content_type().await.unwrap(), "image/png");
    }

    #[tokio::test]
    async fn test_content_type_sniffed_without_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("download");
        fs::write(&path, PNG_HEAD).await.unwrap();

        let file = LocalFile::from_path(&path).await.unwrap();
        assert_eq!(file.content_type().await.unwrap(), "image/png");
    }

    #[tokio::test]
    async fn test_explicit_content_type_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.png");
        fs::write(&path, b"not a png").await.unwrap();

        let file = LocalFile::from_path(&path)
            .await
            .unwrap()
            .with_content_type("text/plain");
        assert_eq!(file.content_type().await.unwrap(), "text/plain");
    }

    #[tokio::test]
    async fn test_copy_to() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"payload").await.unwrap();

        let file = LocalFile::from_path(&src).await.unwrap();
        let dest = dir.path().join("b.txt");
        file.copy_to(&dest).await.unwrap();

        assert_eq!(fs::read(&dest).await.unwrap(), b"payload");
        assert_eq!(fs::read(&src).await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn test_delete_missing_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.txt");
        fs::write(&path, b"x").await.unwrap();

        let file = LocalFile::from_path(&path).await.unwrap();
        fs::remove_file(&path).await.unwrap();

        let result = file.delete().await;
        assert!(matches!(result, Err(FileError::DeleteFailed { .. })));
    }
}
