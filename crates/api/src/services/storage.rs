//! Local filesystem store for uploaded recordings.
//!
//! Clips land under the configured media root at the relative path produced
//! by the domain path policy. Writing the same path twice overwrites, which
//! is the documented outcome for two uploads from one device within the same
//! second.

use crate::config::StorageConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while storing a clip.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Refusing to store path escaping the media root: {0}")]
    InvalidPath(String),

    #[error("Failed to write clip: {0}")]
    Io(#[from] std::io::Error),
}

/// Filesystem-backed recording store.
#[derive(Debug, Clone)]
pub struct RecordingStore {
    root: PathBuf,
    base_url: String,
}

impl RecordingStore {
    /// Creates a store rooted at the configured media directory.
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.media_root),
            base_url: config.media_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Write a clip body at the given relative path, creating parent
    /// directories as needed.
    pub async fn store(&self, relative_path: &str, body: &[u8]) -> Result<(), StorageError> {
        let relative = Path::new(relative_path);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(StorageError::InvalidPath(relative_path.to_string()));
        }

        let full_path = self.root.join(relative);
        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, body).await?;

        debug!(
            path = %full_path.display(),
            bytes = body.len(),
            "Stored recording clip"
        );

        Ok(())
    }

    /// Public URL for a stored clip.
    pub fn public_url(&self, relative_path: &str) -> String {
        format!("{}/{}", self.base_url, relative_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &Path) -> RecordingStore {
        RecordingStore::new(&StorageConfig {
            media_root: dir.to_string_lossy().into_owned(),
            media_base_url: "/media/".to_string(),
        })
    }

    #[tokio::test]
    async fn test_store_writes_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        store
            .store("videos/device_1/20250314_092653.webm", b"clip-bytes")
            .await
            .unwrap();

        let written = std::fs::read(dir.path().join("videos/device_1/20250314_092653.webm"))
            .unwrap();
        assert_eq!(written, b"clip-bytes");
    }

    #[tokio::test]
    async fn test_store_overwrites_same_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        store.store("videos/device_1/a.webm", b"first").await.unwrap();
        store.store("videos/device_1/a.webm", b"second").await.unwrap();

        let written = std::fs::read(dir.path().join("videos/device_1/a.webm")).unwrap();
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn test_store_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let result = store.store("../outside.webm", b"x").await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));

        let result = store.store("/etc/outside.webm", b"x").await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[test]
    fn test_public_url_joins_base() {
        let store = store_in(Path::new("/tmp/media"));
        assert_eq!(
            store.public_url("videos/device_1/a.webm"),
            "/media/videos/device_1/a.webm"
        );
    }
}
