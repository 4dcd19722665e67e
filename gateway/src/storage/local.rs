use super::StoredBlob;
use crate::{Error, Result};
use log::info;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// File-per-blob storage under a configured directory.
#[derive(Debug)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Open the storage directory, creating it if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        info!("local storage ready at {}", root.display());
        Ok(Self { root })
    }

    pub async fn save(&self, id: &str, data: &[u8]) -> Result<()> {
        let path = self.root.join(id);
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => Error::AlreadyExists(id.to_string()),
                _ => Error::Io(e),
            })?;
        file.write_all(data).await?;
        file.flush().await?;
        info!("saved blob {} ({} bytes)", id, data.len());
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<StoredBlob> {
        let path = self.root.join(id);
        let data = fs::read(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(id.to_string()),
            _ => Error::Io(e),
        })?;

        // Creation time is not portable; modification time is, and blobs
        // are written exactly once.
        let created_at = fs::metadata(&path)
            .await
            .ok()
            .and_then(|m| m.modified().ok())
            .map(Into::into);

        Ok(StoredBlob { data, created_at })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_save_and_get() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage.save("blob1", b"hello").await.unwrap();
        let stored = storage.get("blob1").await.unwrap();
        assert_eq!(stored.data, b"hello");
        assert!(stored.created_at.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_save_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage.save("blob1", b"hello").await.unwrap();
        let err = storage.save("blob1", b"world").await.unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));

        // First write is untouched.
        assert_eq!(storage.get("blob1").await.unwrap().data, b"hello");
    }

    #[tokio::test]
    async fn test_get_missing_blob() {
        let dir = tempfile::tempdir().expect("tempdir must be created");
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let err = storage.get("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
