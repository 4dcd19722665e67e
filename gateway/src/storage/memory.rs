use super::StoredBlob;
use crate::{Error, Result};
use blobgate_core::time::{now, DateTime};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory blob store for development and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blobs: RwLock<HashMap<String, (Vec<u8>, DateTime)>>,
}

impl MemoryStorage {
    pub async fn save(&self, id: &str, data: &[u8]) -> Result<()> {
        let mut blobs = self.blobs.write().await;
        if blobs.contains_key(id) {
            return Err(Error::AlreadyExists(id.to_string()));
        }
        blobs.insert(id.to_string(), (data.to_vec(), now()));
        Ok(())
    }

    pub async fn get(&self, id: &str) -> Result<StoredBlob> {
        let blobs = self.blobs.read().await;
        let (data, created_at) = blobs
            .get(id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;
        Ok(StoredBlob {
            data: data.clone(),
            created_at: Some(*created_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_save_and_get() {
        let storage = MemoryStorage::default();
        storage.save("blob1", b"hello").await.unwrap();

        let stored = storage.get("blob1").await.unwrap();
        assert_eq!(stored.data, b"hello");
        assert!(stored.created_at.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_save_is_rejected() {
        let storage = MemoryStorage::default();
        storage.save("blob1", b"hello").await.unwrap();

        let err = storage.save("blob1", b"world").await.unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_get_missing_blob() {
        let storage = MemoryStorage::default();
        let err = storage.get("missing").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
