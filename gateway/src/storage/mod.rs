//! Interchangeable blob storage backends.
//!
//! The backend is picked once at startup from configuration and carried as
//! a tagged variant; every request dispatches through a plain `match`.

use crate::config::{Backend, Config};
use crate::{Error, Result};
use blobgate_core::time::DateTime;

mod local;
pub use local::LocalStorage;

mod memory;
pub use memory::MemoryStorage;

mod s3;
pub use s3::S3Storage;

/// Raw blob bytes plus whatever metadata the backend can supply.
#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub data: Vec<u8>,
    pub created_at: Option<DateTime>,
}

/// The configured storage backend.
#[derive(Debug)]
pub enum Storage {
    Local(LocalStorage),
    Memory(MemoryStorage),
    S3(S3Storage),
}

impl Storage {
    /// Construct the backend selected by the configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        match config.backend {
            Backend::Local => Ok(Storage::Local(
                LocalStorage::new(&config.local_storage_path).await?,
            )),
            Backend::Memory => Ok(Storage::Memory(MemoryStorage::default())),
            Backend::S3 => {
                let require = |value: &Option<String>, name: &str| {
                    value.clone().ok_or_else(|| {
                        Error::Core(blobgate_core::Error::config_invalid(format!(
                            "{name} is required for the s3 backend"
                        )))
                    })
                };

                let bucket = require(&config.s3_bucket, "S3_BUCKET")?;
                let region = require(&config.s3_region, "S3_REGION")?;
                let access_key = require(&config.s3_access_key, "S3_ACCESS_KEY")?;
                let secret_key = require(&config.s3_secret_key, "S3_SECRET_KEY")?;

                Ok(Storage::S3(S3Storage::new(
                    &bucket,
                    &region,
                    blobgate_aws_v4::Credential::new(access_key, secret_key),
                )))
            }
        }
    }

    /// Persist a blob under the given id.
    pub async fn save(&self, id: &str, data: &[u8]) -> Result<()> {
        match self {
            Storage::Local(local) => local.save(id, data).await,
            Storage::Memory(memory) => memory.save(id, data).await,
            Storage::S3(s3) => s3.put(id, data).await,
        }
    }

    /// Fetch a blob by id.
    pub async fn get(&self, id: &str) -> Result<StoredBlob> {
        match self {
            Storage::Local(local) => local.get(id).await,
            Storage::Memory(memory) => memory.get(id).await,
            Storage::S3(s3) => s3.get(id).await,
        }
    }
}
