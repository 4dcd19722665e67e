use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Storage backend selection, resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// File per blob under `--local-storage-path`.
    Local,
    /// In-memory map; contents are lost on restart.
    Memory,
    /// Cloud object storage with SigV4-signed requests.
    S3,
}

/// Gateway configuration, from flags or the environment.
#[derive(Debug, Parser)]
#[command(name = "blobgate", about = "Blob storage gateway")]
pub struct Config {
    /// Address to listen on.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Which storage backend to persist blobs through.
    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value = "local")]
    pub backend: Backend,

    /// Directory used by the local backend.
    #[arg(long, env = "LOCAL_STORAGE_PATH", default_value = "blobs")]
    pub local_storage_path: PathBuf,

    /// Bucket name, required by the s3 backend.
    #[arg(long, env = "S3_BUCKET")]
    pub s3_bucket: Option<String>,

    /// Bucket region, required by the s3 backend.
    #[arg(long, env = "S3_REGION")]
    pub s3_region: Option<String>,

    /// Access key id, required by the s3 backend.
    #[arg(long, env = "S3_ACCESS_KEY", hide_env_values = true)]
    pub s3_access_key: Option<String>,

    /// Secret access key, required by the s3 backend.
    #[arg(long, env = "S3_SECRET_KEY", hide_env_values = true)]
    pub s3_secret_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["blobgate"]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.backend, Backend::Local);
        assert_eq!(config.local_storage_path, PathBuf::from("blobs"));
    }

    #[test]
    fn test_backend_from_flag() {
        let config = Config::parse_from(["blobgate", "--backend", "memory"]);
        assert_eq!(config.backend, Backend::Memory);
    }
}
