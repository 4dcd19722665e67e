use crate::{Error, Result};
use blobgate_core::hash::{base64_decode, base64_encode};
use blobgate_core::time::DateTime;
use serde::{Deserialize, Serialize};

/// A stored blob as returned by the API. `data` is base64-encoded.
#[derive(Debug, Clone, Serialize)]
pub struct Blob {
    pub id: String,
    pub data: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
}

impl Blob {
    /// Build the API representation from raw stored bytes.
    pub fn new(id: impl Into<String>, data: &[u8], created_at: Option<DateTime>) -> Self {
        Self {
            id: id.into(),
            data: base64_encode(data),
            size: data.len() as u64,
            created_at,
        }
    }
}

/// Request body of `POST /v1/blobs`.
#[derive(Debug, Deserialize)]
pub struct BlobUpload {
    pub id: String,
    pub data: String,
}

impl BlobUpload {
    /// Validate the upload and decode its payload.
    ///
    /// The id doubles as a storage key (a file name for the local backend,
    /// an object key for s3), so it is restricted to a safe character set.
    pub fn validate(&self) -> Result<Vec<u8>> {
        if self.id.is_empty() {
            return Err(Error::InvalidRequest("id must not be empty".to_string()));
        }
        if !self
            .id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            || self.id.starts_with('.')
        {
            return Err(Error::InvalidRequest(format!(
                "id {:?} may only contain alphanumerics, '-', '_' and '.'",
                self.id
            )));
        }

        base64_decode(&self.data)
            .map_err(|_| Error::InvalidRequest("data is not valid base64".to_string()))
    }
}
