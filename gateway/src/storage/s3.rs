use super::StoredBlob;
use crate::{Error, Result};
use blobgate_aws_v4::{
    Credential, RequestDescriptor, RequestSigner, SignedRequest, AWS_URI_ENCODE_SET, S3_SERVICE,
    X_AMZ_CONTENT_SHA_256, X_AMZ_DATE,
};
use blobgate_core::hash::hex_sha256;
use blobgate_core::time::{format_iso8601, now};
use http::Method;
use log::{debug, info};
use percent_encoding::utf8_percent_encode;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};

/// Object-storage backend.
///
/// Every request is signed with a freshly captured timestamp and sent as-is;
/// response handling is status/body pass-through. A request that fails to
/// sign is never transmitted.
#[derive(Debug)]
pub struct S3Storage {
    host: String,
    signer: RequestSigner,
    credential: Credential,
    client: Client,
}

impl S3Storage {
    /// Create a backend for the given bucket and region.
    pub fn new(bucket: &str, region: &str, credential: Credential) -> Self {
        Self {
            host: format!("{bucket}.s3.{region}.amazonaws.com"),
            signer: RequestSigner::new(S3_SERVICE, region),
            credential,
            client: Client::new(),
        }
    }

    pub async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let payload_hash = hex_sha256(data);
        let uri = self.object_uri(key);
        let signed = self.sign(Method::PUT, &uri, &payload_hash)?;

        let resp = self
            .attach_headers(self.client.put(self.url(&uri)), &signed)
            .body(data.to_vec())
            .send()
            .await?;
        Self::check_status(resp, key).await?;

        info!("uploaded blob {} ({} bytes)", key, data.len());
        Ok(())
    }

    pub async fn get(&self, key: &str) -> Result<StoredBlob> {
        let payload_hash = hex_sha256(b"");
        let uri = self.object_uri(key);
        let signed = self.sign(Method::GET, &uri, &payload_hash)?;

        let resp = self
            .attach_headers(self.client.get(self.url(&uri)), &signed)
            .send()
            .await?;
        let resp = Self::check_status(resp, key).await?;
        let data = resp.bytes().await?.to_vec();

        debug!("fetched blob {} ({} bytes)", key, data.len());
        Ok(StoredBlob {
            data,
            created_at: None,
        })
    }

    fn object_uri(&self, key: &str) -> String {
        format!("/{}", utf8_percent_encode(key, &AWS_URI_ENCODE_SET))
    }

    fn url(&self, uri: &str) -> String {
        format!("https://{}{}", self.host, uri)
    }

    /// Capture one timestamp and run the signing pipeline; the same instant
    /// feeds the date header and the credential scope.
    fn sign(&self, method: Method, uri: &str, payload_hash: &str) -> Result<SignedRequest> {
        let time = now();
        let descriptor = RequestDescriptor::new(method, uri, payload_hash)
            .with_header("host", &self.host)
            .with_header(X_AMZ_DATE, &format_iso8601(time))
            .with_header(X_AMZ_CONTENT_SHA_256, payload_hash);

        Ok(self.signer.sign(&descriptor, &self.credential, time)?)
    }

    fn attach_headers(&self, req: RequestBuilder, signed: &SignedRequest) -> RequestBuilder {
        req.header(AUTHORIZATION, &signed.authorization)
            .header(X_AMZ_DATE, &signed.date)
            .header(X_AMZ_CONTENT_SHA_256, &signed.content_sha256)
    }

    async fn check_status(resp: Response, key: &str) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(key.to_string()));
        }

        Err(Error::UpstreamStatus {
            status: status.as_u16(),
            body: resp.text().await.unwrap_or_default(),
        })
    }
}
