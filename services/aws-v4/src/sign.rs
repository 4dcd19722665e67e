use crate::constants::{AWS4_HMAC_SHA256, AWS4_REQUEST, AWS4_SECRET_PREFIX};
use crate::{Credential, RequestDescriptor, Scope};
use blobgate_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use blobgate_core::time::{format_date, format_iso8601, DateTime};
use blobgate_core::{Error, Result};
use log::debug;

/// Join the six canonical-request fields with newlines.
///
/// This is a pure assembler over already-canonical strings; it performs no
/// encoding, sorting or trimming of its own. Same inputs, byte-identical
/// output, always.
pub fn canonical_request_string(
    method: &str,
    canonical_uri: &str,
    canonical_query: &str,
    canonical_headers: &str,
    signed_headers: &str,
    hashed_payload: &str,
) -> String {
    [
        method,
        canonical_uri,
        canonical_query,
        canonical_headers,
        signed_headers,
        hashed_payload,
    ]
    .join("\n")
}

/// Render a descriptor as its canonical request.
///
/// The header block carries one `name:value\n` line per header, so the join
/// yields the blank line the wire layout requires between the header block
/// and the signed-header list.
pub fn canonical_request(req: &RequestDescriptor) -> String {
    canonical_request_string(
        req.method().as_str(),
        req.canonical_uri(),
        req.canonical_query(),
        &req.canonical_headers(),
        &req.signed_headers(),
        req.payload_hash(),
    )
}

/// Build the string to sign:
///
/// ```text
/// AWS4-HMAC-SHA256
/// 20220313T072004Z
/// 20220313/<region>/<service>/aws4_request
/// <hex_sha256(canonical_request)>
/// ```
pub fn string_to_sign(canonical_request: &str, time: DateTime, scope: &Scope) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        AWS4_HMAC_SHA256,
        format_iso8601(time),
        scope,
        hex_sha256(canonical_request.as_bytes())
    )
}

/// Derive the scoped signing key from the secret key.
///
/// Four chained HMAC stages, each stage keyed by the previous output. The
/// order is fixed; every stage depends on the prior ciphertext. The result
/// is always 32 bytes.
pub fn generate_signing_key(secret: &str, time: DateTime, region: &str, service: &str) -> Vec<u8> {
    // Sign secret
    let secret = format!("{AWS4_SECRET_PREFIX}{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes());
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes());
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes());
    // Sign request
    hmac_sha256(sign_service.as_slice(), AWS4_REQUEST.as_bytes())
}

/// HMAC-sign the string to sign under the derived key, hex-encoded.
pub fn sign(string_to_sign: &str, signing_key: &[u8]) -> String {
    hex_hmac_sha256(signing_key, string_to_sign.as_bytes())
}

/// Assemble the Authorization header value.
///
/// The token spacing is load-bearing: verifying servers parse this string
/// structurally and reject any deviation.
pub fn authorization_header(
    access_key: &str,
    scope: &Scope,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "{AWS4_HMAC_SHA256} Credential={access_key}/{scope}, SignedHeaders={signed_headers}, Signature={signature}"
    )
}

/// The header values a signed request must carry.
///
/// The outbound transport attaches all three before transmitting.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// The Authorization credential string.
    pub authorization: String,
    /// The signing timestamp, formatted for the date header.
    pub date: String,
    /// The payload hash, formatted for the content-hash header.
    pub content_sha256: String,
}

/// Signer for outbound object-storage requests, implementing AWS SigV4.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// Holds only the region and service; every call is a self-contained pure
/// computation over its inputs, so one signer may be shared freely across
/// tasks. The signing timestamp is an explicit argument: callers capture it
/// once and the same instant flows into both the date header and the
/// credential scope.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,
}

impl RequestSigner {
    /// Create a new signer for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
        }
    }

    /// Sign one request descriptor.
    ///
    /// Fails only on a malformed credential; that is a configuration
    /// defect, not a transient condition, and must abort the outbound
    /// request.
    pub fn sign(
        &self,
        req: &RequestDescriptor,
        credential: &Credential,
        time: DateTime,
    ) -> Result<SignedRequest> {
        if !credential.is_valid() {
            return Err(Error::credential_invalid(
                "access key id or secret access key is empty",
            ));
        }

        let creq = canonical_request(req);
        debug!("calculated canonical request: {creq}");

        let scope = Scope::new(time, &self.region, &self.service);
        let string_to_sign = string_to_sign(&creq, time, &scope);
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(&credential.secret_access_key, time, &self.region, &self.service);
        let signature = sign(&string_to_sign, &signing_key);

        Ok(SignedRequest {
            authorization: authorization_header(
                &credential.access_key_id,
                &scope,
                &req.signed_headers(),
                &signature,
            ),
            date: format_iso8601(time),
            content_sha256: req.payload_hash().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blobgate_core::time::parse_iso8601;
    use blobgate_core::ErrorKind;
    use http::Method;
    use pretty_assertions::assert_eq;

    // The worked example from the AWS SigV4 documentation: GET ListUsers
    // against IAM in us-east-1 at 20150830T123600Z.
    const EXAMPLE_ACCESS_KEY: &str = "AKIDEXAMPLE";
    const EXAMPLE_SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";
    const EMPTY_PAYLOAD_HASH: &str =
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn example_time() -> DateTime {
        parse_iso8601("20150830T123600Z").expect("timestamp must be valid")
    }

    fn example_descriptor() -> RequestDescriptor {
        RequestDescriptor::new(Method::GET, "/", EMPTY_PAYLOAD_HASH)
            .with_query("Action=ListUsers&Version=2010-05-08")
            .with_header(
                "content-type",
                "application/x-www-form-urlencoded; charset=utf-8",
            )
            .with_header("host", "iam.amazonaws.com")
            .with_header("x-amz-date", "20150830T123600Z")
    }

    #[test]
    fn test_canonical_request_matches_reference_vector() {
        let creq = canonical_request(&example_descriptor());
        assert_eq!(
            creq,
            "GET\n\
             /\n\
             Action=ListUsers&Version=2010-05-08\n\
             content-type:application/x-www-form-urlencoded; charset=utf-8\n\
             host:iam.amazonaws.com\n\
             x-amz-date:20150830T123600Z\n\
             \n\
             content-type;host;x-amz-date\n\
             e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            hex_sha256(creq.as_bytes()),
            "f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59"
        );
    }

    #[test]
    fn test_string_to_sign_matches_reference_vector() {
        let creq = canonical_request(&example_descriptor());
        let scope = Scope::new(example_time(), "us-east-1", "iam");
        assert_eq!(
            string_to_sign(&creq, example_time(), &scope),
            "AWS4-HMAC-SHA256\n\
             20150830T123600Z\n\
             20150830/us-east-1/iam/aws4_request\n\
             f536975d06c0309214f805bb90ccff089219ecd68b2577efef23edd43b7e1a59"
        );
    }

    #[test]
    fn test_signing_key_matches_reference_vector() {
        let key = generate_signing_key(EXAMPLE_SECRET_KEY, example_time(), "us-east-1", "iam");
        assert_eq!(
            hex::encode(&key),
            "c4afb1cc5771d871763a393e44b703571b55cc28424d1a5e86da6ed3c154a4b9"
        );
    }

    #[test]
    fn test_signature_matches_reference_vector() {
        let creq = canonical_request(&example_descriptor());
        let scope = Scope::new(example_time(), "us-east-1", "iam");
        let string_to_sign = string_to_sign(&creq, example_time(), &scope);
        let key = generate_signing_key(EXAMPLE_SECRET_KEY, example_time(), "us-east-1", "iam");
        assert_eq!(
            sign(&string_to_sign, &key),
            "5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
    }

    #[test]
    fn test_authorization_header_matches_reference_vector() {
        let signer = RequestSigner::new("iam", "us-east-1");
        let cred = Credential::new(EXAMPLE_ACCESS_KEY, EXAMPLE_SECRET_KEY);
        let signed = signer
            .sign(&example_descriptor(), &cred, example_time())
            .expect("signing must succeed");

        assert_eq!(
            signed.authorization,
            "AWS4-HMAC-SHA256 \
             Credential=AKIDEXAMPLE/20150830/us-east-1/iam/aws4_request, \
             SignedHeaders=content-type;host;x-amz-date, \
             Signature=5d672d79c15b13162d9279b0855cfba6789a8edb4c82c400e06b5924a6f2b5d7"
        );
        assert_eq!(signed.date, "20150830T123600Z");
        assert_eq!(signed.content_sha256, EMPTY_PAYLOAD_HASH);
    }

    #[test]
    fn test_signing_key_is_32_bytes() {
        let key = generate_signing_key("secretKey", example_time(), "us-west-2", "s3");
        assert_eq!(key.len(), 32);
    }

    #[test]
    fn test_signing_key_sensitivity() {
        let time = example_time();
        let base = generate_signing_key("secretKey", time, "us-west-2", "s3");

        let other_day = parse_iso8601("20150831T123600Z").unwrap();
        assert_ne!(base, generate_signing_key("secretKey", other_day, "us-west-2", "s3"));
        assert_ne!(base, generate_signing_key("secretKey", time, "eu-north-1", "s3"));
        assert_ne!(base, generate_signing_key("secretKey", time, "us-west-2", "iam"));
        // Same-day timestamps share a key: only the date enters the chain.
        let same_day = parse_iso8601("20150830T235959Z").unwrap();
        assert_eq!(base, generate_signing_key("secretKey", same_day, "us-west-2", "s3"));
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let key = generate_signing_key("secretKey", example_time(), "us-west-2", "s3");
        let signature = sign("string to sign", &key);
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_sign_is_idempotent_and_time_sensitive() {
        let signer = RequestSigner::new("s3", "us-west-2");
        let cred = Credential::new("accessKey", "secretKey");
        let req = example_descriptor();

        let first = signer.sign(&req, &cred, example_time()).unwrap();
        let second = signer.sign(&req, &cred, example_time()).unwrap();
        assert_eq!(first.authorization, second.authorization);

        let one_second_later = parse_iso8601("20150830T123601Z").unwrap();
        let third = signer.sign(&req, &cred, one_second_later).unwrap();
        assert_ne!(first.authorization, third.authorization);
    }

    #[test]
    fn test_invalid_credential_is_rejected_before_signing() {
        let signer = RequestSigner::new("s3", "us-west-2");
        let cred = Credential::new("accessKey", "");
        let err = signer
            .sign(&example_descriptor(), &cred, example_time())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialInvalid);
    }
}
