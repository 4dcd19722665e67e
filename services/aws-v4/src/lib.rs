//! AWS SigV4 request signing.
//!
//! The pipeline is pure: a [`RequestDescriptor`], a [`Credential`] and an
//! explicit signing timestamp go in, the three outbound header values come
//! out. Nothing here reads a clock, performs I/O, or keeps mutable state.

mod constants;
pub use constants::AWS_URI_ENCODE_SET;
pub use constants::S3_SERVICE;
pub use constants::X_AMZ_CONTENT_SHA_256;
pub use constants::X_AMZ_DATE;

mod credential;
pub use credential::Credential;

mod scope;
pub use scope::Scope;

mod request;
pub use request::canonical_query_string;
pub use request::RequestDescriptor;

mod sign;
pub use sign::authorization_header;
pub use sign::canonical_request;
pub use sign::canonical_request_string;
pub use sign::generate_signing_key;
pub use sign::sign;
pub use sign::string_to_sign;
pub use sign::RequestSigner;
pub use sign::SignedRequest;
