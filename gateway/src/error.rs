use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;
use thiserror::Error;

/// The error type for gateway operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body failed validation.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No blob with the given id exists in the selected backend.
    #[error("blob {0} not found")]
    NotFound(String),

    /// A blob with the given id already exists.
    #[error("blob {0} already exists")]
    AlreadyExists(String),

    /// The object-storage service answered with a non-success status.
    #[error("object storage responded with status {status}: {body}")]
    UpstreamStatus {
        /// HTTP status returned by the service.
        status: u16,
        /// Response body, passed through verbatim.
        body: String,
    },

    /// The outbound request could not be transmitted.
    #[error("object storage request failed")]
    Transport(#[from] reqwest::Error),

    /// Local filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Signing or configuration failure from the core.
    #[error(transparent)]
    Core(#[from] blobgate_core::Error),
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::AlreadyExists(_) => StatusCode::CONFLICT,
            Error::UpstreamStatus { .. } | Error::Transport(_) => StatusCode::BAD_GATEWAY,
            Error::Io(_) | Error::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("request failed: {self}");
        }

        (status, self.to_string()).into_response()
    }
}
