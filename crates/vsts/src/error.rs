//! Error type for the Team Services adapter.

use delivery::ServiceError;
use thiserror::Error;

/// Errors raised while talking to Team Services.
///
/// Converted into [`ServiceError`] at the port boundary; the workflow never
/// sees `reqwest` types.
#[derive(Debug, Error)]
pub enum VstsError {
    /// Endpoint URL could not be built from configuration and input.
    #[error("Invalid endpoint URL '{url}': {message}")]
    InvalidUrl {
        /// The offending URL or template.
        url: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request failed before a response arrived.
    #[error("Request to {endpoint} failed: {source}")]
    Request {
        /// Endpoint the request was addressed to.
        endpoint: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        /// Endpoint the request was addressed to.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode {
        /// Endpoint the request was addressed to.
        endpoint: String,
        /// Decoder diagnostic.
        message: String,
    },
}

impl From<VstsError> for ServiceError {
    fn from(err: VstsError) -> Self {
        match err {
            VstsError::InvalidUrl { url, message } => ServiceError::Transport {
                endpoint: url,
                message,
            },
            VstsError::Client(source) => ServiceError::Transport {
                endpoint: String::new(),
                message: source.to_string(),
            },
            VstsError::Request { endpoint, source } => ServiceError::Transport {
                endpoint,
                message: source.to_string(),
            },
            VstsError::Status {
                endpoint,
                status,
                body,
            } => ServiceError::Http {
                endpoint,
                status,
                message: body,
            },
            VstsError::Decode { endpoint, message } => {
                ServiceError::InvalidResponse { endpoint, message }
            }
        }
    }
}
