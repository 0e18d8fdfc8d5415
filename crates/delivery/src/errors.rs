//! Error types for the continuous-delivery provisioning domain.
//!
//! [`ProvisioningError`] covers every condition that ends a workflow run. It is
//! deliberately small: the workflow never recovers from an error locally, so
//! callers only need to know which of four kinds of failure occurred.
//!
//! [`ServiceError`] is the port-level error returned by collaborator traits in
//! [`crate::ports`]. Infrastructure crates translate their transport errors into
//! it; the workflow propagates it unchanged through
//! [`ProvisioningError::Service`].

use thiserror::Error;

// ---------------------------------------------------------------------------
// Port-level errors
// ---------------------------------------------------------------------------

/// Failure reported by a remote collaborator (repository-info provider,
/// account service, continuous-delivery service).
///
/// The workflow applies no retry policy to any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request could not be sent or the connection failed mid-flight.
    #[error("Request to {endpoint} failed: {message}")]
    Transport {
        /// Endpoint the request was addressed to.
        endpoint: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The remote service answered with a non-success HTTP status.
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Http {
        /// Endpoint the request was addressed to.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    ///
    /// This includes provisioning statuses outside the known set.
    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse {
        /// Endpoint the request was addressed to.
        endpoint: String,
        /// Description of the decoding problem.
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Workflow-level errors
// ---------------------------------------------------------------------------

/// Errors that end a continuous-delivery setup run.
///
/// There is no partial-success shape: the caller receives either a complete
/// [`crate::ContinuousDeliveryResult`] or exactly one of these.
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// Caller input is missing or unusable.
    ///
    /// Produced by: unsupported application type, missing account name for a
    /// repository not hosted by Team Services, non-existent account when the
    /// account is only verified.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },

    /// The provisioning request was accepted but the remote side reported a
    /// status other than `queued` straight away.
    #[error("Unknown status returned from provisioning_configuration: {status}")]
    UnexpectedState {
        /// The status string reported by the service.
        status: String,
    },

    /// The remote side finished provisioning with a `failed` status.
    #[error("Continuous delivery provisioning failed: {message}")]
    RemoteProvisioning {
        /// Server-supplied status message.
        message: String,
    },

    /// A collaborator call failed; propagated without retry.
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ProvisioningError {
    /// Convenience constructor for [`ProvisioningError::Configuration`].
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_errors_are_transparent() {
        let err: ProvisioningError = ServiceError::Http {
            endpoint: "https://contoso.visualstudio.com".to_string(),
            status: 401,
            message: "Unauthorized".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "https://contoso.visualstudio.com returned HTTP 401: Unauthorized"
        );
    }

    #[test]
    fn unexpected_state_names_the_status() {
        let err = ProvisioningError::UnexpectedState {
            status: "succeeded".to_string(),
        };
        assert!(err.to_string().ends_with(": succeeded"));
    }
}
