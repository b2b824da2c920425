//! Error types for resource manager proxy creation.

use thiserror::Error;
use yarnkit_config::ConfigError;
use yarnkit_security::{AuthMethodParseError, Interrupted, RunAsError};

/// The resource manager address could not be derived from configuration.
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid address '{value}' for '{key}': {reason}")]
    InvalidAddress {
        key: String,
        value: String,
        reason: &'static str,
    },

    /// HA is enabled but no resource manager ids are configured.
    #[error("resource manager HA is enabled but '{key}' is empty")]
    NoHaIds { key: &'static str },

    #[error("resource manager id '{id}' is not one of [{ids}]")]
    UnknownRmId { id: String, ids: String },

    /// Several resource managers are configured and none is marked active.
    #[error("cannot pick the active resource manager among [{ids}]: '{key}' is not set")]
    AmbiguousActiveRm { ids: String, key: &'static str },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AddressError {
    #[must_use]
    pub fn invalid_address(key: &str, value: &str, reason: &'static str) -> Self {
        Self::InvalidAddress {
            key: key.to_owned(),
            value: value.to_owned(),
            reason,
        }
    }
}

/// Failure of a [`TransportFactory`](crate::TransportFactory) to build a proxy.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    AuthMethod(#[from] AuthMethodParseError),

    #[error("invalid endpoint '{uri}': {source}")]
    InvalidEndpoint {
        uri: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// The channel needs a Tokio runtime to drive its connection and none is running.
    #[error("no Tokio runtime available to drive the connection to {address}")]
    NoRuntime { address: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of [`create_rm_proxy`](crate::create_rm_proxy).
///
/// Only interruption is translated; every other failure is the collaborator's
/// own error.
#[derive(Debug, Error)]
pub enum RmProxyError {
    /// Proxy creation was interrupted under the run-as boundary. Not
    /// retryable at this layer.
    #[error("fatal: resource manager proxy creation interrupted: {0}")]
    Fatal(#[source] Interrupted),

    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<RunAsError<TransportError>> for RmProxyError {
    fn from(e: RunAsError<TransportError>) -> Self {
        match e {
            RunAsError::Interrupted(cause) => Self::Fatal(cause),
            RunAsError::Action(e) => Self::Transport(e),
        }
    }
}
