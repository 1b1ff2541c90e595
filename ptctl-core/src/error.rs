//! Error types for ptctl.
//!
//! All errors use `thiserror` for ergonomic error handling and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ptctl operations.
pub type Result<T> = std::result::Result<T, PassthruError>;

/// Failure reported by a remote collaborator (inventory, update or host finder).
///
/// These are carried unmodified inside [`PassthruError`] so the operator sees
/// exactly what the management service said.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("service fault ({code}): {message}")]
    Fault { code: String, message: String },

    #[error("invalid response: {reason}")]
    InvalidResponse { reason: String },
}

/// Main error type for ptctl.
#[derive(Error, Debug)]
pub enum PassthruError {
    // Input errors
    #[error("one device address is required at least")]
    NoAddresses,

    // Host errors
    #[error("cannot resolve target host: {reason}")]
    HostResolution { reason: String },

    #[error("host {host} does not exist on the management service")]
    HostNotFound { host: String },

    // Device errors
    #[error("{id} on host {host} is not capable to toggle pci passthrough")]
    DeviceNotCapable { id: String, host: String },

    #[error("{id} is not found in the device list of host {host}")]
    DeviceNotFound { id: String, host: String },

    // Remote errors
    #[error("failed to retrieve host properties: {0}")]
    RemoteFetch(#[source] ServiceError),

    #[error("failed to update passthrough configuration on host {host}: {source}")]
    RemoteUpdate {
        host: String,
        #[source]
        source: ServiceError,
    },

    // Configuration errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("I/O error at {path:?}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PassthruError {
    /// Offending device id, for errors that name one.
    pub fn device_id(&self) -> Option<&str> {
        match self {
            Self::DeviceNotCapable { id, .. } | Self::DeviceNotFound { id, .. } => Some(id),
            _ => None,
        }
    }
}
