//! Error types shared across modules.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the channel between the application and the file host.
///
/// Dialog cancellation and file I/O problems are not errors here: the host
/// reports those inside its response objects.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("failed to start file host: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("file host channel closed")]
    Disconnected,

    #[cfg(test)]
    #[error("timed out waiting for file host")]
    Timeout,

    #[error("malformed host message: {0}")]
    Codec(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type HostResult<T> = Result<T, HostError>;
