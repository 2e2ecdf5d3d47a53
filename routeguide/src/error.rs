//! Error types for the route guide library.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the feature snapshot.
///
/// Any of these is fatal: a service that fails to load its catalog must not
/// start serving.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The snapshot file could not be read.
    #[error("failed to read feature snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot was read but is not a valid list of features.
    #[error("malformed feature snapshot {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of a stream `send` or `receive`.
///
/// Terminal for the call that observed it. Handlers never retry; they hand the
/// error back to the transport unchanged.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The peer went away, or the local end of the channel was dropped.
    #[error("stream closed by peer")]
    Closed,

    /// The underlying connection reported an I/O failure.
    #[error("transport I/O error: {0}")]
    Io(String),

    /// An inbound message could not be decoded.
    #[error("failed to decode message: {0}")]
    Decode(#[source] serde_json::Error),

    /// An outbound message could not be encoded.
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    /// The peer sent something the protocol does not allow.
    #[error("protocol violation: {0}")]
    Protocol(String),
}

/// Result type alias for stream operations.
pub type Result<T> = std::result::Result<T, TransportError>;
