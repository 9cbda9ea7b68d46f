//! Error types for the Spring '83 client.

use thiserror::Error;

/// Errors that can occur during a PUT or GET.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, DNS, TLS, or body transfer failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A PUT answered with something other than 200, 201 or 204.
    #[error("server rejected board: HTTP {status}")]
    ServerRejected { status: u16 },

    /// A GET answered with something other than 200.
    #[error("non-OK response: HTTP {status}")]
    NonOkResponse { status: u16 },

    /// Verified GET: the response carried no signature header.
    #[error("response has no Spring-Signature header")]
    MissingSignature,

    /// Local key, board, or signature problem.
    #[error(transparent)]
    Core(#[from] spring83_core::CoreError),
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
