//! Error types for the Spring '83 core.

use thiserror::Error;

/// Errors raised while handling keys and boards.
///
/// Everything here is detected locally, before any network call.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("short hex-encoded keypair: {len} bytes, need {need}")]
    ShortKeypair { len: usize, need: usize },

    #[error("malformed keypair: {0}")]
    MalformedKeypair(String),

    /// The stored public half does not match the one derived from the seed.
    #[error("invalid keypair: public key does not match seed")]
    Integrity,

    #[error("content too long: {len} bytes, at most {max} allowed")]
    ContentTooLong { len: usize, max: usize },

    #[error("board too long: {len} bytes, at most 2217 allowed")]
    BoardTooLong { len: usize },

    #[error("malformed board: {0}")]
    MalformedBoard(String),

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
