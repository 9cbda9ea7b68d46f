//! # Spring '83 Core
//!
//! Pure primitives for the Spring '83 protocol: key material, vanity keys,
//! and board encoding.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over keys and byte strings.
//!
//! ## Key Types
//!
//! - [`KeyMaterial`] - A 64-byte Ed25519 keypair (seed followed by public key)
//! - [`PublicKey`] - The 32-byte public key a board is published under
//! - [`VanityRule`] - Decides whether a public key carries a valid expiry suffix
//! - [`Board`] - A timestamp tag followed by content, at most 2217 bytes
//!
//! ## Board Encoding
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use spring83_core::board;
//!
//! let now = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
//! let board = board::encode(b"<p>hello</p>", now).unwrap();
//! assert!(board.as_bytes().ends_with(b"<p>hello</p>"));
//! ```

pub mod board;
pub mod error;
pub mod keys;
pub mod protocol;
pub mod vanity;

pub use board::{encode, max_content_len, timestamp_tag, truncate_to_second, Board};
pub use error::{CoreError, Result};
pub use keys::{KeyMaterial, PublicKey, Signature};
pub use protocol::MAX_BOARD_LEN;
pub use vanity::{KeyPredicate, VanityRule};
