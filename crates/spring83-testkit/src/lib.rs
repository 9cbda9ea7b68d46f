//! # Spring '83 Testkit
//!
//! Testing utilities for the Spring '83 crates.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: fixed seeds with their public keys and board
//!   signatures, for cross-implementation checks
//! - **Generators**: proptest strategies for seeds, content, and timestamps
//! - **Fixtures**: deterministic keys and a mock board server
//!
//! ## Golden Vectors
//!
//! ```rust
//! use spring83_testkit::vectors::{all_vectors, verify_all_vectors};
//!
//! for (name, ok) in verify_all_vectors() {
//!     assert!(ok, "{name}");
//! }
//! assert!(!all_vectors().is_empty());
//! ```
//!
//! ## Mock Server
//!
//! ```rust,no_run
//! use spring83_testkit::fixtures::BoardServer;
//!
//! # async fn example() {
//! let mock = BoardServer::start().await;
//! let host = mock.host();
//! // point a client at Server::plaintext(host) ...
//! # }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{fixed_time, BoardServer, TestFixture};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
