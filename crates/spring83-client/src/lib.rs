//! # Spring '83 Client
//!
//! Signs boards and moves them over HTTP.
//!
//! ## Wire Format
//!
//! Boards live at `https://{server}/{hex public key}`.
//!
//! ```text
//! PUT /{key}                            GET /{key}
//!   User-Agent: spring83/x.y              User-Agent: spring83/x.y
//!   Spring-Version: 83                    Spring-Version: 83
//!   If-Unmodified-Since: <HTTP date>
//!   Content-Type: text/html;charset=utf-8
//!   Content-Length: <n>
//!   Spring-Signature: <hex signature>
//!
//!   -> 200 | 201 | 204                    -> 200 + board
//! ```
//!
//! Any other status is an error carrying the status code.

pub mod client;
pub mod config;
pub mod error;

pub use client::{Client, VerifiedBoard};
pub use config::{ClientConfig, Scheme, Server};
pub use error::{ClientError, Result};
