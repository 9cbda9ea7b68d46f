//! # Spring '83
//!
//! A client for Spring '83: find a vanity keypair, then publish signed
//! boards under it and fetch boards by key.
//!
//! ## Overview
//!
//! - **Keys**: 64-byte Ed25519 keypairs whose public key ends in an
//!   expiry suffix like `83e0523`. Found by parallel search, stored as one
//!   hex line in a keypair file.
//! - **Boards**: up to 2217 bytes, a timestamp tag followed by content.
//! - **Transport**: signed HTTP PUT to `https://{server}/{key}`, plain GET
//!   to fetch.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use spring83::{load_keypair, Client, ClientConfig, Publisher, Server};
//!
//! async fn example() -> spring83::Result<()> {
//!     let key = load_keypair("spring-83-keypair-2024-06-01-2152f8d19b79.txt")?;
//!     let client = Client::new(ClientConfig::default())?;
//!     let publisher = Publisher::new(key, client, Server::new("bogbody.biz"))?;
//!
//!     publisher.publish(b"<p>hello from the other side</p>").await?;
//!     let mine = publisher.fetch_own().await?;
//!     println!("{} bytes", mine.board.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `spring83::core` - keys, vanity rule, board encoding
//! - `spring83::keygen` - vanity key search
//! - `spring83::client` - HTTP transport

pub mod cli;
pub mod error;
pub mod keyfile;
pub mod publisher;

pub use spring83_client as client;
pub use spring83_core as core;
pub use spring83_keygen as keygen;

pub use error::{Error, Result};
pub use keyfile::{keypair_filename, load_keypair, save_keypair};
pub use publisher::{read_content, Publisher};

pub use spring83_client::{Client, ClientConfig, Server, VerifiedBoard};
pub use spring83_core::{Board, KeyMaterial, PublicKey, Signature, VanityRule};
