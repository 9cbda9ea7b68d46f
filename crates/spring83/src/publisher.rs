//! Publishing boards under a keypair.

use std::io::Read;

use chrono::{DateTime, Utc};
use spring83_client::{Client, Server, VerifiedBoard};
use spring83_core::{board, Board, KeyMaterial, PublicKey, MAX_BOARD_LEN};
use tracing::info;

use crate::error::{Error, Result};

/// Publishes boards for one keypair to one server.
///
/// The keypair is integrity-checked on construction, so a corrupt key
/// never reaches the network.
#[derive(Debug, Clone)]
pub struct Publisher {
    key: KeyMaterial,
    client: Client,
    server: Server,
}

impl Publisher {
    pub fn new(key: KeyMaterial, client: Client, server: Server) -> Result<Self> {
        key.check_integrity()?;
        Ok(Self {
            key,
            client,
            server,
        })
    }

    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    pub fn server(&self) -> &Server {
        &self.server
    }

    /// Stamp `content` with the current time and publish it.
    pub async fn publish(&self, content: &[u8]) -> Result<Board> {
        self.publish_at(content, Utc::now()).await
    }

    /// Stamp `content` with `now` (truncated to the second) and publish it.
    ///
    /// The same instant goes into the board's timestamp tag and into
    /// `If-Unmodified-Since`. Oversized content fails before any request.
    pub async fn publish_at(&self, content: &[u8], now: DateTime<Utc>) -> Result<Board> {
        let now = board::truncate_to_second(now);
        let board = board::encode(content, now)?;

        self.client.put(&self.server, &self.key, now, &board).await?;

        info!(
            server = %self.server,
            pubkey = %self.key.public_key(),
            len = board.len(),
            "published board"
        );
        Ok(board)
    }

    /// Fetch this publisher's own board, verifying its signature.
    pub async fn fetch_own(&self) -> Result<VerifiedBoard> {
        Ok(self
            .client
            .get_verified(&self.server, &self.key.public_key())
            .await?)
    }
}

/// Read board content, stopping one byte past the board limit.
///
/// Anything longer than a board is rejected later by encoding; reading
/// stops early so unbounded input is never buffered.
pub fn read_content(reader: impl Read) -> Result<Vec<u8>> {
    let mut content = Vec::new();
    reader
        .take(MAX_BOARD_LEN as u64 + 1)
        .read_to_end(&mut content)
        .map_err(|e| Error::io("reading content", e))?;
    Ok(content)
}
