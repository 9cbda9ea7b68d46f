//! HTTP client for publishing and fetching boards.
//!
//! Each call is one request and one response. There is no retry, no
//! backoff, and no cache; deadlines belong to the caller, who can drop the
//! future or wrap it in a timeout.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::{header, StatusCode};
use spring83_core::protocol::{
    http_date, BOARD_CONTENT_TYPE, PROTOCOL_VERSION, SIGNATURE_HEADER, VERSION_HEADER,
};
use spring83_core::{Board, CoreError, KeyMaterial, PublicKey, Signature};
use tracing::{debug, warn};

use crate::config::{ClientConfig, Server};
use crate::error::{ClientError, Result};

/// A board whose signature has been checked against the key it was
/// fetched under.
#[derive(Debug, Clone)]
pub struct VerifiedBoard {
    pub board: Board,
    pub signature: Signature,
}

/// Signing HTTP client for Spring '83 servers.
///
/// # Example
///
/// ```rust,no_run
/// use spring83_client::{Client, ClientConfig, Server};
///
/// # async fn example() -> Result<(), spring83_client::ClientError> {
/// let client = Client::new(ClientConfig::default())?;
/// let server = Server::new("bogbody.biz");
/// let body = client
///     .get(&server, "ca93846ae61903a862d44727c16fed4b80c0522cab5e5b8b54763068b83e0623")
///     .await?;
/// println!("{}", String::from_utf8_lossy(&body));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .build()?;
        Ok(Self { http })
    }

    /// Sign `board` with `key` and PUT it to the key's board URL.
    ///
    /// `now` is sent as `If-Unmodified-Since`; it should be the instant the
    /// board was stamped with. Succeeds on 200, 201 and 204 only.
    pub async fn put(
        &self,
        server: &Server,
        key: &KeyMaterial,
        now: DateTime<Utc>,
        board: &Board,
    ) -> Result<()> {
        key.check_integrity()?;

        let signature = key.sign(board.as_bytes());
        let url = server.board_url(&key.public_key());
        debug!(%url, len = board.len(), "PUT board");

        let response = self
            .http
            .put(&url)
            .header(header::IF_UNMODIFIED_SINCE, http_date(now))
            .header(header::CONTENT_TYPE, BOARD_CONTENT_TYPE)
            .header(header::CONTENT_LENGTH, board.len())
            .header(VERSION_HEADER, PROTOCOL_VERSION)
            .header(SIGNATURE_HEADER, signature.to_hex())
            .body(board.as_bytes().to_vec())
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => {
                debug!(%url, status = status.as_u16(), "board accepted");
                Ok(())
            }
            _ => {
                warn!(%url, status = status.as_u16(), "board rejected");
                Err(ClientError::ServerRejected {
                    status: status.as_u16(),
                })
            }
        }
    }

    /// GET the board published under `pubkey_hex`, byte for byte.
    ///
    /// The body is not verified; see [`Client::get_verified`].
    pub async fn get(&self, server: &Server, pubkey_hex: &str) -> Result<Bytes> {
        let key = PublicKey::from_hex(pubkey_hex)?;
        let response = self.fetch(server, &key).await?;
        Ok(response.bytes().await?)
    }

    /// GET a board and check its `Spring-Signature` header against `key`.
    pub async fn get_verified(&self, server: &Server, key: &PublicKey) -> Result<VerifiedBoard> {
        let response = self.fetch(server, key).await?;

        let signature = response
            .headers()
            .get(SIGNATURE_HEADER)
            .ok_or(ClientError::MissingSignature)?
            .to_str()
            .map_err(|_| CoreError::InvalidSignature)?;
        let signature = Signature::from_hex(signature.trim())?;

        let board = Board::from_bytes(response.bytes().await?.to_vec())?;
        board.verify(key, &signature)?;

        Ok(VerifiedBoard { board, signature })
    }

    async fn fetch(&self, server: &Server, key: &PublicKey) -> Result<reqwest::Response> {
        let url = server.board_url(key);
        debug!(%url, "GET board");

        let response = self
            .http
            .get(&url)
            .header(VERSION_HEADER, PROTOCOL_VERSION)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%url, status = status.as_u16(), "non-OK response");
            return Err(ClientError::NonOkResponse {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}
