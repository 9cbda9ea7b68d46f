//! Test fixtures and helpers.
//!
//! Deterministic keys, a fixed clock, and an in-process board server.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use spring83_core::protocol::SIGNATURE_HEADER;
use spring83_core::{board, Board, KeyMaterial, PublicKey};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

/// 2024-06-01T12:00:00Z, the instant every fixture board is stamped with.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
        .single()
        .expect("fixed time is unambiguous")
}

/// A deterministic keypair plus board helpers.
pub struct TestFixture {
    pub key: KeyMaterial,
}

impl TestFixture {
    /// Fixture keyed by `[0x42; 32]`.
    pub fn new() -> Self {
        Self::with_seed([0x42; 32])
    }

    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            key: KeyMaterial::derive(&seed),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// Encode `content` at [`fixed_time`].
    pub fn board(&self, content: &[u8]) -> Board {
        board::encode(content, fixed_time()).expect("fixture content fits in a board")
    }

    /// The fixture key with its public half damaged.
    pub fn corrupt_key(&self) -> KeyMaterial {
        let mut bytes = self.key.to_bytes();
        bytes[63] ^= 0x01;
        KeyMaterial::from_bytes(&bytes)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

type Stored = Arc<Mutex<HashMap<String, (Vec<u8>, String)>>>;

/// Responder that keeps the last board PUT under each path and serves it,
/// with its signature header, on GET.
#[derive(Clone)]
struct EchoBoards {
    boards: Stored,
    put_status: u16,
}

impl Respond for EchoBoards {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let path = request.url.path().to_string();
        let mut boards = self.boards.lock().unwrap_or_else(|e| e.into_inner());

        match request.method.as_str() {
            "PUT" => {
                if (200..300).contains(&self.put_status) {
                    let signature = request
                        .headers
                        .get(SIGNATURE_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    boards.insert(path, (request.body.clone(), signature));
                }
                ResponseTemplate::new(self.put_status)
            }
            "GET" => match boards.get(&path) {
                Some((body, signature)) => ResponseTemplate::new(200)
                    .insert_header(SIGNATURE_HEADER, signature.as_str())
                    .set_body_bytes(body.clone()),
                None => ResponseTemplate::new(404),
            },
            _ => ResponseTemplate::new(405),
        }
    }
}

/// A mock Spring '83 server that stores boards in memory.
///
/// It accepts any PUT without checking signatures or timestamps; it only
/// stands in for the far end of the wire.
pub struct BoardServer {
    mock: MockServer,
    boards: Stored,
}

impl BoardServer {
    /// Start a server that answers PUT with 201.
    pub async fn start() -> Self {
        Self::start_with_put_status(201).await
    }

    /// Start a server that answers PUT with `status`, storing the board
    /// only for 2xx statuses.
    pub async fn start_with_put_status(status: u16) -> Self {
        let mock = MockServer::start().await;
        let responder = EchoBoards {
            boards: Stored::default(),
            put_status: status,
        };
        let boards = Arc::clone(&responder.boards);

        Mock::given(any()).respond_with(responder).mount(&mock).await;

        Self { mock, boards }
    }

    /// `host:port` to reach the server over plain HTTP.
    pub fn host(&self) -> String {
        self.mock.address().to_string()
    }

    /// The board stored for `key`, if any.
    pub fn stored(&self, key: &PublicKey) -> Option<Vec<u8>> {
        let boards = self.boards.lock().unwrap_or_else(|e| e.into_inner());
        boards.get(&format!("/{}", key.to_hex())).map(|(body, _)| body.clone())
    }

    /// Number of requests received so far.
    pub async fn request_count(&self) -> usize {
        self.mock
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}
