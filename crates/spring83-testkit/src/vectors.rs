//! Golden test vectors for deterministic verification.
//!
//! Ed25519 signatures are deterministic, so a seed, a timestamp, and some
//! content pin down the exact public key, board bytes, and signature any
//! conforming implementation must produce.

use chrono::{DateTime, TimeZone, Utc};

use spring83_core::{board, Board, KeyMaterial};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    /// Board content before the timestamp tag.
    pub content: &'static [u8],
    /// Unix seconds stamped into the board.
    pub timestamp: i64,
    /// Expected public key (hex).
    pub expected_pubkey: &'static str,
    /// Expected signature over the full board (hex).
    pub expected_signature: &'static str,
}

impl GoldenVector {
    pub fn key(&self) -> KeyMaterial {
        KeyMaterial::derive(&self.seed)
    }

    pub fn time(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.timestamp, 0)
            .single()
            .expect("vector timestamp in range")
    }

    pub fn board(&self) -> Board {
        board::encode(self.content, self.time()).expect("vector content fits")
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "hello board",
            seed: [0x42; 32],
            content: b"hello",
            timestamp: 1717243200, // 2024-06-01T12:00:00Z
            expected_pubkey: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            expected_signature: "fce0b0976b20e56c41d2ffa5196b0f99fac57065bc3632e904d0ae5d23dba1d1\
                                 d93ad36ddc43e6c0528625f6c49759feeac031dc1ef8f038621b233906374f00",
        },
        GoldenVector {
            name: "empty board",
            seed: [0x00; 32],
            content: b"",
            timestamp: 1672531200, // 2023-01-01T00:00:00Z
            expected_pubkey: "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29",
            expected_signature: "3fab5ffe9632551daa074f0df88306742969cf623394466a2f000415e719a3d0\
                                 bb3f2b9380eb03e5348b363697893eb949c4a95757cd9862ee1082872650ae01",
        },
        GoldenVector {
            name: "RFC 8032 test 1 key",
            seed: [
                0x9d, 0x61, 0xb1, 0x9d, 0xef, 0xfd, 0x5a, 0x60, 0xba, 0x84, 0x4a, 0xf4, 0x92,
                0xec, 0x2c, 0xc4, 0x44, 0x49, 0xc5, 0x69, 0x7b, 0x32, 0x69, 0x19, 0x70, 0x3b,
                0xac, 0x03, 0x1c, 0xae, 0x7f, 0x60,
            ],
            content: b"<p>spring</p>",
            timestamp: 1654041600, // 2022-06-01T00:00:00Z
            expected_pubkey: "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
            expected_signature: "66bd407a63fd7d779ee9fb8fd1a49dbdae245d0f061791c5dc485e4a45bd37b8\
                                 1a4282e3e917babb4aa221a1ab58fb89f1f739b0cbe4ba6417b829d1bd29ec03",
        },
    ]
}

/// Check every golden vector, returning `(name, matches)` pairs.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    all_vectors()
        .iter()
        .map(|v| {
            let key = v.key();
            let signature = key.sign(v.board().as_bytes());
            let matches = key.public_key().to_hex() == v.expected_pubkey
                && signature.to_hex() == v.expected_signature;
            (v.name.to_string(), matches)
        })
        .collect()
}
