//! Proptest generators for property-based testing.

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use spring83_core::{board, Board, KeyMaterial, PublicKey, MAX_BOARD_LEN};

use crate::fixtures::fixed_time;

/// Generate a random seed.
pub fn seed() -> impl Strategy<Value = [u8; 32]> {
    any::<[u8; 32]>()
}

/// Generate a random keypair.
pub fn key_material() -> impl Strategy<Value = KeyMaterial> {
    seed().prop_map(|seed| KeyMaterial::derive(&seed))
}

/// Generate a random public key.
pub fn public_key() -> impl Strategy<Value = PublicKey> {
    key_material().prop_map(|key| key.public_key())
}

/// Generate a whole-second instant with a four-digit year.
pub fn timestamp() -> impl Strategy<Value = DateTime<Utc>> {
    // 253402300799 is 9999-12-31T23:59:59Z.
    (0i64..=253_402_300_799).prop_map(|secs| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .expect("timestamp in range")
    })
}

/// Generate content bytes of at most `max_len`.
pub fn content(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Room left for content next to a four-digit-year timestamp tag.
fn content_capacity() -> usize {
    MAX_BOARD_LEN - board::timestamp_tag(fixed_time()).len()
}

/// Generate content that fits in a board once timestamped.
pub fn board_content() -> impl Strategy<Value = Vec<u8>> {
    content(content_capacity())
}

/// Generate content too long for any board.
pub fn oversized_content() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), content_capacity() + 1..=MAX_BOARD_LEN * 2)
}

/// Parameters for generating a signed board.
#[derive(Debug, Clone)]
pub struct BoardParams {
    pub key: KeyMaterial,
    pub now: DateTime<Utc>,
    pub content: Vec<u8>,
}

impl Arbitrary for BoardParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (key_material(), timestamp(), board_content())
            .prop_map(|(key, now, content)| BoardParams { key, now, content })
            .boxed()
    }
}

/// Encode the board described by `params`.
pub fn board_from_params(params: &BoardParams) -> Board {
    board::encode(&params.content, params.now).expect("generated content fits")
}
