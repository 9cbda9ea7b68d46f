//! Board encoding.
//!
//! A board is the signed payload published under a key:
//!
//! ```text
//! <time datetime="YYYY-MM-DDTHH:MM:SSZ"></time>\n || content
//! ```
//!
//! The timestamp tag is always 46 bytes for four-digit years, leaving 2171
//! bytes for content.

use chrono::{DateTime, SubsecRound, Utc};

use crate::error::{CoreError, Result};
use crate::keys::{PublicKey, Signature};
use crate::protocol::MAX_BOARD_LEN;

const TAG_OPEN: &str = "<time datetime=\"";
const TAG_CLOSE: &str = "\"></time>\n";
const TAG_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
const TAG_TIME_LEN: usize = "YYYY-MM-DDTHH:MM:SSZ".len();

/// Render the timestamp tag for `now`, truncated to the second.
pub fn timestamp_tag(now: DateTime<Utc>) -> String {
    format!("{TAG_OPEN}{}{TAG_CLOSE}", now.format(TAG_TIME_FORMAT))
}

/// The most content that fits in a board stamped at `now`.
pub fn max_content_len(now: DateTime<Utc>) -> usize {
    MAX_BOARD_LEN.saturating_sub(timestamp_tag(now).len())
}

/// Build a board from content and the current time.
///
/// Fails with [`CoreError::ContentTooLong`] before building anything if the
/// content cannot fit next to the timestamp tag.
pub fn encode(content: &[u8], now: DateTime<Utc>) -> Result<Board> {
    let tag = timestamp_tag(now);
    let max = MAX_BOARD_LEN.saturating_sub(tag.len());
    if content.len() > max {
        return Err(CoreError::ContentTooLong {
            len: content.len(),
            max,
        });
    }

    let mut bytes = Vec::with_capacity(tag.len() + content.len());
    bytes.extend_from_slice(tag.as_bytes());
    bytes.extend_from_slice(content);

    Board::from_bytes(bytes)
}

/// An encoded board, at most [`MAX_BOARD_LEN`] bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Board(Vec<u8>);

impl Board {
    /// Wrap raw board bytes, enforcing the length limit.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() > MAX_BOARD_LEN {
            return Err(CoreError::BoardTooLong { len: bytes.len() });
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Separate a leading timestamp tag from the content.
    ///
    /// Boards published by other clients need not start with a tag; those
    /// fail with [`CoreError::MalformedBoard`].
    pub fn split(&self) -> Result<(DateTime<Utc>, &[u8])> {
        let bytes = &self.0;
        let tag_len = TAG_OPEN.len() + TAG_TIME_LEN + TAG_CLOSE.len();
        if bytes.len() < tag_len {
            return Err(CoreError::MalformedBoard("shorter than timestamp tag".into()));
        }

        let (open, rest) = bytes.split_at(TAG_OPEN.len());
        let (time, rest) = rest.split_at(TAG_TIME_LEN);
        let (close, content) = rest.split_at(TAG_CLOSE.len());
        if open != TAG_OPEN.as_bytes() || close != TAG_CLOSE.as_bytes() {
            return Err(CoreError::MalformedBoard("missing timestamp tag".into()));
        }

        let time = std::str::from_utf8(time)
            .map_err(|e| CoreError::MalformedBoard(e.to_string()))?;
        let stamp = DateTime::parse_from_rfc3339(time)
            .map_err(|e| CoreError::MalformedBoard(e.to_string()))?
            .with_timezone(&Utc);

        Ok((stamp, content))
    }

    /// Check a signature over the board bytes against `key`.
    pub fn verify(&self, key: &PublicKey, signature: &Signature) -> Result<()> {
        key.verify(&self.0, signature)
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board({} bytes)", self.0.len())
    }
}

impl AsRef<[u8]> for Board {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Truncate an instant to whole seconds, as carried in the tag and in
/// `If-Unmodified-Since`.
pub fn truncate_to_second(now: DateTime<Utc>) -> DateTime<Utc> {
    now.trunc_subsecs(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyMaterial;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_timestamp_tag() {
        let tag = timestamp_tag(noon());
        assert_eq!(tag, "<time datetime=\"2024-06-01T12:00:00Z\"></time>\n");
        assert_eq!(tag.len(), 46);
        assert_eq!(max_content_len(noon()), 2171);
    }

    #[test]
    fn test_tag_ignores_subseconds() {
        let now = noon() + chrono::Duration::milliseconds(999);
        assert_eq!(timestamp_tag(now), timestamp_tag(noon()));
        assert_eq!(truncate_to_second(now), noon());
    }

    #[test]
    fn test_encode_layout() {
        let board = encode(b"hello", noon()).unwrap();
        assert_eq!(
            board.as_bytes(),
            b"<time datetime=\"2024-06-01T12:00:00Z\"></time>\nhello".as_slice()
        );
        assert_eq!(board.len(), 51);
    }

    #[test]
    fn test_encode_limits() {
        let fits = vec![b'x'; 2171];
        let board = encode(&fits, noon()).unwrap();
        assert_eq!(board.len(), MAX_BOARD_LEN);

        let too_long = vec![b'x'; 2172];
        assert!(matches!(
            encode(&too_long, noon()),
            Err(CoreError::ContentTooLong { len: 2172, max: 2171 })
        ));
    }

    #[test]
    fn test_from_bytes_limit() {
        assert!(Board::from_bytes(vec![0; MAX_BOARD_LEN]).is_ok());
        assert!(matches!(
            Board::from_bytes(vec![0; MAX_BOARD_LEN + 1]),
            Err(CoreError::BoardTooLong { len: 2218 })
        ));
    }

    #[test]
    fn test_split() {
        let board = encode(b"<p>hi</p>", noon()).unwrap();
        let (stamp, content) = board.split().unwrap();
        assert_eq!(stamp, noon());
        assert_eq!(content, b"<p>hi</p>");

        let untagged = Board::from_bytes(b"<p>no timestamp tag at the start of this board</p>".to_vec())
            .unwrap();
        assert!(matches!(untagged.split(), Err(CoreError::MalformedBoard(_))));

        let short = Board::from_bytes(b"<p></p>".to_vec()).unwrap();
        assert!(matches!(short.split(), Err(CoreError::MalformedBoard(_))));
    }

    #[test]
    fn test_verify() {
        let key = KeyMaterial::derive(&[0x42; 32]);
        let board = encode(b"hello", noon()).unwrap();
        let sig = key.sign(board.as_bytes());

        board.verify(&key.public_key(), &sig).unwrap();

        let other = KeyMaterial::derive(&[0x43; 32]);
        assert!(matches!(
            board.verify(&other.public_key(), &sig),
            Err(CoreError::InvalidSignature)
        ));
    }

    proptest! {
        #[test]
        fn test_encode_ends_with_content(
            content in prop::collection::vec(any::<u8>(), 0..=2171),
            secs in 0i64..=253_402_300_799,
        ) {
            let now = Utc.timestamp_opt(secs, 0).unwrap();
            let board = encode(&content, now).unwrap();
            prop_assert!(board.len() <= MAX_BOARD_LEN);
            prop_assert!(board.as_bytes().ends_with(&content));
            prop_assert_eq!(board.len(), 46 + content.len());
        }

        #[test]
        fn test_encode_rejects_oversized(extra in 1usize..=500) {
            let content = vec![b'a'; 2171 + extra];
            let is_too_long = matches!(
                encode(&content, noon()),
                Err(CoreError::ContentTooLong { .. })
            );
            prop_assert!(is_too_long);
        }
    }
}
