//! Vanity public keys.
//!
//! A Spring '83 public key is only valid if its hex form ends in
//! `83e` + `MM` + a version marker, where `MM` is the expiry month
//! (`01` to `12`). For example `...83e0523` expires in May and carries
//! marker `23`.
//!
//! Which markers a server accepts differs between deployments, so the
//! accepted set is part of [`VanityRule`] rather than a literal.

use crate::keys::PublicKey;

/// The `83e` tag, as the low 12 bits of the 2 bytes preceding the month.
pub const DEFAULT_TAG: u16 = 0x83e;

/// Markers accepted by [`VanityRule::default`].
pub const DEFAULT_MARKERS: [u8; 2] = [0x23, 0x24];

const SUFFIX_LEN: usize = 4;

/// Something that decides whether a candidate public key is acceptable.
///
/// Implemented by [`VanityRule`] and by any `Fn(&PublicKey) -> bool`, so key
/// search can be driven by the real rule or by a test predicate.
pub trait KeyPredicate: Send + Sync {
    fn accepts(&self, key: &PublicKey) -> bool;
}

impl<F> KeyPredicate for F
where
    F: Fn(&PublicKey) -> bool + Send + Sync,
{
    fn accepts(&self, key: &PublicKey) -> bool {
        self(key)
    }
}

/// The expiry-suffix rule for public keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VanityRule {
    tag: u16,
    markers: Vec<u8>,
}

impl VanityRule {
    /// A rule with a custom 12-bit tag and marker set.
    ///
    /// Markers are given as the final byte of the key: `0x23` is the
    /// marker spelled `23` in hex.
    pub fn new(tag: u16, markers: impl IntoIterator<Item = u8>) -> Self {
        Self {
            tag: tag & 0x0fff,
            markers: markers.into_iter().collect(),
        }
    }

    /// The default tag with an explicit marker set.
    pub fn with_markers(markers: impl IntoIterator<Item = u8>) -> Self {
        Self::new(DEFAULT_TAG, markers)
    }

    pub fn tag(&self) -> u16 {
        self.tag
    }

    pub fn markers(&self) -> &[u8] {
        &self.markers
    }

    /// Check a public key against the rule.
    pub fn is_valid(&self, key: &PublicKey) -> bool {
        let suffix = &key.as_bytes()[32 - SUFFIX_LEN..];

        // Fail fast on the tag so the hex check runs on ~1/4096 of candidates.
        if u16::from_be_bytes([suffix[0], suffix[1]]) & 0x0fff != self.tag {
            return false;
        }

        self.match_suffix(&hex::encode(suffix)).is_some()
    }

    /// The expiry month declared by a valid key, `None` if the key is invalid.
    pub fn expiry_month(&self, key: &PublicKey) -> Option<u8> {
        self.match_suffix(&hex::encode(&key.as_bytes()[32 - SUFFIX_LEN..]))
    }

    /// Match the 8 hex characters of the last 4 key bytes against
    /// `.` + tag + month + marker, returning the month.
    fn match_suffix(&self, suffix_hex: &str) -> Option<u8> {
        if suffix_hex.len() != SUFFIX_LEN * 2 {
            return None;
        }

        let tag = format!("{:03x}", self.tag);
        if suffix_hex[1..4] != tag {
            return None;
        }

        let month = parse_month(&suffix_hex[4..6])?;

        let marker = &suffix_hex[6..8];
        self.markers
            .iter()
            .any(|m| format!("{:02x}", m) == marker)
            .then_some(month)
    }
}

impl Default for VanityRule {
    fn default() -> Self {
        Self::new(DEFAULT_TAG, DEFAULT_MARKERS)
    }
}

impl KeyPredicate for VanityRule {
    fn accepts(&self, key: &PublicKey) -> bool {
        self.is_valid(key)
    }
}

fn parse_month(code: &str) -> Option<u8> {
    if !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month: u8 = code.parse().ok()?;
    (1..=12).contains(&month).then_some(month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key_with_suffix(suffix: [u8; 4]) -> PublicKey {
        let mut bytes = [0x5a; 32];
        bytes[28..].copy_from_slice(&suffix);
        PublicKey(bytes)
    }

    /// The rule without the integer fast path: hex the whole key.
    fn reference_is_valid(rule: &VanityRule, key: &PublicKey) -> bool {
        let full = key.to_hex();
        rule.match_suffix(&full[full.len() - 8..]).is_some()
    }

    #[test]
    fn test_accepts_every_month() {
        let rule = VanityRule::default();
        for month in [
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x10, 0x11, 0x12,
        ] {
            for marker in [0x23, 0x24] {
                let key = key_with_suffix([0xa8, 0x3e, month, marker]);
                assert!(rule.is_valid(&key), "month {:02x} marker {:02x}", month, marker);
            }
        }
    }

    #[test]
    fn test_rejects_bad_months() {
        let rule = VanityRule::default();
        for month in [0x00, 0x13, 0x0a, 0x1a, 0x20, 0x99] {
            let key = key_with_suffix([0x08, 0x3e, month, 0x23]);
            assert!(!rule.is_valid(&key), "month {:02x}", month);
        }
    }

    #[test]
    fn test_rejects_wrong_tag() {
        let rule = VanityRule::default();
        assert!(!rule.is_valid(&key_with_suffix([0x08, 0x3f, 0x05, 0x23])));
        assert!(!rule.is_valid(&key_with_suffix([0x09, 0x3e, 0x05, 0x23])));
        assert!(!rule.is_valid(&key_with_suffix([0x3e, 0x05, 0x23, 0x00])));
    }

    #[test]
    fn test_marker_set_is_configurable() {
        let key23 = key_with_suffix([0x08, 0x3e, 0x05, 0x23]);
        let key24 = key_with_suffix([0x08, 0x3e, 0x05, 0x24]);
        let key25 = key_with_suffix([0x08, 0x3e, 0x05, 0x25]);

        let default = VanityRule::default();
        assert!(default.is_valid(&key23));
        assert!(default.is_valid(&key24));
        assert!(!default.is_valid(&key25));

        let only23 = VanityRule::with_markers([0x23]);
        assert!(only23.is_valid(&key23));
        assert!(!only23.is_valid(&key24));

        let only25 = VanityRule::with_markers([0x25]);
        assert!(only25.is_valid(&key25));
        assert!(!only25.is_valid(&key23));

        let none = VanityRule::with_markers(Vec::new());
        assert!(!none.is_valid(&key23));
    }

    #[test]
    fn test_expiry_month() {
        let rule = VanityRule::default();
        assert_eq!(rule.expiry_month(&key_with_suffix([0x08, 0x3e, 0x11, 0x24])), Some(11));
        assert_eq!(rule.expiry_month(&key_with_suffix([0x08, 0x3e, 0x13, 0x24])), None);
    }

    #[test]
    fn test_predicate_impls() {
        let key = key_with_suffix([0x08, 0x3e, 0x05, 0x23]);
        assert!(VanityRule::default().accepts(&key));

        let never = |_: &PublicKey| false;
        assert!(!never.accepts(&key));
    }

    fn near_miss_suffix() -> impl Strategy<Value = [u8; 4]> {
        (
            any::<u8>(),
            prop_oneof![Just(0x3e_u8), any::<u8>()],
            prop_oneof![0x00_u8..=0x13, any::<u8>()],
            prop_oneof![Just(0x23_u8), Just(0x24_u8), any::<u8>()],
        )
            .prop_map(|(a, b, c, d)| [(a & 0xf0) | 0x08, b, c, d])
    }

    proptest! {
        #[test]
        fn test_deterministic(bytes in any::<[u8; 32]>()) {
            let rule = VanityRule::default();
            let key = PublicKey(bytes);
            prop_assert_eq!(rule.is_valid(&key), rule.is_valid(&key));
        }

        #[test]
        fn test_fast_path_agrees_with_reference(
            prefix in any::<[u8; 28]>(),
            suffix in near_miss_suffix(),
        ) {
            let mut bytes = [0u8; 32];
            bytes[..28].copy_from_slice(&prefix);
            bytes[28..].copy_from_slice(&suffix);
            let key = PublicKey(bytes);

            let rule = VanityRule::default();
            prop_assert_eq!(rule.is_valid(&key), reference_is_valid(&rule, &key));
        }
    }
}
