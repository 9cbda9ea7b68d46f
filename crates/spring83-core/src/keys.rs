//! Ed25519 key material for Spring '83.
//!
//! Wraps ed25519-dalek with strong types. A [`KeyMaterial`] is the 64-byte
//! form used on disk and in key search: the 32-byte seed followed by the
//! 32-byte public key derived from it.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;

use crate::error::{CoreError, Result};

/// Length of the seed half of a keypair.
pub const SEED_LEN: usize = 32;

/// Length of a full keypair (seed || public key).
pub const KEYPAIR_LEN: usize = 64;

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 32]);

impl PublicKey {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex, as used in board URLs.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut arr = [0u8; 32];
        hex::decode_to_slice(s, &mut arr).map_err(|_| CoreError::InvalidPublicKey)?;
        Ok(Self(arr))
    }

    /// Verify a signature over a message.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        let verifying_key =
            VerifyingKey::from_bytes(&self.0).map_err(|_| CoreError::InvalidPublicKey)?;
        let sig = DalekSignature::from_bytes(&signature.0);
        verifying_key
            .verify(message, &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({}...)", &self.to_hex()[..16])
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for PublicKey {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a 128-character hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut arr = [0u8; 64];
        hex::decode_to_slice(s, &mut arr).map_err(|_| CoreError::InvalidSignature)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

/// An Ed25519 keypair in its 64-byte form: seed followed by public key.
///
/// Key material loaded from outside the process may be corrupt, so the two
/// halves are stored as given. Call [`KeyMaterial::verify_integrity`] (or
/// [`KeyMaterial::check_integrity`]) before signing anything with it.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial {
    seed: [u8; 32],
    public: PublicKey,
}

impl KeyMaterial {
    /// Derive the keypair for a seed. Deterministic.
    pub fn derive(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self {
            seed: *seed,
            public: PublicKey(signing_key.verifying_key().to_bytes()),
        }
    }

    /// Split 64 raw bytes into seed and public halves without checking them.
    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        let mut seed = [0u8; 32];
        let mut public = [0u8; 32];
        seed.copy_from_slice(&bytes[..SEED_LEN]);
        public.copy_from_slice(&bytes[SEED_LEN..]);
        Self {
            seed,
            public: PublicKey(public),
        }
    }

    /// Parse keypair text: the first 128 characters must be hex.
    ///
    /// Anything after them (usually a trailing newline) is ignored. The
    /// result is integrity-checked.
    pub fn from_hex(text: &str) -> Result<Self> {
        let need = KEYPAIR_LEN * 2;
        if text.len() < need {
            return Err(CoreError::ShortKeypair {
                len: text.len(),
                need,
            });
        }
        let hex_part = text
            .get(..need)
            .ok_or_else(|| CoreError::MalformedKeypair("non-ASCII keypair text".into()))?;

        let mut bytes = [0u8; 64];
        hex::decode_to_slice(hex_part, &mut bytes)
            .map_err(|e| CoreError::MalformedKeypair(e.to_string()))?;

        let key = Self::from_bytes(&bytes);
        key.check_integrity()?;
        Ok(key)
    }

    /// The 64-byte representation.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..SEED_LEN].copy_from_slice(&self.seed);
        out[SEED_LEN..].copy_from_slice(&self.public.0);
        out
    }

    /// Lowercase hex of the 64-byte representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// The stored public half.
    pub fn public_key(&self) -> PublicKey {
        self.public
    }

    /// The secret seed half.
    pub fn seed(&self) -> &[u8; 32] {
        &self.seed
    }

    /// Recompute the public half from the seed and compare.
    pub fn verify_integrity(&self) -> bool {
        Self::derive(&self.seed).public == self.public
    }

    /// Like [`verify_integrity`](Self::verify_integrity), as an error.
    pub fn check_integrity(&self) -> Result<()> {
        if self.verify_integrity() {
            Ok(())
        } else {
            Err(CoreError::Integrity)
        }
    }

    /// Sign a message with the seed half.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let signing_key = SigningKey::from_bytes(&self.seed);
        Signature(signing_key.sign(message).to_bytes())
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial({:?})", self.public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let key = KeyMaterial::derive(&[0x42; 32]);
        let message = b"hello world";
        let signature = key.sign(message);

        key.public_key().verify(message, &signature).unwrap();

        let tampered = b"hello worlD";
        assert!(key.public_key().verify(tampered, &signature).is_err());
    }

    #[test]
    fn test_derive_known_seed() {
        let key = KeyMaterial::derive(&[0x42; 32]);
        assert_eq!(
            key.public_key().to_hex(),
            "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12"
        );
        assert!(key.verify_integrity());
    }

    #[test]
    fn test_bytes_layout() {
        let key = KeyMaterial::derive(&[0x07; 32]);
        let bytes = key.to_bytes();
        assert_eq!(&bytes[..32], &[0x07; 32]);
        assert_eq!(&bytes[32..], key.public_key().as_bytes());
        assert_eq!(KeyMaterial::from_bytes(&bytes), key);
    }

    #[test]
    fn test_integrity_rejects_swapped_public_half() {
        let good = KeyMaterial::derive(&[0x01; 32]);
        let other = KeyMaterial::derive(&[0x02; 32]);

        let mut bytes = good.to_bytes();
        bytes[32..].copy_from_slice(other.public_key().as_bytes());
        let corrupt = KeyMaterial::from_bytes(&bytes);

        assert!(!corrupt.verify_integrity());
        assert!(matches!(corrupt.check_integrity(), Err(CoreError::Integrity)));
    }

    #[test]
    fn test_from_hex_accepts_trailing_newline() {
        let key = KeyMaterial::derive(&[0x42; 32]);
        let text = format!("{}\n", key.to_hex());
        assert_eq!(KeyMaterial::from_hex(&text).unwrap(), key);
    }

    #[test]
    fn test_from_hex_short() {
        let key = KeyMaterial::derive(&[0x42; 32]);
        let text = &key.to_hex()[..100];
        assert!(matches!(
            KeyMaterial::from_hex(text),
            Err(CoreError::ShortKeypair { len: 100, need: 128 })
        ));
    }

    #[test]
    fn test_from_hex_multibyte_at_boundary() {
        // 127 hex digits then a two-byte character straddling byte 128.
        let mut text = KeyMaterial::derive(&[0x42; 32]).to_hex();
        text.truncate(127);
        text.push('é');
        assert_eq!(text.len(), 129);
        assert!(matches!(
            KeyMaterial::from_hex(&text),
            Err(CoreError::MalformedKeypair(_))
        ));
    }

    #[test]
    fn test_from_hex_not_hex() {
        let text = "zz".repeat(64);
        assert!(matches!(
            KeyMaterial::from_hex(&text),
            Err(CoreError::MalformedKeypair(_))
        ));
    }

    #[test]
    fn test_from_hex_corrupt_public_half() {
        let mut text = KeyMaterial::derive(&[0x42; 32]).to_hex();
        text.replace_range(126..128, "00");
        assert!(matches!(
            KeyMaterial::from_hex(&text),
            Err(CoreError::Integrity)
        ));
    }

    #[test]
    fn test_public_key_hex_roundtrip() {
        let pk = KeyMaterial::derive(&[0x09; 32]).public_key();
        assert_eq!(PublicKey::from_hex(&pk.to_hex()).unwrap(), pk);
        assert!(PublicKey::from_hex("abcd").is_err());
    }

    #[test]
    fn test_debug_hides_seed() {
        let key = KeyMaterial::derive(&[0x42; 32]);
        let debug = format!("{:?}", key);
        assert!(debug.starts_with("KeyMaterial(PublicKey("));
        assert!(!debug.contains("4242424242"));
    }
}
