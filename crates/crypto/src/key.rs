//! Signing keys derived from a bot token.
//!
//! The login widget signs its payload with `HMAC-SHA256(SHA-256(token), data)`.
//! [`TokenKey`] holds the 32-byte `SHA-256(token)` so the token can be hashed
//! once at startup rather than on every request.

use std::fmt;

use sha2::{Digest, Sha256};

use crate::{constant_time_compare, hmac_sha256, CryptoError, Result, TAG_LEN};

/// Length in bytes of a derived token key.
pub const KEY_LEN: usize = 32;

/// Hash a bot token into the key used for signing widget payloads.
pub fn hash_bot_token(token: &str) -> [u8; KEY_LEN] {
    Sha256::digest(token.as_bytes()).into()
}

/// A derived HMAC key for one bot.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenKey([u8; KEY_LEN]);

impl TokenKey {
    /// Derive the key from the raw bot token.
    pub fn from_bot_token(token: &str) -> Self {
        Self(hash_bot_token(token))
    }

    /// Wrap an already hashed token.
    #[inline]
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Wrap an already hashed token given as a slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "expected {} bytes, got {}",
                KEY_LEN,
                bytes.len()
            ))
        })?;
        Ok(Self(bytes))
    }

    /// Parse a hex-encoded token hash.
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let mut bytes = [0u8; KEY_LEN];
        hex::decode_to_slice(encoded.trim(), &mut bytes)
            .map_err(|e| CryptoError::EncodingError(e.to_string()))?;
        Ok(Self(bytes))
    }

    /// Raw key bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Hex encoding of the key, suitable for configuration files.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Compute the tag for `message`.
    pub fn sign(&self, message: &[u8]) -> [u8; TAG_LEN] {
        hmac_sha256(&self.0, message)
    }

    /// Check `expected` against the tag for `message` in constant time.
    pub fn verify(&self, message: &[u8], expected: &[u8]) -> bool {
        let computed = self.sign(message);
        constant_time_compare(&computed, expected)
    }
}

impl fmt::Debug for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenKey(<redacted>)")
    }
}

impl From<[u8; KEY_LEN]> for TokenKey {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self::from_bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOT_TOKEN: &str = "123456789:abcdefGHIJKLmnopqrSTUVWXyz123456789";
    const BOT_TOKEN_HASH: &str = "395bfa245bcc417a0baec609b4369cb5943ae6519bedfb8949552b5d103a69c0";

    #[test]
    fn test_hash_bot_token() {
        assert_eq!(hex::encode(hash_bot_token(BOT_TOKEN)), BOT_TOKEN_HASH);
    }

    #[test]
    fn test_token_and_hash_entry_points_agree() {
        let from_token = TokenKey::from_bot_token(BOT_TOKEN);
        let from_hex = TokenKey::from_hex(BOT_TOKEN_HASH).unwrap();
        assert_eq!(from_token, from_hex);
        assert_eq!(from_hex.to_hex(), BOT_TOKEN_HASH);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        let err = TokenKey::from_slice(&[0u8; 31]).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidKey(_)));
        assert!(TokenKey::from_slice(&[0u8; 32]).is_ok());
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(TokenKey::from_hex("zz").is_err());
        assert!(TokenKey::from_hex(&"0".repeat(62)).is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = TokenKey::from_bot_token(BOT_TOKEN);
        let debug = format!("{:?}", key);
        assert!(!debug.contains(&BOT_TOKEN_HASH[..8]));
    }

    #[test]
    fn test_verify_known_tag() {
        let key = TokenKey::from_bot_token(BOT_TOKEN);
        let tag = hex::decode("180f7d26839de06e6ecb26148f181553d24e1c62153400da55ae31483ee62ad3").unwrap();
        assert!(key.verify(b"auth_date=1512345678\nid=12345678", &tag));
        assert!(!key.verify(b"auth_date=1512345679\nid=12345678", &tag));
    }

    proptest! {
        #[test]
        fn prop_any_bit_flip_fails(message in proptest::collection::vec(any::<u8>(), 0..64), bit in 0usize..256) {
            let key = TokenKey::from_bot_token(BOT_TOKEN);
            let mut tag = key.sign(&message);
            prop_assert!(key.verify(&message, &tag));
            tag[bit / 8] ^= 1 << (bit % 8);
            prop_assert!(!key.verify(&message, &tag));
        }
    }
}
