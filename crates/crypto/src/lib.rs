//! Cryptographic primitives for Telegram login widget verification.
//!
//! This crate provides:
//! - Bot token key derivation (SHA-256 of the token)
//! - HMAC-SHA256 signing keyed by the derived key
//! - Constant-time tag comparison
//!
//! # Example
//!
//! ```
//! use tgwidget_crypto::TokenKey;
//!
//! let key = TokenKey::from_bot_token("123456789:abcdefGHIJKLmnopqrSTUVWXyz123456789");
//! let tag = key.sign(b"auth_date=1512345678\nid=12345678");
//! assert!(key.verify(b"auth_date=1512345678\nid=12345678", &tag));
//! ```

#![warn(missing_docs)]

mod error;
mod hmac_impl;
mod key;
mod timing;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{CryptoError, Result};
pub use hmac_impl::{hmac_sha256, hmac_sha256_hex, TAG_LEN};
pub use key::{hash_bot_token, TokenKey, KEY_LEN};
pub use timing::constant_time_compare;
