//! WASM bindings for crypto utilities.

use wasm_bindgen::prelude::*;

use crate::TokenKey;

/// Hash a bot token and return the key as a hex string.
#[wasm_bindgen]
pub fn hash_bot_token_hex(token: &str) -> String {
    TokenKey::from_bot_token(token).to_hex()
}

/// Sign a check string with a bot token and return the tag as hex.
#[wasm_bindgen]
pub fn sign_check_string_hex(token: &str, check_string: &str) -> String {
    hex::encode(TokenKey::from_bot_token(token).sign(check_string.as_bytes()))
}

/// Verify a hex tag against a check string (constant-time comparison).
///
/// # Returns
/// true if the tag matches, false otherwise (including malformed hex)
#[wasm_bindgen]
pub fn verify_check_string(token: &str, check_string: &str, tag_hex: &str) -> bool {
    let Ok(tag) = hex::decode(tag_hex) else {
        return false;
    };
    TokenKey::from_bot_token(token).verify(check_string.as_bytes(), &tag)
}
