//! Verification of widget payloads against a bot's token key.

use std::io::Read;

use tgwidget_crypto::{TokenKey, TAG_LEN};

use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::error::{LoginError, Result};
use crate::form::{parse_form, FormData};
use crate::json::{parse_json, parse_json_slice};
use crate::login::UnverifiedLogin;
use crate::pairs::PairStore;
use crate::user::User;

/// Authenticates login widget payloads for one bot.
///
/// Construct it once from the bot token (or its pre-computed SHA-256) and
/// share it freely; verification only reads the key.
///
/// # Example
///
/// ```
/// use tgwidget_core::LoginVerifier;
///
/// let verifier = LoginVerifier::from_bot_token("123456789:abcdefGHIJKLmnopqrSTUVWXyz123456789");
/// let user = verifier
///     .verify_json_slice(br#"{
///         "auth_date": 1512345678,
///         "id": 12345678,
///         "hash": "180f7d26839de06e6ecb26148f181553d24e1c62153400da55ae31483ee62ad3"
///     }"#)
///     .unwrap();
/// assert_eq!(user.id, 12345678);
/// ```
#[derive(Debug, Clone)]
pub struct LoginVerifier {
    key: TokenKey,
}

impl LoginVerifier {
    /// Hash the raw bot token into a verifier.
    pub fn from_bot_token(token: &str) -> Self {
        Self::from_token_key(TokenKey::from_bot_token(token))
    }

    /// Use an already derived key.
    pub fn from_token_key(key: TokenKey) -> Self {
        Self { key }
    }

    /// Use a pre-computed SHA-256 of the bot token.
    pub fn from_token_hash(hash: &[u8]) -> Result<Self> {
        Ok(Self::from_token_key(TokenKey::from_slice(hash)?))
    }

    /// The derived key.
    pub fn key(&self) -> &TokenKey {
        &self.key
    }

    /// Whether `expected` is the tag of `check_string`.
    ///
    /// The HMAC is always computed. Comparison is constant-time once lengths
    /// agree.
    pub fn matches(&self, check_string: &str, expected: &[u8]) -> bool {
        self.key.verify(check_string.as_bytes(), expected)
    }

    /// Whether `tag` authenticates `pairs`. A missing tag never matches.
    pub fn verify_pairs(&self, pairs: &PairStore, tag: Option<&[u8; TAG_LEN]>) -> bool {
        let expected: &[u8] = match tag {
            Some(tag) => tag.as_slice(),
            None => &[],
        };
        self.matches(&pairs.check_string(), expected)
    }

    /// Compute the tag the widget would send for `pairs`.
    pub fn sign(&self, pairs: &PairStore) -> [u8; TAG_LEN] {
        self.key.sign(pairs.check_string().as_bytes())
    }

    /// Check a parsed payload and release its user record.
    pub fn verify(&self, login: UnverifiedLogin) -> Result<User> {
        if !self.verify_pairs(&login.pairs, login.tag.as_ref()) {
            tracing::debug!(fields = login.pairs.len(), "login payload rejected");
            return Err(LoginError::InvalidHash);
        }
        tracing::debug!(user_id = login.user.id, "login payload verified");
        Ok(login.user)
    }

    /// Verify form data, logging unrecognized fields through `tracing`.
    pub fn verify_form(&self, form: &FormData) -> Result<User> {
        self.verify_form_with(form, &mut TracingSink)
    }

    /// Verify form data, reporting unrecognized fields to `sink`.
    pub fn verify_form_with(&self, form: &FormData, sink: &mut dyn DiagnosticSink) -> Result<User> {
        self.verify(parse_form(form, sink)?)
    }

    /// Verify a URL-encoded query string or form body.
    pub fn verify_form_str(&self, query: &str) -> Result<User> {
        self.verify_form(&FormData::parse(query))
    }

    /// Verify a JSON document read from `reader`.
    pub fn verify_json<R: Read>(&self, reader: R) -> Result<User> {
        self.verify_json_with(reader, &mut TracingSink)
    }

    /// Verify a JSON document, reporting unrecognized fields to `sink`.
    pub fn verify_json_with<R: Read>(&self, reader: R, sink: &mut dyn DiagnosticSink) -> Result<User> {
        self.verify(parse_json(reader, sink)?)
    }

    /// Verify a JSON document held in memory.
    pub fn verify_json_slice(&self, bytes: &[u8]) -> Result<User> {
        self.verify(parse_json_slice(bytes, &mut TracingSink)?)
    }
}
