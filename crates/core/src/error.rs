//! Error types for login payload verification.
//!
//! Two families:
//! - [`LoginError::InvalidHash`], the single sentinel for a missing or
//!   mismatched tag. It carries nothing, so callers cannot tell a forged tag
//!   from an absent one.
//! - Structural errors, raised while parsing and always before any HMAC is
//!   computed.

use thiserror::Error;

/// Result type alias for login operations.
pub type Result<T> = std::result::Result<T, LoginError>;

/// Errors that can occur while parsing or verifying a login payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// The hash is absent or does not authenticate the data
    #[error("the hash is invalid")]
    InvalidHash,

    /// A form field had zero or several values
    #[error("zero or multiple values for form field `{0}`")]
    NotSingleValue(String),

    /// A field appeared more than once in a JSON object
    #[error("duplicate field `{0}`")]
    DuplicateField(String),

    /// A required field was absent
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The hash field was not 64 characters long
    #[error("hash must be 64 characters long, got {0}")]
    HashLength(usize),

    /// The hash field was not valid hex
    #[error("failure to decode incoming hash: {0}")]
    HashEncoding(String),

    /// An integer field could not be parsed
    #[error("invalid integer for `{field}`: {reason}")]
    InvalidInteger {
        /// Field name
        field: &'static str,
        /// What went wrong
        reason: String,
    },

    /// The photo URL could not be parsed
    #[error("invalid photo_url: {0}")]
    InvalidUrl(String),

    /// auth_date is outside the representable range
    #[error("auth_date {0} is out of range")]
    InvalidTimestamp(i64),

    /// A JSON value had the wrong type for its field
    #[error("field `{field}` must be a JSON {expected}")]
    WrongType {
        /// Field name
        field: &'static str,
        /// Expected JSON type
        expected: &'static str,
    },

    /// The JSON document was malformed
    #[error("malformed JSON: {0}")]
    Json(String),

    /// The supplied token hash could not be used as a key
    #[error("invalid token hash: {0}")]
    InvalidTokenHash(String),
}

/// Error code for integration with tool-level error reporting.
/// Range: 11xxx for login errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginErrorCode {
    /// Missing or mismatched hash
    InvalidHash = 11001,
    /// Multiplicity violation in form input
    NotSingleValue = 11002,
    /// Repeated JSON key
    DuplicateField = 11003,
    /// Required field absent
    MissingField = 11004,
    /// Malformed hash field
    MalformedHash = 11005,
    /// Unparseable integer, URL or timestamp
    InvalidValue = 11006,
    /// JSON type mismatch
    WrongType = 11007,
    /// Malformed JSON document
    JsonParsing = 11008,
    /// Unusable token hash
    InvalidTokenHash = 11009,
}

impl LoginError {
    /// Returns the error code for this error.
    pub fn code(&self) -> LoginErrorCode {
        match self {
            LoginError::InvalidHash => LoginErrorCode::InvalidHash,
            LoginError::NotSingleValue(_) => LoginErrorCode::NotSingleValue,
            LoginError::DuplicateField(_) => LoginErrorCode::DuplicateField,
            LoginError::MissingField(_) => LoginErrorCode::MissingField,
            LoginError::HashLength(_) | LoginError::HashEncoding(_) => LoginErrorCode::MalformedHash,
            LoginError::InvalidInteger { .. }
            | LoginError::InvalidUrl(_)
            | LoginError::InvalidTimestamp(_) => LoginErrorCode::InvalidValue,
            LoginError::WrongType { .. } => LoginErrorCode::WrongType,
            LoginError::Json(_) => LoginErrorCode::JsonParsing,
            LoginError::InvalidTokenHash(_) => LoginErrorCode::InvalidTokenHash,
        }
    }

    /// True for the verification sentinel, false for structural errors.
    pub fn is_invalid_hash(&self) -> bool {
        matches!(self, LoginError::InvalidHash)
    }
}

impl From<serde_json::Error> for LoginError {
    fn from(err: serde_json::Error) -> Self {
        LoginError::Json(err.to_string())
    }
}

impl From<tgwidget_crypto::CryptoError> for LoginError {
    fn from(err: tgwidget_crypto::CryptoError) -> Self {
        LoginError::InvalidTokenHash(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_identity() {
        assert_eq!(LoginError::InvalidHash, LoginError::InvalidHash);
        assert!(LoginError::InvalidHash.is_invalid_hash());
        assert!(!LoginError::HashLength(10).is_invalid_hash());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(LoginError::InvalidHash.code() as u32, 11001);
        assert_eq!(LoginError::HashEncoding("x".into()).code(), LoginErrorCode::MalformedHash);
        assert_eq!(LoginError::InvalidTimestamp(0).code(), LoginErrorCode::InvalidValue);
    }

    #[test]
    fn test_display() {
        assert_eq!(LoginError::InvalidHash.to_string(), "the hash is invalid");
        let err = LoginError::WrongType { field: "id", expected: "number" };
        assert_eq!(err.to_string(), "field `id` must be a JSON number");
    }
}
