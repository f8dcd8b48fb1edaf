//! Authentication of Telegram login widget payloads
//!
//! The widget hands the browser a set of user fields plus a `hash`. This
//! crate rebuilds the canonical check string from those fields and checks the
//! hash against `HMAC-SHA256(SHA-256(bot_token), check_string)`:
//!
//! - **Adapters**: URL-encoded forms ([`FormData`]) and streamed JSON
//! - **Canonicalization**: [`build_check_string`] over a [`PairStore`]
//! - **Verification**: [`LoginVerifier`], constant-time tag comparison
//! - **Diagnostics**: unrecognized fields go to a [`DiagnosticSink`]
//!
//! Freshness of `auth_date` is left to the caller.
//!
//! # Example
//!
//! ```rust,no_run
//! use tgwidget_core::LoginVerifier;
//!
//! let verifier = LoginVerifier::from_bot_token("123456789:abcdefGHIJKLmnopqrSTUVWXyz123456789");
//! let user = verifier
//!     .verify_form_str("id=1&auth_date=1512345678&hash=...")
//!     .expect("rejected login");
//! println!("{} signed in", user.display_name());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod check_string;
pub mod diagnostics;
pub mod error;
pub mod field;
pub mod form;
pub mod json;
mod login;
pub mod pairs;
pub mod user;
pub mod verifier;

pub use check_string::build_check_string;
pub use diagnostics::{DiagnosticSink, NoopSink, TracingSink};
pub use error::{LoginError, LoginErrorCode, Result};
pub use field::{Field, FieldKind};
pub use form::{parse_form, FormData};
pub use json::{parse_json, parse_json_slice};
pub use login::UnverifiedLogin;
pub use pairs::{FieldPair, PairStore};
pub use user::User;
pub use verifier::LoginVerifier;

pub use tgwidget_crypto::TokenKey;
