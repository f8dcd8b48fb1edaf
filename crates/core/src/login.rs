//! Accumulates parsed fields into the pair store and the user record.
//!
//! Both source adapters feed a [`LoginDraft`] so that a field parsed from a
//! form and the same field parsed from JSON produce identical pairs.

use chrono::{DateTime, Utc};
use tgwidget_crypto::TAG_LEN;
use url::Url;

use crate::error::{LoginError, Result};
use crate::field::Field;
use crate::pairs::PairStore;
use crate::user::User;

/// A parsed payload whose tag has not been checked yet.
#[derive(Debug, Clone)]
pub struct UnverifiedLogin {
    pub(crate) user: User,
    pub(crate) pairs: PairStore,
    pub(crate) tag: Option<[u8; TAG_LEN]>,
}

impl UnverifiedLogin {
    /// The signed pairs.
    pub fn pairs(&self) -> &PairStore {
        &self.pairs
    }

    /// The canonical check string.
    pub fn check_string(&self) -> String {
        self.pairs.check_string()
    }

    /// Whether the payload carried a `hash` field.
    pub fn has_tag(&self) -> bool {
        self.tag.is_some()
    }
}

#[derive(Debug, Default)]
pub(crate) struct LoginDraft {
    pairs: PairStore,
    tag: Option<[u8; TAG_LEN]>,
    id: Option<i64>,
    auth_date: Option<DateTime<Utc>>,
    first_name: Option<String>,
    last_name: Option<String>,
    username: Option<String>,
    photo_url: Option<Url>,
}

impl LoginDraft {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether `field` has already been accepted.
    pub(crate) fn seen(&self, field: Field) -> bool {
        match field {
            Field::Hash => self.tag.is_some(),
            _ => self.pairs.contains(field),
        }
    }

    pub(crate) fn put_integer(&mut self, field: Field, value: i64) -> Result<()> {
        match field {
            Field::Id => self.id = Some(value),
            // Fractional seconds never reach here; JSON floats are rejected upstream.
            Field::AuthDate => {
                let at = DateTime::from_timestamp(value, 0)
                    .ok_or(LoginError::InvalidTimestamp(value))?;
                self.auth_date = Some(at);
            }
            other => unreachable!("{} is not an integer field", other),
        }
        self.pairs.insert(field, value.to_string());
        Ok(())
    }

    /// Parse decimal text and store it re-rendered.
    pub(crate) fn put_integer_text(&mut self, field: Field, text: &str) -> Result<()> {
        let value = text.parse::<i64>().map_err(|e| LoginError::InvalidInteger {
            field: field.as_str(),
            reason: e.to_string(),
        })?;
        self.put_integer(field, value)
    }

    pub(crate) fn put_text(&mut self, field: Field, value: String) -> Result<()> {
        match field {
            Field::FirstName => self.first_name = Some(value.clone()),
            Field::LastName => self.last_name = Some(value.clone()),
            Field::Username => self.username = Some(value.clone()),
            Field::PhotoUrl => {
                let url = Url::parse(&value).map_err(|e| LoginError::InvalidUrl(e.to_string()))?;
                self.photo_url = Some(url);
            }
            other => unreachable!("{} is not a text field", other),
        }
        self.pairs.insert(field, value);
        Ok(())
    }

    /// Decode the 64-character hex tag.
    pub(crate) fn put_tag(&mut self, encoded: &str) -> Result<()> {
        if encoded.len() != TAG_LEN * 2 {
            return Err(LoginError::HashLength(encoded.len()));
        }
        let mut tag = [0u8; TAG_LEN];
        hex::decode_to_slice(encoded, &mut tag)
            .map_err(|e| LoginError::HashEncoding(e.to_string()))?;
        self.tag = Some(tag);
        Ok(())
    }

    pub(crate) fn finish(self) -> Result<UnverifiedLogin> {
        let id = self.id.ok_or(LoginError::MissingField(Field::Id.as_str()))?;
        let auth_date = self
            .auth_date
            .ok_or(LoginError::MissingField(Field::AuthDate.as_str()))?;

        Ok(UnverifiedLogin {
            user: User {
                id,
                auth_date,
                first_name: self.first_name,
                last_name: self.last_name,
                username: self.username,
                photo_url: self.photo_url,
            },
            pairs: self.pairs,
            tag: self.tag,
        })
    }
}
