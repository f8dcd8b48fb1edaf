//! URL-encoded form adapter.
//!
//! Every recognized field must carry exactly one value. Unrecognized keys are
//! reported to the diagnostic sink and otherwise ignored.

use std::collections::BTreeMap;

use crate::diagnostics::DiagnosticSink;
use crate::error::{LoginError, Result};
use crate::field::{Field, FieldKind};
use crate::login::{LoginDraft, UnverifiedLogin};

/// Form keys mapped to every value supplied for them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<String, Vec<String>>,
}

impl FormData {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` body or query string.
    ///
    /// A leading `?` is ignored so a raw query can be passed as-is.
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        form_urlencoded::parse(input.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Append a value for `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    /// Declare `key` with no values. A recognized key left empty is rejected.
    pub fn insert_empty(&mut self, key: impl Into<String>) {
        self.values.entry(key.into()).or_default();
    }

    /// All values for `key`.
    pub fn values(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate keys with their values, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormData::new();
        for (k, v) in iter {
            form.append(k, v);
        }
        form
    }
}

/// Parse a form into an unverified login.
pub fn parse_form(form: &FormData, sink: &mut dyn DiagnosticSink) -> Result<UnverifiedLogin> {
    let mut draft = LoginDraft::new();

    for (key, values) in form.iter() {
        let Some(field) = Field::from_name(key) else {
            sink.unrecognized_field(key);
            continue;
        };
        let [value] = values else {
            return Err(LoginError::NotSingleValue(key.to_string()));
        };

        match field.kind() {
            FieldKind::Integer => draft.put_integer_text(field, value)?,
            FieldKind::Text | FieldKind::Url => draft.put_text(field, value.clone())?,
            FieldKind::Tag => draft.put_tag(value)?,
        }
    }

    draft.finish()
}
