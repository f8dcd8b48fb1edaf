//! The fixed vocabulary of fields sent by the login widget.

use std::fmt;

/// How a field's value is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Signed 64-bit decimal integer
    Integer,
    /// Free text
    Text,
    /// Text that must parse as an absolute URL
    Url,
    /// The hex-encoded authentication tag
    Tag,
}

/// A field name the widget is known to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// `auth_date`
    AuthDate,
    /// `first_name`
    FirstName,
    /// `hash`
    Hash,
    /// `id`
    Id,
    /// `last_name`
    LastName,
    /// `photo_url`
    PhotoUrl,
    /// `username`
    Username,
}

impl Field {
    /// Every recognized field.
    pub const ALL: [Field; 7] = [
        Field::AuthDate,
        Field::FirstName,
        Field::Hash,
        Field::Id,
        Field::LastName,
        Field::PhotoUrl,
        Field::Username,
    ];

    /// Look up a field by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "auth_date" => Field::AuthDate,
            "first_name" => Field::FirstName,
            "hash" => Field::Hash,
            "id" => Field::Id,
            "last_name" => Field::LastName,
            "photo_url" => Field::PhotoUrl,
            "username" => Field::Username,
            _ => return None,
        })
    }

    /// The wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::AuthDate => "auth_date",
            Field::FirstName => "first_name",
            Field::Hash => "hash",
            Field::Id => "id",
            Field::LastName => "last_name",
            Field::PhotoUrl => "photo_url",
            Field::Username => "username",
        }
    }

    /// How the value of this field is parsed.
    pub const fn kind(self) -> FieldKind {
        match self {
            Field::AuthDate | Field::Id => FieldKind::Integer,
            Field::FirstName | Field::LastName | Field::Username => FieldKind::Text,
            Field::PhotoUrl => FieldKind::Url,
            Field::Hash => FieldKind::Tag,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
