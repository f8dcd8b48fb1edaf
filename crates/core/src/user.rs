//! The authenticated user record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A Telegram user as returned by the login widget, after verification.
///
/// Optional fields distinguish "not sent" (`None`) from "sent empty"
/// (`Some("")`). Call [`User::without_empty_fields`] to treat the two alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: i64,
    /// When the user authenticated, to the second
    pub auth_date: DateTime<Utc>,
    /// First name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Username without the leading `@`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Profile picture
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<Url>,
}

impl User {
    /// Collapse present-but-empty text fields to `None`.
    pub fn without_empty_fields(mut self) -> Self {
        for slot in [&mut self.first_name, &mut self.last_name, &mut self.username] {
            if slot.as_deref() == Some("") {
                *slot = None;
            }
        }
        self
    }

    /// Seconds since the Unix epoch at which the user authenticated.
    pub fn auth_timestamp(&self) -> i64 {
        self.auth_date.timestamp()
    }

    /// Best human-readable name: full name, then `@username`, then the id.
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().filter(|s| !s.is_empty());
        let last = self.last_name.as_deref().filter(|s| !s.is_empty());
        match (first, last) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(name), None) | (None, Some(name)) => name.to_string(),
            (None, None) => match self.username.as_deref().filter(|s| !s.is_empty()) {
                Some(username) => format!("@{}", username),
                None => self.id.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_user() -> User {
        User {
            id: 12345678,
            auth_date: DateTime::from_timestamp(1512345678, 0).unwrap(),
            first_name: None,
            last_name: None,
            username: None,
            photo_url: None,
        }
    }

    #[test]
    fn test_without_empty_fields() {
        let user = User {
            first_name: Some(String::new()),
            last_name: Some("Smith".into()),
            ..bare_user()
        }
        .without_empty_fields();
        assert_eq!(user.first_name, None);
        assert_eq!(user.last_name.as_deref(), Some("Smith"));
    }

    #[test]
    fn test_display_name_fallbacks() {
        assert_eq!(bare_user().display_name(), "12345678");

        let user = User {
            username: Some("jsmith".into()),
            ..bare_user()
        };
        assert_eq!(user.display_name(), "@jsmith");

        let user = User {
            first_name: Some("John".into()),
            last_name: Some("Smith".into()),
            ..user
        };
        assert_eq!(user.display_name(), "John Smith");
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let json = serde_json::to_value(bare_user()).unwrap();
        assert_eq!(json["id"], 12345678);
        assert_eq!(json["auth_date"], "2017-12-04T00:01:18Z");
        assert!(json.get("first_name").is_none());
        assert!(json.get("photo_url").is_none());
    }

    #[test]
    fn test_auth_timestamp() {
        assert_eq!(bare_user().auth_timestamp(), 1512345678);
    }
}
