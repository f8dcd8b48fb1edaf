//! Terminal output formatting.

use owo_colors::OwoColorize;
use serde_json::json;
use tgwidget_core::{LoginError, User};

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }
}

/// Print a verified user as aligned key/value lines.
pub fn print_user(user: &User) {
    let absent = "(absent)".dimmed().to_string();
    let row = |label: &str, value: Option<String>| {
        println!("  {:<12} {}", label.bold(), value.unwrap_or_else(|| absent.clone()));
    };

    row("id", Some(user.id.to_string()));
    row("auth_date", Some(user.auth_date.to_rfc3339()));
    row("first_name", user.first_name.clone());
    row("last_name", user.last_name.clone());
    row("username", user.username.clone());
    row("photo_url", user.photo_url.as_ref().map(|u| u.to_string()));
}

/// JSON envelope for a verification outcome.
pub fn outcome_json(outcome: &Result<User, LoginError>) -> serde_json::Value {
    match outcome {
        Ok(user) => json!({ "valid": true, "user": user }),
        Err(err) => json!({
            "valid": false,
            "code": err.code() as u32,
            "error": err.to_string(),
        }),
    }
}
