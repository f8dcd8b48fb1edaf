//! Sinks for non-fatal findings while parsing a payload.
//!
//! Unrecognized fields are not an error: the widget may add fields in later
//! versions. They are excluded from the check string and reported here.

/// Receives non-fatal diagnostics from the source adapters.
pub trait DiagnosticSink {
    /// A field outside the recognized vocabulary was seen and ignored.
    fn unrecognized_field(&mut self, name: &str);
}

/// Emits each diagnostic as a `tracing` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn unrecognized_field(&mut self, name: &str) {
        tracing::info!(field = %name, "unexpected field in Telegram user");
    }
}

/// Discards diagnostics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn unrecognized_field(&mut self, _name: &str) {}
}

/// Collects the names of ignored fields.
impl DiagnosticSink for Vec<String> {
    fn unrecognized_field(&mut self, name: &str) {
        self.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_collects_names() {
        let mut ignored: Vec<String> = Vec::new();
        ignored.unrecognized_field("email");
        ignored.unrecognized_field("lang");
        assert_eq!(ignored, vec!["email", "lang"]);
    }

    #[test]
    fn test_sinks_are_object_safe() {
        let mut sinks: Vec<Box<dyn DiagnosticSink>> = vec![Box::new(TracingSink), Box::new(NoopSink)];
        for sink in &mut sinks {
            sink.unrecognized_field("email");
        }
    }
}
