//! JSON adapter.
//!
//! The document is streamed through `serde_json` into a flat list of
//! key/scalar entries. Anything other than a single top-level object of
//! scalars is rejected, as is trailing content after the closing brace.

use std::fmt;
use std::io::{BufReader, Read};

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};

use crate::diagnostics::DiagnosticSink;
use crate::error::{LoginError, Result};
use crate::field::{Field, FieldKind};
use crate::login::{LoginDraft, UnverifiedLogin};

/// A JSON value that is not an object or array.
#[derive(Debug, Clone, PartialEq)]
enum Scalar {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool,
    Null,
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number, boolean or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Scalar, E> {
        Ok(Scalar::Str(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Scalar, E> {
        Ok(Scalar::Str(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Scalar, E> {
        Ok(Scalar::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Scalar, E> {
        Ok(Scalar::UInt(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Scalar, E> {
        Ok(Scalar::Float(v))
    }

    fn visit_bool<E: de::Error>(self, _v: bool) -> std::result::Result<Scalar, E> {
        Ok(Scalar::Bool)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Scalar, E> {
        Ok(Scalar::Null)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Top-level object entries in document order.
#[derive(Debug, Default)]
struct Document {
    entries: Vec<(String, Scalar)>,
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Document, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(7));
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value::<Scalar>()?;
            entries.push((key, value));
        }
        Ok(Document { entries })
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}

/// Parse a JSON document from a reader into an unverified login.
pub fn parse_json<R: Read>(reader: R, sink: &mut dyn DiagnosticSink) -> Result<UnverifiedLogin> {
    let mut de = serde_json::Deserializer::from_reader(BufReader::new(reader));
    let doc = Document::deserialize(&mut de)?;
    de.end()?;
    convert(doc, sink)
}

/// Parse a JSON document held in memory into an unverified login.
pub fn parse_json_slice(bytes: &[u8], sink: &mut dyn DiagnosticSink) -> Result<UnverifiedLogin> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    let doc = Document::deserialize(&mut de)?;
    de.end()?;
    convert(doc, sink)
}

fn convert(doc: Document, sink: &mut dyn DiagnosticSink) -> Result<UnverifiedLogin> {
    let mut draft = LoginDraft::new();

    for (key, value) in doc.entries {
        let Some(field) = Field::from_name(&key) else {
            sink.unrecognized_field(&key);
            continue;
        };
        if draft.seen(field) {
            return Err(LoginError::DuplicateField(key));
        }

        let name = field.as_str();
        match (field.kind(), value) {
            (FieldKind::Integer, Scalar::Int(n)) => draft.put_integer(field, n)?,
            (FieldKind::Integer, Scalar::UInt(n)) => {
                let n = i64::try_from(n).map_err(|_| LoginError::InvalidInteger {
                    field: name,
                    reason: format!("{} is out of range", n),
                })?;
                draft.put_integer(field, n)?;
            }
            (FieldKind::Integer, Scalar::Float(n)) => {
                return Err(LoginError::InvalidInteger {
                    field: name,
                    reason: format!("{} is not an integer", n),
                });
            }
            (FieldKind::Integer, _) => {
                return Err(LoginError::WrongType { field: name, expected: "number" });
            }
            (FieldKind::Tag, Scalar::Str(s)) => draft.put_tag(&s)?,
            (FieldKind::Text | FieldKind::Url, Scalar::Str(s)) => draft.put_text(field, s)?,
            (FieldKind::Text | FieldKind::Url | FieldKind::Tag, _) => {
                return Err(LoginError::WrongType { field: name, expected: "string" });
            }
        }
    }

    draft.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::NoopSink;

    fn parse(input: &str) -> Result<UnverifiedLogin> {
        parse_json(input.as_bytes(), &mut NoopSink)
    }

    #[test]
    fn test_scalars_collected_in_order() {
        let doc: Document = serde_json::from_str(r#"{"b": 1, "a": "x", "c": null, "d": -2, "e": 1.5}"#).unwrap();
        assert_eq!(
            doc.entries,
            vec![
                ("b".to_string(), Scalar::UInt(1)),
                ("a".to_string(), Scalar::Str("x".into())),
                ("c".to_string(), Scalar::Null),
                ("d".to_string(), Scalar::Int(-2)),
                ("e".to_string(), Scalar::Float(1.5)),
            ]
        );
    }

    #[test]
    fn test_minimal_document() {
        let login = parse(r#"{"auth_date": 1512345678, "id": 12345678}"#).unwrap();
        assert_eq!(login.check_string(), "auth_date=1512345678\nid=12345678");
        assert_eq!(login.user.first_name, None);
        assert!(!login.has_tag());
    }

    #[test]
    fn test_structural_errors() {
        for input in [
            "",
            "food",
            r#""food""#,
            "[]",
            r#"{"auth_date": {}}"#,
            r#"{"auth_date": []}"#,
            r#"{"auth_date": 1, "id": 1,}"#,
            r#"{"auth_date": 1, "id": 1} {}"#,
            r#"{"auth_date": 1, "id": 1"#,
            r#"{"lang": ["en"], "auth_date": 1, "id": 1}"#,
        ] {
            let err = parse(input).unwrap_err();
            assert!(matches!(err, LoginError::Json(_)), "{:?} gave {:?}", input, err);
        }
    }

    #[test]
    fn test_trailing_whitespace_allowed() {
        assert!(parse("{\"auth_date\": 1, \"id\": 1}\n\n").is_ok());
    }

    #[test]
    fn test_wrong_types() {
        let err = parse(r#"{"auth_date": 1, "id": "12345678"}"#).unwrap_err();
        assert_eq!(err, LoginError::WrongType { field: "id", expected: "number" });

        let err = parse(r#"{"auth_date": 1, "id": 1, "username": 5}"#).unwrap_err();
        assert_eq!(err, LoginError::WrongType { field: "username", expected: "string" });

        let err = parse(r#"{"auth_date": 1, "id": 1, "first_name": null}"#).unwrap_err();
        assert_eq!(err, LoginError::WrongType { field: "first_name", expected: "string" });

        let err = parse(r#"{"auth_date": true, "id": 1}"#).unwrap_err();
        assert_eq!(err, LoginError::WrongType { field: "auth_date", expected: "number" });
    }

    #[test]
    fn test_non_integer_numbers() {
        let err = parse(r#"{"auth_date": 1512345678.5, "id": 1}"#).unwrap_err();
        assert!(matches!(err, LoginError::InvalidInteger { field: "auth_date", .. }));

        let err = parse(r#"{"auth_date": 1, "id": 18446744073709551615}"#).unwrap_err();
        assert!(matches!(err, LoginError::InvalidInteger { field: "id", .. }));
    }

    #[test]
    fn test_duplicate_fields() {
        let err = parse(r#"{"auth_date": 1, "id": 1, "id": 2}"#).unwrap_err();
        assert_eq!(err, LoginError::DuplicateField("id".into()));

        let hash = "0".repeat(64);
        let input = format!(r#"{{"auth_date": 1, "id": 1, "hash": "{0}", "hash": "{0}"}}"#, hash);
        let err = parse(&input).unwrap_err();
        assert_eq!(err, LoginError::DuplicateField("hash".into()));
    }

    #[test]
    fn test_unrecognized_scalars_reported() {
        let mut ignored: Vec<String> = Vec::new();
        let login = parse_json_slice(
            br#"{"auth_date": 1, "id": 1, "lang": "en", "is_premium": true}"#,
            &mut ignored,
        )
        .unwrap();
        assert_eq!(ignored, vec!["lang", "is_premium"]);
        assert_eq!(login.pairs().len(), 2);
    }

    #[test]
    fn test_hash_must_be_string() {
        let err = parse(r#"{"auth_date": 1, "id": 1, "hash": 0}"#).unwrap_err();
        assert_eq!(err, LoginError::WrongType { field: "hash", expected: "string" });
    }
}
