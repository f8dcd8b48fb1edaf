//! Field pairs collected from a payload before canonicalization.

use crate::check_string::build_check_string;
use crate::field::Field;

/// A recognized field name with the canonical text of its parsed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPair {
    field: Field,
    value: String,
}

impl FieldPair {
    /// Create a pair.
    pub fn new(field: Field, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }

    /// The field.
    #[inline]
    pub fn field(&self) -> Field {
        self.field
    }

    /// The field's wire name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.field.as_str()
    }

    /// The canonical value text.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// At most one pair per field, in insertion order. Never holds `hash`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairStore {
    pairs: Vec<FieldPair>,
}

impl PairStore {
    /// Create an empty store.
    pub fn new() -> Self {
        // Six signed fields exist today.
        Self {
            pairs: Vec::with_capacity(6),
        }
    }

    /// Add a pair. Returns false, leaving the store unchanged, when the field
    /// is already present or is the `hash` tag.
    pub fn insert(&mut self, field: Field, value: impl Into<String>) -> bool {
        if field == Field::Hash || self.contains(field) {
            return false;
        }
        self.pairs.push(FieldPair::new(field, value));
        true
    }

    /// Whether a pair for `field` is present.
    pub fn contains(&self, field: Field) -> bool {
        self.pairs.iter().any(|p| p.field == field)
    }

    /// Value stored for `field`.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.field == field)
            .map(FieldPair::value)
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldPair> {
        self.pairs.iter()
    }

    /// Pairs in insertion order.
    pub fn as_slice(&self) -> &[FieldPair] {
        &self.pairs
    }

    /// Canonical check string of the current contents.
    pub fn check_string(&self) -> String {
        build_check_string(&self.pairs)
    }
}

impl FromIterator<FieldPair> for PairStore {
    fn from_iter<I: IntoIterator<Item = FieldPair>>(iter: I) -> Self {
        let mut store = PairStore::new();
        for pair in iter {
            store.insert(pair.field, pair.value);
        }
        store
    }
}
