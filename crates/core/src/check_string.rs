//! Canonical serialization of field pairs.
//!
//! The check string is every pair rendered as `name=value`, sorted by name
//! with byte-wise comparison and joined by `\n` with no trailing separator.
//! It depends only on the set of pairs, never on the order they arrived in.

use crate::pairs::FieldPair;

/// Exact length of the check string for `pairs`.
fn estimate_size(pairs: &[FieldPair]) -> usize {
    if pairs.is_empty() {
        return 0;
    }
    let separators = 2 * pairs.len() - 1;
    pairs
        .iter()
        .map(|p| p.name().len() + p.value().len())
        .sum::<usize>()
        + separators
}

/// Build the check string for a snapshot of pairs.
///
/// # Example
///
/// ```
/// use tgwidget_core::{build_check_string, Field, FieldPair};
///
/// let pairs = [
///     FieldPair::new(Field::Id, "12345678"),
///     FieldPair::new(Field::AuthDate, "1512345678"),
/// ];
/// assert_eq!(build_check_string(&pairs), "auth_date=1512345678\nid=12345678");
/// ```
pub fn build_check_string(pairs: &[FieldPair]) -> String {
    let mut sorted: Vec<&FieldPair> = pairs.iter().collect();
    sorted.sort_by(|a, b| a.name().as_bytes().cmp(b.name().as_bytes()));

    let mut out = String::with_capacity(estimate_size(pairs));
    for (i, pair) in sorted.into_iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(pair.name());
        out.push('=');
        out.push_str(pair.value());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::pairs::PairStore;
    use proptest::prelude::*;

    fn full_pairs() -> Vec<FieldPair> {
        vec![
            FieldPair::new(Field::Id, "12345678"),
            FieldPair::new(Field::FirstName, "John 🕶"),
            FieldPair::new(Field::LastName, "Smith"),
            FieldPair::new(Field::Username, "jsmith"),
            FieldPair::new(Field::PhotoUrl, "https://t.me/i/userpic/320/jsmith.jpg"),
            FieldPair::new(Field::AuthDate, "1512345678"),
        ]
    }

    #[test]
    fn test_empty_pairs() {
        assert_eq!(build_check_string(&[]), "");
    }

    #[test]
    fn test_only_id() {
        let pairs = [FieldPair::new(Field::Id, "12345678")];
        assert_eq!(build_check_string(&pairs), "id=12345678");
    }

    #[test]
    fn test_full_set() {
        assert_eq!(
            build_check_string(&full_pairs()),
            "auth_date=1512345678\nfirst_name=John 🕶\nid=12345678\nlast_name=Smith\nphoto_url=https://t.me/i/userpic/320/jsmith.jpg\nusername=jsmith"
        );
    }

    #[test]
    fn test_estimate_is_exact() {
        let pairs = full_pairs();
        assert_eq!(estimate_size(&pairs), build_check_string(&pairs).len());
    }

    #[test]
    fn test_values_are_not_escaped() {
        let pairs = [FieldPair::new(Field::FirstName, "a=b\nc")];
        assert_eq!(build_check_string(&pairs), "first_name=a=b\nc");
    }

    fn arb_store_entries() -> impl Strategy<Value = Vec<(usize, String)>> {
        proptest::sample::subsequence((0..6usize).collect::<Vec<_>>(), 0..=6)
            .prop_flat_map(|idx| {
                let n = idx.len();
                (Just(idx), proptest::collection::vec(".*", n))
            })
            .prop_map(|(idx, values)| idx.into_iter().zip(values).collect())
    }

    const SIGNED: [Field; 6] = [
        Field::AuthDate,
        Field::FirstName,
        Field::Id,
        Field::LastName,
        Field::PhotoUrl,
        Field::Username,
    ];

    proptest! {
        #[test]
        fn prop_insertion_order_is_irrelevant(
            (entries, shuffled) in arb_store_entries()
                .prop_flat_map(|e| (Just(e.clone()), Just(e).prop_shuffle()))
        ) {
            let forward: PairStore = entries
                .iter()
                .map(|(i, v)| FieldPair::new(SIGNED[*i], v.clone()))
                .collect();
            let reordered: PairStore = shuffled
                .iter()
                .map(|(i, v)| FieldPair::new(SIGNED[*i], v.clone()))
                .collect();
            prop_assert_eq!(forward.check_string(), reordered.check_string());
        }

        #[test]
        fn prop_pair_count_matches_lines(entries in arb_store_entries()) {
            let store: PairStore = entries
                .iter()
                .map(|(i, v)| FieldPair::new(SIGNED[*i], v.replace('\n', " ")))
                .collect();
            let s = store.check_string();
            let lines = if s.is_empty() { 0 } else { s.split('\n').count() };
            prop_assert_eq!(lines, store.len());
        }
    }
}
