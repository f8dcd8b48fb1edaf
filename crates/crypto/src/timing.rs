//! Constant-time operations for security.

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Only the length check may return early. Equal-length inputs take the same
/// time regardless of where the first difference occurs.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_tags() {
        let tag = [0x25u8; 32];
        assert!(constant_time_compare(&tag, &tag));
    }

    #[test]
    fn test_tags_differing_in_last_byte() {
        let a = [0u8; 32];
        let mut b = [0u8; 32];
        b[31] = 1;
        assert!(!constant_time_compare(&a, &b));
    }

    #[test]
    fn test_different_lengths() {
        assert!(!constant_time_compare(&[0u8; 32], &[0u8; 31]));
    }

    #[test]
    fn test_empty_slices() {
        assert!(constant_time_compare(b"", b""));
    }
}
