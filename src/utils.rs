//! Utility functions.

/// Returns true for characters allowed in object and label identifiers
/// (letters, digits and underscore, Unicode-aware).
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns true if `s` is a non-empty run of word characters.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_word_char)
}

/// Decodes a single ASCII hex digit, either case.
pub fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier() {
        assert!(is_identifier("InitHeap_2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a.b"));
        assert!(!is_identifier("a b"));
    }

    #[test]
    fn test_hex_value() {
        assert_eq!(hex_value(b'0'), Some(0));
        assert_eq!(hex_value(b'f'), Some(15));
        assert_eq!(hex_value(b'C'), Some(12));
        assert_eq!(hex_value(b'?'), None);
        assert_eq!(hex_value(b'g'), None);
    }
}
