//! Line classification.
//!
//! Each non-blank line of a signature file is exactly one of: an object
//! header (`==NAME.OBJ==`), a label declaration (`name:`), a signature
//! fragment (`27 BD ?? E8 `), or junk. Kinds are tried in that order.

use crate::pattern::{parse_fragment, PatternToken};
use crate::utils::is_identifier;

/// Suffix every object name must carry, compared case-insensitively.
pub const OBJECT_SUFFIX: &str = ".OBJ";

/// The classification of one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty line; always skipped.
    Blank,
    /// Start of a new object block; holds the name including its suffix.
    Header(&'a str),
    /// A label bound to the current pattern length.
    Label(&'a str),
    /// Tokens to append to the current pattern.
    Fragment(Vec<PatternToken>),
    /// Anything else.
    Other,
}

/// Classifies a single line. Line terminators must already be stripped.
pub fn classify(line: &str) -> LineKind<'_> {
    if line.is_empty() {
        return LineKind::Blank;
    }
    if let Some(name) = parse_header(line) {
        return LineKind::Header(name);
    }
    if let Some(name) = parse_label(line) {
        return LineKind::Label(name);
    }
    match parse_fragment(line) {
        Some(tokens) => LineKind::Fragment(tokens),
        None => LineKind::Other,
    }
}

/// Matches `==STEM.OBJ==` and returns `STEM.OBJ`.
pub fn parse_header(line: &str) -> Option<&str> {
    let name = line.strip_prefix("==")?.strip_suffix("==")?;
    let split = name.len().checked_sub(OBJECT_SUFFIX.len())?;
    if !name.is_char_boundary(split) {
        return None;
    }
    let (stem, suffix) = name.split_at(split);
    (is_identifier(stem) && suffix.eq_ignore_ascii_case(OBJECT_SUFFIX)).then_some(name)
}

/// Matches `name:` and returns `name`.
pub fn parse_label(line: &str) -> Option<&str> {
    line.strip_suffix(':').filter(|name| is_identifier(name))
}

/// Lines that look like an attempted header.
pub fn looks_like_header(line: &str) -> bool {
    line.starts_with("==")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header() {
        assert_eq!(classify("==INITHEAP.OBJ=="), LineKind::Header("INITHEAP.OBJ"));
        assert_eq!(classify("==heap_2.obj=="), LineKind::Header("heap_2.obj"));
        assert_eq!(classify("==.OBJ=="), LineKind::Other);
        assert_eq!(classify("==FOO=="), LineKind::Other);
        assert_eq!(classify("==A.B.OBJ=="), LineKind::Other);
        assert_eq!(classify("==FOO.OBJ== "), LineKind::Other);
        assert_eq!(classify("==FOO.OBJ==="), LineKind::Other);
        assert_eq!(classify("====="), LineKind::Other);
    }

    #[test]
    fn test_header_non_ascii_stem() {
        assert_eq!(classify("==größe.OBJ=="), LineKind::Header("größe.OBJ"));
        assert_eq!(classify("==éOBJ=="), LineKind::Other);
    }

    #[test]
    fn test_label() {
        assert_eq!(classify("InitHeap:"), LineKind::Label("InitHeap"));
        assert_eq!(classify("_a1:"), LineKind::Label("_a1"));
        assert_eq!(classify(":"), LineKind::Other);
        assert_eq!(classify("foo: "), LineKind::Other);
        assert_eq!(classify("foo bar:"), LineKind::Other);
        assert_eq!(classify("foo::"), LineKind::Other);
    }

    #[test]
    fn test_fragment() {
        assert_eq!(
            classify("00 ?? "),
            LineKind::Fragment(vec![PatternToken::Byte(0), PatternToken::Wildcard])
        );
        assert_eq!(classify("00 ??"), LineKind::Other);
        assert_eq!(classify("00 ?X "), LineKind::Other);
    }

    #[test]
    fn test_blank_and_whitespace() {
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify(" "), LineKind::Other);
    }

    #[test]
    fn test_looks_like_header() {
        assert!(looks_like_header("==FOO=="));
        assert!(!looks_like_header("foo:"));
    }
}
