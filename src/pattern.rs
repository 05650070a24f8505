//! Byte pattern representation with wildcards.
//!
//! A pattern is an ordered list of tokens, each either a concrete byte or a
//! wildcard that matches any byte. In text form every token is two characters
//! (`55`, `E5`, `??`) followed by a single space.

use crate::utils::hex_value;
use crate::{CompileError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Width in characters of one token in text form, including its separator.
pub const TOKEN_WIDTH: usize = 3;

/// A single byte in a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternToken {
    /// Exact byte match.
    Byte(u8),
    /// Match any byte.
    Wildcard,
}

impl PatternToken {
    /// Check if this token matches a concrete byte.
    pub fn matches(&self, byte: u8) -> bool {
        match self {
            PatternToken::Byte(b) => *b == byte,
            PatternToken::Wildcard => true,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, PatternToken::Wildcard)
    }

    /// Decodes a two-character token: two hex digits or `??`.
    ///
    /// Half wildcards such as `?5` are rejected.
    pub fn from_pair(pair: [u8; 2]) -> Option<Self> {
        match pair {
            [b'?', b'?'] => Some(PatternToken::Wildcard),
            [hi, lo] => Some(PatternToken::Byte(hex_value(hi)? << 4 | hex_value(lo)?)),
        }
    }
}

impl fmt::Display for PatternToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternToken::Byte(b) => write!(f, "{:02X}", b),
            PatternToken::Wildcard => f.write_str("??"),
        }
    }
}

/// Parses one signature fragment line.
///
/// The whole line must consist of tokens each followed by exactly one space,
/// including the last one. Anything else returns `None` and nothing is consumed.
pub fn parse_fragment(line: &str) -> Option<Vec<PatternToken>> {
    let bytes = line.as_bytes();
    if bytes.is_empty() || bytes.len() % TOKEN_WIDTH != 0 {
        return None;
    }

    bytes
        .chunks_exact(TOKEN_WIDTH)
        .map(|chunk| match chunk {
            [hi, lo, b' '] => PatternToken::from_pair([*hi, *lo]),
            _ => None,
        })
        .collect()
}

/// An append-only byte pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BytePattern {
    tokens: Vec<PatternToken>,
}

impl BytePattern {
    /// Create an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pattern from concrete bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            tokens: bytes.iter().map(|&b| PatternToken::Byte(b)).collect(),
        }
    }

    pub fn from_tokens(tokens: Vec<PatternToken>) -> Self {
        Self { tokens }
    }

    /// Parse whitespace-separated tokens, e.g. `"27 BD ?? ?? AF BF"`.
    ///
    /// Looser than [`parse_fragment`]: any run of whitespace separates tokens
    /// and the trailing space is optional.
    pub fn parse(s: &str) -> Result<Self> {
        let tokens = s
            .split_whitespace()
            .map(|part| {
                let token = match part.as_bytes() {
                    [hi, lo] => PatternToken::from_pair([*hi, *lo]),
                    _ => None,
                };
                token.ok_or_else(|| CompileError::InvalidPattern(format!("invalid token: {}", part)))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { tokens })
    }

    pub(crate) fn extend(&mut self, tokens: impl IntoIterator<Item = PatternToken>) {
        self.tokens.extend(tokens);
    }

    /// Number of tokens, concrete and wildcard alike.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[PatternToken] {
        &self.tokens
    }

    pub fn concrete_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_wildcard()).count()
    }

    pub fn wildcard_count(&self) -> usize {
        self.tokens.iter().filter(|t| t.is_wildcard()).count()
    }

    /// Check if this pattern matches the start of `data`.
    pub fn matches(&self, data: &[u8]) -> bool {
        if data.len() < self.tokens.len() {
            return false;
        }

        self.tokens
            .iter()
            .zip(data.iter())
            .all(|(token, &byte)| token.matches(byte))
    }

    /// Text form: upper-case tokens, each followed by one space.
    pub fn to_hex_string(&self) -> String {
        self.tokens.iter().map(|t| format!("{} ", t)).collect()
    }
}

impl fmt::Display for BytePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl FromStr for BytePattern {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for BytePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for BytePattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
