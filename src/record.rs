//! Signature records.
//!
//! A record is one object block of the input: its name, its wildcard byte
//! pattern, and the labels that mark function starts inside that pattern.

use serde::{Deserialize, Serialize};

use crate::line::parse_header;
use crate::pattern::{BytePattern, PatternToken};
use crate::utils::is_identifier;
use crate::CompileError;

/// A name bound to an offset within a record's pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// Number of pattern tokens preceding the label.
    pub offset: usize,
}

impl Label {
    pub fn new(name: impl Into<String>, offset: usize) -> Self {
        Self {
            name: name.into(),
            offset,
        }
    }
}

/// A finalized object signature.
///
/// Serializes as `{ "name", "sig", "labels" }`, with `sig` in the same
/// `HH ?? ` text form used by the input. Deserialization rejects records that
/// could not have come out of the compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct SignatureRecord {
    name: String,
    #[serde(rename = "sig")]
    pattern: BytePattern,
    labels: Vec<Label>,
}

impl SignatureRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &BytePattern {
        &self.pattern
    }

    /// Labels in declaration order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// All labels declared at `offset`, in declaration order.
    pub fn labels_at(&self, offset: usize) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(move |l| l.offset == offset)
    }

    /// Offset of the first label called `name`.
    pub fn label_offset(&self, name: &str) -> Option<usize> {
        self.labels.iter().find(|l| l.name == name).map(|l| l.offset)
    }
}

#[derive(Deserialize)]
struct RawRecord {
    name: String,
    sig: BytePattern,
    labels: Vec<Label>,
}

impl TryFrom<RawRecord> for SignatureRecord {
    type Error = CompileError;

    /// Enforces what the compiler guarantees: a header-shaped name, identifier
    /// labels, and offsets that never decrease nor pass the pattern end.
    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: String| CompileError::InvalidRecord {
            name: raw.name.clone(),
            reason,
        };

        if parse_header(&format!("=={}==", raw.name)) != Some(raw.name.as_str()) {
            return Err(invalid("name is not of the form NAME.OBJ".to_string()));
        }

        let mut previous = 0;
        for label in &raw.labels {
            if !is_identifier(&label.name) {
                return Err(invalid(format!("invalid label name {:?}", label.name)));
            }
            if label.offset > raw.sig.len() {
                return Err(invalid(format!(
                    "label {} at offset {} is past the pattern end ({})",
                    label.name,
                    label.offset,
                    raw.sig.len()
                )));
            }
            if label.offset < previous {
                return Err(invalid(format!(
                    "label {} at offset {} precedes offset {}",
                    label.name, label.offset, previous
                )));
            }
            previous = label.offset;
        }

        Ok(SignatureRecord {
            name: raw.name,
            pattern: raw.sig,
            labels: raw.labels,
        })
    }
}

/// Mutable construction state for the record currently being compiled.
///
/// The pattern only grows; every label takes the pattern length at the moment
/// it is declared, so `offset <= pattern.len()` holds for the finished record.
#[derive(Debug)]
pub struct RecordBuilder {
    name: String,
    pattern: BytePattern,
    labels: Vec<Label>,
}

impl RecordBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: BytePattern::new(),
            labels: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Binds `name` to the current pattern length.
    pub fn add_label(&mut self, name: impl Into<String>) {
        let offset = self.pattern.len();
        self.labels.push(Label::new(name, offset));
    }

    pub fn add_tokens(&mut self, tokens: impl IntoIterator<Item = PatternToken>) {
        self.pattern.extend(tokens);
    }

    pub fn finish(self) -> SignatureRecord {
        SignatureRecord {
            name: self.name,
            pattern: self.pattern,
            labels: self.labels,
        }
    }
}
