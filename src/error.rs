//! Error types.
//!
//! Every error that is tied to a source line carries its 1-based line number.

use std::path::PathBuf;

/// Errors produced while compiling a signature file.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A line starting with `==` that is not a well-formed `==NAME.OBJ==` header.
    #[error("line {line}: malformed object header: {text:?}")]
    MalformedHeader { line: usize, text: String },

    /// A line inside an object block that is neither a label nor a valid fragment.
    #[error("line {line}: malformed signature fragment: {text:?}")]
    MalformedSignatureFragment { line: usize, text: String },

    /// A line outside any object block that is not a header.
    #[error("line {line}: unexpected line outside an object block: {text:?}")]
    MalformedInput { line: usize, text: String },

    /// Label or signature content before the first object header.
    #[error("line {line}: label or signature before any object header")]
    NoOpenRecord { line: usize },

    /// No object blocks were found and the caller asked for at least one.
    #[error("no object blocks found")]
    EmptyInput,

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// A record loaded from JSON that the compiler could never have produced.
    #[error("invalid record {name:?}: {reason}")]
    InvalidRecord { name: String, reason: String },

    #[error("{}: input is not valid UTF-8", path.display())]
    Utf8 {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompileError {
    /// The source line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            CompileError::MalformedHeader { line, .. }
            | CompileError::MalformedSignatureFragment { line, .. }
            | CompileError::MalformedInput { line, .. }
            | CompileError::NoOpenRecord { line } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
