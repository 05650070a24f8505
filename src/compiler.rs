//! Signature text compiler.
//!
//! This module contains the `Compiler` which turns signature text into
//! `SignatureRecord`s in a single pass over the lines:
//! 1. Classification: every line is a header, label, fragment, blank or junk.
//! 2. Accumulation: labels and fragments extend the open record.
//! 3. Finalization: a header, junk line or end of input closes the open record.
//!
//! The compiler is a two-state machine. In `AwaitingHeader` only a header is
//! meaningful; in `InRecord` the open record owns all label and fragment lines
//! until something else shows up.

use memmap2::Mmap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, trace, warn};

use crate::config::{CompileOptions, ParseMode};
use crate::line::{classify, looks_like_header, LineKind};
use crate::record::{RecordBuilder, SignatureRecord};
use crate::{CompileError, Result};

enum State {
    AwaitingHeader,
    InRecord(RecordBuilder),
}

/// Incremental signature compiler. Feed it lines in order, then call `finish`.
pub struct Compiler {
    options: CompileOptions,
    state: State,
    records: Vec<SignatureRecord>,
    /// Whether any header has been seen; content before the first header is fatal.
    seen_header: bool,
    line_no: usize,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            state: State::AwaitingHeader,
            records: Vec::new(),
            seen_header: false,
            line_no: 0,
        }
    }

    /// Processes the next line, without its line terminator.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        self.line_no += 1;
        let kind = classify(line);
        trace!("line {}: {:?}", self.line_no, kind);

        match kind {
            LineKind::Blank => {}
            LineKind::Header(name) => {
                self.finalize();
                self.seen_header = true;
                self.state = State::InRecord(RecordBuilder::new(name));
            }
            LineKind::Label(name) => {
                if let State::InRecord(builder) = &mut self.state {
                    builder.add_label(name);
                } else {
                    self.orphaned_content(line)?;
                }
            }
            LineKind::Fragment(tokens) => {
                if let State::InRecord(builder) = &mut self.state {
                    builder.add_tokens(tokens);
                } else {
                    self.orphaned_content(line)?;
                }
            }
            LineKind::Other => {
                if let State::InRecord(builder) = &self.state {
                    if self.options.mode == ParseMode::Strict {
                        return Err(self.malformed_in_record(line));
                    }
                    debug!(
                        "line {}: ending {} at unrecognized line {:?}",
                        self.line_no,
                        builder.name(),
                        line
                    );
                    self.finalize();
                }
                // Junk is never a header, so outside a record it is handled here.
                self.stray_line(line)?;
            }
        }
        Ok(())
    }

    /// Closes the open record, if any, and returns all records in header order.
    pub fn finish(mut self) -> Result<Vec<SignatureRecord>> {
        self.finalize();
        if self.records.is_empty() && self.options.require_records {
            return Err(CompileError::EmptyInput);
        }
        Ok(self.records)
    }

    fn finalize(&mut self) {
        if let State::InRecord(builder) = std::mem::replace(&mut self.state, State::AwaitingHeader) {
            let record = builder.finish();
            debug!(
                "finalized {} ({} tokens, {} labels)",
                record.name(),
                record.pattern().len(),
                record.labels().len()
            );
            self.records.push(record);
        }
    }

    /// A label or fragment with no open record.
    fn orphaned_content(&self, line: &str) -> Result<()> {
        if !self.seen_header {
            return Err(CompileError::NoOpenRecord { line: self.line_no });
        }
        match self.options.mode {
            ParseMode::Strict => Err(CompileError::MalformedInput {
                line: self.line_no,
                text: line.to_string(),
            }),
            ParseMode::Lenient => {
                warn!("line {}: skipping content outside an object block: {:?}", self.line_no, line);
                Ok(())
            }
        }
    }

    /// A junk line with no open record.
    fn stray_line(&self, line: &str) -> Result<()> {
        match self.options.mode {
            ParseMode::Strict if looks_like_header(line) => Err(CompileError::MalformedHeader {
                line: self.line_no,
                text: line.to_string(),
            }),
            ParseMode::Strict => Err(CompileError::MalformedInput {
                line: self.line_no,
                text: line.to_string(),
            }),
            ParseMode::Lenient => {
                warn!("line {}: skipping unrecognized line: {:?}", self.line_no, line);
                Ok(())
            }
        }
    }

    fn malformed_in_record(&self, line: &str) -> CompileError {
        let text = line.to_string();
        if looks_like_header(line) {
            CompileError::MalformedHeader { line: self.line_no, text }
        } else {
            CompileError::MalformedSignatureFragment { line: self.line_no, text }
        }
    }
}

/// Splits on `\n`, dropping a trailing `\r` from each line.
pub fn lines(source: &str) -> impl Iterator<Item = &str> {
    source.split('\n').map(|l| l.strip_suffix('\r').unwrap_or(l))
}

/// Compiles a whole signature text.
pub fn compile(source: &str, options: CompileOptions) -> Result<Vec<SignatureRecord>> {
    let mut compiler = Compiler::new(options);
    for line in lines(source) {
        compiler.feed_line(line)?;
    }
    compiler.finish()
}

/// Maps `path` into memory and compiles it.
pub fn compile_file(path: &Path, options: CompileOptions) -> Result<Vec<SignatureRecord>> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    let source = std::str::from_utf8(&mmap).map_err(|source| CompileError::Utf8 {
        path: path.to_path_buf(),
        source,
    })?;
    compile(source, options)
}
