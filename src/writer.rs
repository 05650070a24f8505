//! Signature database writer.
//!
//! Records can be written as the JSON database consumed by matching tools, or
//! back out as signature text that compiles to the same records.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::OutputFormat;
use crate::pattern::PatternToken;
use crate::record::SignatureRecord;
use crate::Result;

/// Tokens per fragment line in text output.
pub const TOKENS_PER_LINE: usize = 16;

/// Writes records as a JSON array indented by four spaces.
pub fn write_json<W: Write>(writer: W, records: &[SignatureRecord]) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    records.serialize(&mut serializer)?;
    Ok(())
}

pub fn to_json(records: &[SignatureRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    write_json(&mut buffer, records)?;
    let json = String::from_utf8(buffer)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    Ok(json)
}

/// Reads a JSON database back into records.
///
/// Records whose names, label names or offsets would not survive [`to_text`]
/// are rejected.
pub fn from_json(json: &str) -> Result<Vec<SignatureRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Renders records in the signature text format.
///
/// Each label is emitted right before the token at its offset, so compiling
/// the result reproduces the same names, patterns and label offsets.
pub fn to_text(records: &[SignatureRecord]) -> String {
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str("==");
        out.push_str(record.name());
        out.push_str("==\n");

        let tokens = record.pattern().tokens();
        let mut labels = record.labels().iter().peekable();
        let mut pos = 0;
        loop {
            while let Some(label) = labels.next_if(|l| l.offset <= pos) {
                out.push_str(&label.name);
                out.push_str(":\n");
            }
            if pos >= tokens.len() {
                break;
            }
            // Run up to the next label or the line width, whichever is first.
            let limit = labels.peek().map_or(tokens.len(), |l| l.offset.min(tokens.len()));
            let end = limit.min(pos + TOKENS_PER_LINE);
            push_fragment(&mut out, &tokens[pos..end]);
            pos = end;
        }
    }
    out
}

fn push_fragment(out: &mut String, tokens: &[PatternToken]) {
    for token in tokens {
        out.push_str(&token.to_string());
        out.push(' ');
    }
    out.push('\n');
}

/// Writes records to `path` in `format`.
pub fn write_output(path: &Path, records: &[SignatureRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let file = fs::File::create(path)?;
            let mut writer = std::io::BufWriter::new(file);
            write_json(&mut writer, records)?;
            writer.flush()?;
        }
        OutputFormat::Text => fs::write(path, to_text(records))?,
    }
    Ok(())
}
