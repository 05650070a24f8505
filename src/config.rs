//! Configuration module.
//!
//! This module defines the command-line interface (CLI) using `clap`, and the
//! options the library compiler takes.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Compile object signature text files into a JSON signature database.
///
/// Each input `FILE` is written to `FILE.json` unless `--output` is given.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Input signature text files
    #[arg(required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Output file (single input only)
    #[arg(short, long, help = "Path to the output file")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Reject malformed lines instead of ending the current object block
    #[arg(long)]
    pub strict: bool,

    /// Fail if an input contains no object blocks
    #[arg(long)]
    pub require_records: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON array of records.
    Json,
    /// Canonical signature text, re-readable by the compiler.
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

/// How lines that are not a header, label or fragment are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Junk ends the current object block, or is skipped outside one.
    #[default]
    Lenient,
    /// Junk is an error.
    Strict,
}

/// Options for [`crate::compiler::Compiler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    pub mode: ParseMode,
    /// Return `EmptyInput` when no object block is found.
    pub require_records: bool,
}

impl CompileOptions {
    pub fn strict() -> Self {
        Self {
            mode: ParseMode::Strict,
            ..Self::default()
        }
    }
}

impl From<&Config> for CompileOptions {
    fn from(config: &Config) -> Self {
        Self {
            mode: if config.strict {
                ParseMode::Strict
            } else {
                ParseMode::Lenient
            },
            require_records: config.require_records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["sigdb", "lib.txt"]);
        assert_eq!(config.inputs, vec![PathBuf::from("lib.txt")]);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(config.output.is_none());

        let options = CompileOptions::from(&config);
        assert_eq!(options.mode, ParseMode::Lenient);
        assert!(!options.require_records);
    }

    #[test]
    fn test_flags() {
        let config = Config::parse_from([
            "sigdb",
            "--strict",
            "--require-records",
            "--format",
            "text",
            "-o",
            "out.txt",
            "lib.txt",
        ]);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.output, Some(PathBuf::from("out.txt")));

        let options = CompileOptions::from(&config);
        assert_eq!(options.mode, ParseMode::Strict);
        assert!(options.require_records);
    }

    #[test]
    fn test_requires_input() {
        assert!(Config::try_parse_from(["sigdb"]).is_err());
    }
}
