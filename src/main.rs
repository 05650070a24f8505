//! Entry point for the sigdb compiler.
//!
//! This file handles high-level application flow:
//! 1. Parse command-line arguments using `clap`.
//! 2. Set up logging from `--log-level` (or `RUST_LOG`).
//! 3. Compile every input file into signature records.
//! 4. Write each result next to its input, or to `--output`.
//!
//! Error handling is done via `anyhow`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use sigdb::config::{Config, OutputFormat};
use sigdb::{compile_file, writer, CompileOptions};

fn main() -> Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if config.output.is_some() && config.inputs.len() > 1 {
        anyhow::bail!("--output can only be used with a single input");
    }

    let options = CompileOptions::from(&config);

    for input in &config.inputs {
        let records = compile_file(input, options)
            .with_context(|| format!("failed to compile {}", input.display()))?;

        let output = match &config.output {
            Some(path) => path.clone(),
            None => default_output(input, config.format),
        };
        writer::write_output(&output, &records, config.format)
            .with_context(|| format!("failed to write {}", output.display()))?;

        let labels: usize = records.iter().map(|r| r.labels().len()).sum();
        tracing::info!(
            "{}: {} objects, {} labels -> {}",
            input.display(),
            records.len(),
            labels,
            output.display()
        );
    }

    Ok(())
}

/// `lib.txt` becomes `lib.txt.json` (or `lib.txt.txt` for text output).
fn default_output(input: &Path, format: OutputFormat) -> PathBuf {
    let mut name = input.as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}
