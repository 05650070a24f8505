//! Object Signature Database Compiler.
//!
//! This library compiles hand-written object signature text into structured
//! records. It is organized into several modules:
//! - `config`: CLI configuration and compile options.
//! - `line`: Line classification (headers, labels, signature fragments).
//! - `pattern`: Wildcard byte patterns.
//! - `record`: Signature records and their builder.
//! - `compiler`: The line-driven state machine producing records.
//! - `writer`: JSON and text output.
//!
//! # Example
//!
//! ```
//! use sigdb::{compile, CompileOptions};
//!
//! let source = "==FOO.OBJ==\nstart:\n00 11 ?? 22 \nmid:\n33 44 \n";
//! let records = compile(source, CompileOptions::default()).unwrap();
//! assert_eq!(records[0].label_offset("mid"), Some(4));
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod line;
pub mod pattern;
pub mod record;
pub mod utils;
pub mod writer;

pub use compiler::{compile, compile_file, Compiler};
pub use config::{CompileOptions, ParseMode};
pub use error::{CompileError, Result};
pub use pattern::{BytePattern, PatternToken};
pub use record::{Label, SignatureRecord};
