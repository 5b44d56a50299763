//! `scrip`: a tokenizer for line-oriented build scripts.
//!
//! Scripts are split into whitespace-delimited (or C-expression) tokens while
//! a small preprocessor runs inline:
//!
//! - `$include <file>` continues tokenizing inside another file
//! - `$definevariable <name> <value>` defines text spliced by `$name$`
//! - `$definemacro <name> <params…> \\` defines a macro whose body follows,
//!   invoked as `$name <args…>`
//!
//! See [`Tokenizer`] for the pull API and [`files`] for the batch-tool file
//! helpers that usually accompany it.

pub mod cli;
pub mod config;
pub mod cursor;
pub mod directive;
pub mod error;
pub mod files;
pub mod frame;
pub mod fs;
pub mod macros;
pub mod mask;
pub mod stack;
pub mod tokenizer;
pub mod var;

pub use config::{Config, ConfigError};
pub use error::{ErrorClass, Position, Result, ScriptError};
pub use fs::{DiskFs, MemoryFs, ScriptFs, WriteMode};
pub use tokenizer::{LoadCallback, LoadEvent, PathMode, ScanMode, Token, Tokenizer, Tokens};
pub use var::VariableMatch;
