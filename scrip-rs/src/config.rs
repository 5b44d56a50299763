//! Tokenizer settings and the `.scriprc` loader.
//!
//! A `.scriprc` file uses the same line syntax as scripts meant for humans:
//!
//! | Line | Action |
//! |------|--------|
//! | `/set <name>=<value>` or `/set <name> <value>` | set a setting |
//! | Lines starting with `;` | comment, ignored |
//! | Any other `/command` | silently skipped |
//!
//! Settings:
//!
//! | Name          | Field                    | Default |
//! |---------------|--------------------------|---------|
//! | `maxtoken`    | [`Config::max_token_len`] | 1023   |
//! | `maxdepth`    | [`Config::max_depth`]     | 16     |
//! | `maxparams`   | [`Config::max_macro_params`] | 64  |
//! | `macrobuffer` | [`Config::macro_buffer_len`] | 4096 |
//! | `basedir`     | [`Config::base_dir`]      | none   |
//! | `varmatch`    | [`Config::variable_match`] (`exact`/`prefix`) | `exact` |

use std::path::{Path, PathBuf};

use crate::stack::MAX_INCLUDES;
use crate::var::VariableMatch;

// ── Public API ────────────────────────────────────────────────────────────────

/// A non-fatal error encountered while loading a config file.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct ConfigError {
    pub line: usize,
    pub message: String,
}

/// Limits and lookup behaviour for one tokenizer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Longest token accepted, in bytes.
    pub max_token_len: usize,
    /// Frames the include/expansion stack may hold.
    pub max_depth: usize,
    /// Formal parameters a macro may declare.
    pub max_macro_params: usize,
    /// Bytes available for a macro's parameter strings, one terminator byte
    /// counted per string.  Applies to formal names and to actual values.
    pub macro_buffer_len: usize,
    /// Directory that relative paths are resolved against in
    /// [`crate::PathMode::Resolve`].
    pub base_dir: Option<PathBuf>,
    pub variable_match: VariableMatch,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_token_len: 1023,
            max_depth: MAX_INCLUDES,
            max_macro_params: 64,
            macro_buffer_len: 4096,
            base_dir: None,
            variable_match: VariableMatch::Exact,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn with_max_token_len(mut self, n: usize) -> Self {
        self.max_token_len = n;
        self
    }

    pub fn with_max_depth(mut self, n: usize) -> Self {
        self.max_depth = n;
        self
    }

    pub fn with_variable_match(mut self, mode: VariableMatch) -> Self {
        self.variable_match = mode;
        self
    }

    /// Parse a `.scriprc` string.
    ///
    /// Returns the config and a list of any errors on recognised lines; bad
    /// lines leave the corresponding setting at its default.
    pub fn load_str(s: &str) -> (Self, Vec<ConfigError>) {
        let mut config = Config::new();
        let mut errors = Vec::new();

        for (i, raw) in s.lines().enumerate() {
            let lineno = i + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let Some(rest) = line.strip_prefix('/') else { continue };

            let (cmd, args_str) = rest
                .split_once(|c: char| c.is_ascii_whitespace())
                .unwrap_or((rest, ""));

            if cmd == "set" {
                if let Err(message) = parse_set(args_str.trim(), &mut config) {
                    errors.push(ConfigError { line: lineno, message });
                }
            }
        }

        (config, errors)
    }

    /// Read and parse a `.scriprc` file from disk.
    pub fn load_file(path: &Path) -> std::io::Result<(Self, Vec<ConfigError>)> {
        let s = std::fs::read_to_string(path)?;
        Ok(Self::load_str(&s))
    }
}

// ── /set ──────────────────────────────────────────────────────────────────────

fn parse_set(args: &str, config: &mut Config) -> Result<(), String> {
    if args.is_empty() {
        return Err("/set: requires an argument".into());
    }

    let (name, value) = if let Some((n, v)) = args.split_once('=') {
        (n.trim(), v.trim())
    } else if let Some((n, v)) = args.split_once(|c: char| c.is_ascii_whitespace()) {
        (n, v.trim())
    } else {
        return Err(format!("/set: missing value for '{args}'"));
    };

    match name.to_ascii_lowercase().as_str() {
        "maxtoken" => config.max_token_len = parse_limit(name, value)?,
        "maxdepth" => config.max_depth = parse_limit(name, value)?,
        "maxparams" => config.max_macro_params = parse_limit(name, value)?,
        "macrobuffer" => config.macro_buffer_len = parse_limit(name, value)?,
        "basedir" => {
            config.base_dir = if value.is_empty() { None } else { Some(PathBuf::from(value)) };
        }
        "varmatch" => {
            config.variable_match = VariableMatch::parse(value)
                .ok_or_else(|| format!("/set: varmatch must be 'exact' or 'prefix', not '{value}'"))?;
        }
        _ => return Err(format!("/set: unknown setting '{name}'")),
    }
    Ok(())
}

fn parse_limit(name: &str, value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err(format!("/set: {name} must be positive")),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("/set: {name}: invalid number '{value}'")),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
