//! Fatal tokenizer errors.
//!
//! Every failure the tokenizer can hit while scanning is fatal for the
//! current session: there is no local recovery.  Errors are returned as
//! values so the host decides how to terminate (the `scrip` binary prints the
//! diagnostic and exits with status 1).
//!
//! The only non-error stop is ordinary end-of-script, which the pull API
//! reports as `Ok(None)`.

use std::fmt;
use std::io;
use std::path::PathBuf;

// ── Position ──────────────────────────────────────────────────────────────────

/// Origin name and 1-based line of the frame that was active when an error
/// (or a token) was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub origin: String,
    pub line: u32,
}

impl Position {
    pub fn new(origin: impl Into<String>, line: u32) -> Self {
        Self { origin: origin.into(), line }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.origin, self.line)
    }
}

// ── ErrorClass ────────────────────────────────────────────────────────────────

/// Broad category of a [`ScriptError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Nesting, buffer or token limits exceeded.
    Resource,
    /// The script text itself is malformed.
    Malformed,
    /// A script file could not be loaded.
    Io,
    /// The API was driven out of order.
    Usage,
}

// ── ScriptError ───────────────────────────────────────────────────────────────

/// A fatal tokenizer error.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// Include/macro nesting exceeded the stack capacity.
    #[error("{at}: script file exceeded {limit} nested includes")]
    TooManyIncludes { limit: usize, at: Position },

    /// A token (after splicing) grew past the configured maximum length.
    #[error("{at}: token too large (limit {limit} bytes)")]
    TokenTooLarge { limit: usize, at: Position },

    /// Parameter names or values of a macro overflowed the parameter buffer.
    #[error("{at}: macro buffer overflow in `{name}`")]
    MacroBufferOverflow { name: String, at: Position },

    /// A macro declared more formal parameters than allowed.
    #[error("{at}: macro `{name}` has more than {limit} parameters")]
    TooManyParameters { name: String, limit: usize, at: Position },

    /// A macro declared the same formal parameter twice.
    #[error("{at}: duplicate parameter `{param}` in macro `{name}`")]
    DuplicateParameter { name: String, param: String, at: Position },

    /// A newline or end of input was reached where the grammar required
    /// another token on the same line.
    #[error("{at}: line {} is incomplete", .at.line)]
    LineIncomplete { at: Position },

    /// A `/*` comment was never closed.
    #[error("{at}: unterminated comment")]
    UnterminatedComment { at: Position },

    /// `$name$` inside a macro expansion named no bound parameter.
    #[error("{at}: unknown macro token \"{name}\"")]
    UnknownMacroParameter { name: String, at: Position },

    /// `$name$` named no defined variable.
    #[error("{at}: unknown variable token \"{name}\"")]
    UnknownVariable { name: String, at: Position },

    /// The entry script file could not be loaded.
    #[error("can't load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file named by `$include` could not be loaded.
    #[error("{at}: can't load {}: {source}", .path.display())]
    Include {
        path: PathBuf,
        at: Position,
        #[source]
        source: io::Error,
    },

    /// A token was requested before any script was begun.
    #[error("tokenizer has no script loaded")]
    NotStarted,

    /// `unget_token` was called with no token to give back, or twice in a row.
    #[error("no token available to unget")]
    InvalidUnget,
}

impl ScriptError {
    /// The category this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            ScriptError::TooManyIncludes { .. }
            | ScriptError::TokenTooLarge { .. }
            | ScriptError::MacroBufferOverflow { .. }
            | ScriptError::TooManyParameters { .. } => ErrorClass::Resource,
            ScriptError::LineIncomplete { .. }
            | ScriptError::UnterminatedComment { .. }
            | ScriptError::UnknownMacroParameter { .. }
            | ScriptError::UnknownVariable { .. }
            | ScriptError::DuplicateParameter { .. } => ErrorClass::Malformed,
            ScriptError::Load { .. } | ScriptError::Include { .. } => ErrorClass::Io,
            ScriptError::NotStarted | ScriptError::InvalidUnget => ErrorClass::Usage,
        }
    }

    /// Where the error was detected, when a frame was active.
    pub fn position(&self) -> Option<&Position> {
        match self {
            ScriptError::TooManyIncludes { at, .. }
            | ScriptError::TokenTooLarge { at, .. }
            | ScriptError::MacroBufferOverflow { at, .. }
            | ScriptError::TooManyParameters { at, .. }
            | ScriptError::DuplicateParameter { at, .. }
            | ScriptError::LineIncomplete { at }
            | ScriptError::UnterminatedComment { at }
            | ScriptError::UnknownMacroParameter { at, .. }
            | ScriptError::UnknownVariable { at, .. }
            | ScriptError::Include { at, .. } => Some(at),
            ScriptError::Load { .. } | ScriptError::NotStarted | ScriptError::InvalidUnget => None,
        }
    }
}

pub type Result<T, E = ScriptError> = std::result::Result<T, E>;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_display() {
        assert_eq!(Position::new("a.txt", 7).to_string(), "a.txt:7");
    }

    #[test]
    fn line_incomplete_message() {
        let e = ScriptError::LineIncomplete { at: Position::new("memory buffer", 3) };
        assert_eq!(e.to_string(), "memory buffer:3: line 3 is incomplete");
        assert_eq!(e.class(), ErrorClass::Malformed);
    }

    #[test]
    fn load_and_include_messages() {
        let e = ScriptError::Load {
            path: PathBuf::from("x.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(e.to_string(), "can't load x.txt: missing");
        assert_eq!(e.class(), ErrorClass::Io);
        assert!(e.position().is_none());

        let e = ScriptError::Include {
            path: PathBuf::from("y.txt"),
            at: Position::new("main.txt", 2),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(e.to_string(), "main.txt:2: can't load y.txt: missing");
        assert_eq!(e.position().map(|p| p.line), Some(2));
    }

    #[test]
    fn resource_class() {
        let e = ScriptError::TooManyIncludes { limit: 16, at: Position::new("a", 1) };
        assert_eq!(e.class(), ErrorClass::Resource);
        assert!(e.to_string().contains("16 nested includes"));
    }

    #[test]
    fn usage_errors_have_no_position() {
        assert!(ScriptError::NotStarted.position().is_none());
        assert_eq!(ScriptError::InvalidUnget.class(), ErrorClass::Usage);
    }
}
