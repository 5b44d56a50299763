//! One level of the include/macro expansion stack.

use crate::cursor::Cursor;
use crate::error::Position;

/// Origin label of frames started from an in-memory buffer.
pub const MEMORY_BUFFER: &str = "memory buffer";

/// Where a frame's bytes came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSource {
    /// Loaded from a file (entry script or `$include`).
    File,
    /// The in-memory entry buffer.  Reaching its end ends the script without
    /// popping it.
    Memory,
    /// A private copy of a macro body.
    Macro,
}

/// A script frame: origin name, cursor and, for macro expansions, the
/// positional parameter bindings.
#[derive(Debug, Clone)]
pub struct Frame {
    pub origin: String,
    pub source: FrameSource,
    pub cursor: Cursor,
    /// `(formal name, actual value)` pairs, in declaration order.
    pub bound_params: Vec<(Vec<u8>, Vec<u8>)>,
}

impl Frame {
    pub fn file(origin: impl Into<String>, buf: Vec<u8>) -> Self {
        Self {
            origin: origin.into(),
            source: FrameSource::File,
            cursor: Cursor::new(buf),
            bound_params: Vec::new(),
        }
    }

    pub fn memory(buf: Vec<u8>) -> Self {
        Self {
            origin: MEMORY_BUFFER.to_owned(),
            source: FrameSource::Memory,
            cursor: Cursor::new(buf),
            bound_params: Vec::new(),
        }
    }

    pub fn expansion(
        name: impl Into<String>,
        body: Vec<u8>,
        line: u32,
        bound_params: Vec<(Vec<u8>, Vec<u8>)>,
    ) -> Self {
        Self {
            origin: name.into(),
            source: FrameSource::Macro,
            cursor: Cursor::starting_at(body, line),
            bound_params,
        }
    }

    pub fn line(&self) -> u32 {
        self.cursor.line()
    }

    pub fn position(&self) -> Position {
        Position::new(self.origin.clone(), self.cursor.line())
    }

    pub fn is_expansion(&self) -> bool {
        !self.bound_params.is_empty()
    }

    /// Value bound to the formal parameter `name` (ASCII case-insensitive).
    pub fn param(&self, name: &[u8]) -> Option<&[u8]> {
        self.bound_params
            .iter()
            .find(|(formal, _)| formal.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_slice())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
