//! Macro table.
//!
//! A macro is defined by a `$definemacro` directive:
//!
//! ```text
//! $definemacro box w h \\
//!     $box_model $w$ $h$
//! ```
//!
//! The tokens after the name, up to a `\\` token or the end of the line, are
//! the formal parameters.  The body is captured raw: everything after the
//! parameters up to the first newline that is not escaped by a `\\` earlier on
//! its line.  Invoking `$box 4 2` pushes a frame over a private copy of the
//! body with `w = 4`, `h = 2` bound, so `$w$`/`$h$` splice in while scanning.
//!
//! Definitions live for the rest of the session.  Lookup is case-insensitive
//! and first-match: a later definition with the same name is kept but shadowed.

// ── MacroDef ──────────────────────────────────────────────────────────────────

/// A captured macro definition.  Names are raw script bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDef {
    pub name: Vec<u8>,
    /// Formal parameter names in declaration order.
    pub params: Vec<Vec<u8>>,
    /// Raw, unexpanded body bytes.
    pub body: Vec<u8>,
    /// Line of the `$definemacro` directive; expansion frames start counting
    /// lines from here.
    pub line: u32,
}

impl MacroDef {
    pub fn new(name: impl Into<Vec<u8>>, params: Vec<Vec<u8>>, body: Vec<u8>, line: u32) -> Self {
        Self { name: name.into(), params, body, line }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

// ── Body capture ──────────────────────────────────────────────────────────────

/// Scan a macro body starting at the beginning of `src`.
///
/// Returns the body (with every `\\` and the rest of its line blanked out)
/// and the number of bytes of `src` it covers.  The terminating newline is
/// not included.
pub fn capture_body(src: &[u8]) -> (Vec<u8>, usize) {
    let mut body = Vec::new();
    let mut i = 0;
    while i < src.len() && src[i] != b'\n' {
        if src[i] == b'\\' && src.get(i + 1) == Some(&b'\\') {
            while i < src.len() && src[i] != b'\n' {
                body.push(b' ');
                i += 1;
            }
            if i < src.len() {
                body.push(b'\n');
                i += 1;
            }
        } else {
            body.push(src[i]);
            i += 1;
        }
    }
    (body, i)
}

// ── MacroTable ────────────────────────────────────────────────────────────────

/// All macros defined in a session, in definition order.
#[derive(Debug, Default)]
pub struct MacroTable {
    defs: Vec<MacroDef>,
}

impl MacroTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition.
    pub fn define(&mut self, def: MacroDef) {
        self.defs.push(def);
    }

    /// First definition named `name` (ASCII case-insensitive).
    pub fn get(&self, name: impl AsRef<[u8]>) -> Option<&MacroDef> {
        let name = name.as_ref();
        self.defs.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: impl AsRef<[u8]>) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacroDef> {
        self.defs.iter()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
