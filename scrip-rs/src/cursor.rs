//! Byte cursor over an immutable script buffer.
//!
//! The cursor knows nothing about tokens; it only tracks a read position and
//! the 1-based line number, and never reads past the end of its buffer.

/// A read position plus line counter over an owned byte buffer.
#[derive(Debug, Clone)]
pub struct Cursor {
    buf: Vec<u8>,
    pos: usize,
    line: u32,
}

impl Cursor {
    pub fn new(buf: Vec<u8>) -> Self {
        Self::starting_at(buf, 1)
    }

    /// A cursor whose line counter starts at `line` (macro bodies start at
    /// the line of their definition).
    pub fn starting_at(buf: Vec<u8>, line: u32) -> Self {
        Self { buf, pos: 0, line }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn end(&self) -> usize {
        self.buf.len()
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    /// Byte at the read position.
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Byte `n` places past the read position.
    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.buf.get(self.pos + n).copied()
    }

    /// `true` if the unread input starts with `s`.
    pub fn starts_with(&self, s: &[u8]) -> bool {
        self.buf[self.pos..].starts_with(s)
    }

    /// Unread remainder of the buffer.
    pub fn rest(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    /// Consume one byte.  Crossing a `\n` does *not* touch the line counter;
    /// callers decide whether a newline is allowed and call [`Cursor::newline`].
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.pos += 1;
        Some(b)
    }

    /// Move the read position to `pos`, clamped to the buffer end.
    pub fn seek(&mut self, pos: usize) {
        self.pos = pos.min(self.buf.len());
    }

    /// Record one crossed newline.
    pub fn newline(&mut self) {
        self.line += 1;
    }

    pub fn add_lines(&mut self, n: u32) {
        self.line += n;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
