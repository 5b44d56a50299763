//! Bounded include/expansion stack.
//!
//! The stack is the control-flow backbone of the tokenizer: `$include` and
//! macro invocation push frames, end of buffer pops them.  Its capacity is a
//! hard limit that stops runaway recursive includes.

use log::debug;

use crate::frame::Frame;

/// Default number of frames the stack may hold.
pub const MAX_INCLUDES: usize = 16;

/// Returned by [`ExpansionStack::push`] when the stack is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackFull;

#[derive(Debug)]
pub struct ExpansionStack {
    frames: Vec<Frame>,
    capacity: usize,
}

impl ExpansionStack {
    /// A stack holding at most `capacity` frames.  The capacity is never
    /// below one, so an entry script always fits.
    pub fn new(capacity: usize) -> Self {
        Self { frames: Vec::new(), capacity: capacity.max(1) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() >= self.capacity
    }

    /// Push a frame; it becomes current.
    pub fn push(&mut self, frame: Frame) -> Result<(), StackFull> {
        if self.is_full() {
            return Err(StackFull);
        }
        debug!("entering {} (depth {})", frame.origin, self.frames.len() + 1);
        self.frames.push(frame);
        Ok(())
    }

    /// Discard the current frame and its buffer.  The parent frame resumes
    /// with the line counter it had when the child was pushed.
    pub fn pop(&mut self) -> Option<Frame> {
        let frame = self.frames.pop()?;
        match self.frames.last() {
            Some(parent) => debug!("returning to {}:{}", parent.origin, parent.line()),
            None => debug!("leaving {}", frame.origin),
        }
        Some(frame)
    }

    pub fn current(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Default for ExpansionStack {
    fn default() -> Self {
        Self::new(MAX_INCLUDES)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> Frame {
        Frame::file(name, Vec::new())
    }

    #[test]
    fn push_pop_order() {
        let mut s = ExpansionStack::default();
        s.push(file("a")).unwrap();
        s.push(file("b")).unwrap();
        assert_eq!(s.current().unwrap().origin, "b");
        assert_eq!(s.pop().unwrap().origin, "b");
        assert_eq!(s.current().unwrap().origin, "a");
        assert_eq!(s.depth(), 1);
    }

    #[test]
    fn zero_capacity_still_holds_one_frame() {
        let mut s = ExpansionStack::new(0);
        assert_eq!(s.capacity(), 1);
        s.push(file("entry")).unwrap();
        assert_eq!(s.push(file("more")), Err(StackFull));
    }

    #[test]
    fn capacity_is_enforced() {
        let mut s = ExpansionStack::new(2);
        s.push(file("a")).unwrap();
        s.push(file("b")).unwrap();
        assert!(s.is_full());
        assert_eq!(s.push(file("c")), Err(StackFull));
        assert_eq!(s.depth(), 2);
    }

    #[test]
    fn parent_line_survives_child() {
        let mut s = ExpansionStack::default();
        let mut parent = file("a");
        parent.cursor.add_lines(4);
        s.push(parent).unwrap();
        let mut child = file("b");
        child.cursor.add_lines(100);
        s.push(child).unwrap();
        s.pop();
        assert_eq!(s.current().unwrap().line(), 5);
    }

    #[test]
    fn pop_empty() {
        let mut s = ExpansionStack::default();
        assert!(s.pop().is_none());
        assert!(s.is_empty());
    }
}
