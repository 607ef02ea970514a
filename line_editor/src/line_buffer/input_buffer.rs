// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use thiserror::Error;

/// Returned by the strict (`try_*`) positioning methods of [`InputBuffer`].
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BufferError {
    /// The requested position is past the end of the line.
    #[error("position {pos} is out of range for a line of length {len}")]
    OutOfRange { pos: usize, len: usize },
}

/// The unsubmitted input line and the logical cursor.
///
/// The cursor is a char offset (not a byte offset) into [`Self::text`] and is always a
/// valid insertion point: `0 <= cursor <= len`. There are two flavors of positioning:
///
/// - [`Self::move_to`] and [`Self::move_by`] clamp out of range positions to the
///   nearest end of the line. History recall and completion rely on this.
/// - [`Self::try_move_to`] and [`Self::insert_at`] reject out of range positions with
///   [`BufferError::OutOfRange`] and leave the buffer untouched.
///
/// Every mutating method returns the updated `(text, cursor)` pair. Nothing here renders
/// anything, that is the caller's job.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InputBuffer {
    text: String,
    cursor: usize,
}

impl InputBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Create a buffer holding `text`, with the cursor at the end.
    #[must_use]
    pub fn new_with_text(text: impl Into<String>) -> Self {
        let mut it = Self::default();
        it.replace(text);
        it
    }

    #[must_use]
    pub fn text(&self) -> &str { &self.text }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    /// Length in chars.
    #[must_use]
    pub fn len(&self) -> usize { self.text.chars().count() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.text.is_empty() }

    #[must_use]
    pub fn is_cursor_at_start(&self) -> bool { self.cursor == 0 }

    #[must_use]
    pub fn is_cursor_at_end(&self) -> bool { self.cursor == self.len() }

    /// Everything from char offset `pos` to the end of the line. Clamped.
    #[must_use]
    pub fn suffix_from(&self, pos: usize) -> &str {
        &self.text[char_to_byte_index(&self.text, pos)..]
    }

    fn pair(&self) -> (&str, usize) { (&self.text, self.cursor) }

    /// Insert `chunk` at the cursor and advance the cursor past it. Empty input is a
    /// no-op.
    pub fn insert(&mut self, chunk: &str) -> (&str, usize) {
        if !chunk.is_empty() {
            let byte_idx = char_to_byte_index(&self.text, self.cursor);
            self.text.insert_str(byte_idx, chunk);
            self.cursor += chunk.chars().count();
        }
        self.pair()
    }

    /// Insert `chunk` at char offset `at`. The cursor moves to the end of the inserted
    /// chunk.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfRange`] if `at > len`.
    pub fn insert_at(&mut self, chunk: &str, at: usize) -> Result<(&str, usize), BufferError> {
        self.try_move_to(at)?;
        Ok(self.insert(chunk))
    }

    /// Delete the char just before the cursor (backspace). No-op at the start.
    pub fn delete_before(&mut self) -> (&str, usize) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_idx);
        }
        self.pair()
    }

    /// Delete the char under the cursor (forward delete). No-op at the end. The cursor
    /// doesn't move.
    pub fn delete_at(&mut self) -> (&str, usize) {
        if self.cursor < self.len() {
            let byte_idx = char_to_byte_index(&self.text, self.cursor);
            self.text.remove(byte_idx);
        }
        self.pair()
    }

    /// Move the cursor to `pos`, clamped to `[0, len]`.
    pub fn move_to(&mut self, pos: usize) -> (&str, usize) {
        self.cursor = pos.min(self.len());
        self.pair()
    }

    /// Move the cursor to `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfRange`] if `pos > len`. The cursor is unchanged.
    pub fn try_move_to(&mut self, pos: usize) -> Result<(&str, usize), BufferError> {
        let len = self.len();
        if pos > len {
            return Err(BufferError::OutOfRange { pos, len });
        }
        self.cursor = pos;
        Ok(self.pair())
    }

    /// Move the cursor by `delta` chars (negative is left), clamped to `[0, len]`.
    pub fn move_by(&mut self, delta: isize) -> (&str, usize) {
        let target = self.cursor.saturating_add_signed(delta);
        self.move_to(target)
    }

    /// Replace the whole line. The cursor goes to the end.
    pub fn replace(&mut self, text: impl Into<String>) -> (&str, usize) {
        self.text = text.into();
        self.cursor = self.len();
        self.pair()
    }

    /// Reset to an empty line, returning what was there.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) { _ = self.take(); }
}

/// Convert a char index to a byte index within `s`. Indices past the end map to
/// `s.len()`.
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_insert_at_cursor() {
        let mut buffer = InputBuffer::new();
        buffer.insert("l");
        buffer.insert("s");
        assert_eq!(buffer.text(), "ls");
        assert_eq!(buffer.cursor(), 2);

        buffer.move_to(1);
        let (text, cursor) = buffer.insert("x");
        assert_eq!(text, "lxs");
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_insert_empty_is_noop() {
        let mut buffer = InputBuffer::new_with_text("abc");
        buffer.move_to(1);
        let (text, cursor) = buffer.insert("");
        assert_eq!(text, "abc");
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_insert_multibyte() {
        let mut buffer = InputBuffer::new_with_text("héllo");
        buffer.move_to(2);
        buffer.insert("ü");
        assert_eq!(buffer.text(), "héüllo");
        assert_eq!(buffer.cursor(), 3);
        assert_eq!(buffer.len(), 6);
    }

    #[test]
    fn test_insert_at_strict() {
        let mut buffer = InputBuffer::new_with_text("ac");
        assert_eq!(buffer.insert_at("b", 1), Ok(("abc", 2)));
        assert_eq!(
            buffer.insert_at("z", 9),
            Err(BufferError::OutOfRange { pos: 9, len: 3 })
        );
        assert_eq!(buffer.text(), "abc");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_delete_before() {
        let mut buffer = InputBuffer::new_with_text("abc");
        assert_eq!(buffer.delete_before(), ("ab", 2));

        buffer.move_to(0);
        assert_eq!(buffer.delete_before(), ("ab", 0));
    }

    #[test]
    fn test_delete_at() {
        let mut buffer = InputBuffer::new_with_text("abc");
        buffer.move_to(1);
        assert_eq!(buffer.delete_at(), ("ac", 1));

        buffer.move_to(2);
        assert_eq!(buffer.delete_at(), ("ac", 2));
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buffer = InputBuffer::new_with_text("abc");
        assert_eq!(buffer.move_to(100), ("abc", 3));
        assert_eq!(buffer.move_by(-100), ("abc", 0));
        assert_eq!(buffer.move_by(2), ("abc", 2));
    }

    #[test]
    fn test_try_move_to_rejects() {
        let mut buffer = InputBuffer::new_with_text("abc");
        buffer.move_to(1);
        assert_eq!(
            buffer.try_move_to(4),
            Err(BufferError::OutOfRange { pos: 4, len: 3 })
        );
        assert_eq!(buffer.cursor(), 1);
        assert_eq!(buffer.try_move_to(3), Ok(("abc", 3)));
    }

    #[test]
    fn test_suffix_from() {
        let buffer = InputBuffer::new_with_text("héllo");
        assert_eq!(buffer.suffix_from(1), "éllo");
        assert_eq!(buffer.suffix_from(5), "");
        assert_eq!(buffer.suffix_from(50), "");
    }

    #[test]
    fn test_take_resets() {
        let mut buffer = InputBuffer::new_with_text("echo hi");
        assert_eq!(buffer.take(), "echo hi");
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_char_to_byte_index() {
        assert_eq!(char_to_byte_index("hello", 0), 0);
        assert_eq!(char_to_byte_index("héllo", 2), 3);
        assert_eq!(char_to_byte_index("hi", 5), 2);
    }
}
