use crate::predicate;
use grammar_common::{ByteSlice, Checkpoint, Position};
use std::sync::Arc;

/// A cursor for traversing a byte buffer.
///
/// The evaluator keeps two of these alive at once: one over the grammar
/// expression being interpreted and one over the subject input. Every
/// `eat_*` method either consumes what it matched and returns success, or
/// returns failure; none of them reads past the end of the buffer.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Arc<[u8]>,
    current: usize,
    position: Position,
    furthest: usize,
}

/// The start of a pending extraction, obtained from [`Cursor::mark`].
///
/// A mark is moved into [`Cursor::extract`], so it is consumed exactly once.
#[derive(Debug)]
#[must_use = "a mark does nothing unless passed to `Cursor::extract`"]
pub struct Mark {
    start: usize,
}

impl Mark {
    /// Returns the offset the mark was taken at.
    pub fn start(&self) -> usize {
        self.start
    }
}

impl Cursor {
    /// Creates a new cursor over a copy of the input.
    pub fn new<B: Into<Vec<u8>>>(input: B) -> Self {
        let owned = input.into();
        Self::with_arc(Arc::from(owned))
    }

    /// Creates a cursor from an existing shared buffer.
    pub fn with_arc(buffer: Arc<[u8]>) -> Self {
        Self {
            buffer,
            current: 0,
            position: Position::new(),
            furthest: 0,
        }
    }

    /// Returns the underlying shared buffer.
    pub fn buffer(&self) -> Arc<[u8]> {
        Arc::clone(&self.buffer)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the current position in the buffer.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.current
    }

    /// Returns the largest offset this cursor has ever been advanced to.
    /// Restoring a checkpoint does not lower it.
    pub fn furthest(&self) -> usize {
        self.furthest
    }

    /// Returns true if the cursor is at the end of the buffer.
    pub fn is_eof(&self) -> bool {
        self.current >= self.buffer.len()
    }

    /// Returns the next byte without advancing the cursor.
    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.current).copied()
    }

    /// Advances the cursor by one byte.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.position.step(byte);
        self.current += 1;
        self.furthest = self.furthest.max(self.current);
        Some(byte)
    }

    /// Advances the cursor by `n` bytes. Fails without moving if fewer than
    /// `n` bytes remain.
    pub fn advance_by(&mut self, n: usize) -> bool {
        if n > self.buffer.len() - self.current {
            return false;
        }
        for _ in 0..n {
            self.advance();
        }
        true
    }

    /// Consumes `byte` if it is next.
    pub fn eat(&mut self, byte: u8) -> bool {
        self.eat_if(|b| b == byte)
    }

    /// Consumes the next byte if it satisfies `predicate`.
    pub fn eat_if<F>(&mut self, predicate: F) -> bool
    where
        F: FnOnce(u8) -> bool,
    {
        match self.peek() {
            Some(byte) if predicate(byte) => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    /// Consumes `text` if the remaining input starts with it. With
    /// `ignore_case`, ASCII letters compare case-insensitively.
    pub fn eat_text(&mut self, text: &[u8], ignore_case: bool) -> bool {
        let rest = &self.buffer[self.current..];
        if rest.len() < text.len() {
            return false;
        }
        let head = &rest[..text.len()];
        let matched = if ignore_case {
            head.eq_ignore_ascii_case(text)
        } else {
            head == text
        };
        matched && self.advance_by(text.len())
    }

    /// Consumes the next byte if it is one of `set`.
    pub fn eat_one_of(&mut self, set: &[u8]) -> bool {
        self.eat_if(|b| set.contains(&b))
    }

    /// Consumes the next byte if it lies within `low..=high`.
    pub fn eat_range(&mut self, low: u8, high: u8) -> bool {
        self.eat_if(|b| (low..=high).contains(&b))
    }

    /// Consumes bytes while the predicate returns true and returns how many
    /// were consumed. Zero is a valid result.
    pub fn eat_while<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let start = self.current;
        while self.eat_if(&mut predicate) {}
        self.current - start
    }

    /// Consumes a rule or capture name: a letter or `_` followed by letters,
    /// digits or `_`.
    pub fn eat_identifier(&mut self) -> bool {
        if !self.eat_if(predicate::is_identifier_start) {
            return false;
        }
        self.eat_while(predicate::is_identifier_continue);
        true
    }

    /// Skips whitespace and returns how many bytes were skipped.
    pub fn skip_whitespace(&mut self) -> usize {
        self.eat_while(predicate::is_whitespace)
    }

    /// Consumes everything up to and including the next `close` byte and
    /// returns what lay before it. Nested or escaped delimiters are not
    /// recognised. Without a `close` byte the cursor stops at the end of the
    /// buffer and `None` is returned.
    pub fn eat_until(&mut self, close: u8) -> Option<ByteSlice> {
        let start = self.current;
        while let Some(byte) = self.advance() {
            if byte == close {
                return Some(ByteSlice::new(self.buffer(), start, self.current - 1));
            }
        }
        None
    }

    /// Consumes a token delimited by `open` and `close` and returns its
    /// content, delimiters excluded.
    pub fn eat_delimited(&mut self, open: u8, close: u8) -> Option<ByteSlice> {
        if !self.eat(open) {
            return None;
        }
        self.eat_until(close)
    }

    /// Consumes the rest of the buffer.
    pub fn eat_to_end(&mut self) -> ByteSlice {
        let mark = self.mark();
        while self.advance().is_some() {}
        self.extract(mark)
    }

    /// Starts an extraction at the current offset.
    pub fn mark(&self) -> Mark {
        Mark {
            start: self.current,
        }
    }

    /// Returns the bytes between `mark` and the current offset.
    pub fn extract(&self, mark: Mark) -> ByteSlice {
        let start = mark.start.min(self.current);
        ByteSlice::new(self.buffer(), start, self.current)
    }

    /// Returns the remaining input from the current offset.
    pub fn remaining(&self) -> ByteSlice {
        ByteSlice::new(self.buffer(), self.current, self.buffer.len())
    }

    /// Creates a checkpoint that can be restored later.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint::new(self.current, self.position)
    }

    /// Restores the cursor to a previous checkpoint.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.current = checkpoint.offset().min(self.buffer.len());
        self.position = checkpoint.position();
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<ByteSlice> for Cursor {
    /// A cursor over exactly the bytes of the slice.
    fn from(slice: ByteSlice) -> Self {
        Self::new(&slice[..])
    }
}
