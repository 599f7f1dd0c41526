use crate::Position;

/// A checkpoint for saving and restoring a cursor.
/// The evaluator takes one before every alternative so that a failed
/// alternative leaves the input where it started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// The byte offset at this checkpoint.
    offset: usize,
    /// The position in the buffer at this checkpoint.
    position: Position,
}

impl Checkpoint {
    /// Creates a new checkpoint with the given offset and position.
    pub fn new(offset: usize, position: Position) -> Self {
        Self { offset, position }
    }

    /// Returns the byte offset stored in this checkpoint.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the position stored in this checkpoint.
    pub fn position(&self) -> Position {
        self.position
    }
}
