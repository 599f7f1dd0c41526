/// Represents a location inside a grammar expression or a subject input.
///
/// Both cursors the evaluator works with (the one over grammar text and the
/// one over the input) track their location with this type so that errors
/// can be reported with a line and a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed, counted in bytes)
    pub column: usize,
    /// Byte offset from the start of the buffer
    pub offset: usize,
}

impl Position {
    /// Creates a new position at the start of the buffer.
    pub fn new() -> Self {
        Self {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Creates a position with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Computes the position of `offset` inside `buffer`.
    pub fn locate(buffer: &[u8], offset: usize) -> Self {
        let mut position = Self::new();
        for &byte in &buffer[..offset.min(buffer.len())] {
            position.step(byte);
        }
        position
    }

    /// Moves the position past `byte`.
    pub fn step(&mut self, byte: u8) {
        if byte == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.offset += 1;
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
