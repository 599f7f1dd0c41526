pub mod cursor;
pub mod predicate;

pub use cursor::{Cursor, Mark};
pub use grammar_common::{ByteSlice, Checkpoint, Position};
