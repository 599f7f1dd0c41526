//! Grammar Common
//!
//! 提供 cursor-framework 和 grammar-framework 之间的共同组件。

pub mod byte_slice;
pub mod checkpoint;
pub mod position;

pub use byte_slice::ByteSlice;
pub use checkpoint::Checkpoint;
pub use position::Position;
