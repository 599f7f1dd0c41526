use std::borrow::Cow;
use std::ops::Deref;
use std::sync::Arc;

/// Immutable slice referencing a shared byte buffer.
///
/// The slice keeps an `Arc<[u8]>` alive so that captures can outlive the
/// cursor that produced them and be cloned without copying. It implements
/// `Deref<Target = [u8]>` which allows it to be used as `&[u8]` in most
/// places.
#[derive(Clone, Debug)]
pub struct ByteSlice {
    buffer: Arc<[u8]>,
    start: usize,
    end: usize,
}

impl ByteSlice {
    /// Creates a new slice from the given shared buffer and byte range.
    pub fn new(buffer: Arc<[u8]>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= buffer.len());
        Self { buffer, start, end }
    }

    /// Creates a slice that covers the entire buffer.
    pub fn from_arc(buffer: Arc<[u8]>) -> Self {
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
        }
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the slice is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the underlying shared buffer.
    pub fn buffer(&self) -> Arc<[u8]> {
        Arc::clone(&self.buffer)
    }

    /// Returns the start offset.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the end offset.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Returns the slice as `&str` if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(self).ok()
    }

    /// Returns the slice as text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self)
    }
}

impl From<&[u8]> for ByteSlice {
    fn from(value: &[u8]) -> Self {
        Self::from_arc(Arc::from(value))
    }
}

impl From<&str> for ByteSlice {
    fn from(value: &str) -> Self {
        Self::from(value.as_bytes())
    }
}

impl std::fmt::Display for ByteSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

impl Deref for ByteSlice {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.buffer[self.start..self.end]
    }
}

impl AsRef<[u8]> for ByteSlice {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

impl PartialEq<&str> for ByteSlice {
    fn eq(&self, other: &&str) -> bool {
        self.deref() == other.as_bytes()
    }
}

impl PartialEq<&[u8]> for ByteSlice {
    fn eq(&self, other: &&[u8]) -> bool {
        self.deref() == *other
    }
}

impl PartialEq<ByteSlice> for &str {
    fn eq(&self, other: &ByteSlice) -> bool {
        self.as_bytes() == other.deref()
    }
}

/// Two slices are equal when their bytes are equal, wherever they point.
impl PartialEq for ByteSlice {
    fn eq(&self, other: &Self) -> bool {
        self.deref() == other.deref()
    }
}

impl Eq for ByteSlice {}
