//! Bounds-checked byte cursor.

use std::str;

use crate::BufferError;

/// A cursor over a borrowed byte slice.
///
/// Accessors are bounds-checked: `peek` past the end yields `None` and
/// slicing past the end yields [`BufferError::EndOfBuffer`].
///
/// # Example
///
/// ```
/// use json_witness_buffers::Reader;
///
/// let mut reader = Reader::new(b"null,");
/// assert!(reader.starts_with(b"null"));
/// reader.skip(4);
/// assert_eq!(reader.peek(), Some(b','));
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        Self { uint8, x: 0 }
    }

    /// Whether the cursor has reached the end of input.
    pub fn is_eof(&self) -> bool {
        self.x >= self.uint8.len()
    }

    /// Peeks at the current byte, if any.
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.uint8.get(self.x).copied()
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) {
        self.x += length;
    }

    /// Advances over JSON insignificant whitespace.
    pub fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.peek() {
            self.x += 1;
        }
    }

    /// Whether the remaining input starts with `prefix`.
    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.uint8
            .get(self.x..)
            .map_or(false, |rest| rest.starts_with(prefix))
    }

    /// Returns the bytes in `start..end` without moving the cursor.
    pub fn subarray(&self, start: usize, end: usize) -> Result<&'a [u8], BufferError> {
        self.uint8.get(start..end).ok_or(BufferError::EndOfBuffer)
    }

    /// Returns the bytes in `start..end` as UTF-8 text.
    pub fn utf8(&self, start: usize, end: usize) -> Result<&'a str, BufferError> {
        let bytes = self.subarray(start, end)?;
        str::from_utf8(bytes).map_err(|e| BufferError::InvalidUtf8(start + e.valid_up_to()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_skip() {
        let mut reader = Reader::new(b"[]");
        assert_eq!(reader.peek(), Some(b'['));
        reader.skip(1);
        assert_eq!(reader.peek(), Some(b']'));
        reader.skip(1);
        assert_eq!(reader.peek(), None);
        assert!(reader.is_eof());
    }

    #[test]
    fn test_skip_whitespace() {
        let mut reader = Reader::new(b" \t\r\n 1");
        reader.skip_whitespace();
        assert_eq!(reader.peek(), Some(b'1'));
        assert_eq!(reader.x, 5);
    }

    #[test]
    fn test_starts_with_past_end() {
        let mut reader = Reader::new(b"tr");
        assert!(!reader.starts_with(b"true"));
        reader.skip(5);
        assert!(!reader.starts_with(b"t"));
        assert!(reader.is_eof());
    }

    #[test]
    fn test_utf8_reports_offset() {
        let reader = Reader::new(b"ab\xffcd");
        assert_eq!(reader.utf8(0, 2), Ok("ab"));
        assert_eq!(reader.utf8(0, 5), Err(BufferError::InvalidUtf8(2)));
        assert_eq!(reader.utf8(3, 9), Err(BufferError::EndOfBuffer));
    }
}
