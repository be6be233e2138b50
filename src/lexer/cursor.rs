//! Byte cursor over a fully buffered source.
//!
//! The cursor reads forward one byte at a time, can look at most two
//! bytes ahead, and can push back at most the two most recently read
//! bytes. End of input is reported as `None` and is sticky.

/// How many consumed bytes `push_back` may hand back.
pub const MAX_PUSHBACK: usize = 2;

#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    source: &'a [u8],
    pos: usize,
    /// Bytes read since the last push back, capped at `MAX_PUSHBACK`.
    recent: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Cursor {
            source,
            pos: 0,
            recent: 0,
        }
    }

    /// Byte offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    /// Returns the byte after the next one without consuming anything.
    pub fn peek_next(&self) -> Option<u8> {
        self.source.get(self.pos + 1).copied()
    }

    /// Consumes and returns the next byte.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        self.recent = (self.recent + 1).min(MAX_PUSHBACK);
        Some(byte)
    }

    /// Consumes the next byte only if it equals `expected`.
    pub fn advance_if(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes bytes while `predicate` holds and returns them.
    pub fn advance_while(&mut self, predicate: impl Fn(u8) -> bool) -> &'a [u8] {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            if !predicate(byte) {
                break;
            }
            self.advance();
        }
        &self.source[start..self.pos]
    }

    /// Un-reads the most recently consumed byte.
    ///
    /// Returns `false` when the pushback budget is exhausted; the cursor
    /// is left unchanged in that case.
    pub fn push_back(&mut self) -> bool {
        if self.recent == 0 {
            return false;
        }
        self.recent -= 1;
        self.pos -= 1;
        true
    }

    /// The bytes between `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'a [u8] {
        &self.source[start..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn test_peek_does_not_consume() {
        let cursor = Cursor::new(b"ab");
        assert_eq!(cursor.peek(), Some(b'a'));
        assert_eq!(cursor.peek(), Some(b'a'));
        assert_eq!(cursor.peek_next(), Some(b'b'));
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_eof_is_idempotent() {
        let mut cursor = Cursor::new(b"x");
        assert_eq!(cursor.advance(), Some(b'x'));
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_push_back_is_limited_to_two() {
        let mut cursor = Cursor::new(b"abcd");
        cursor.advance();
        cursor.advance();
        cursor.advance();

        assert!(cursor.push_back());
        assert!(cursor.push_back());
        assert!(!cursor.push_back());
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.advance(), Some(b'b'));
    }

    #[test]
    fn test_push_back_on_fresh_cursor() {
        let mut cursor = Cursor::new(b"a");
        assert!(!cursor.push_back());
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_advance_while_and_advance_if() {
        let mut cursor = Cursor::new(b"123+");
        assert_eq!(cursor.advance_while(|b| b.is_ascii_digit()), b"123");
        assert!(!cursor.advance_if(b'-'));
        assert!(cursor.advance_if(b'+'));
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.slice_from(1), b"23+");
    }
}
