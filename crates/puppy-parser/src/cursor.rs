/// A cursor over notation text that tracks its byte offset.
///
/// Provides low-level character access with peek/advance semantics.
pub struct Cursor<'src> {
    /// Remaining text (slice starting at current position).
    rest: &'src str,
    /// Current byte offset from start of the text.
    offset: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            offset: 0,
        }
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    /// Peek at the current character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Consume the current character.
    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.rest.chars().next()?;
        let len = ch.len_utf8();
        self.rest = &self.rest[len..];
        self.offset += len;
        Some(ch)
    }

    /// Consume `expected` if it is next.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume characters while the predicate holds and return them.
    pub fn eat_while(&mut self, f: impl Fn(char) -> bool) -> &'src str {
        let start = self.rest;
        let mut len = 0;
        while let Some(ch) = self.peek() {
            if !f(ch) {
                break;
            }
            len += ch.len_utf8();
            self.advance();
        }
        &start[..len]
    }

    pub fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_offset_across_multibyte() {
        let mut cursor = Cursor::new("色x");
        assert_eq!(cursor.advance(), Some('色'));
        assert_eq!(cursor.offset(), 3);
        assert_eq!(cursor.peek(), Some('x'));
    }

    #[test]
    fn eat_while_returns_slice() {
        let mut cursor = Cursor::new("abc123 ");
        assert_eq!(cursor.eat_while(char::is_alphabetic), "abc");
        assert_eq!(cursor.eat_while(|c| c.is_ascii_digit()), "123");
        cursor.skip_whitespace();
        assert!(cursor.is_eof());
    }
}
