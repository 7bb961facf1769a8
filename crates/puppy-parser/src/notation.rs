//! Reader for the bracketed tree notation.
//!
//! ```text
//! tree  := '[' '#' Tag ('@' line (':' column)?)? item* ']'
//! item  := label '=' tree | tree | 'text'
//! ```
//!
//! A node without a position marker inherits its parent's position. Text
//! is single-quoted with backslash escapes for `'`, `\`, `n`, `r` and `t`.

use puppy_core::Pos;

use crate::cursor::Cursor;
use crate::{Label, NotationError, ParseTree, SourceParser, Tag};

type Result<T> = std::result::Result<T, NotationError>;

/// Read a single tree from notation text.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn read(text: &str) -> Result<ParseTree> {
    let mut reader = Reader {
        cursor: Cursor::new(text),
    };
    reader.cursor.skip_whitespace();
    let tree = reader.tree(Pos::default())?;
    reader.cursor.skip_whitespace();
    if !reader.cursor.is_eof() {
        return Err(NotationError::TrailingInput {
            offset: reader.cursor.offset(),
        });
    }
    Ok(tree)
}

/// A [`SourceParser`] over the tree notation.
///
/// Malformed input produces an `Err` tree carrying the reader's message.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeNotation;

impl SourceParser for TreeNotation {
    fn parse(&self, source: &str) -> ParseTree {
        match read(source) {
            Ok(tree) => tree,
            Err(err) => ParseTree::error(Pos::new(err.offset(), 1, 0), err.to_string()),
        }
    }
}

struct Reader<'src> {
    cursor: Cursor<'src>,
}

impl<'src> Reader<'src> {
    fn expect(&mut self, expected: char) -> Result<()> {
        let offset = self.cursor.offset();
        match self.cursor.advance() {
            Some(ch) if ch == expected => Ok(()),
            Some(found) => Err(NotationError::Expected {
                expected,
                found,
                offset,
            }),
            None => Err(NotationError::UnexpectedEnd { offset }),
        }
    }

    fn ident(&mut self) -> &'src str {
        self.cursor.eat_while(|c| c.is_alphanumeric() || c == '_')
    }

    fn tree(&mut self, inherited: Pos) -> Result<ParseTree> {
        self.expect('[')?;
        self.expect('#')?;
        let offset = self.cursor.offset();
        let name = self.ident();
        let tag = Tag::from_name(name).ok_or_else(|| NotationError::UnknownTag {
            name: name.to_string(),
            offset,
        })?;
        let pos = if self.cursor.eat('@') {
            self.position(offset)?
        } else {
            inherited
        };

        let mut node = ParseTree::new(tag, pos);
        let mut has_text = false;
        loop {
            self.cursor.skip_whitespace();
            let offset = self.cursor.offset();
            match self.cursor.peek() {
                None => return Err(NotationError::UnexpectedEnd { offset }),
                Some(']') => {
                    self.cursor.advance();
                    return Ok(node);
                }
                Some('[') => {
                    let child = self.tree(pos)?;
                    node.add(None, child);
                }
                Some('\'') => {
                    if has_text {
                        return Err(NotationError::DuplicateText { offset });
                    }
                    let text = self.quoted()?;
                    node.set_text(text);
                    has_text = true;
                }
                Some(_) => {
                    let name = self.ident();
                    let label = Label::from_name(name).ok_or_else(|| {
                        NotationError::UnknownLabel {
                            name: name.to_string(),
                            offset,
                        }
                    })?;
                    self.expect('=')?;
                    let child = self.tree(pos)?;
                    node.add(Some(label), child);
                }
            }
        }
    }

    fn position(&mut self, offset: usize) -> Result<Pos> {
        let line = self
            .cursor
            .eat_while(|c| c.is_ascii_digit())
            .parse::<u32>()
            .map_err(|_| NotationError::InvalidPosition { offset })?;
        let column = if self.cursor.eat(':') {
            let negative = self.cursor.eat('-');
            let digits = self
                .cursor
                .eat_while(|c| c.is_ascii_digit())
                .parse::<i32>()
                .map_err(|_| NotationError::InvalidPosition { offset })?;
            if negative { -digits } else { digits }
        } else {
            0
        };
        Ok(Pos::new(offset, line, column))
    }

    fn quoted(&mut self) -> Result<String> {
        self.expect('\'')?;
        let mut text = String::new();
        loop {
            let offset = self.cursor.offset();
            match self.cursor.advance() {
                None => return Err(NotationError::UnexpectedEnd { offset }),
                Some('\'') => return Ok(text),
                Some('\\') => match self.cursor.advance() {
                    Some('n') => text.push('\n'),
                    Some('r') => text.push('\r'),
                    Some('t') => text.push('\t'),
                    Some(other) => text.push(other),
                    None => return Err(NotationError::UnexpectedEnd { offset }),
                },
                Some(ch) => text.push(ch),
            }
        }
    }
}
