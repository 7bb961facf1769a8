//! Puppy parse trees.
//!
//! The grammar itself lives outside this workspace. This crate fixes the
//! contract between a parser and the code generator:
//! - [`ParseTree`]: tagged, positioned, labeled nodes
//! - [`Tag`] / [`Label`]: the closed sets of node tags and child labels
//! - [`SourceParser`]: source text in, tree out (an `Err` tree on failure)
//! - [`TreeNotation`]: a parser for the bracketed tree notation
//!
//! # Example
//!
//! ```
//! use puppy_parser::{SourceParser, Tag, TreeNotation};
//!
//! let tree = TreeNotation.parse("[#Source [#ApplyExpr name=[#Name 'print'] [#Int '1']]]");
//! assert_eq!(tree.tag(), Tag::Source);
//! ```

mod cursor;
mod error;
pub mod notation;
mod tag;
mod tree;

pub use error::NotationError;
pub use notation::{TreeNotation, read};
pub use tag::{Label, Tag};
pub use tree::ParseTree;

/// Turns source text into a parse tree.
///
/// Implementations never fail: unreadable input yields a tree tagged
/// [`Tag::Err`].
pub trait SourceParser {
    fn parse(&self, source: &str) -> ParseTree;
}

impl<F> SourceParser for F
where
    F: Fn(&str) -> ParseTree,
{
    fn parse(&self, source: &str) -> ParseTree {
        self(source)
    }
}
