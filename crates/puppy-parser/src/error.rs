//! Errors raised while reading the tree notation.

use thiserror::Error;

/// A malformed tree-notation input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("expected '{expected}' at offset {offset}, found '{found}'")]
    Expected {
        expected: char,
        found: char,
        offset: usize,
    },

    #[error("unknown tag '{name}' at offset {offset}")]
    UnknownTag { name: String, offset: usize },

    #[error("unknown label '{name}' at offset {offset}")]
    UnknownLabel { name: String, offset: usize },

    #[error("invalid position marker at offset {offset}")]
    InvalidPosition { offset: usize },

    #[error("node already has text at offset {offset}")]
    DuplicateText { offset: usize },

    #[error("trailing input at offset {offset}")]
    TrailingInput { offset: usize },
}

impl NotationError {
    /// Byte offset where reading stopped.
    pub fn offset(&self) -> usize {
        match self {
            NotationError::UnexpectedEnd { offset }
            | NotationError::Expected { offset, .. }
            | NotationError::UnknownTag { offset, .. }
            | NotationError::UnknownLabel { offset, .. }
            | NotationError::InvalidPosition { offset }
            | NotationError::DuplicateText { offset }
            | NotationError::TrailingInput { offset } => *offset,
        }
    }
}
