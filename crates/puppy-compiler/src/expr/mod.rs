//! Expression handlers.
//!
//! ## Modules
//!
//! - `literals`: numbers, strings, booleans, f-strings
//! - `names`: identifiers and package inference
//! - `calls`: calls, argument binding and option objects
//! - `operators`: infix, unary and logical operators
//! - `collections`: list and tuple literals
//! - `members`: property reads, indexing and method calls
//! - `lambda`: lambda expressions and conditional expressions
//! - `phrases`: free-standing phrases and stray keyword arguments

mod calls;
mod collections;
mod lambda;
mod literals;
mod members;
mod names;
mod operators;
mod phrases;

use puppy_core::Literal;
use puppy_parser::{Label, ParseTree, Tag};

pub(crate) use calls::Receiver;
pub(crate) use members::PROPERTY_HOLDERS;

/// The literal a node denotes, if it is a literal (or a negated number).
pub fn literal_of(t: &ParseTree) -> Option<Literal> {
    match t.tag() {
        Tag::Int | Tag::Double => Literal::parse_number(t.text()),
        Tag::String | Tag::Char | Tag::MultiString => Some(Literal::str(t.text())),
        Tag::TrueExpr => Some(Literal::Bool(true)),
        Tag::FalseExpr => Some(Literal::Bool(false)),
        Tag::Unary if matches!(t.token(Label::Name), Some("-" | "－")) => {
            match t.get(Label::Expr).and_then(literal_of) {
                Some(Literal::Number(n)) => Some(Literal::number(-n.into_inner())),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puppy_parser::read;

    #[test]
    fn literal_values() {
        let lit = |s: &str| literal_of(&read(s).unwrap());
        assert_eq!(lit("[#Int '42']"), Some(Literal::number(42.0)));
        assert_eq!(lit("[#Double '0.5']"), Some(Literal::number(0.5)));
        assert_eq!(lit("[#String 'red']"), Some(Literal::str("red")));
        assert_eq!(lit("[#TrueExpr]"), Some(Literal::Bool(true)));
        assert_eq!(
            lit("[#Unary name=[#Token '-'] expr=[#Int '3']]"),
            Some(Literal::number(-3.0))
        );
        assert_eq!(lit("[#Name 'x']"), None);
        assert_eq!(lit("[#Unary name=[#Token '-'] expr=[#Name 'x']]"), None);
    }
}
