//! Literal and f-string expressions.

use puppy_core::{Literal, Type, quote};
use puppy_parser::{ParseTree, Tag};

use super::literal_of;
use crate::Generator;

impl Generator<'_> {
    pub(crate) fn compile_literal(&mut self, t: &ParseTree, out: &mut String) -> Type {
        match t.tag() {
            Tag::Int | Tag::Double => {
                match literal_of(t) {
                    Some(lit) => out.push_str(&lit.to_code()),
                    None => out.push_str(t.text()),
                }
                Type::Number
            }
            Tag::TrueExpr => {
                out.push_str("true");
                Type::Bool
            }
            Tag::FalseExpr => {
                out.push_str("false");
                Type::Bool
            }
            _ => {
                out.push_str(&quote(t.text()));
                Type::String
            }
        }
    }

    /// Type of a literal value.
    pub(crate) fn literal_type(&mut self, lit: &Literal) -> Type {
        match lit {
            Literal::Null => self.ctx.types.fresh(),
            Literal::Bool(_) => Type::Bool,
            Literal::Number(_) => Type::Number,
            Literal::Str(_) => Type::String,
        }
    }

    /// `f'...{x}...'`: parts joined with `+`, non-string parts through
    /// `lib.str`.
    pub(crate) fn compile_format(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let mut parts = Vec::new();
        for part in t.args() {
            if part.tag() == Tag::StringPart {
                if !part.text().is_empty() {
                    parts.push(quote(part.text()));
                }
                continue;
            }
            let mut code = String::new();
            let ty = self.conv(part, &mut code);
            if self.ctx.types.shallow(&ty) == Type::String {
                parts.push(code);
            } else {
                parts.push(format!("lib.str({code})"));
            }
        }
        match parts.len() {
            0 => out.push_str("''"),
            1 if t.args().all(|p| p.tag() == Tag::StringPart) => out.push_str(&parts[0]),
            _ => {
                out.push('(');
                out.push_str(&parts.join(" + "));
                out.push(')');
            }
        }
        Type::String
    }
}
