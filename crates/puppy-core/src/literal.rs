//! Literal values carried by option schemas, world settings and phrase guesses.

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// A literal value that can be rendered as target code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(OrderedFloat<f64>),
    Str(String),
}

impl Literal {
    pub fn number(value: f64) -> Self {
        Literal::Number(OrderedFloat(value))
    }

    pub fn str(value: impl Into<String>) -> Self {
        Literal::Str(value.into())
    }

    /// Parse the text of a numeric token.
    pub fn parse_number(text: &str) -> Option<Self> {
        text.trim().parse::<f64>().ok().map(Literal::number)
    }

    /// Render as a target-code literal.
    pub fn to_code(&self) -> String {
        self.to_string()
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Quote a string as a single-quoted target-code string literal.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => f.write_str("null"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Number(n) => {
                let n = n.into_inner();
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Literal::Str(s) => f.write_str(&quote(s)),
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::number(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(Literal::number(1000.0).to_code(), "1000");
        assert_eq!(Literal::number(0.5).to_code(), "0.5");
        assert_eq!(Literal::number(-3.0).to_code(), "-3");
    }

    #[test]
    fn strings_are_single_quoted_and_escaped() {
        assert_eq!(Literal::str("it's").to_code(), "'it\\'s'");
        assert_eq!(quote("a\nb"), "'a\\nb'");
    }

    #[test]
    fn parse_number_accepts_floats() {
        assert_eq!(Literal::parse_number("1.5"), Some(Literal::number(1.5)));
        assert_eq!(Literal::parse_number("x"), None);
    }

    #[test]
    fn null_and_bools() {
        assert_eq!(Literal::Null.to_code(), "null");
        assert_eq!(Literal::from(false).to_code(), "false");
    }
}
