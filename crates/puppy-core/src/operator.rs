//! Operator typing and formatting templates.
//!
//! Source operators arrive as token text, possibly in full-width or word
//! form. [`BinaryOp::from_symbol`] normalizes them; each op then declares
//! what it requires of its operands, what it yields, and how it is written
//! in target code given the resolved operand types.

use crate::{Type, TypeTable};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

/// Requirement on the left operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeftOperand {
    Numeric,
    Bool,
    /// Rendered type must start with one of these prefixes.
    Prefixes(&'static str),
    Open,
}

/// Requirement on the right operand, possibly relative to the left one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightOperand {
    Numeric,
    Bool,
    SameAsLeft,
    /// A list of the left type (or a string when testing substrings).
    ListOfLeft,
    Open,
}

impl BinaryOp {
    /// Normalize an operator token.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        use BinaryOp::*;
        Some(match symbol.trim() {
            "+" | "＋" => Add,
            "-" | "－" => Sub,
            "*" | "×" | "＊" => Mul,
            "/" | "／" => Div,
            "//" => FloorDiv,
            "%" | "％" => Mod,
            "**" => Pow,
            "==" | "＝＝" => Eq,
            "!=" | "！＝" | "≠" => Ne,
            "<" | "＜" => Lt,
            "<=" | "≦" | "≤" => Le,
            ">" | "＞" => Gt,
            ">=" | "≧" | "≥" => Ge,
            "in" => In,
            "and" | "&&" => And,
            "or" | "||" => Or,
            "&" => BitAnd,
            "|" => BitOr,
            "^" => BitXor,
            "<<" => Shl,
            ">>" => Shr,
            _ => return None,
        })
    }

    /// Map a compound assignment token (`+=`, `//=` ...) to its operator.
    pub fn from_compound(symbol: &str) -> Option<Self> {
        let base = symbol.trim().strip_suffix('=')?;
        match Self::from_symbol(base)? {
            op @ (BinaryOp::Add
            | BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Div
            | BinaryOp::FloorDiv
            | BinaryOp::Mod
            | BinaryOp::Pow
            | BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::Shl
            | BinaryOp::Shr) => Some(op),
            _ => None,
        }
    }

    /// Target-code spelling of the operator.
    pub fn js_symbol(self) -> &'static str {
        use BinaryOp::*;
        match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            FloorDiv => "/",
            Mod => "%",
            Pow => "**",
            Eq => "===",
            Ne => "!==",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            In => "in",
            And => "&&",
            Or => "||",
            BitAnd => "&",
            BitOr => "|",
            BitXor => "^",
            Shl => "<<",
            Shr => ">>",
        }
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    pub fn left(self) -> LeftOperand {
        use BinaryOp::*;
        match self {
            Add | Mul => LeftOperand::Prefixes("number|list|str"),
            Lt | Le | Gt | Ge => LeftOperand::Prefixes("number|str"),
            Sub | Div | FloorDiv | Mod | Pow | BitAnd | BitOr | BitXor | Shl | Shr => {
                LeftOperand::Numeric
            }
            And | Or => LeftOperand::Bool,
            Eq | Ne | In => LeftOperand::Open,
        }
    }

    pub fn right(self) -> RightOperand {
        use BinaryOp::*;
        match self {
            Add | Eq | Ne | Lt | Le | Gt | Ge => RightOperand::SameAsLeft,
            Sub | Div | FloorDiv | Mod | Pow | BitAnd | BitOr | BitXor | Shl | Shr => {
                RightOperand::Numeric
            }
            In => RightOperand::ListOfLeft,
            And | Or => RightOperand::Bool,
            Mul => RightOperand::Open,
        }
    }

    /// Result type given the operand types.
    pub fn result(self, table: &TypeTable, left: &Type, right: &Type) -> Type {
        use BinaryOp::*;
        match self {
            Eq | Ne | Lt | Le | Gt | Ge | In | And | Or => Type::Bool,
            Sub | Div | FloorDiv | Mod | Pow | BitAnd | BitOr | BitXor | Shl | Shr => Type::Number,
            Add => left.clone(),
            Mul => {
                if table.shallow(left) == Type::Number && table.shallow(right) != Type::Number {
                    right.clone()
                } else {
                    left.clone()
                }
            }
        }
    }

    /// Render `l op r` using the template selected by the resolved operand
    /// types.
    pub fn format(self, table: &TypeTable, left: &Type, right: &Type, l: &str, r: &str) -> String {
        use BinaryOp::*;
        let lt = table.shallow(left);
        let rt = table.shallow(right);
        match self {
            Add => match lt {
                Type::Number | Type::String => format!("({l} + {r})"),
                Type::List(_) => format!("lib.concat({l},{r})"),
                _ => format!("lib.anyAdd({l},{r})"),
            },
            Mul => {
                if lt == Type::Number && rt == Type::Number {
                    format!("({l} * {r})")
                } else {
                    format!("lib.anyMul({l},{r})")
                }
            }
            FloorDiv => format!("(({l}/{r})|0)"),
            Pow => format!("Math.pow({l},{r})"),
            Eq | Ne if lt == Type::Object => {
                format!("({l}.id {} {r}.id)", self.js_symbol())
            }
            In => format!("lib.contains({r},{l})"),
            _ => format!("({l} {} {r})", self.js_symbol()),
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Plus,
    BitNot,
    Not,
}

impl UnaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol.trim() {
            "-" | "－" => UnaryOp::Neg,
            "+" | "＋" => UnaryOp::Plus,
            "~" => UnaryOp::BitNot,
            "!" | "not" | "！" => UnaryOp::Not,
            _ => return None,
        })
    }

    /// Operand and result type.
    pub fn operand(self) -> Type {
        match self {
            UnaryOp::Not => Type::Bool,
            _ => Type::Number,
        }
    }

    pub fn format(self, operand: &str) -> String {
        let op = match self {
            UnaryOp::Neg => "-",
            UnaryOp::Plus => "+",
            UnaryOp::BitNot => "~",
            UnaryOp::Not => "!",
        };
        format!("{op}({operand})")
    }
}
