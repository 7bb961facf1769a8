//! Node tags and child labels.
//!
//! Both sets are closed: the grammar emits exactly these names, and the code
//! generator matches on them exhaustively.

macro_rules! named_enum {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name used in the tree notation.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

named_enum! {
    /// Parse-tree node tag.
    pub enum Tag {
        Source => "Source",
        Block => "Block",
        FuncDecl => "FuncDecl",
        ClassDecl => "ClassDecl",
        FuncExpr => "FuncExpr",
        Params => "Params",
        Param => "Param",
        Return => "Return",
        Yield => "Yield",
        Continue => "Continue",
        Break => "Break",
        Pass => "Pass",
        ImportDecl => "ImportDecl",
        FromDecl => "FromDecl",
        VarDecl => "VarDecl",
        SelfAssign => "SelfAssign",
        IfStmt => "IfStmt",
        IfExpr => "IfExpr",
        ForStmt => "ForStmt",
        ApplyExpr => "ApplyExpr",
        MethodExpr => "MethodExpr",
        GetExpr => "GetExpr",
        IndexExpr => "IndexExpr",
        Name => "Name",
        Infix => "Infix",
        Unary => "Unary",
        And => "And",
        Or => "Or",
        Not => "Not",
        Int => "Int",
        Double => "Double",
        String => "String",
        Char => "Char",
        MultiString => "MultiString",
        Format => "Format",
        StringPart => "StringPart",
        TrueExpr => "TrueExpr",
        FalseExpr => "FalseExpr",
        List => "List",
        Tuple => "Tuple",
        KeywordArgument => "KeywordArgument",
        NLPSymbol => "NLPSymbol",
        Token => "Token",
        Err => "Err",
    }
}

named_enum! {
    /// Label attached to a child node.
    pub enum Label {
        Name => "name",
        Params => "params",
        Body => "body",
        Type => "type",
        Expr => "expr",
        Left => "left",
        Right => "right",
        Cond => "cond",
        Then => "then",
        Else => "else",
        Each => "each",
        List => "list",
        Recv => "recv",
        Index => "index",
        Value => "value",
        Extends => "extends",
        Alias => "alias",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_for_every_tag() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_name(tag.name()), Some(*tag));
        }
        for label in Label::ALL {
            assert_eq!(Label::from_name(label.name()), Some(*label));
        }
    }

    #[test]
    fn unknown_names() {
        assert_eq!(Tag::from_name("Lambda"), None);
        assert_eq!(Label::from_name("Name"), None);
    }
}
