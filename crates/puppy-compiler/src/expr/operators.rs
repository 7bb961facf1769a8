//! Operator expressions.

use puppy_core::{BinaryOp, DiagnosticKind, LeftOperand, Request, RightOperand, Type, UnaryOp};
use puppy_parser::{Label, ParseTree, Tag};

use crate::Generator;

impl Generator<'_> {
    pub(crate) fn compile_infix(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let (Some(left), Some(right)) = (t.get(Label::Left), t.get(Label::Right)) else {
            return self.unexpected(t, out);
        };
        let symbol = t.token(Label::Name).unwrap_or_default();
        let Some(op) = BinaryOp::from_symbol(symbol) else {
            self.ctx.diagnostics.error(
                t,
                DiagnosticKind::UnexpectedConstruct {
                    construct: symbol.to_string(),
                },
            );
            return self.placeholder(out);
        };
        let mut l = String::new();
        let lt = self.conv(left, &mut l);
        let (code, ty) = self.binary(op, left, l, lt, right);
        out.push_str(&code);
        ty
    }

    /// Check and format `left op right` where the left side is already
    /// generated.
    pub(crate) fn binary(
        &mut self,
        op: BinaryOp,
        left: &ParseTree,
        l: String,
        lt: Type,
        right: &ParseTree,
    ) -> (String, Type) {
        let accepted = match op.left() {
            LeftOperand::Numeric => self.ctx.types.accept(&Type::Number, &lt),
            LeftOperand::Bool => self.ctx.types.accept(&Type::Bool, &lt),
            LeftOperand::Prefixes(p) => self.ctx.types.match_type(Request::Prefixes(p), &lt),
            LeftOperand::Open => true,
        };
        if !accepted {
            let request = match op.left() {
                LeftOperand::Prefixes(p) => p,
                LeftOperand::Bool => "bool",
                _ => "number",
            };
            self.mismatch(left, Request::Prefixes(request), &lt);
        }

        let mut r = String::new();
        let rt = match op.right() {
            RightOperand::Numeric => self.check_type(&Type::Number, right, &mut r),
            RightOperand::Bool => self.check_type(&Type::Bool, right, &mut r),
            RightOperand::SameAsLeft => self.check_type(&lt, right, &mut r),
            RightOperand::ListOfLeft => {
                let rt = self.conv(right, &mut r);
                let ok = self.ctx.types.shallow(&rt) == Type::String
                    || self.ctx.types.accept(&Type::list(lt.clone()), &rt);
                if !ok {
                    self.mismatch(right, Request::Type(&Type::list(lt.clone())), &rt);
                }
                rt
            }
            RightOperand::Open => self.conv(right, &mut r),
        };

        let ty = op.result(&self.ctx.types, &lt, &rt);
        (op.format(&self.ctx.types, &lt, &rt, &l, &r), ty)
    }

    pub(crate) fn compile_unary(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let Some(expr) = t.get(Label::Expr) else {
            return self.unexpected(t, out);
        };
        let symbol = t.token(Label::Name).unwrap_or_default();
        let Some(op) = UnaryOp::from_symbol(symbol) else {
            self.ctx.diagnostics.error(
                t,
                DiagnosticKind::UnexpectedConstruct {
                    construct: symbol.to_string(),
                },
            );
            return self.placeholder(out);
        };
        let mut code = String::new();
        let ty = op.operand();
        self.check_type(&ty, expr, &mut code);
        out.push_str(&op.format(&code));
        ty
    }

    /// `and` / `or` nodes.
    pub(crate) fn compile_logical(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let (Some(left), Some(right)) = (t.get(Label::Left), t.get(Label::Right)) else {
            return self.unexpected(t, out);
        };
        let op = if t.tag() == Tag::And { "&&" } else { "||" };
        out.push('(');
        self.check_type(&Type::Bool, left, out);
        out.push_str(&format!(" {op} "));
        self.check_type(&Type::Bool, right, out);
        out.push(')');
        Type::Bool
    }

    pub(crate) fn compile_not(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let Some(expr) = t.get(Label::Expr) else {
            return self.unexpected(t, out);
        };
        out.push_str("!(");
        self.check_type(&Type::Bool, expr, out);
        out.push(')');
        Type::Bool
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{expr, generate};
    use puppy_core::{DiagnosticKind, Type};

    fn infix(op: &str, left: &str, right: &str) -> String {
        format!("[#Infix left=[{left}] name=[#Token '{op}'] right=[{right}]]")
    }

    #[test]
    fn numeric_templates() {
        assert_eq!(expr(&infix("+", "#Int '1'", "#Int '2'")), ("(1 + 2)".into(), Type::Number));
        assert_eq!(expr(&infix("//", "#Int '7'", "#Int '2'")).0, "((7/2)|0)");
        assert_eq!(expr(&infix("**", "#Int '2'", "#Int '8'")).0, "Math.pow(2,8)");
        assert_eq!(expr(&infix("×", "#Int '2'", "#Int '3'")).0, "(2 * 3)");
    }

    #[test]
    fn string_and_list_templates() {
        assert_eq!(
            expr(&infix("+", "#String 'a'", "#String 'b'")),
            ("('a' + 'b')".into(), Type::String)
        );
        assert_eq!(
            expr(&infix("*", "#String 'a'", "#Int '3'")).0,
            "lib.anyMul('a',3)"
        );
        let list = "#List [#Int '1']";
        assert_eq!(expr(&infix("+", list, list)).0, "lib.concat([1],[1])");
    }

    #[test]
    fn comparisons_and_containment_are_bool() {
        assert_eq!(expr(&infix("≦", "#Int '1'", "#Int '2'")), ("(1 <= 2)".into(), Type::Bool));
        assert_eq!(expr(&infix("==", "#Int '1'", "#Int '2'")).0, "(1 === 2)");
        assert_eq!(
            expr(&infix("in", "#Int '1'", "#List [#Int '1'] [#Int '2']")),
            ("lib.contains([1, 2],1)".into(), Type::Bool)
        );
    }

    #[test]
    fn operand_mismatches_are_reported() {
        let (_, ctx) = generate(&format!(
            "[#Source {}]",
            infix("-", "#String 'a'", "#Int '1'")
        ));
        assert!(matches!(
            ctx.diagnostics.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::TypeMismatch { .. })
        ));
        let (_, ctx) = generate(&format!("[#Source {}]", infix("+", "#Int '1'", "#String 'a'")));
        assert_eq!(ctx.diagnostics.len(), 1);
    }

    #[test]
    fn unary_and_logic() {
        assert_eq!(expr("[#Unary name=[#Token '-'] expr=[#Int '3']]").0, "-(3)");
        assert_eq!(
            expr("[#And left=[#TrueExpr] right=[#Not expr=[#FalseExpr]]]"),
            ("(true && !(false))".into(), Type::Bool)
        );
    }
}
