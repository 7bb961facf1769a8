//! List and tuple literals.

use puppy_core::{DiagnosticKind, Type};
use puppy_parser::ParseTree;

use crate::Generator;

impl Generator<'_> {
    /// `[a, b, ...]`. The first element fixes the element type; only the
    /// first disagreeing element is reported.
    pub(crate) fn compile_list(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let mut elem: Option<Type> = None;
        let mut reported = false;
        out.push('[');
        for (i, item) in t.args().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let ty = self.conv(item, out);
            let Some(first) = elem.clone() else {
                elem = Some(ty);
                continue;
            };
            if !reported && !self.ctx.types.accept(&first, &ty) {
                let first = self.ctx.types.render(&first);
                let given = self.ctx.types.render(&ty);
                self.ctx
                    .diagnostics
                    .error(item, DiagnosticKind::AllElementsSameType { first, given });
                reported = true;
            }
        }
        out.push(']');
        let elem = elem.unwrap_or_else(|| self.ctx.types.fresh());
        Type::list(elem)
    }

    /// `(a)` is grouping, `(x, y)` is a vec, longer tuples become lists.
    pub(crate) fn compile_tuple(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let items: Vec<&ParseTree> = t.args().collect();
        match items.as_slice() {
            [] => {
                out.push_str("[]");
                Type::list(self.ctx.types.fresh())
            }
            [single] => {
                out.push('(');
                let ty = self.conv(single, out);
                out.push(')');
                ty
            }
            [x, y] => {
                out.push_str("{ x: ");
                self.check_type(&Type::Number, x, out);
                out.push_str(", y: ");
                self.check_type(&Type::Number, y, out);
                out.push_str(" }");
                Type::Vec
            }
            _ => {
                self.ctx
                    .diagnostics
                    .warning(t, DiagnosticKind::LongTuple { len: items.len() });
                self.compile_list(t, out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{expr, generate};
    use puppy_core::{DiagnosticKind, Severity, Type};

    #[test]
    fn list_element_type() {
        let (code, ty) = expr("[#List [#Int '1'] [#Int '2']]");
        assert_eq!(code, "[1, 2]");
        assert_eq!(ty, Type::list(Type::Number));
    }

    #[test]
    fn mixed_lists_report_once() {
        let (code, ctx) = generate(
            "[#Source [#List [#Int '1'] [#String 'a'] [#TrueExpr]]]",
        );
        assert_eq!(code, "\t[1, 'a', true];\n");
        assert_eq!(ctx.diagnostics.len(), 1);
        assert!(matches!(
            ctx.diagnostics.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::AllElementsSameType { .. })
        ));
    }

    #[test]
    fn tuples() {
        assert_eq!(expr("[#Tuple [#Int '1']]"), ("(1)".into(), Type::Number));
        assert_eq!(
            expr("[#Tuple [#Int '1'] [#Int '2']]"),
            ("{ x: 1, y: 2 }".into(), Type::Vec)
        );
        let (code, ctx) = generate("[#Source [#Tuple [#Int '1'] [#Int '2'] [#Int '3']]]");
        assert_eq!(code, "\t[1, 2, 3];\n");
        assert_eq!(ctx.diagnostics.count(Severity::Warning), 1);
    }
}
