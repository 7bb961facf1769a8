//! Lambda and conditional expressions.

use puppy_core::{FuncSig, Type};
use puppy_parser::{Label, ParseTree};

use crate::Generator;
use crate::stmt::param_list;

impl Generator<'_> {
    /// `lambda x, y: expr` becomes `(x, y) => (expr)`.
    pub(crate) fn compile_lambda(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let params = self.params(t.get(Label::Params), false);
        let ret = self.ctx.types.fresh();
        out.push_str(&param_list(&params));
        out.push_str(" => ");
        let frame = self.function_body(&params, ret, t.get(Label::Body), true, out);
        self.lambda_effect = frame.has_effect;
        Type::func(FuncSig::new(
            frame.ret,
            params.into_iter().map(|p| p.ty).collect(),
        ))
    }

    /// `a if cond else b`.
    pub(crate) fn compile_if_expr(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let (Some(cond), Some(then), Some(otherwise)) = (
            t.get(Label::Cond),
            t.get(Label::Then),
            t.get(Label::Else),
        ) else {
            return self.unexpected(t, out);
        };
        out.push_str("((");
        self.check_type(&Type::Bool, cond, out);
        out.push_str(") ? (");
        let ty = self.conv(then, out);
        out.push_str(") : (");
        self.check_type(&ty, otherwise, out);
        out.push_str("))");
        ty
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{expr, generate};
    use puppy_core::{DiagnosticKind, Type};

    #[test]
    fn lambda_type_is_inferred_from_its_body() {
        let (code, ty) = expr(
            "[#FuncExpr params=[#Params [#Param name=[#Name 'x']]] \
               body=[#Infix left=[#Name 'x'] name=[#Token '*'] right=[#Int '2']]]",
        );
        assert_eq!(code, "(x) => (lib.anyMul(x,2))");
        assert_eq!(ty.to_string(), "(_0)->_0");
    }

    #[test]
    fn annotated_lambda() {
        let (code, ty) = expr(
            "[#FuncExpr params=[#Params [#Param name=[#Name 'x'] type=[#Name 'int']]] \
               body=[#Infix left=[#Name 'x'] name=[#Token '-'] right=[#Int '1']]]",
        );
        assert_eq!(code, "(x) => ((x - 1))");
        assert_eq!(ty.to_string(), "(number)->number");
    }

    #[test]
    fn calling_an_effectful_lambda_suspends() {
        let (code, ctx) = generate(
            "[#Source \
               [#VarDecl@1:0 left=[#Name 'f'] \
                  right=[#FuncExpr body=[#ApplyExpr name=[#Name 'print'] [#String 'x']]]] \
               [#ApplyExpr@2:0 name=[#Name 'f']]]",
        );
        assert_eq!(
            code,
            "\tvars['f'] = () => (puppy.print('x', {'trace': 0}));\n\
             \tvars['f']();\n\tyield 1;\n"
        );
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn pure_lambdas_do_not_suspend() {
        let (code, _) = generate(
            "[#Source \
               [#VarDecl left=[#Name 'f'] right=[#FuncExpr body=[#Int '1']]] \
               [#ApplyExpr name=[#Name 'f']]]",
        );
        assert!(!code.contains("yield"));
    }

    #[test]
    fn conditional_expression() {
        assert_eq!(
            expr("[#IfExpr cond=[#TrueExpr] then=[#Int '1'] else=[#Int '2']]"),
            ("((true) ? (1) : (2))".into(), Type::Number)
        );
        let (_, ctx) = generate(
            "[#Source [#IfExpr cond=[#Int '1'] then=[#Int '1'] else=[#String 'a']]]",
        );
        let mismatches = ctx
            .diagnostics
            .iter()
            .filter(|d| matches!(d.kind, DiagnosticKind::TypeMismatch { .. }))
            .count();
        assert_eq!(mismatches, 2);
    }
}
