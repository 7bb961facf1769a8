//! Function declarations.
//!
//! A function's symbol is bound before its body is generated, with a fresh
//! return variable, so recursive calls type-check. The body runs in its own
//! frame with the parameters bound as locals and a [`FunctionFrame`]
//! installed; only the return type and the effect flag survive the frame.
//! A body that never returns a value fixes the return variable to `void`.

use puppy_core::{DiagnosticKind, FuncSig, Type};
use puppy_parser::{Label, ParseTree, Tag};

use crate::generator::global_code;
use crate::{Effect, FunctionFrame, Generator, Symbol};

/// A declared parameter.
#[derive(Debug, Clone)]
pub(crate) struct Param {
    pub name: String,
    pub code: String,
    pub ty: Type,
}

impl Generator<'_> {
    pub(crate) fn compile_func_decl(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let Some(name) = t.token(Label::Name).filter(|n| !n.is_empty()) else {
            self.ctx
                .diagnostics
                .error(t, DiagnosticKind::RequiredIdentifier);
            return Type::Void;
        };
        if self
            .env
            .get(name)
            .is_some_and(|s| self.ctx.types.resolve(&s.ty).as_func().is_some())
        {
            self.ctx.diagnostics.warning(
                t,
                DiagnosticKind::Redefined {
                    name: name.to_string(),
                },
            );
        }

        let local = self.env.in_function() || self.env.in_loop();
        let code = if local {
            self.ctx.local_name(name)
        } else {
            global_code(name)
        };
        let params = self.params(t.get(Label::Params), false);
        let ret = self.ctx.types.fresh();
        let param_types: Vec<Type> = params.iter().map(|p| p.ty.clone()).collect();
        let ty = Type::func(FuncSig::new(ret.clone(), param_types));
        self.env.set(name, Symbol::value(&code, ty.clone()));

        if local {
            out.push_str("var ");
        }
        out.push_str(&code);
        out.push_str(" = ");
        out.push_str(&param_list(&params));
        out.push_str(" => ");
        let frame = self.function_body(&params, ret, t.get(Label::Body), false, out);

        if frame.has_effect {
            self.env
                .set(name, Symbol::value(&code, ty.clone()).with_effect(Effect::Observable));
        }
        tracing::debug!(name, ty = %self.ctx.types.render(&ty), "function defined");
        Type::Void
    }

    /// Parameters of a `Params` node. With `skip_self`, a leading `self`
    /// parameter is left out.
    pub(crate) fn params(&mut self, node: Option<&ParseTree>, skip_self: bool) -> Vec<Param> {
        let Some(node) = node else {
            return Vec::new();
        };
        let mut params = Vec::new();
        for (i, p) in node.args().enumerate() {
            let name = match p.tag() {
                Tag::Name => p.text(),
                _ => p.token(Label::Name).unwrap_or_default(),
            };
            if name.is_empty() {
                self.ctx
                    .diagnostics
                    .error(p, DiagnosticKind::RequiredIdentifier);
                continue;
            }
            if skip_self && i == 0 && name == "self" {
                continue;
            }
            let ty = match p.get(Label::Type) {
                Some(annotation) => self.annotation(annotation),
                None => self.ctx.types.fresh(),
            };
            params.push(Param {
                name: name.to_string(),
                code: self.ctx.local_name(name),
                ty,
            });
        }
        params
    }

    /// Type named by a parameter annotation.
    pub(crate) fn annotation(&mut self, t: &ParseTree) -> Type {
        let name = t.text();
        if name == "list" {
            return Type::list(self.ctx.types.fresh());
        }
        match Type::from_name(name) {
            Some(ty) => ty,
            None => {
                self.ctx.diagnostics.warning(
                    t,
                    DiagnosticKind::UnknownTypeName {
                        name: name.to_string(),
                    },
                );
                self.ctx.types.fresh()
            }
        }
    }

    /// Generate a function body in its own frame and return the frame as it
    /// was when the body ended.
    ///
    /// An expression body (lambdas) is written as `(expr)` and returns its
    /// value.
    pub(crate) fn function_body(
        &mut self,
        params: &[Param],
        ret: Type,
        body: Option<&ParseTree>,
        expression: bool,
        out: &mut String,
    ) -> FunctionFrame {
        let frame = self.in_scope(|g| {
            g.env.push_function(FunctionFrame::new(ret.clone()));
            for p in params {
                g.env.set(&p.name, Symbol::var(&p.code, p.ty.clone()));
            }
            match body {
                Some(b) if expression && b.tag() != Tag::Block => {
                    out.push('(');
                    let ty = g.conv(b, out);
                    out.push(')');
                    g.ctx.types.accept(&ret, &ty);
                    if let Some(frame) = g.env.function_mut() {
                        frame.has_return = true;
                    }
                }
                Some(b) => g.compile_body(b, out),
                None => out.push_str("{}"),
            }
            g.env
                .function()
                .cloned()
                .unwrap_or_else(|| FunctionFrame::new(ret.clone()))
        });
        if !frame.has_return {
            self.ctx.types.accept(&Type::Void, &frame.ret);
        }
        frame
    }
}

/// `(a, b)` from parameter codes.
pub(crate) fn param_list(params: &[Param]) -> String {
    let codes: Vec<&str> = params.iter().map(|p| p.code.as_str()).collect();
    format!("({})", codes.join(", "))
}

#[cfg(test)]
mod tests {
    use crate::test_support::generate;
    use puppy_core::{DiagnosticKind, Severity};

    const DOUBLE: &str = "[#FuncDecl name=[#Name 'double'] \
        params=[#Params [#Param name=[#Name 'n']]] \
        body=[#Block [#Return expr=[#Infix left=[#Name 'n'] name=[#Token '+'] right=[#Name 'n']]]]]";

    #[test]
    fn global_function() {
        let (code, ctx) = generate(&format!("[#Source {DOUBLE}]"));
        assert_eq!(
            code,
            "\tvars['double'] = (n) => {\n\t\treturn lib.anyAdd(n,n);\n\t};\n"
        );
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn return_type_flows_to_callers() {
        let (code, ctx) = generate(&format!(
            "[#Source {DOUBLE} \
               [#VarDecl left=[#Name 'x'] right=[#ApplyExpr name=[#Name 'double'] [#Int '2']]] \
               [#VarDecl left=[#Name 'y'] right=[#Infix left=[#Name 'x'] name=[#Token '-'] right=[#Int '1']]]]"
        ));
        assert!(code.contains("\tvars['x'] = vars['double'](2);\n"));
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn bodies_without_return_are_void() {
        let (_, ctx) = generate(
            "[#Source [#FuncDecl name=[#Name 'f'] params=[#Params] body=[#Block [#Pass]]] \
               [#VarDecl left=[#Name 'x'] right=[#ApplyExpr name=[#Name 'f']]] \
               [#VarDecl left=[#Name 'y'] right=[#Infix left=[#Name 'x'] name=[#Token '-'] right=[#Int '1']]]]",
        );
        assert_eq!(ctx.diagnostics.count(Severity::Error), 1);
    }

    #[test]
    fn effectful_functions_yield_at_the_call_site() {
        let (code, _) = generate(
            "[#Source \
               [#FuncDecl@1:0 name=[#Name 'spawn'] params=[#Params] body=[#Block \
                 [#ApplyExpr@2:4 name=[#Name 'Circle'] [#Int '1'] [#Int '2']]]] \
               [#ApplyExpr@3:0 name=[#Name 'spawn']]]",
        );
        assert_eq!(
            code,
            "\tvars['spawn'] = () => {\n\
             \t\tpuppy.Circle(1, 2, {'id': 1, 'trace': 0});\n\
             \t};\n\
             \tvars['spawn']();\n\
             \tyield 1;\n"
        );
    }

    #[test]
    fn redefinition_warns() {
        let (_, ctx) = generate(&format!("[#Source {DOUBLE} {DOUBLE}]"));
        assert!(matches!(
            ctx.diagnostics.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::Redefined { name }) if name == "double"
        ));
    }

    #[test]
    fn unknown_annotation_warns() {
        let (_, ctx) = generate(
            "[#Source [#FuncDecl name=[#Name 'f'] \
               params=[#Params [#Param name=[#Name 'a'] type=[#Name 'integer']]] body=[#Pass]]]",
        );
        assert!(matches!(
            ctx.diagnostics.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::UnknownTypeName { name }) if name == "integer"
        ));
    }

    #[test]
    fn nested_functions_are_local() {
        let (code, _) = generate(
            "[#Source [#FuncDecl name=[#Name 'outer'] params=[#Params] body=[#Block \
               [#FuncDecl name=[#Name 'inner'] params=[#Params] body=[#Block [#Pass]]]]]]",
        );
        assert!(code.contains("\t\tvar inner = () => {\n\t\t};\n"));
    }
}
