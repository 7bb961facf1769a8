//! Property reads, indexing and method calls.

use puppy_core::{DiagnosticKind, Request, Type};
use puppy_parser::{Label, ParseTree, Tag};

use super::Receiver;
use crate::phrase::PhraseGuess;
use crate::{Generator, Symbol, builtins, keywords};

/// Receivers a property can be read from.
pub(crate) const PROPERTY_HOLDERS: &str = "object|vec";

impl Generator<'_> {
    /// Member of an imported package when `recv` names one.
    pub(crate) fn module_member(&mut self, recv: &ParseTree, name: &str) -> Option<Option<Symbol>> {
        if recv.tag() != Tag::Name {
            return None;
        }
        let package = self.env.module(recv.text())?;
        let member = builtins::member(package, name);
        if member.is_none() {
            self.ctx.diagnostics.error(
                recv,
                DiagnosticKind::UndefinedName {
                    name: format!("{}.{name}", recv.text()),
                },
            );
        }
        Some(member)
    }

    pub(crate) fn compile_get(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let (Some(recv), Some(key)) = (t.get(Label::Recv), t.token(Label::Name)) else {
            return self.unexpected(t, out);
        };
        match self.module_member(recv, key) {
            Some(Some(symbol)) => {
                out.push_str(&symbol.code);
                return symbol.ty;
            }
            Some(None) => return self.placeholder(out),
            None => {}
        }

        let mut code = String::new();
        self.check(Request::Prefixes(PROPERTY_HOLDERS), recv, &mut code);
        let key = self.canonical_key(t, key);
        out.push_str(&format!("lib.get({code},{})", puppy_core::quote(&key)));
        keywords::key_type(&key).unwrap_or_else(|| self.ctx.types.fresh())
    }

    /// Generate an indexable receiver and return its element type.
    pub(crate) fn indexable(&mut self, recv: &ParseTree, out: &mut String) -> Type {
        let ty = self.conv(recv, out);
        if self.ctx.types.is_unbound(&ty) {
            let elem = self.ctx.types.fresh();
            self.ctx.types.accept(&Type::list(elem.clone()), &ty);
            return elem;
        }
        match self.ctx.types.shallow(&ty) {
            Type::List(elem) => *elem,
            Type::String => Type::String,
            _ => {
                let given = self.ctx.types.render(&ty);
                self.ctx
                    .diagnostics
                    .error(recv, DiagnosticKind::NotIterable { given });
                self.ctx.types.fresh()
            }
        }
    }

    pub(crate) fn compile_index(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let (Some(recv), Some(index)) = (t.get(Label::Recv), t.get(Label::Index)) else {
            return self.unexpected(t, out);
        };
        out.push_str("lib.index(");
        let elem = self.indexable(recv, out);
        out.push(',');
        self.check_type(&Type::Number, index, out);
        out.push(')');
        elem
    }

    /// `recv.m(args)`: a package function, or a `.m` method symbol taking
    /// the receiver first.
    pub(crate) fn compile_method(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let (Some(recv), Some(name)) = (t.get(Label::Recv), t.token(Label::Name)) else {
            return self.unexpected(t, out);
        };
        match self.module_member(recv, name) {
            Some(Some(symbol)) => return self.call(t, name, &symbol, None, PhraseGuess::new(), out),
            Some(None) => return self.placeholder(out),
            None => {}
        }

        let method = format!(".{name}");
        let symbol = match self.env.get(&method) {
            Some(symbol) => Some(symbol.clone()),
            None => self.infer_package(t, &method),
        };
        let mut code = String::new();
        let ty = self.conv(recv, &mut code);
        let Some(symbol) = symbol else {
            self.ctx.diagnostics.error(
                t,
                DiagnosticKind::UndefinedName {
                    name: name.to_string(),
                },
            );
            return self.placeholder(out);
        };
        let recv = Receiver {
            code,
            ty,
            node: recv,
        };
        self.call(t, name, &symbol, Some(recv), PhraseGuess::new(), out)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{expr, generate};
    use puppy_core::{DiagnosticKind, Severity, Type};

    #[test]
    fn property_reads_canonicalize_keys() {
        let (code, ctx) = generate(
            "[#Source [#VarDecl left=[#Name 'b'] right=[#ApplyExpr name=[#Name 'Circle'] [#Int '1'] [#Int '2']]] \
               [#VarDecl left=[#Name 'w'] right=[#GetExpr recv=[#Name 'b'] name=[#Name '幅']]]]",
        );
        assert!(code.contains("vars['w'] = lib.get(vars['b'],'width');"));
        assert_eq!(ctx.diagnostics.count(Severity::Info), 1);
    }

    #[test]
    fn indexing() {
        let (code, ty) = expr("[#IndexExpr recv=[#List [#String 'a']] index=[#Int '0']]");
        assert_eq!(code, "lib.index(['a'],0)");
        assert_eq!(ty, Type::String);
    }

    #[test]
    fn module_members() {
        let (code, ctx) = generate(
            "[#Source [#ImportDecl name=[#Name 'math']] \
               [#VarDecl left=[#Name 'r'] right=[#MethodExpr recv=[#Name 'math'] name=[#Name 'sqrt'] [#Int '2']]] \
               [#VarDecl left=[#Name 'p'] right=[#GetExpr recv=[#Name 'math'] name=[#Name 'pi']]]]",
        );
        assert_eq!(code, "\tvars['r'] = Math.sqrt(2);\n\tvars['p'] = Math.PI;\n");
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn library_methods_take_the_receiver_first() {
        let (code, ctx) = generate(
            "[#Source [#VarDecl left=[#Name 'xs'] right=[#List [#Int '1']]] \
               [#MethodExpr recv=[#Name 'xs'] name=[#Name 'append'] [#Int '2']]]",
        );
        assert!(code.ends_with("\tlib.append(vars['xs'], 2);\n"));
        assert!(ctx.diagnostics.is_empty());

        let (_, ctx) = generate(
            "[#Source [#VarDecl left=[#Name 'xs'] right=[#List [#Int '1']]] \
               [#MethodExpr recv=[#Name 'xs'] name=[#Name 'append'] [#String 'a']]]",
        );
        assert!(matches!(
            ctx.diagnostics.iter().next().map(|d| &d.kind),
            Some(DiagnosticKind::TypeMismatch { .. })
        ));
    }

    #[test]
    fn unknown_method() {
        let (code, ctx) = generate(
            "[#Source [#MethodExpr recv=[#Int '1'] name=[#Name 'fly']]]",
        );
        assert_eq!(code, "\tundefined;\n");
        assert_eq!(ctx.diagnostics.count(Severity::Error), 1);
    }
}
