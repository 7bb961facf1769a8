//! Control flow statements.

use puppy_core::{DiagnosticKind, Located, Type};
use puppy_parser::{Label, ParseTree, Tag};

use crate::{Generator, ScopeFlags, Symbol};

impl Generator<'_> {
    pub(crate) fn compile_if(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let (Some(cond), Some(then)) = (t.get(Label::Cond), t.get(Label::Then)) else {
            self.unexpected(t, out);
            return Type::Void;
        };
        out.push_str("if (");
        self.check_type(&Type::Bool, cond, out);
        out.push_str(") ");
        let header = self.ctx.take_suspend();
        self.compile_body(then, out);
        if let Some(otherwise) = t.get(Label::Else) {
            self.ctx.enter_statement(t.pos().line);
            out.push_str(" else ");
            if otherwise.tag() == Tag::IfStmt {
                self.compile_if(otherwise, out);
            } else {
                self.compile_body(otherwise, out);
            }
        }
        self.ctx.resume_suspend(header);
        Type::Void
    }

    /// `for x in xs:` over a list or a string.
    pub(crate) fn compile_for(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let (Some(each), Some(list), Some(body)) =
            (t.get(Label::Each), t.get(Label::List), t.get(Label::Body))
        else {
            self.unexpected(t, out);
            return Type::Void;
        };
        if each.tag() != Tag::Name {
            self.ctx
                .diagnostics
                .error(each, DiagnosticKind::RequiredIdentifier);
            return Type::Void;
        }

        let mut items = String::new();
        let list_ty = self.conv(list, &mut items);
        let elem = if self.ctx.types.is_unbound(&list_ty) {
            let elem = self.ctx.types.fresh();
            self.ctx.types.accept(&Type::list(elem.clone()), &list_ty);
            elem
        } else {
            match self.ctx.types.shallow(&list_ty) {
                Type::List(_) | Type::String => self.ctx.types.type_of_seq(&list_ty),
                _ => {
                    let given = self.ctx.types.render(&list_ty);
                    self.ctx
                        .diagnostics
                        .error(list, DiagnosticKind::NotIterable { given });
                    self.ctx.types.fresh()
                }
            }
        };

        let header = self.ctx.take_suspend();
        self.in_scope(|g| {
            g.env.insert_flags(ScopeFlags::IN_LOOP);
            let code = g.ctx.local_name(each.text());
            g.env.set(each.text(), Symbol::var(&code, elem));
            out.push_str(&format!("for (let {code} of {items}) "));
            g.compile_body(body, out);
        });
        self.ctx.resume_suspend(header);
        Type::Void
    }

    pub(crate) fn compile_return(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let Some(frame) = self.env.function().cloned() else {
            self.ctx.diagnostics.warning(
                t,
                DiagnosticKind::OnlyInFunction {
                    keyword: "return".to_string(),
                },
            );
            return Type::Void;
        };
        match t.get(Label::Expr) {
            Some(value) => {
                out.push_str("return ");
                if self.ctx.types.resolve(&frame.ret).is_void() {
                    self.ctx
                        .diagnostics
                        .warning(t, DiagnosticKind::ReturnValueIgnored);
                    self.conv(value, out);
                } else {
                    self.check_type(&frame.ret, value, out);
                    if let Some(frame) = self.env.function_mut() {
                        frame.has_return = true;
                    }
                }
            }
            None => {
                if self.ctx.types.is_unbound(&frame.ret) {
                    self.ctx.types.accept(&Type::Void, &frame.ret);
                } else if !self.ctx.types.resolve(&frame.ret).is_void() {
                    let ret = self.ctx.types.render(&frame.ret);
                    self.ctx
                        .diagnostics
                        .error(t, DiagnosticKind::MustReturnValue { ret });
                }
                out.push_str("return");
            }
        }
        Type::Void
    }

    /// `break` and `continue`.
    pub(crate) fn compile_jump(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let keyword = if t.tag() == Tag::Break {
            "break"
        } else {
            "continue"
        };
        if self.env.in_loop() {
            out.push_str(keyword);
        } else {
            self.ctx.diagnostics.warning(
                t,
                DiagnosticKind::OnlyInLoop {
                    keyword: keyword.to_string(),
                },
            );
        }
        Type::Void
    }

    pub(crate) fn compile_yield(&mut self, t: &ParseTree, out: &mut String) -> Type {
        if self.env.in_function() {
            self.ctx
                .diagnostics
                .warning(t, DiagnosticKind::YieldInFunction);
        } else {
            let trace = self.ctx.trace();
            out.push_str(&format!("yield {trace}"));
        }
        Type::Void
    }
}
