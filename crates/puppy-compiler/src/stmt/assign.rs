//! Assignments.
//!
//! The first assignment to a name declares it: as a `vars[...]` global at top
//! level, as a `var` local inside a function or loop. Assigning a global from
//! inside a function declares a local that shadows it. Later assignments are
//! checked against the declared type.

use puppy_core::{BinaryOp, DiagnosticKind, Request, Type};
use puppy_parser::{Label, ParseTree, Tag};

use crate::expr::PROPERTY_HOLDERS;
use crate::generator::global_code;
use crate::{Effect, Generator, Symbol, keywords};

impl Generator<'_> {
    pub(crate) fn compile_var_decl(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let (Some(left), Some(right)) = (t.get(Label::Left), t.get(Label::Right)) else {
            return self.unexpected(t, out);
        };
        if left.tag() == Tag::Name {
            let existing = self.env.get(left.text()).cloned();
            match existing {
                Some(symbol) if !(symbol.is_global() && self.env.in_function()) => {
                    if !symbol.mutable {
                        self.immutable(left, left.text());
                        return Type::Void;
                    }
                    out.push_str(&symbol.code);
                    out.push_str(" = ");
                    self.lambda_effect = false;
                    self.check_type(&symbol.ty, right, out);
                    let effect = self.bound_effect(right);
                    if effect != symbol.effect {
                        self.env.set(left.text(), symbol.with_effect(effect));
                    }
                }
                _ => self.declare(t, left.text(), right, out),
            }
            return Type::Void;
        }

        let Some((code, ty)) = self.lvalue(left) else {
            return Type::Void;
        };
        out.push_str(&code);
        out.push_str(" = ");
        self.check_type(&ty, right, out);
        Type::Void
    }

    fn declare(&mut self, t: &ParseTree, name: &str, value: &ParseTree, out: &mut String) {
        let ty = match t.get(Label::Type) {
            Some(annotation) => self.annotation(annotation),
            None => self.ctx.types.fresh(),
        };
        let mut code = String::new();
        self.lambda_effect = false;
        self.check_type(&ty, value, &mut code);
        let effect = self.bound_effect(value);

        let target = if self.env.in_function() || self.env.in_loop() {
            let local = self.ctx.local_name(name);
            out.push_str("var ");
            local
        } else {
            global_code(name)
        };
        out.push_str(&target);
        out.push_str(" = ");
        out.push_str(&code);
        self.env.set(name, Symbol::var(target, ty).with_effect(effect));
    }

    /// Effect of calling a name bound to `value`: a lambda whose body prints
    /// or constructs makes its callers suspend.
    fn bound_effect(&mut self, value: &ParseTree) -> Effect {
        if value.tag() == Tag::FuncExpr && std::mem::take(&mut self.lambda_effect) {
            Effect::Observable
        } else {
            Effect::None
        }
    }

    /// `x += v` and friends, written as `x = x + v`.
    pub(crate) fn compile_self_assign(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let (Some(left), Some(op), Some(right)) =
            (t.get(Label::Left), t.token(Label::Name), t.get(Label::Right))
        else {
            return self.unexpected(t, out);
        };
        let Some(op) = BinaryOp::from_compound(op) else {
            return self.unexpected(t, out);
        };
        let Some((code, ty)) = self.lvalue(left) else {
            return Type::Void;
        };
        let (value, _) = self.binary(op, left, code.clone(), ty, right);
        out.push_str(&format!("{code} = {value}"));
        Type::Void
    }

    /// Target code and type of an assignable expression.
    fn lvalue(&mut self, t: &ParseTree) -> Option<(String, Type)> {
        match t.tag() {
            Tag::Name => match self.env.get(t.text()).cloned() {
                Some(symbol) if symbol.mutable => Some((symbol.code, symbol.ty)),
                Some(_) => {
                    self.immutable(t, t.text());
                    None
                }
                None => {
                    self.ctx.diagnostics.error(
                        t,
                        DiagnosticKind::UndefinedName {
                            name: t.text().to_string(),
                        },
                    );
                    None
                }
            },
            Tag::GetExpr => {
                let (recv, key) = (t.get(Label::Recv)?, t.token(Label::Name)?);
                if self.module_member(recv, key).is_some() {
                    self.immutable(t, &format!("{}.{key}", recv.text()));
                    return None;
                }
                let mut code = String::new();
                self.check(Request::Prefixes(PROPERTY_HOLDERS), recv, &mut code);
                let key = self.canonical_key(t, key);
                let ty = keywords::key_type(&key).unwrap_or_else(|| self.ctx.types.fresh());
                Some((format!("{code}.{key}"), ty))
            }
            Tag::IndexExpr => {
                let (recv, index) = (t.get(Label::Recv)?, t.get(Label::Index)?);
                let mut code = String::new();
                let elem = self.indexable(recv, &mut code);
                code.push('[');
                self.check_type(&Type::Number, index, &mut code);
                code.push(']');
                Some((code, elem))
            }
            _ => {
                self.ctx
                    .diagnostics
                    .error(t, DiagnosticKind::RequiredIdentifier);
                None
            }
        }
    }

    fn immutable(&mut self, at: &ParseTree, name: &str) {
        self.ctx.diagnostics.error(
            at,
            DiagnosticKind::Immutable {
                name: name.to_string(),
            },
        );
    }
}
