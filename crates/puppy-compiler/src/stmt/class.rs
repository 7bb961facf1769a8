//! Class declarations.
//!
//! ```text
//! vars['C'] = class extends vars['B'] {
//!     constructor(a) {...}
//!     m(x) {...}
//! }
//! ```
//!
//! Instantiating a class is an object construction. Methods are bound as
//! `.m` symbols taking the instance first, so `obj.m(x)` resolves like a
//! library method but is written `obj.m(x)`.

use puppy_core::{DiagnosticKind, FuncSig, OptionSchema, Type};
use puppy_parser::{Label, ParseTree, Tag};

use super::funcs::param_list;
use crate::generator::global_code;
use crate::{CallStyle, Effect, Generator, Symbol};

const CONSTRUCTOR: &str = "__init__";

impl Generator<'_> {
    pub(crate) fn compile_class_decl(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let Some(name) = t.token(Label::Name).filter(|n| !n.is_empty()) else {
            self.ctx
                .diagnostics
                .error(t, DiagnosticKind::RequiredIdentifier);
            return Type::Void;
        };
        let code = if self.env.in_function() || self.env.in_loop() {
            self.ctx.local_name(name)
        } else {
            global_code(name)
        };

        let base = match t.get(Label::Extends) {
            Some(base) => match self.env.get(base.text()) {
                Some(symbol) => Some(symbol.code.clone()),
                None => {
                    self.ctx.diagnostics.error(
                        base,
                        DiagnosticKind::UndefinedName {
                            name: base.text().to_string(),
                        },
                    );
                    None
                }
            },
            None => None,
        };

        let methods: Vec<&ParseTree> = match t.get(Label::Body) {
            Some(body) if body.tag() == Tag::Block => body.args().collect(),
            Some(body) => vec![body],
            None => Vec::new(),
        };

        // Signatures first, so methods can call each other.
        let mut declared = Vec::new();
        let mut ctor_params = Vec::new();
        for &method in &methods {
            if method.tag() != Tag::FuncDecl {
                if method.tag() != Tag::Pass {
                    self.ctx.diagnostics.error(
                        method,
                        DiagnosticKind::UnexpectedConstruct {
                            construct: method.tag().name().to_string(),
                        },
                    );
                }
                continue;
            }
            let Some(method_name) = method.token(Label::Name) else {
                continue;
            };
            let params = self.params(method.get(Label::Params), true);
            let ret = self.ctx.types.fresh();
            let param_types: Vec<Type> = params.iter().map(|p| p.ty.clone()).collect();
            if method_name == CONSTRUCTOR {
                ctor_params = param_types;
            } else {
                let mut receiver = vec![Type::Object];
                receiver.extend(param_types);
                let sig = FuncSig::new(ret.clone(), receiver);
                self.env.set(
                    format!(".{method_name}"),
                    Symbol::value(method_name, Type::func(sig)).with_style(CallStyle::Method),
                );
            }
            declared.push((method, method_name, params, ret));
        }

        let sig = FuncSig::new(Type::Object, ctor_params).with_options(OptionSchema::new());
        self.env.set(
            name,
            Symbol::value(&code, Type::func(sig))
                .with_effect(Effect::Construct)
                .with_style(CallStyle::Constructor),
        );

        if self.env.in_function() || self.env.in_loop() {
            out.push_str("var ");
        }
        out.push_str(&code);
        out.push_str(" = class ");
        if let Some(base) = base {
            out.push_str("extends ");
            out.push_str(&base);
            out.push(' ');
        }
        out.push_str("{\n");

        self.in_scope(|g| {
            g.env.set_class_name(name);
            g.env.set("self", Symbol::value("this", Type::Object));
            g.env.nest();
            for (method, method_name, params, ret) in declared {
                let js_name = if method_name == CONSTRUCTOR {
                    "constructor"
                } else {
                    method_name
                };
                out.push_str(&g.indent());
                out.push_str(js_name);
                out.push_str(&param_list(&params));
                out.push(' ');
                g.function_body(&params, ret, method.get(Label::Body), false, out);
                out.push('\n');
            }
        });
        out.push_str(&self.indent());
        out.push('}');
        tracing::debug!(class = name, "class defined");
        Type::Void
    }
}
