//! Calls and argument binding.
//!
//! A call binds its children in two phases. Positional children are checked
//! against the signature's parameters in order; a keyword argument, or
//! running out of parameters on a signature with an option schema, ends that
//! phase. The rest becomes the option object: explicit `key=value` pairs,
//! free-standing phrases, phrase seeds from the callee, and finally every
//! schema default that was not supplied. Object constructions also get an
//! id and a trace.

use puppy_core::{DiagnosticKind, FuncSig, Literal, OptionSchema, Request, Type, quote};
use puppy_parser::{Label, ParseTree, Tag};
use rustc_hash::FxHashSet;

use super::literal_of;
use crate::phrase::PhraseGuess;
use crate::{CallStyle, Effect, Generator, LiveRecord, Symbol, builtins, keywords};

/// Option keys the compiler fills in itself.
const RESERVED_KEYS: &[&str] = &["id", "trace"];

/// An already generated receiver of a method call.
pub(crate) struct Receiver<'t> {
    pub code: String,
    pub ty: Type,
    pub node: &'t ParseTree,
}

/// Option entries collected for one call, in emission order.
#[derive(Default)]
struct Options {
    entries: Vec<(String, String)>,
    used: FxHashSet<String>,
}

impl Options {
    /// Add an entry unless the key was already supplied.
    fn insert(&mut self, key: &str, code: String) -> bool {
        if !self.used.insert(key.to_string()) {
            return false;
        }
        self.entries.push((key.to_string(), code));
        true
    }

    fn render(&self) -> String {
        let body: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}: {v}", quote(k)))
            .collect();
        format!("{{{}}}", body.join(", "))
    }
}

impl Generator<'_> {
    pub(crate) fn compile_apply(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let Some(name) = t.token(Label::Name) else {
            self.ctx
                .diagnostics
                .error(t, DiagnosticKind::RequiredIdentifier);
            return self.placeholder(out);
        };
        match self.resolve_callee(t, name) {
            Some((symbol, seeds)) => self.call(t, name, &symbol, None, seeds, out),
            None => self.placeholder(out),
        }
    }

    /// Environment, then package catalogue, then phrase fallback.
    fn resolve_callee(&mut self, t: &ParseTree, name: &str) -> Option<(Symbol, PhraseGuess)> {
        if let Some(symbol) = self.env.get(name) {
            return Some((symbol.clone(), PhraseGuess::new()));
        }
        if let Some(symbol) = self.infer_package(t, name) {
            return Some((symbol, PhraseGuess::new()));
        }

        let mut guess = self.lookup_phrase(t, name);
        if guess.is_empty() {
            self.ctx.diagnostics.error(
                t,
                DiagnosticKind::UnrecognizedPhrase {
                    phrase: name.to_string(),
                },
            );
            return None;
        }
        let shape = match guess.iter().position(|(k, _)| k == "shape") {
            Some(i) => guess.remove(i).1,
            None => Literal::str("circle"),
        };
        let constructor = match shape.as_str() {
            Some("rectangle") => "Rectangle",
            Some("polygon") => "Polygon",
            Some("label" | "text") => "Label",
            _ => "Circle",
        };
        if !guess.iter().any(|(k, _)| k == "name") {
            guess.push(("name".to_string(), Literal::str(name)));
        }
        tracing::debug!(phrase = name, constructor, "phrase resolved to a shape");
        let symbol = builtins::prelude()
            .into_iter()
            .find(|(n, _)| *n == constructor)
            .map(|(_, s)| s)?;
        Some((symbol, guess))
    }

    /// Generate a call to `symbol` with `t`'s unlabeled children as arguments.
    pub(crate) fn call(
        &mut self,
        t: &ParseTree,
        name: &str,
        symbol: &Symbol,
        recv: Option<Receiver<'_>>,
        seeds: PhraseGuess,
        out: &mut String,
    ) -> Type {
        let args: Vec<&ParseTree> = t.args().collect();
        let sig = match self.ctx.types.resolve(&symbol.ty) {
            Type::Func(sig) => self.ctx.types.unique(&sig),
            Type::Var(_) => self.infer_signature(symbol, &args, recv.is_some()),
            _ => {
                self.ctx.diagnostics.error(
                    t,
                    DiagnosticKind::NotAFunction {
                        name: name.to_string(),
                    },
                );
                return self.placeholder(out);
            }
        };
        if symbol.effect == Effect::World {
            self.ctx.diagnostics.error(t, DiagnosticKind::WorldOnce);
            return self.placeholder(out);
        }
        let id = (symbol.effect == Effect::Construct).then(|| self.ctx.next_object_id());

        let mut callee = match symbol.style {
            CallStyle::Constructor => format!("new {}", symbol.code),
            _ => symbol.code.clone(),
        };
        let mut params = sig.params.iter();
        let mut parts = Vec::new();
        let mut given = 0;
        if let Some(recv) = recv {
            given += 1;
            if let Some(first) = params.next()
                && !self.ctx.types.accept(first, &recv.ty)
            {
                self.mismatch(recv.node, Request::Type(first), &recv.ty);
            }
            match symbol.style {
                CallStyle::Method => callee = format!("{}.{}", recv.code, symbol.code),
                _ => parts.push(recv.code),
            }
        }

        let params: Vec<&Type> = params.collect();
        let mut next = 0;
        while let Some(&arg) = args.get(next) {
            if arg.tag() == Tag::KeywordArgument || next >= params.len() {
                break;
            }
            let mut code = String::new();
            self.check_type(params[next], arg, &mut code);
            parts.push(code);
            next += 1;
        }
        given += next;
        let required = sig.required_params();
        if given < required {
            self.ctx
                .diagnostics
                .error(t, DiagnosticKind::MissingArguments { given, required });
        }

        let rest = &args[next..];
        match &sig.options {
            Some(schema) => {
                let options = self.bind_options(schema, rest, seeds, id, symbol.effect);
                parts.push(options);
            }
            None => self.reject_extra(t, rest, given, sig.params.len()),
        }

        out.push_str(&callee);
        out.push('(');
        out.push_str(&parts.join(", "));
        out.push(')');

        if matches!(symbol.effect, Effect::Construct | Effect::Observable) {
            self.note_effect();
        }
        sig.ret
    }

    /// Give a callee of unknown type a signature shaped by this call.
    fn infer_signature(&mut self, symbol: &Symbol, args: &[&ParseTree], method: bool) -> FuncSig {
        let count = args
            .iter()
            .filter(|a| a.tag() != Tag::KeywordArgument)
            .count()
            + usize::from(method);
        let params = (0..count).map(|_| self.ctx.types.fresh()).collect();
        let sig = FuncSig::new(self.ctx.types.fresh(), params);
        self.ctx.types.accept(&symbol.ty, &Type::func(sig.clone()));
        sig
    }

    /// Arguments left over on a signature without options.
    fn reject_extra(&mut self, t: &ParseTree, rest: &[&ParseTree], given: usize, accepted: usize) {
        let extra = rest
            .iter()
            .filter(|a| a.tag() != Tag::KeywordArgument)
            .count();
        if extra > 0 {
            self.ctx.diagnostics.warning(
                t,
                DiagnosticKind::TooManyArguments {
                    given: given + extra,
                    accepted,
                },
            );
        }
        for &arg in rest.iter().filter(|a| a.tag() == Tag::KeywordArgument) {
            self.ctx
                .diagnostics
                .warning(arg, DiagnosticKind::KeywordPosition);
        }
    }

    fn bind_options(
        &mut self,
        schema: &OptionSchema,
        args: &[&ParseTree],
        seeds: PhraseGuess,
        id: Option<u32>,
        effect: Effect,
    ) -> String {
        let trace = matches!(effect, Effect::Construct | Effect::Observable).then(|| self.ctx.trace());
        let live = id.zip(trace);
        let mut options = Options::default();

        for &arg in args {
            match arg.tag() {
                Tag::KeywordArgument => {
                    let Some(raw) = arg.token(Label::Name) else {
                        continue;
                    };
                    if RESERVED_KEYS.contains(&raw) {
                        self.ctx.diagnostics.warning(
                            arg,
                            DiagnosticKind::ReservedKeyword {
                                name: raw.to_string(),
                            },
                        );
                        continue;
                    }
                    let key = self.canonical_key(arg, raw);
                    if options.used.contains(&key) {
                        self.ctx
                            .diagnostics
                            .warning(arg, DiagnosticKind::DuplicateKeyword { name: key });
                        continue;
                    }
                    let Some(value) = arg.get(Label::Value) else {
                        continue;
                    };
                    let mut code = String::new();
                    self.keyword_value(&key, value, &mut code);
                    if let Some((id, trace)) = live
                        && let Some(lit) = literal_of(value)
                    {
                        self.ctx
                            .record_live(LiveRecord::new(id, &key, lit.to_code(), trace));
                    }
                    options.insert(&key, code);
                }
                Tag::NLPSymbol => {
                    let guess = self.lookup_phrase(arg, arg.text());
                    if guess.is_empty() {
                        self.ctx.diagnostics.error(
                            arg,
                            DiagnosticKind::UnrecognizedPhrase {
                                phrase: arg.text().to_string(),
                            },
                        );
                    }
                    for (key, value) in guess {
                        if RESERVED_KEYS.contains(&key.as_str()) {
                            continue;
                        }
                        if !options.insert(&key, value.to_code()) {
                            self.ctx
                                .diagnostics
                                .warning(arg, DiagnosticKind::DuplicateKeyword { name: key });
                            continue;
                        }
                        if let Some((id, trace)) = live {
                            self.ctx
                                .record_live(LiveRecord::new(id, key, value.to_code(), trace));
                        }
                    }
                }
                _ => self
                    .ctx
                    .diagnostics
                    .warning(arg, DiagnosticKind::KeywordPosition),
            }
        }

        for (key, value) in seeds {
            if !RESERVED_KEYS.contains(&key.as_str())
                && options.insert(&key, value.to_code())
                && let Some((id, trace)) = live
            {
                self.ctx
                    .record_live(LiveRecord::new(id, key, value.to_code(), trace));
            }
        }
        for (key, default) in schema.iter() {
            let code = default.map_or_else(|| "null".to_string(), Literal::to_code);
            options.insert(key, code);
        }
        if let Some(id) = id {
            options.insert("id", id.to_string());
        }
        if let Some(trace) = trace {
            options.insert("trace", trace.to_string());
        }
        options.render()
    }

    /// Generate a keyword value with `key` as the current keyword target.
    pub(crate) fn keyword_value(&mut self, key: &str, value: &ParseTree, out: &mut String) -> Type {
        self.in_scope(|g| {
            g.env.set_keyword(key);
            match keywords::key_type(key) {
                Some(ty) => g.check_type(&ty, value, out),
                None => g.conv(value, out),
            }
        })
    }

    /// Canonical spelling of a keyword; aliases are reported as infos,
    /// unknown names as warnings and passed through.
    pub(crate) fn canonical_key(&mut self, at: &ParseTree, raw: &str) -> String {
        match keywords::canonical(raw) {
            Some(key) if key == raw => key.to_string(),
            Some(key) => {
                self.ctx.diagnostics.info(
                    at,
                    DiagnosticKind::KeywordCorrected {
                        from: raw.to_string(),
                        to: key.to_string(),
                    },
                );
                key.to_string()
            }
            None => {
                self.ctx.diagnostics.warning(
                    at,
                    DiagnosticKind::UnknownKeyword {
                        name: raw.to_string(),
                    },
                );
                raw.to_string()
            }
        }
    }
}
