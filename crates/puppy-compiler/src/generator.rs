//! Tree-walking code generator.
//!
//! [`Generator`] walks a parse tree top-down and writes target code into a
//! `String`. Every handler has the same shape: it takes the node and the
//! output buffer, writes the construct's code, and returns the construct's
//! [`Type`] (`void` for statements). Problems never abort generation; they
//! are reported to the context's diagnostics and a placeholder is written.
//!
//! Handlers live in [`crate::expr`] and [`crate::stmt`]; this module holds the
//! dispatch and the helpers they share.

use std::fmt::Write;

use puppy_core::{DiagnosticKind, Located, Request, Type, quote};
use puppy_parser::{ParseTree, Tag};

use crate::phrase::{PhraseGuess, PhraseLookup};
use crate::{CompileContext, Env, builtins, world};

/// Generates target code for one compilation.
pub struct Generator<'a> {
    pub(crate) ctx: &'a mut CompileContext,
    pub(crate) env: Env,
    phrases: &'a dyn PhraseLookup,
    indent_unit: &'a str,
    /// Whether the most recently generated lambda performs an effect.
    pub(crate) lambda_effect: bool,
}

impl<'a> Generator<'a> {
    /// Create a generator with the prelude bound.
    pub fn new(ctx: &'a mut CompileContext, phrases: &'a dyn PhraseLookup) -> Self {
        let mut env = Env::new();
        for (name, symbol) in builtins::prelude() {
            env.set(name, symbol);
        }
        Self {
            ctx,
            env,
            phrases,
            indent_unit: "\t",
            lambda_effect: false,
        }
    }

    /// Use `unit` for one level of indentation instead of a tab.
    pub fn with_indent(mut self, unit: &'a str) -> Self {
        self.indent_unit = unit;
        self
    }

    /// Generate the statements of a program, one level deep inside the main
    /// procedure.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn generate(&mut self, root: &ParseTree) -> String {
        let mut out = String::new();
        match root.tag() {
            Tag::Source => self.compile_source(root, &mut out),
            _ => self.statement(root, &mut out),
        }
        out
    }

    // ==========================================================================
    // Dispatch
    // ==========================================================================

    /// Generate any node.
    pub(crate) fn conv(&mut self, t: &ParseTree, out: &mut String) -> Type {
        match t.tag() {
            // Declarations
            Tag::FuncDecl => self.compile_func_decl(t, out),
            Tag::ClassDecl => self.compile_class_decl(t, out),
            Tag::FuncExpr => self.compile_lambda(t, out),
            Tag::ImportDecl => self.compile_import(t),
            Tag::FromDecl => self.compile_from(t),

            // Statements
            Tag::Block => {
                self.compile_block(t, out);
                Type::Void
            }
            Tag::Return => self.compile_return(t, out),
            Tag::Yield => self.compile_yield(t, out),
            Tag::Continue | Tag::Break => self.compile_jump(t, out),
            Tag::Pass => Type::Void,
            Tag::VarDecl => self.compile_var_decl(t, out),
            Tag::SelfAssign => self.compile_self_assign(t, out),
            Tag::IfStmt => self.compile_if(t, out),
            Tag::ForStmt => self.compile_for(t, out),

            // Expressions
            Tag::IfExpr => self.compile_if_expr(t, out),
            Tag::ApplyExpr => self.compile_apply(t, out),
            Tag::MethodExpr => self.compile_method(t, out),
            Tag::GetExpr => self.compile_get(t, out),
            Tag::IndexExpr => self.compile_index(t, out),
            Tag::Name => self.compile_name(t, out),
            Tag::Infix => self.compile_infix(t, out),
            Tag::Unary => self.compile_unary(t, out),
            Tag::And | Tag::Or => self.compile_logical(t, out),
            Tag::Not => self.compile_not(t, out),
            Tag::Int
            | Tag::Double
            | Tag::String
            | Tag::Char
            | Tag::MultiString
            | Tag::StringPart
            | Tag::TrueExpr
            | Tag::FalseExpr => self.compile_literal(t, out),
            Tag::Format => self.compile_format(t, out),
            Tag::List => self.compile_list(t, out),
            Tag::Tuple => self.compile_tuple(t, out),
            Tag::KeywordArgument => self.compile_stray_keyword(t, out),
            Tag::NLPSymbol => self.compile_phrase(t, out),

            Tag::Err => {
                self.ctx.diagnostics.error(t, DiagnosticKind::SyntaxError);
                self.placeholder(out)
            }
            Tag::Source | Tag::Params | Tag::Param | Tag::Token => self.unexpected(t, out),
        }
    }

    // ==========================================================================
    // Type checks
    // ==========================================================================

    /// Generate `t` and check its type against `request`.
    ///
    /// A mismatch is reported at `t`; the given type is returned either way.
    pub(crate) fn check(&mut self, request: Request<'_>, t: &ParseTree, out: &mut String) -> Type {
        let given = self.conv(t, out);
        if !self.ctx.types.match_type(request, &given) {
            self.mismatch(t, request, &given);
        }
        given
    }

    pub(crate) fn check_type(&mut self, request: &Type, t: &ParseTree, out: &mut String) -> Type {
        self.check(Request::Type(request), t, out)
    }

    pub(crate) fn mismatch(&mut self, at: &ParseTree, request: Request<'_>, given: &Type) {
        let request = match request {
            Request::Type(r) => self.ctx.types.render(r),
            other => other.to_string(),
        };
        let given = self.ctx.types.render(given);
        self.ctx
            .diagnostics
            .error(at, DiagnosticKind::TypeMismatch { request, given });
    }

    // ==========================================================================
    // Scopes and statements
    // ==========================================================================

    /// Run `f` inside a fresh environment frame.
    pub(crate) fn in_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.env.enter();
        let result = f(self);
        self.env.exit();
        result
    }

    /// Indentation of the statement being generated.
    pub(crate) fn indent(&self) -> String {
        self.indent_unit.repeat(self.env.indent() + 1)
    }

    /// Generate one statement on its own line, followed by its suspension
    /// point if it performed an effect.
    pub(crate) fn statement(&mut self, t: &ParseTree, out: &mut String) {
        self.ctx.enter_statement(t.pos().line);
        let mut code = String::new();
        self.conv(t, &mut code);

        let indent = self.indent();
        if !code.is_empty() {
            out.push_str(&indent);
            out.push_str(&code);
            if !matches!(t.tag(), Tag::IfStmt | Tag::ForStmt | Tag::Block) {
                out.push(';');
            }
            out.push('\n');
        }
        if let Some(trace) = self.ctx.take_suspend() {
            let _ = writeln!(out, "{indent}yield {trace};");
        }
    }

    fn compile_source(&mut self, t: &ParseTree, out: &mut String) {
        for stmt in t.args() {
            if world::is_world_call(self, stmt) {
                self.ctx.enter_statement(stmt.pos().line);
                world::configure(self, stmt);
                continue;
            }
            self.statement(stmt, out);
        }
    }

    /// Record that the current statement performed an effect.
    ///
    /// Inside a function the function is marked effectful; elsewhere a
    /// suspension point is requested after the statement.
    pub(crate) fn note_effect(&mut self) {
        match self.env.function_mut() {
            Some(frame) => frame.has_effect = true,
            None => self.ctx.request_suspend(),
        }
    }

    // ==========================================================================
    // Shared helpers
    // ==========================================================================

    /// Look up a phrase, reporting the lookup's notes as infos.
    pub(crate) fn lookup_phrase(&mut self, at: &ParseTree, phrase: &str) -> PhraseGuess {
        let phrases = self.phrases;
        let mut notes = Vec::new();
        let guess = phrases.lookup(phrase, &mut notes);
        for note in notes {
            self.ctx
                .diagnostics
                .info(at, DiagnosticKind::PhraseResolved { note });
        }
        guess
    }

    /// Write `undefined` and return a fresh type.
    pub(crate) fn placeholder(&mut self, out: &mut String) -> Type {
        out.push_str("undefined");
        self.ctx.types.fresh()
    }

    pub(crate) fn unexpected(&mut self, t: &ParseTree, out: &mut String) -> Type {
        self.ctx.diagnostics.error(
            t,
            DiagnosticKind::UnexpectedConstruct {
                construct: t.tag().name().to_string(),
            },
        );
        self.placeholder(out)
    }
}

/// Target-code name of a global variable.
pub(crate) fn global_code(name: &str) -> String {
    format!("vars[{}]", quote(name))
}
