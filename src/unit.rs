//! Compilation pipeline.
//!
//! [`Compiler`] turns source text into a [`CompileOutput`]: parse, generate,
//! then package the generated body with its side tables. Every compilation
//! gets a fresh [`CompileContext`], so compiling the same text twice gives
//! identical output.
//!
//! # Example
//!
//! ```
//! use puppy::{Compiler, TreeNotation};
//!
//! let compiler = Compiler::new(TreeNotation);
//! let output = compiler.compile("[#Source [#ApplyExpr name=[#Name 'print'] [#String 'hi']]]");
//! assert!(output.errors.is_empty());
//! assert_eq!(output.code, "\tpuppy.print('hi', {'trace': 0});\n\tyield 0;\n");
//! ```

use puppy_compiler::{CompileContext, Generator, LiveRecord, NoPhrases, PhraseLookup, World};
use puppy_core::{DiagnosticKind, DiagnosticRecord, Diagnostics, Severity, quote};
use puppy_parser::{SourceParser, Tag};
use serde::Serialize;
use xxhash_rust::xxh64::xxh64;

use crate::{CompilerConfig, LiveChange};

/// Everything one compilation hands to the runtime and the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompileOutput {
    /// xxh64 of the world and the code, as 16 hex digits.
    pub hash: String,
    pub world: World,
    pub live: Vec<LiveRecord>,
    /// Live-value changes against the previous compilation of a session.
    pub live_changes: Vec<LiveChange>,
    /// Code to run on top of the previous compilation, when it only grew.
    pub update: Option<String>,
    /// The generated procedure body.
    pub code: String,
    /// The body wrapped as the runtime's main procedure.
    pub main: String,
    pub lines: Vec<u32>,
    pub errors: Vec<DiagnosticRecord>,
}

impl CompileOutput {
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| e.kind == Severity::Error)
    }

    /// The record as a target-code object literal.
    pub fn render_module(&self) -> String {
        let live: Vec<String> = self
            .live
            .iter()
            .map(|r| {
                format!(
                    "{{id: {}, key: {}, value: {}, trace: {}}}",
                    r.id,
                    quote(&r.key),
                    r.value,
                    r.trace
                )
            })
            .collect();
        let lines: Vec<String> = self.lines.iter().map(u32::to_string).collect();
        let errors: Vec<String> = self
            .errors
            .iter()
            .map(|e| {
                format!(
                    "{{type: {}, row: {}, text: {}}}",
                    quote(e.kind.as_str()),
                    e.row,
                    quote(&e.text)
                )
            })
            .collect();
        let update = match &self.update {
            Some(code) => format!("function(puppy) {{\n{}{code}}}", prelude("\t")),
            None => "null".to_string(),
        };

        format!(
            "{{\n\tworld: {},\n\tlive: [{}],\n\tupdate: {},\n\tmain: {},\n\tlines: [{}],\n\terrors: [{}],\n\thash: {}\n}}",
            self.world.render(),
            live.join(", "),
            update,
            self.main,
            lines.join(", "),
            errors.join(", "),
            quote(&self.hash),
        )
    }
}

fn prelude(indent: &str) -> String {
    format!("{indent}const lib = puppy.lib;\n{indent}const vars = puppy.vars;\n")
}

/// Content hash of a compilation.
pub fn content_hash(world: &World, code: &str) -> String {
    let mut text = world.render();
    text.push('\n');
    text.push_str(code);
    format!("{:016x}", xxh64(text.as_bytes(), 0))
}

/// Parses and generates programs.
pub struct Compiler {
    parser: Box<dyn SourceParser>,
    phrases: Box<dyn PhraseLookup>,
    config: CompilerConfig,
}

impl Compiler {
    /// A compiler with no phrase knowledge and the default configuration.
    pub fn new(parser: impl SourceParser + 'static) -> Self {
        Self {
            parser: Box::new(parser),
            phrases: Box::new(NoPhrases),
            config: CompilerConfig::default(),
        }
    }

    pub fn with_phrases(mut self, phrases: impl PhraseLookup + 'static) -> Self {
        self.phrases = Box::new(phrases);
        self
    }

    pub fn with_config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn compile(&self, source: &str) -> CompileOutput {
        let mut diagnostics = Diagnostics::new();
        self.compile_into(source, &mut diagnostics)
    }

    /// Compile `source`, appending its diagnostics to `diagnostics`.
    ///
    /// The output's `errors` lists everything in `diagnostics` afterwards.
    #[tracing::instrument(skip_all)]
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile_into(&self, source: &str, diagnostics: &mut Diagnostics) -> CompileOutput {
        let tree = self.parser.parse(source);
        let mut ctx = CompileContext::new(self.config.world());

        let code = if tree.tag() == Tag::Err {
            ctx.diagnostics.error(&tree, DiagnosticKind::SyntaxError);
            ctx.world = World::empty();
            String::new()
        } else {
            Generator::new(&mut ctx, self.phrases.as_ref())
                .with_indent(&self.config.indent)
                .generate(&tree)
        };

        let finished = ctx.finish();
        for diagnostic in finished.diagnostics.into_vec() {
            diagnostics.push(diagnostic);
        }
        tracing::debug!(
            errors = diagnostics.count(Severity::Error),
            warnings = diagnostics.count(Severity::Warning),
            infos = diagnostics.count(Severity::Info),
            "compiled"
        );

        let main = if self.config.wrap_main {
            format!("function*(puppy) {{\n{}{code}}}", prelude(&self.config.indent))
        } else {
            code.clone()
        };
        CompileOutput {
            hash: content_hash(&finished.world, &code),
            world: finished.world,
            live: finished.live,
            live_changes: Vec::new(),
            update: None,
            code,
            main,
            lines: finished.lines,
            errors: diagnostics.records(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puppy_parser::TreeNotation;

    const BALL: &str = "[#Source [#ApplyExpr@2:0 name=[#Name 'Circle'] [#Int '1'] [#Int '2'] \
        [#KeywordArgument name=[#Name 'width'] value=[#Int '10']]]]";

    #[test]
    fn main_wraps_the_body() {
        let output = Compiler::new(TreeNotation).compile("[#Source [#VarDecl left=[#Name 'x'] right=[#Int '1']]]");
        assert_eq!(
            output.main,
            "function*(puppy) {\n\tconst lib = puppy.lib;\n\tconst vars = puppy.vars;\n\tvars['x'] = 1;\n}"
        );
    }

    #[test]
    fn unwrapped_main_is_the_body() {
        let config = CompilerConfig {
            wrap_main: false,
            ..CompilerConfig::default()
        };
        let output = Compiler::new(TreeNotation)
            .with_config(config)
            .compile("[#Source [#Pass]]");
        assert_eq!(output.main, output.code);
    }

    #[test]
    fn side_tables_are_collected() {
        let output = Compiler::new(TreeNotation).compile(BALL);
        assert_eq!(output.lines, vec![2]);
        assert_eq!(output.live, vec![LiveRecord::new(1, "width", "10", 0)]);
        assert_eq!(output.hash.len(), 16);
    }

    #[test]
    fn syntax_errors_yield_an_empty_program() {
        let output = Compiler::new(TreeNotation).compile("[#Source [#Name 'x'");
        assert_eq!(output.errors.len(), 1);
        assert!(output.has_errors());
        assert!(output.world.is_empty());
        assert_eq!(output.code, "");
    }

    #[test]
    fn diagnostics_are_appended_to_the_caller_list() {
        let compiler = Compiler::new(TreeNotation);
        let mut diagnostics = Diagnostics::new();
        compiler.compile_into("[#Source [#Name 'a']]", &mut diagnostics);
        let output = compiler.compile_into("[#Source [#Name 'b']]", &mut diagnostics);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(output.errors.len(), 2);
    }

    #[test]
    fn module_literal() {
        let output = Compiler::new(TreeNotation).compile(BALL);
        let module = output.render_module();
        assert!(module.starts_with("{\n\tworld: {'width': 1000, 'height': 1000, 'mouse': true, 'background': 'white'},\n"));
        assert!(module.contains("\tlive: [{id: 1, key: 'width', value: 10, trace: 0}],\n"));
        assert!(module.contains("\tupdate: null,\n"));
        assert!(module.contains("\tlines: [2],\n"));
        assert!(module.ends_with(&format!("\thash: '{}'\n}}", output.hash)));
    }

    #[test]
    fn output_serializes_to_json() {
        let output = Compiler::new(TreeNotation).compile(BALL);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["world"]["width"], 1000.0);
        assert_eq!(json["live"][0]["key"], "width");
        assert_eq!(json["update"], serde_json::Value::Null);
    }
}
