//! Blocks.

use puppy_parser::{ParseTree, Tag};

use crate::Generator;

impl Generator<'_> {
    /// `{`, each statement one level deeper, `}` at the current level.
    pub(crate) fn compile_block(&mut self, t: &ParseTree, out: &mut String) {
        out.push_str("{\n");
        self.env.nest();
        for stmt in t.args() {
            self.statement(stmt, out);
        }
        self.env.dedent();
        out.push_str(&self.indent());
        out.push('}');
    }

    /// A block, or a single statement wrapped as one.
    pub(crate) fn compile_body(&mut self, t: &ParseTree, out: &mut String) {
        if t.tag() == Tag::Block {
            self.compile_block(t, out);
            return;
        }
        out.push_str("{\n");
        self.env.nest();
        self.statement(t, out);
        self.env.dedent();
        out.push_str(&self.indent());
        out.push('}');
    }
}
