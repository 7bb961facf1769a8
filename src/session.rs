//! Live editing sessions.
//!
//! A [`LiveSession`] remembers the last successful compilation and fills in
//! the incremental parts of each new one: the code update when the program
//! only grew, and the live-value change when a single literal was edited.

use crate::{CompileOutput, Compiler, code_update, diff_live};

pub struct LiveSession {
    compiler: Compiler,
    previous: Option<CompileOutput>,
}

impl LiveSession {
    pub fn new(compiler: Compiler) -> Self {
        Self {
            compiler,
            previous: None,
        }
    }

    /// Compile `source` against the previous output.
    ///
    /// A compilation with errors gets no incremental parts and does not
    /// replace the previous output.
    pub fn compile(&mut self, source: &str) -> CompileOutput {
        let mut output = self.compiler.compile(source);
        if output.has_errors() {
            tracing::debug!("compile failed; previous output kept");
            return output;
        }

        if let Some(previous) = &self.previous {
            if previous.world != output.world {
                tracing::debug!("world changed; restart required");
            } else {
                if previous.hash != output.hash {
                    output.update = code_update(&previous.code, &output.code);
                }
                output.live_changes = diff_live(&previous.live, &output.live);
            }
        }
        self.previous = Some(output.clone());
        output
    }

    pub fn previous(&self) -> Option<&CompileOutput> {
        self.previous.as_ref()
    }

    /// Forget the previous output; the next compilation starts fresh.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puppy_parser::TreeNotation;

    fn session() -> LiveSession {
        LiveSession::new(Compiler::new(TreeNotation))
    }

    fn assign(name: &str, value: &str) -> String {
        format!("[#VarDecl left=[#Name '{name}'] right=[#Int '{value}']]")
    }

    #[test]
    fn appended_statements_become_an_update() {
        let mut s = session();
        let abc = [assign("a", "1"), assign("b", "2"), assign("c", "3")].join(" ");
        let first = s.compile(&format!("[#Source {abc}]"));
        assert_eq!(first.update, None);

        let second = s.compile(&format!("[#Source {abc} {}]", assign("d", "4")));
        assert_eq!(second.update.as_deref(), Some("\tvars['d'] = 4;\n"));
    }

    #[test]
    fn edits_in_the_middle_restart() {
        let mut s = session();
        s.compile(&format!("[#Source {} {} {}]", assign("a", "1"), assign("b", "2"), assign("c", "3")));
        let output = s.compile(&format!(
            "[#Source {} {} {} {}]",
            assign("a", "1"),
            assign("x", "2"),
            assign("c", "3"),
            assign("d", "4")
        ));
        assert_eq!(output.update, None);
    }

    #[test]
    fn literal_edit_is_a_live_change() {
        let mut s = session();
        let ball = |w: &str| {
            format!(
                "[#Source [#ApplyExpr name=[#Name 'Circle'] [#Int '1'] [#Int '2'] \
                   [#KeywordArgument name=[#Name 'width'] value=[#Int '{w}']]]]"
            )
        };
        s.compile(&ball("10"));
        let output = s.compile(&ball("20"));
        assert_eq!(output.live_changes.len(), 1);
        assert_eq!(output.live_changes[0].previous.as_deref(), Some("10"));
        assert_eq!(output.update, None);
    }

    #[test]
    fn failed_compiles_keep_the_previous_output() {
        let mut s = session();
        let good = s.compile(&format!("[#Source {}]", assign("a", "1")));
        let bad = s.compile("[#Source [#Name 'missing']]");
        assert!(bad.has_errors());
        assert_eq!(s.previous().map(|p| &p.hash), Some(&good.hash));
    }

    #[test]
    fn world_changes_give_no_update() {
        let mut s = session();
        s.compile(&format!("[#Source {}]", assign("a", "1")));
        let output = s.compile(&format!(
            "[#Source [#ApplyExpr name=[#Name 'World'] [#Int '500'] [#Int '500']] {} {}]",
            assign("a", "1"),
            assign("b", "2")
        ));
        assert_eq!(output.update, None);
        s.reset();
        assert!(s.previous().is_none());
    }
}
