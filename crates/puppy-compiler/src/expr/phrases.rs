//! Free-standing phrases and stray keyword arguments.

use puppy_core::{DiagnosticKind, Type};
use puppy_parser::{Label, ParseTree};

use crate::Generator;

impl Generator<'_> {
    /// A phrase used as a value. Only meaningful as the value of a keyword,
    /// where it is read as `"<keyword> is <phrase>"`.
    pub(crate) fn compile_phrase(&mut self, t: &ParseTree, out: &mut String) -> Type {
        let phrase = t.text();
        if let Some(key) = self.env.keyword().map(str::to_string) {
            let guess = self.lookup_phrase(t, &format!("{key} is {phrase}"));
            if let Some((_, value)) = guess.into_iter().find(|(k, _)| *k == key) {
                out.push_str(&value.to_code());
                return self.literal_type(&value);
            }
        }
        self.ctx.diagnostics.error(
            t,
            DiagnosticKind::UnrecognizedPhrase {
                phrase: phrase.to_string(),
            },
        );
        self.placeholder(out)
    }

    /// `key=value` outside an argument list.
    pub(crate) fn compile_stray_keyword(&mut self, t: &ParseTree, out: &mut String) -> Type {
        self.ctx
            .diagnostics
            .warning(t, DiagnosticKind::KeywordPosition);
        match t.get(Label::Value) {
            Some(value) => self.conv(value, out),
            None => self.placeholder(out),
        }
    }
}
