//! Diagnostics collector.
//!
//! Diagnostics are appended in encounter order and never removed. A
//! compilation keeps going after any of them; the generator substitutes a
//! placeholder and continues.

use serde::Serialize;

use crate::{DiagnosticKind, Pos, Severity};

/// Anything a diagnostic can be attached to.
pub trait Located {
    fn pos(&self) -> Pos;

    /// Raw source text of the construct.
    fn snippet(&self) -> String;
}

/// A single reported issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub pos: Pos,
    pub snippet: String,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Editor-facing record for this diagnostic.
    pub fn record(&self) -> DiagnosticRecord {
        DiagnosticRecord {
            kind: self.severity,
            row: self.pos.row(),
            text: self.message(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.pos, self.kind)
    }
}

/// The `(kind, row, text)` triple handed to the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticRecord {
    #[serde(rename = "type")]
    pub kind: Severity,
    pub row: u32,
    pub text: String,
}

/// Ordered collection of diagnostics for one compilation.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, severity: Severity, at: &impl Located, kind: DiagnosticKind) {
        self.items.push(Diagnostic {
            severity,
            pos: at.pos(),
            snippet: at.snippet(),
            kind,
        });
    }

    pub fn error(&mut self, at: &impl Located, kind: DiagnosticKind) {
        self.report(Severity::Error, at, kind);
    }

    pub fn warning(&mut self, at: &impl Located, kind: DiagnosticKind) {
        self.report(Severity::Warning, at, kind);
    }

    pub fn info(&mut self, at: &impl Located, kind: DiagnosticKind) {
        self.report(Severity::Info, at, kind);
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.items.iter().filter(|d| d.severity == severity).count()
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.items.iter().map(Diagnostic::record).collect()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl Located for Pos {
    fn pos(&self) -> Pos {
        *self
    }

    fn snippet(&self) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_in_order_with_rows() {
        let mut diags = Diagnostics::new();
        diags.error(&Pos::new(0, 3, 4), DiagnosticKind::SyntaxError);
        diags.warning(&Pos::new(0, 3, -1), DiagnosticKind::KeywordPosition);
        diags.info(
            &Pos::new(0, 1, 0),
            DiagnosticKind::PhraseResolved { note: "ok".into() },
        );

        let records = diags.records();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].row, 2);
        assert_eq!(records[1].row, 1);
        assert_eq!(records[2].kind, Severity::Info);
        assert_eq!(records[2].text, "ok");
        assert!(diags.has_errors());
        assert_eq!(diags.count(Severity::Warning), 1);
    }

    #[test]
    fn empty_has_no_errors() {
        let diags = Diagnostics::new();
        assert!(diags.is_empty());
        assert!(!diags.has_errors());
    }
}
