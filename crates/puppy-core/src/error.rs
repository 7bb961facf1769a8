//! Diagnostic kinds reported while compiling a Puppy program.
//!
//! Every semantic issue the generator finds is one [`DiagnosticKind`]. The
//! `Display` rendering is the message shown in the editor; the severity is
//! chosen by the reporting site (see [`Diagnostics`](crate::Diagnostics)).
//!
//! ## Categories
//!
//! ```text
//! DiagnosticKind
//! ├── names      - UndefinedName, Redefined, Immutable, RequiredIdentifier
//! ├── types      - TypeMismatch, AllElementsSameType, NotIterable, NotAFunction
//! ├── calls      - MissingArguments, TooManyArguments, UnknownPackage
//! ├── keywords   - UnknownKeyword, KeywordPosition, DuplicateKeyword, KeywordCorrected
//! ├── phrases    - UnrecognizedPhrase, PhraseResolved
//! ├── control    - OnlyInLoop, OnlyInFunction, YieldInFunction, ReturnValueIgnored, MustReturnValue
//! └── world      - WorldOnce, WorldLiteral
//! ```

use serde::Serialize;
use thiserror::Error;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong (or what was inferred) at a source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    // ========================================================================
    // Names
    // ========================================================================
    #[error("'{name}' is not defined")]
    UndefinedName { name: String },

    #[error("'{name}' is already defined and will be replaced")]
    Redefined { name: String },

    #[error("'{name}' cannot be reassigned")]
    Immutable { name: String },

    #[error("a variable name is required here")]
    RequiredIdentifier,

    // ========================================================================
    // Types
    // ========================================================================
    #[error("type error (expected {request}, found {given})")]
    TypeMismatch { request: String, given: String },

    #[error("all elements of a list must have the same type ({first} vs {given})")]
    AllElementsSameType { first: String, given: String },

    #[error("{given} cannot be iterated; use a list or a string")]
    NotIterable { given: String },

    #[error("'{name}' is not a function")]
    NotAFunction { name: String },

    #[error("unknown type name '{name}'; did you make a typo?")]
    UnknownTypeName { name: String },

    #[error("tuples of {len} elements are not supported; compiled as a list")]
    LongTuple { len: usize },

    // ========================================================================
    // Calls
    // ========================================================================
    #[error("not enough arguments: {given} given, {required} required")]
    MissingArguments { given: usize, required: usize },

    #[error("too many arguments: {given} given, {accepted} accepted")]
    TooManyArguments { given: usize, accepted: usize },

    #[error("unknown package '{name}'")]
    UnknownPackage { name: String },

    #[error("'{name}' found in package '{package}'; imported automatically")]
    InferredPackage { name: String, package: String },

    // ========================================================================
    // Keywords
    // ========================================================================
    #[error("{name}? did you make a typo?")]
    UnknownKeyword { name: String },

    #[error("keyword argument cannot be used here")]
    KeywordPosition,

    #[error("keyword '{name}' is already given")]
    DuplicateKeyword { name: String },

    #[error("{from} => {to}")]
    KeywordCorrected { from: String, to: String },

    #[error("'{name}' is set automatically and cannot be given")]
    ReservedKeyword { name: String },

    // ========================================================================
    // Phrases
    // ========================================================================
    #[error("cannot understand '{phrase}'")]
    UnrecognizedPhrase { phrase: String },

    #[error("{note}")]
    PhraseResolved { note: String },

    // ========================================================================
    // Control flow
    // ========================================================================
    #[error("{keyword} can only be used inside a for loop")]
    OnlyInLoop { keyword: String },

    #[error("{keyword} can only be used inside a function")]
    OnlyInFunction { keyword: String },

    #[error("yield cannot be used inside a function")]
    YieldInFunction,

    #[error("this return value is ignored")]
    ReturnValueIgnored,

    #[error("this function must return a value of type {ret}")]
    MustReturnValue { ret: String },

    // ========================================================================
    // World
    // ========================================================================
    #[error("World(...) can only be used once, at the top level")]
    WorldOnce,

    #[error("World(...) settings must be literal values")]
    WorldLiteral,

    // ========================================================================
    // Structure
    // ========================================================================
    #[error("syntax error; check the grammar")]
    SyntaxError,

    #[error("'{construct}' cannot be used here")]
    UnexpectedConstruct { construct: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_interpolate_fields() {
        let kind = DiagnosticKind::TypeMismatch {
            request: "number".into(),
            given: "string".into(),
        };
        assert_eq!(kind.to_string(), "type error (expected number, found string)");
        let kind = DiagnosticKind::KeywordCorrected {
            from: "色".into(),
            to: "fillStyle".into(),
        };
        assert_eq!(kind.to_string(), "色 => fillStyle");
    }

    #[test]
    fn severity_names() {
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Warning.as_str(), "warning");
    }
}
