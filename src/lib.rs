//! Puppy
//!
//! Incremental compiler for the Puppy dialect: a small, natural-language
//! flavoured scripting language driving a physics simulation.
//!
//! ## Architecture
//!
//! - **Parsing**: any [`SourceParser`]; [`TreeNotation`] reads the bracketed
//!   tree notation
//! - **Generation**: `puppy-compiler` type-checks the tree and writes a
//!   resumable procedure body
//! - **Live editing**: [`LiveSession`] compares each compilation with the
//!   previous one
//!
//! ## Modules
//!
//! - [`unit`]: The compilation pipeline and its output record
//! - [`config`]: Compiler configuration
//! - [`diff`]: Code updates for programs that only grew
//! - [`live`]: Live-value changes
//! - [`session`]: Live editing sessions

pub mod config;
pub mod diff;
pub mod live;
pub mod session;
pub mod unit;

pub use config::{CompilerConfig, ConfigError};
pub use diff::code_update;
pub use live::{LiveChange, diff_live};
pub use session::LiveSession;
pub use unit::{CompileOutput, Compiler, content_hash};

pub use puppy_compiler::{
    KnowledgeBase, KnowledgeBaseError, LiveRecord, NoPhrases, PhraseGuess, PhraseLookup, World,
};
pub use puppy_core::{Diagnostic, DiagnosticKind, DiagnosticRecord, Diagnostics, Severity};
pub use puppy_parser::{NotationError, ParseTree, SourceParser, TreeNotation};
