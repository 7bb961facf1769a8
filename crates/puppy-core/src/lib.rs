//! Puppy core
//!
//! Shared vocabulary for the Puppy compiler phases.
//!
//! ## Modules
//!
//! - [`types`]: Type values and call signatures
//! - [`unify`]: Union-find type table, matching and signature instantiation
//! - [`operator`]: Operator normalization, typing and target templates
//! - [`error`]: Diagnostic kinds and severities
//! - [`diagnostic`]: The diagnostics collector
//! - [`literal`]: Literal values and target-code quoting
//! - [`pos`]: Source positions

pub mod diagnostic;
pub mod error;
pub mod literal;
pub mod operator;
pub mod pos;
pub mod types;
pub mod unify;

pub use diagnostic::{Diagnostic, DiagnosticRecord, Diagnostics, Located};
pub use error::{DiagnosticKind, Severity};
pub use literal::{Literal, quote};
pub use operator::{BinaryOp, LeftOperand, RightOperand, UnaryOp};
pub use pos::Pos;
pub use types::{Alpha, FuncSig, OptionSchema, TyVar, Type};
pub use unify::{Request, TypeTable};
