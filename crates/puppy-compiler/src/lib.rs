//! Puppy compiler
//!
//! Type-checking code generator: walks a parse tree once, inferring types,
//! reporting diagnostics and writing the body of a resumable target-code
//! generator function.
//!
//! ## Architecture
//!
//! - **Environment**: one persistent name map, entered and exited per frame
//! - **Generation**: a single pass; every statement is checked and emitted
//!   in order, followed by a suspension point if it had a visible effect
//!
//! ## Modules
//!
//! - [`generator`]: The tree walker and its dispatch
//! - [`expr`]: Expression handlers
//! - [`stmt`]: Statement handlers
//! - [`env`]: Symbols, frames and scoped state
//! - [`context`]: Per-compilation state (types, diagnostics, line table)
//! - [`builtins`]: Prelude and package catalogue
//! - [`keywords`]: Keyword aliases and property types
//! - [`phrase`]: Natural-language phrase lookup
//! - [`world`]: The world configuration call

pub mod builtins;
pub mod context;
pub mod env;
pub mod expr;
pub mod generator;
pub mod keywords;
pub mod phrase;
pub mod stmt;
pub mod world;

pub use context::{CompileContext, Finished, LiveRecord};
pub use env::{CallStyle, Effect, Env, FunctionFrame, ScopeFlags, Symbol};
pub use expr::literal_of;
pub use generator::Generator;
pub use phrase::{KnowledgeBase, KnowledgeBaseError, NoPhrases, PhraseGuess, PhraseLookup};
pub use world::World;

#[cfg(test)]
pub(crate) mod test_support {
    use puppy_core::Type;
    use puppy_parser::read;

    use crate::{CompileContext, Generator, NoPhrases, PhraseLookup, World};

    pub fn generate(notation: &str) -> (String, CompileContext) {
        generate_with(&NoPhrases, notation)
    }

    pub fn generate_with(phrases: &dyn PhraseLookup, notation: &str) -> (String, CompileContext) {
        let tree = read(notation).unwrap();
        let mut ctx = CompileContext::new(World::default());
        let code = Generator::new(&mut ctx, phrases).generate(&tree);
        (code, ctx)
    }

    /// Generate a single expression outside any statement.
    pub fn expr(notation: &str) -> (String, Type) {
        let tree = read(notation).unwrap();
        let mut ctx = CompileContext::new(World::default());
        let mut out = String::new();
        let ty = Generator::new(&mut ctx, &NoPhrases).conv(&tree, &mut out);
        (out, ctx.types.resolve(&ty))
    }
}
