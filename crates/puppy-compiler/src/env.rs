//! Name environment for code generation.
//!
//! This module provides [`Env`], which tracks every visible symbol while the
//! generator walks a program. It handles:
//! - A single persistent name map with a per-frame restore log
//! - Scoped typed state (loop flag, function frame, class, indent, keyword)
//! - Imported package aliases
//!
//! Frames are entered and exited in pairs. The first time a name is touched
//! inside a frame its previous symbol (or absence) is logged; `exit` replays
//! the log so the map looks exactly as it did on `enter`.

use bitflags::bitflags;
use puppy_core::Type;
use rustc_hash::{FxHashMap, FxHashSet};

// ============================================================================
// Symbols
// ============================================================================

/// Side effect performed by calling a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Effect {
    None,
    /// Creates a simulation object; gets an object id and a trace.
    Construct,
    /// Visible to the user (output, or a user function that constructs).
    Observable,
    /// Configures the world; only legal as a top-level statement.
    World,
}

/// How a call to the symbol is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallStyle {
    /// `code(args)`; a method receiver becomes the first argument.
    Function,
    /// `new code(args)`.
    Constructor,
    /// `recv.code(args)`.
    Method,
}

/// A named entity visible to the program.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    /// Target-code expression for the name.
    pub code: String,
    pub mutable: bool,
    pub ty: Type,
    pub effect: Effect,
    pub style: CallStyle,
}

impl Symbol {
    /// An assignable variable.
    pub fn var(code: impl Into<String>, ty: Type) -> Self {
        Self {
            code: code.into(),
            mutable: true,
            ty,
            effect: Effect::None,
            style: CallStyle::Function,
        }
    }

    /// A read-only value or function.
    pub fn value(code: impl Into<String>, ty: Type) -> Self {
        Self {
            mutable: false,
            ..Self::var(code, ty)
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }

    pub fn with_style(mut self, style: CallStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether the symbol lives in the runtime's global variable table.
    pub fn is_global(&self) -> bool {
        self.code.starts_with("vars[")
    }
}

// ============================================================================
// Scoped state
// ============================================================================

bitflags! {
    /// Flags describing the construct currently being generated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ScopeFlags: u8 {
        const IN_LOOP = 1 << 0;
        const IN_FUNCTION = 1 << 1;
        const IN_CLASS = 1 << 2;
    }
}

/// State of the function (or lambda) whose body is being generated.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionFrame {
    /// Return type, usually a variable fixed by the first `return`.
    pub ret: Type,
    /// A value was returned somewhere in the body.
    pub has_return: bool,
    /// The body performs an object construction or observable effect.
    pub has_effect: bool,
}

impl FunctionFrame {
    pub fn new(ret: Type) -> Self {
        Self {
            ret,
            has_return: false,
            has_effect: false,
        }
    }
}

#[derive(Debug, Default)]
struct Frame {
    log: Vec<(String, Option<Symbol>)>,
    touched: FxHashSet<String>,
    flags: ScopeFlags,
    functions: usize,
    class_name: Option<String>,
    indent: usize,
    keyword: Option<String>,
}

// ============================================================================
// Env
// ============================================================================

/// The generator's view of names and scoped state.
#[derive(Debug, Default)]
pub struct Env {
    symbols: FxHashMap<String, Symbol>,
    modules: FxHashMap<String, &'static str>,
    frames: Vec<Frame>,
    flags: ScopeFlags,
    functions: Vec<FunctionFrame>,
    class_name: Option<String>,
    indent: usize,
    keyword: Option<String>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Frames
    // ==========================================================================

    /// Open a frame, saving the scoped state.
    pub fn enter(&mut self) {
        self.frames.push(Frame {
            log: Vec::new(),
            touched: FxHashSet::default(),
            flags: self.flags,
            functions: self.functions.len(),
            class_name: self.class_name.clone(),
            indent: self.indent,
            keyword: self.keyword.clone(),
        });
    }

    /// Close the innermost frame, reverting every name it touched.
    pub fn exit(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        for (name, prior) in frame.log.into_iter().rev() {
            match prior {
                Some(symbol) => {
                    self.symbols.insert(name, symbol);
                }
                None => {
                    self.symbols.remove(&name);
                }
            }
        }
        self.flags = frame.flags;
        self.functions.truncate(frame.functions);
        self.class_name = frame.class_name;
        self.indent = frame.indent;
        self.keyword = frame.keyword;
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    // ==========================================================================
    // Names
    // ==========================================================================

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Bind a name in the current frame.
    pub fn set(&mut self, name: impl Into<String>, symbol: Symbol) {
        let name = name.into();
        if let Some(frame) = self.frames.last_mut()
            && frame.touched.insert(name.clone())
        {
            frame.log.push((name.clone(), self.symbols.get(&name).cloned()));
        }
        self.symbols.insert(name, symbol);
    }

    pub fn import_module(&mut self, alias: impl Into<String>, package: &'static str) {
        self.modules.insert(alias.into(), package);
    }

    /// Package bound to an import alias.
    pub fn module(&self, alias: &str) -> Option<&'static str> {
        self.modules.get(alias).copied()
    }

    // ==========================================================================
    // Scoped state
    // ==========================================================================

    pub fn flags(&self) -> ScopeFlags {
        self.flags
    }

    pub fn insert_flags(&mut self, flags: ScopeFlags) {
        self.flags.insert(flags);
    }

    pub fn remove_flags(&mut self, flags: ScopeFlags) {
        self.flags.remove(flags);
    }

    pub fn in_loop(&self) -> bool {
        self.flags.contains(ScopeFlags::IN_LOOP)
    }

    pub fn in_function(&self) -> bool {
        self.flags.contains(ScopeFlags::IN_FUNCTION)
    }

    /// Top level: not inside a function, loop or class body.
    pub fn is_top_level(&self) -> bool {
        self.flags.is_empty()
    }

    /// Install a function frame; it is dropped when the enclosing frame exits.
    pub fn push_function(&mut self, frame: FunctionFrame) {
        self.functions.push(frame);
        self.flags.insert(ScopeFlags::IN_FUNCTION);
        self.flags.remove(ScopeFlags::IN_LOOP);
    }

    pub fn function(&self) -> Option<&FunctionFrame> {
        self.functions.last()
    }

    pub fn function_mut(&mut self) -> Option<&mut FunctionFrame> {
        self.functions.last_mut()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    pub fn set_class_name(&mut self, name: impl Into<String>) {
        self.class_name = Some(name.into());
        self.flags.insert(ScopeFlags::IN_CLASS);
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    pub fn nest(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Canonical keyword whose value is being generated.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    pub fn set_keyword(&mut self, key: impl Into<String>) {
        self.keyword = Some(key.into());
    }
}
