//! Per-compilation state.
//!
//! A [`CompileContext`] is created fresh for every compilation and owns the
//! type table, the diagnostics, the line table, the live-value log, the
//! world configuration and the object-id counter. Nothing is shared between
//! compilations.

use puppy_core::{Diagnostics, TypeTable};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::World;

/// A literal-valued option supplied to an object-construction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveRecord {
    /// Object id assigned to the construction call.
    pub id: u32,
    /// Canonical property name.
    pub key: String,
    /// Target-code text of the value.
    pub value: String,
    /// Line-table index of the statement.
    pub trace: usize,
}

impl LiveRecord {
    pub fn new(id: u32, key: impl Into<String>, value: impl Into<String>, trace: usize) -> Self {
        Self {
            id,
            key: key.into(),
            value: value.into(),
            trace,
        }
    }
}

/// State for one compilation.
#[derive(Debug)]
pub struct CompileContext {
    pub types: TypeTable,
    pub diagnostics: Diagnostics,
    pub world: World,
    world_configured: bool,
    lines: Vec<u32>,
    line_index: FxHashMap<u32, usize>,
    live: Vec<LiveRecord>,
    next_object_id: u32,
    local_names: FxHashMap<String, String>,
    statement_line: u32,
    pending_suspend: Option<usize>,
}

impl CompileContext {
    pub fn new(world: World) -> Self {
        Self {
            types: TypeTable::new(),
            diagnostics: Diagnostics::new(),
            world,
            world_configured: false,
            lines: Vec::new(),
            line_index: FxHashMap::default(),
            live: Vec::new(),
            next_object_id: 1,
            local_names: FxHashMap::default(),
            statement_line: 1,
            pending_suspend: None,
        }
    }

    // ==========================================================================
    // Line table
    // ==========================================================================

    /// Index of `line` in the line table, adding it on first use.
    pub fn line_index(&mut self, line: u32) -> usize {
        if let Some(&index) = self.line_index.get(&line) {
            return index;
        }
        let index = self.lines.len();
        self.lines.push(line);
        self.line_index.insert(line, index);
        index
    }

    pub fn lines(&self) -> &[u32] {
        &self.lines
    }

    /// Record the source line of the statement being generated.
    pub fn enter_statement(&mut self, line: u32) {
        self.statement_line = line;
    }

    /// Line-table index of the current statement.
    pub fn trace(&mut self) -> usize {
        self.line_index(self.statement_line)
    }

    // ==========================================================================
    // Suspension points
    // ==========================================================================

    /// Request a suspension point after the current statement.
    pub fn request_suspend(&mut self) {
        let trace = self.trace();
        self.pending_suspend = Some(trace);
    }

    pub fn take_suspend(&mut self) -> Option<usize> {
        self.pending_suspend.take()
    }

    /// Put back a suspension taken earlier, so it lands after the statement
    /// being generated instead of after a nested one.
    pub fn resume_suspend(&mut self, trace: Option<usize>) {
        if self.pending_suspend.is_none() {
            self.pending_suspend = trace;
        }
    }

    // ==========================================================================
    // Objects and live values
    // ==========================================================================

    /// Next object id; ids start at 1 and strictly increase.
    pub fn next_object_id(&mut self) -> u32 {
        let id = self.next_object_id;
        self.next_object_id += 1;
        id
    }

    pub fn record_live(&mut self, record: LiveRecord) {
        self.live.push(record);
    }

    pub fn live(&self) -> &[LiveRecord] {
        &self.live
    }

    /// Mark the world as configured; false if it already was.
    pub fn configure_world(&mut self) -> bool {
        !std::mem::replace(&mut self.world_configured, true)
    }

    // ==========================================================================
    // Names
    // ==========================================================================

    /// Target-code name for a local. Non-ASCII names get `_v<N>` in
    /// first-seen order.
    pub fn local_name(&mut self, name: &str) -> String {
        if name.is_ascii() {
            return name.to_string();
        }
        if let Some(mapped) = self.local_names.get(name) {
            return mapped.clone();
        }
        let mapped = format!("_v{}", self.local_names.len());
        self.local_names.insert(name.to_string(), mapped.clone());
        mapped
    }

    /// Split into the parts the compilation output keeps.
    pub fn finish(self) -> Finished {
        Finished {
            diagnostics: self.diagnostics,
            world: self.world,
            lines: self.lines,
            live: self.live,
        }
    }
}

/// What remains of a context once generation is done.
#[derive(Debug)]
pub struct Finished {
    pub diagnostics: Diagnostics,
    pub world: World,
    pub lines: Vec<u32>,
    pub live: Vec<LiveRecord>,
}
