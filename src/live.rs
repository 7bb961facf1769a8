//! Live-value changes between two compilations.

use puppy_compiler::LiveRecord;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// One property of one object that changed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LiveChange {
    pub id: u32,
    pub key: String,
    pub value: String,
    /// Value in the previous compilation; `None` for a new property.
    pub previous: Option<String>,
}

/// Property values that differ between `previous` and `current`,
/// correlated by object id and property name.
///
/// Only a single change can be animated; when more than one property
/// changed the patch is empty.
pub fn diff_live(previous: &[LiveRecord], current: &[LiveRecord]) -> Vec<LiveChange> {
    let before: FxHashMap<(u32, &str), &str> = previous
        .iter()
        .map(|r| ((r.id, r.key.as_str()), r.value.as_str()))
        .collect();

    let mut changes = Vec::new();
    for record in current {
        let old = before.get(&(record.id, record.key.as_str())).copied();
        if old == Some(record.value.as_str()) {
            continue;
        }
        changes.push(LiveChange {
            id: record.id,
            key: record.key.clone(),
            value: record.value.clone(),
            previous: old.map(str::to_string),
        });
    }

    if changes.len() > 1 {
        tracing::debug!(changes = changes.len(), "live patch discarded");
        return Vec::new();
    }
    changes
}
