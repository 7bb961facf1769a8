//! Incremental code updates.
//!
//! When an edit only appends statements, the runtime can keep the running
//! simulation and execute just the new tail. [`code_update`] finds that tail.

/// Code to run after `previous` to catch up with `current`, when `current`
/// only extends it.
///
/// Lines are compared with surrounding whitespace ignored. The fragment
/// starts at the last top-level line at or before the first new line, and
/// its suspension points are commented out.
pub fn code_update(previous: &str, current: &str) -> Option<String> {
    if current.len() <= previous.len() {
        tracing::trace!("no update: code did not grow");
        return None;
    }
    let old: Vec<&str> = previous.lines().collect();
    let new: Vec<&str> = current.lines().collect();
    if let Some(row) = old
        .iter()
        .zip(&new)
        .position(|(a, b)| a.trim() != b.trim())
    {
        tracing::debug!(row, "no update: code diverged");
        return None;
    }
    if new.len() <= old.len() {
        return None;
    }

    let top = new
        .iter()
        .find(|line| !line.trim().is_empty())
        .map_or(0, |line| indent_width(line));
    let mut start = old.len();
    while start > 0 && indent_width(new[start]) > top {
        start -= 1;
    }

    let mut update = String::new();
    for line in &new[start..] {
        let body = line.trim_start();
        if body == "yield" || body.starts_with("yield ") || body.starts_with("yield;") {
            update.push_str(&line[..line.len() - body.len()]);
            update.push_str("//");
            update.push_str(body);
        } else {
            update.push_str(line);
        }
        update.push('\n');
    }
    tracing::debug!(from = start, "update computed");
    Some(update)
}

fn indent_width(line: &str) -> usize {
    line.len() - line.trim_start().len()
}
