//! World configuration.
//!
//! `World(width, height, key=value...)` is the one call that emits no code:
//! it updates the [`World`] mapping from literal arguments, once, at the top
//! level.

use puppy_core::{DiagnosticKind, Literal};
use puppy_parser::{Label, ParseTree, Tag};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{Generator, keywords, literal_of};

/// Ordered world settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    entries: Vec<(String, Literal)>,
}

impl Default for World {
    fn default() -> Self {
        Self::empty()
            .with("width", Literal::number(1000.0))
            .with("height", Literal::number(1000.0))
            .with("mouse", Literal::Bool(true))
            .with("background", Literal::str("white"))
    }
}

impl World {
    /// A world with no settings, as reported for unparsable input.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: Literal) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: Literal) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Literal> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Literal)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Target-code object literal.
    pub fn render(&self) -> String {
        let body: Vec<String> = self
            .entries
            .iter()
            .map(|(k, v)| format!("{}: {}", puppy_core::quote(k), v.to_code()))
            .collect();
        format!("{{{}}}", body.join(", "))
    }
}

impl Serialize for World {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Whether a top-level statement is a call to the world configurator.
pub(crate) fn is_world_call(g: &Generator<'_>, t: &ParseTree) -> bool {
    t.tag() == Tag::ApplyExpr
        && t
            .token(Label::Name)
            .and_then(|name| g.env.get(name))
            .is_some_and(|s| s.effect == crate::Effect::World)
}

/// Apply a top-level `World(...)` statement.
pub(crate) fn configure(g: &mut Generator<'_>, t: &ParseTree) {
    if !g.ctx.configure_world() {
        g.ctx.diagnostics.error(t, DiagnosticKind::WorldOnce);
        return;
    }

    let mut positional = 0;
    for arg in t.args() {
        if arg.tag() == Tag::KeywordArgument {
            let Some(name) = arg.token(Label::Name) else {
                continue;
            };
            let key = keywords::canonical(name).unwrap_or(name).to_string();
            match arg.get(Label::Value).and_then(literal_of) {
                Some(value) => g.ctx.world.set(key, value),
                None => g.ctx.diagnostics.error(arg, DiagnosticKind::WorldLiteral),
            }
            continue;
        }
        let key = match positional {
            0 => "width",
            1 => "height",
            _ => {
                g.ctx.diagnostics.warning(
                    arg,
                    DiagnosticKind::TooManyArguments {
                        given: positional + 1,
                        accepted: 2,
                    },
                );
                break;
            }
        };
        positional += 1;
        match literal_of(arg) {
            Some(value) => g.ctx.world.set(key, value),
            None => g.ctx.diagnostics.error(arg, DiagnosticKind::WorldLiteral),
        }
    }
    tracing::debug!(world = %g.ctx.world.render(), "world configured");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let world = World::default();
        assert_eq!(
            world.render(),
            "{'width': 1000, 'height': 1000, 'mouse': true, 'background': 'white'}"
        );
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut world = World::default();
        world.set("width", Literal::number(500.0));
        world.set("gravity", Literal::number(0.5));
        let keys: Vec<_> = world.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["width", "height", "mouse", "background", "gravity"]);
        assert_eq!(world.get("width"), Some(&Literal::number(500.0)));
    }

    #[test]
    fn serializes_as_object() {
        let json = serde_json::to_string(&World::default()).unwrap();
        assert_eq!(
            json,
            r#"{"width":1000.0,"height":1000.0,"mouse":true,"background":"white"}"#
        );
    }

    #[test]
    fn empty_world() {
        assert!(World::empty().is_empty());
        assert_eq!(World::empty().render(), "{}");
    }
}
