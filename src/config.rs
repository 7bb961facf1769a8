//! Compiler configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration.
//!
//! ```
//! use puppy::CompilerConfig;
//!
//! let config = CompilerConfig::from_json(r#"{"indent": "  ", "world": {"width": 800}}"#).unwrap();
//! assert_eq!(config.indent, "  ");
//! ```

use std::collections::BTreeMap;

use puppy_compiler::World;
use puppy_core::Literal;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("indent unit must be non-empty whitespace, found {0:?}")]
    Indent(String),
}

/// Settings of a [`Compiler`](crate::Compiler).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// One level of indentation in the generated code.
    pub indent: String,
    /// World settings applied over the built-in defaults, in key order.
    pub world: BTreeMap<String, Literal>,
    /// Wrap the body in the `function*(puppy)` procedure literal.
    pub wrap_main: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
            world: BTreeMap::new(),
            wrap_main: true,
        }
    }
}

impl CompilerConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        if config.indent.is_empty() || !config.indent.chars().all(char::is_whitespace) {
            return Err(ConfigError::Indent(config.indent));
        }
        Ok(config)
    }

    /// The world a compilation starts from.
    pub fn world(&self) -> World {
        let mut world = World::default();
        for (key, value) in &self.world {
            world.set(key.clone(), value.clone());
        }
        world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_the_default() {
        assert_eq!(
            CompilerConfig::from_json("{}").unwrap(),
            CompilerConfig::default()
        );
    }

    #[test]
    fn world_overrides_keep_default_order() {
        let config =
            CompilerConfig::from_json(r#"{"world": {"height": 600, "gravity": 0.5}}"#).unwrap();
        let world = config.world();
        let keys: Vec<&str> = world.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["width", "height", "mouse", "background", "gravity"]);
        assert_eq!(world.get("height"), Some(&Literal::number(600.0)));
    }

    #[test]
    fn invalid_configurations() {
        assert!(matches!(
            CompilerConfig::from_json("{\"indent\": 4}"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            CompilerConfig::from_json("{\"indent\": \"x\"}"),
            Err(ConfigError::Indent(_))
        ));
    }
}
