//! Phrase fallback.
//!
//! Free-form phrases that are not names or keywords are resolved into
//! property guesses through a [`PhraseLookup`]. The generator does not care
//! how guesses are made; [`KnowledgeBase`] is a dictionary-backed
//! implementation, [`NoPhrases`] never guesses.

use puppy_core::Literal;
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Ordered property guesses for a phrase.
pub type PhraseGuess = Vec<(String, Literal)>;

/// Resolves a phrase into property guesses.
///
/// Notes pushed to `notes` are reported to the user as info diagnostics.
pub trait PhraseLookup {
    fn lookup(&self, phrase: &str, notes: &mut Vec<String>) -> PhraseGuess;
}

/// A lookup that never recognizes anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPhrases;

impl PhraseLookup for NoPhrases {
    fn lookup(&self, _phrase: &str, _notes: &mut Vec<String>) -> PhraseGuess {
        Vec::new()
    }
}

/// Errors raised while loading a knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("line {line}: invalid JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("line {line}: properties must be a JSON object")]
    NotAnObject { line: usize },

    #[error("line {line}: undefined parent '{parent}'")]
    UndefinedParent { line: usize, parent: String },
}

type Result<T> = std::result::Result<T, KnowledgeBaseError>;

/// Key that marks an entry as naming a property (`色 {"property": "fillStyle"}`).
const PROPERTY: &str = "property";

/// A static phrase dictionary.
///
/// Entry lines have the form `key[, key...] [<: parent] {json}`; the entry
/// inherits the parent's properties and overrides them with its own. Lines
/// starting with `#` are comments.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: FxHashMap<String, PhraseGuess>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Result<Self> {
        let mut kb = Self::new();
        kb.load(text)?;
        Ok(kb)
    }

    /// Load entry lines.
    pub fn load(&mut self, text: &str) -> Result<()> {
        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            if raw.trim_start().starts_with('#') {
                continue;
            }
            let Some(brace) = raw.find('{') else {
                continue;
            };
            let (head, json) = raw.split_at(brace);
            let mut props = parse_props(json, line)?;

            let keys = match head.split_once("<:") {
                Some((keys, parent)) => {
                    let parent = parent.trim();
                    let Some(base) = self.entries.get(parent) else {
                        return Err(KnowledgeBaseError::UndefinedParent {
                            line,
                            parent: parent.to_string(),
                        });
                    };
                    let mut merged = base.clone();
                    merge(&mut merged, props);
                    props = merged;
                    keys
                }
                None => head,
            };

            for key in keys.split(',').map(str::trim).filter(|k| !k.is_empty()) {
                if self.entries.contains_key(key) {
                    tracing::warn!(key, line, "knowledge base entry redefined");
                }
                self.entries.insert(key.to_string(), props.clone());
            }
        }
        Ok(())
    }

    /// Load `word value` lines as entries setting `property` to `value`.
    ///
    /// With a suffix (e.g. `色`), both the bare word and the word with the
    /// suffix are registered.
    pub fn load_words(&mut self, text: &str, property: &str, suffix: Option<&str>) {
        for raw in text.lines() {
            if raw.trim_start().starts_with('#') {
                continue;
            }
            let mut parts = raw.split_whitespace();
            let (Some(word), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
                continue;
            };
            let word = suffix
                .and_then(|s| word.strip_suffix(s))
                .unwrap_or(word);
            let props = vec![(property.to_string(), Literal::str(value))];
            self.add(word.to_string(), props.clone());
            if let Some(suffix) = suffix {
                self.add(format!("{word}{suffix}"), props);
            }
        }
    }

    /// Add or merge an entry.
    pub fn add(&mut self, key: String, props: PhraseGuess) {
        merge(self.entries.entry(key).or_default(), props);
    }

    pub fn get(&self, key: &str) -> Option<&PhraseGuess> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact entry, or the longest known suffix of the phrase. The dropped
    /// prefix is resolved the same way and applied as a modifier.
    fn find(&self, phrase: &str, notes: &mut Vec<String>) -> PhraseGuess {
        for (start, _) in phrase.char_indices() {
            let (prefix, word) = phrase.split_at(start);
            let Some(props) = self.entries.get(word) else {
                continue;
            };
            let mut found = props.clone();
            if start > 0 {
                notes.push(format!("'{phrase}' was read as '{word}'"));
                let modifier = prefix.strip_suffix('の').unwrap_or(prefix);
                let extra = self.find(modifier, notes);
                merge(&mut found, extra);
            }
            return found;
        }
        Vec::new()
    }

    fn find_value(&self, phrase: &str, property: &str, notes: &mut Vec<String>) -> Option<Literal> {
        self.find(phrase, notes)
            .into_iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v)
    }
}

impl PhraseLookup for KnowledgeBase {
    fn lookup(&self, phrase: &str, notes: &mut Vec<String>) -> PhraseGuess {
        tracing::trace!(phrase, "phrase lookup");
        if let Some((key, value)) = split_property(phrase) {
            let property = self
                .find_value(key, PROPERTY, notes)
                .and_then(|p| p.as_str().map(str::to_string))
                .unwrap_or_else(|| key.to_string());
            return self
                .find_value(value, &property, notes)
                .map(|value| vec![(property, value)])
                .unwrap_or_default();
        }
        self.find(phrase, notes)
    }
}

/// Split `"<key> is <value>"` or `"<key>は<value>"`.
fn split_property(phrase: &str) -> Option<(&str, &str)> {
    let (key, value) = phrase
        .split_once(" is ")
        .or_else(|| phrase.split_once('は'))?;
    let (key, value) = (key.trim(), value.trim());
    (!key.is_empty() && !value.is_empty()).then_some((key, value))
}

fn parse_props(json: &str, line: usize) -> Result<PhraseGuess> {
    let value: serde_json::Value =
        serde_json::from_str(json.trim()).map_err(|source| KnowledgeBaseError::Json { line, source })?;
    let serde_json::Value::Object(map) = value else {
        return Err(KnowledgeBaseError::NotAnObject { line });
    };
    Ok(map
        .into_iter()
        .filter_map(|(k, v)| to_literal(v).map(|lit| (k, lit)))
        .collect())
}

fn to_literal(value: serde_json::Value) -> Option<Literal> {
    match value {
        serde_json::Value::Null => Some(Literal::Null),
        serde_json::Value::Bool(b) => Some(Literal::Bool(b)),
        serde_json::Value::Number(n) => n.as_f64().map(Literal::number),
        serde_json::Value::String(s) => Some(Literal::Str(s)),
        _ => None,
    }
}

fn merge(base: &mut PhraseGuess, extra: PhraseGuess) {
    for (key, value) in extra {
        match base.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => base.push((key, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DICT: &str = r#"
# shapes
ボール, ball {"shape": "circle", "restitution": 0.8}
サッカーボール <: ボール {"fillStyle": "white"}
壁 {"shape": "rectangle", "isStatic": true}
よく跳ねる {"restitution": 1.2}
色 {"property": "fillStyle"}
"#;

    fn kb() -> KnowledgeBase {
        let mut kb = KnowledgeBase::from_text(DICT).unwrap();
        kb.load_words("赤 red\n緑 green\n", "fillStyle", Some("色"));
        kb
    }

    fn value<'a>(guess: &'a PhraseGuess, key: &str) -> Option<&'a Literal> {
        guess.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    #[test]
    fn exact_entries_and_inheritance() {
        let kb = kb();
        let mut notes = Vec::new();
        let guess = kb.lookup("サッカーボール", &mut notes);
        assert_eq!(value(&guess, "shape"), Some(&Literal::str("circle")));
        assert_eq!(value(&guess, "fillStyle"), Some(&Literal::str("white")));
        assert!(notes.is_empty());
        assert!(kb.get("ball").is_some());
    }

    #[test]
    fn suffix_fallback_merges_modifier() {
        let kb = kb();
        let mut notes = Vec::new();
        let guess = kb.lookup("赤のボール", &mut notes);
        assert_eq!(value(&guess, "shape"), Some(&Literal::str("circle")));
        assert_eq!(value(&guess, "fillStyle"), Some(&Literal::str("red")));
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn property_forms() {
        let kb = kb();
        let mut notes = Vec::new();
        let guess = kb.lookup("色は緑", &mut notes);
        assert_eq!(guess, vec![("fillStyle".to_string(), Literal::str("green"))]);
        let guess = kb.lookup("fillStyle is 赤", &mut notes);
        assert_eq!(guess, vec![("fillStyle".to_string(), Literal::str("red"))]);
    }

    #[test]
    fn property_forms_do_not_fall_back_to_the_entity() {
        let kb = kb();
        let mut notes = Vec::new();
        assert!(kb.lookup("width is ボール", &mut notes).is_empty());
        assert!(kb.lookup("fillStyle is ボール", &mut notes).is_empty());
    }

    #[test]
    fn unknown_phrase_is_empty() {
        let kb = kb();
        let mut notes = Vec::new();
        assert!(kb.lookup("xyz", &mut notes).is_empty());
        assert!(NoPhrases.lookup("ボール", &mut notes).is_empty());
    }

    #[test]
    fn load_errors() {
        assert!(matches!(
            KnowledgeBase::from_text("a <: missing {}"),
            Err(KnowledgeBaseError::UndefinedParent { line: 1, .. })
        ));
        assert!(matches!(
            KnowledgeBase::from_text("a {oops"),
            Err(KnowledgeBaseError::Json { line: 1, .. })
        ));
    }
}
