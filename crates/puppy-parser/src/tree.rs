//! The parse tree handed to the code generator.

use std::fmt;

use puppy_core::{Located, Pos, quote};

use crate::{Label, Tag};

/// An immutable, positioned parse-tree node.
///
/// Children are ordered; each may carry a [`Label`]. Token nodes carry their
/// source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    tag: Tag,
    children: Vec<(Option<Label>, ParseTree)>,
    text: Option<String>,
    pos: Pos,
}

impl ParseTree {
    pub fn new(tag: Tag, pos: Pos) -> Self {
        Self {
            tag,
            children: Vec::new(),
            text: None,
            pos,
        }
    }

    /// A token node.
    pub fn leaf(tag: Tag, text: impl Into<String>, pos: Pos) -> Self {
        Self {
            tag,
            children: Vec::new(),
            text: Some(text.into()),
            pos,
        }
    }

    /// The tree a parser returns when it cannot read the input.
    pub fn error(pos: Pos, message: impl Into<String>) -> Self {
        Self::leaf(Tag::Err, message, pos)
    }

    /// Append a labeled child.
    pub fn with(mut self, label: Label, child: ParseTree) -> Self {
        self.children.push((Some(label), child));
        self
    }

    /// Append an unlabeled child.
    pub fn push(mut self, child: ParseTree) -> Self {
        self.children.push((None, child));
        self
    }

    pub(crate) fn add(&mut self, label: Option<Label>, child: ParseTree) {
        self.children.push((label, child));
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    #[inline]
    pub fn is_err(&self) -> bool {
        self.tag == Tag::Err
    }

    /// First child with the given label.
    pub fn get(&self, label: Label) -> Option<&ParseTree> {
        self.children
            .iter()
            .find(|(l, _)| *l == Some(label))
            .map(|(_, t)| t)
    }

    pub fn has(&self, label: Label) -> bool {
        self.get(label).is_some()
    }

    /// All children with their labels.
    pub fn subs(&self) -> impl Iterator<Item = (Option<Label>, &ParseTree)> {
        self.children.iter().map(|(l, t)| (*l, t))
    }

    /// Unlabeled children, in order.
    pub fn args(&self) -> impl Iterator<Item = &ParseTree> {
        self.children
            .iter()
            .filter(|(l, _)| l.is_none())
            .map(|(_, t)| t)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Token text, or the empty string for inner nodes.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Token text of a labeled child.
    pub fn token(&self, label: Label) -> Option<&str> {
        self.get(label).map(ParseTree::text)
    }

    /// Token texts of every leaf, in order, joined by single spaces.
    pub fn source_text(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        if let Some(text) = &self.text {
            parts.push(text);
        }
        for (_, child) in &self.children {
            child.collect_text(parts);
        }
    }
}

impl Located for ParseTree {
    fn pos(&self) -> Pos {
        self.pos
    }

    fn snippet(&self) -> String {
        self.source_text()
    }
}

impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[#{}", self.tag)?;
        for (label, child) in &self.children {
            match label {
                Some(label) => write!(f, " {label}={child}")?,
                None => write!(f, " {child}")?,
            }
        }
        if let Some(text) = &self.text {
            write!(f, " {}", quote(text))?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> ParseTree {
        ParseTree::leaf(Tag::Name, text, Pos::line(1))
    }

    #[test]
    fn labeled_and_unlabeled_children() {
        let call = ParseTree::new(Tag::ApplyExpr, Pos::line(2))
            .with(Label::Name, name("Circle"))
            .push(ParseTree::leaf(Tag::Int, "100", Pos::line(2)))
            .push(ParseTree::leaf(Tag::Int, "200", Pos::line(2)));

        assert_eq!(call.token(Label::Name), Some("Circle"));
        assert_eq!(call.args().count(), 2);
        assert_eq!(call.len(), 3);
        assert!(!call.has(Label::Body));
    }

    #[test]
    fn renders_notation() {
        let call = ParseTree::new(Tag::ApplyExpr, Pos::line(1))
            .with(Label::Name, name("print"))
            .push(ParseTree::leaf(Tag::String, "it's", Pos::line(1)));
        assert_eq!(
            call.to_string(),
            "[#ApplyExpr name=[#Name 'print'] [#String 'it\\'s']]"
        );
    }

    #[test]
    fn snippet_joins_leaves() {
        let infix = ParseTree::new(Tag::Infix, Pos::line(1))
            .with(Label::Left, name("x"))
            .with(Label::Name, ParseTree::leaf(Tag::Token, "+", Pos::line(1)))
            .with(Label::Right, ParseTree::leaf(Tag::Int, "1", Pos::line(1)));
        assert_eq!(infix.snippet(), "x + 1");
    }
}
