//! Abstract Syntax Tree (AST) for regex patterns
//!
//! This module defines the tree the parser builds over a token stream.
//! Nodes are uniform: a [`NodeKind`], the source text they stand for, owned
//! children, an optional [`Quantifier`] and dialect-specific [`Metadata`].
//! Every node keeps enough source text that [`Node::to_pattern_string`]
//! reproduces the pattern it was built from.
//!
//! Supported structure:
//! - Literals, escapes, dot, anchors and backreferences as leaves
//! - Sequences and n-ary alternation
//! - Capturing, non-capturing and named groups
//! - Lookaround assertions
//! - Character classes with folded ranges
//! - Inline and dialect mode modifiers

use std::fmt;

use crate::error::Span;
use crate::lexer::TokenKind;

/// The role of a node in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum NodeKind {
    /// The tree root; zero or one child
    Root,
    /// Concatenation of elements
    Sequence,
    /// Two or more branches, one child per branch
    Alternation,
    /// Capturing, non-capturing, named or scoped-modifier group
    Group,
    /// Lookahead or lookbehind; same shape as a group but zero-width
    Assertion,
    /// Bracket expression `[...]`
    CharClass,
    /// A single literal character, or a folded range inside a class
    Literal,
    /// Backslash escape such as `\d` or `\x41`
    Escape,
    /// Numbered or named backreference
    Backreference,
    /// `^`, `$` and word boundaries
    Anchor,
    /// Any character
    Dot,
    /// Inline flags or a dialect mode switch
    Modifier,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Sequence => "sequence",
            NodeKind::Alternation => "alternation",
            NodeKind::Group => "group",
            NodeKind::Assertion => "assertion",
            NodeKind::CharClass => "char-class",
            NodeKind::Literal => "literal",
            NodeKind::Escape => "escape",
            NodeKind::Backreference => "backreference",
            NodeKind::Anchor => "anchor",
            NodeKind::Dot => "dot",
            NodeKind::Modifier => "modifier",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a named group spelled its name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum NameSyntax {
    /// `(?<name>...)`, referenced as `\k<name>`
    Angle,
    /// `(?P<name>...)`, referenced as `(?P=name)`
    Python,
}

/// Endpoints of a character-class range `from-to`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassRange {
    pub from: String,
    pub to: String,
}

/// Dialect-specific annotations on a node
///
/// Fields that do not apply to a node kind stay at their defaults.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Metadata {
    /// Token kind the node was built from (opener kind for groups)
    #[cfg_attr(
        feature = "serde",
        serde(rename = "type", skip_serializing_if = "Option::is_none")
    )]
    pub token_kind: Option<TokenKind>,
    /// Opening delimiter text of a group or class
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub opener: Option<String>,
    /// Closing delimiter text; `None` when the construct is unclosed
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub closer: Option<String>,
    /// Negated character class `[^...]`
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "std::ops::Not::not"))]
    pub negated: bool,
    /// Whether a group captures
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub capturing: Option<bool>,
    /// Group name, or the name a backreference points at
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub name_syntax: Option<NameSyntax>,
    /// Capture number of a group, or the resolved target of a backreference
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub group_number: Option<u32>,
    /// Inline modifier flags such as `i` or `i-s`
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub flags: Option<String>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub range: Option<ClassRange>,
}

impl Metadata {
    /// Metadata carrying only the originating token kind
    pub fn of(kind: TokenKind) -> Self {
        Metadata {
            token_kind: Some(kind),
            ..Metadata::default()
        }
    }
}

/// Repetition shape of a quantifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantifierKind {
    /// Zero or more (*)
    Star,
    /// One or more (+)
    Plus,
    /// Zero or one (?)
    Question,
    /// Exactly n times ({n})
    Exact(u32),
    /// At least n times ({n,})
    AtLeast(u32),
    /// Between n and m times ({n,m})
    Between(u32, u32),
}

impl QuantifierKind {
    /// Minimum number of repetitions
    pub fn min(self) -> u32 {
        match self {
            QuantifierKind::Star | QuantifierKind::Question => 0,
            QuantifierKind::Plus => 1,
            QuantifierKind::Exact(n) | QuantifierKind::AtLeast(n) | QuantifierKind::Between(n, _) => {
                n
            }
        }
    }

    /// Maximum number of repetitions; `None` is unbounded
    pub fn max(self) -> Option<u32> {
        match self {
            QuantifierKind::Star | QuantifierKind::Plus | QuantifierKind::AtLeast(_) => None,
            QuantifierKind::Question => Some(1),
            QuantifierKind::Exact(n) => Some(n),
            QuantifierKind::Between(_, m) => Some(m),
        }
    }

    /// The token kind this quantifier is written with
    pub fn token_kind(self) -> TokenKind {
        match self {
            QuantifierKind::Star => TokenKind::QuantStar,
            QuantifierKind::Plus => TokenKind::QuantPlus,
            QuantifierKind::Question => TokenKind::QuantQuestion,
            QuantifierKind::Exact(_) => TokenKind::QuantExact,
            QuantifierKind::AtLeast(_) => TokenKind::QuantMin,
            QuantifierKind::Between(_, _) => TokenKind::QuantRange,
        }
    }
}

/// A quantifier attached to the node it repeats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantifier {
    pub kind: QuantifierKind,
    /// Source text of the quantifier token, without the lazy marker
    pub raw: String,
    /// Set when a lazy marker followed the quantifier
    pub lazy: bool,
    /// Covers the quantifier and its lazy marker
    pub span: Span,
}

impl Quantifier {
    /// Source text including the lazy marker
    pub fn text(&self) -> String {
        if self.lazy {
            format!("{}?", self.raw)
        } else {
            self.raw.clone()
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Quantifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Quantifier", 5)?;
        state.serialize_field("kind", &self.kind.token_kind())?;
        state.serialize_field("rawText", &self.raw)?;
        state.serialize_field("lazy", &self.lazy)?;
        state.serialize_field("min", &self.kind.min())?;
        state.serialize_field("max", &self.kind.max())?;
        state.end()
    }
}

/// A node in the AST
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node {
    pub kind: NodeKind,
    /// Token text, or composed text for groups, classes and alternations
    pub value: Option<String>,
    pub children: Vec<Node>,
    pub quantifier: Option<Quantifier>,
    pub metadata: Metadata,
    /// Characters covered, excluding the quantifier
    pub span: Span,
}

impl Node {
    /// Create a childless node
    pub fn leaf(kind: NodeKind, value: impl Into<String>, metadata: Metadata, span: Span) -> Self {
        Node {
            kind,
            value: Some(value.into()),
            children: Vec::new(),
            quantifier: None,
            metadata,
            span,
        }
    }

    /// Create a structural node with no value of its own
    pub fn branch(kind: NodeKind, children: Vec<Node>, span: Span) -> Self {
        Node {
            kind,
            value: None,
            children,
            quantifier: None,
            metadata: Metadata::default(),
            span,
        }
    }

    /// Visit every node depth-first, parents before children
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut impl FnMut(&'a Node, usize)) {
        visit(self, depth);
        for child in &self.children {
            child.walk_at(depth + 1, visit);
        }
    }

    /// Visit every node mutably, parents before children
    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Node)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    /// Number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Source text represented by this subtree
    ///
    /// Tokens the parser dropped while recovering from errors (a stray `)`
    /// or a quantifier with nothing to repeat) are not part of any node.
    pub fn to_pattern_string(&self) -> String {
        let mut out = String::new();
        self.write_pattern(&mut out);
        out
    }

    fn write_pattern(&self, out: &mut String) {
        match self.kind {
            NodeKind::Root | NodeKind::Sequence => {
                for child in &self.children {
                    child.write_pattern(out);
                }
            }
            NodeKind::Alternation => {
                let bar = self.value.as_deref().unwrap_or("|");
                for (i, child) in self.children.iter().enumerate() {
                    if i > 0 {
                        out.push_str(bar);
                    }
                    child.write_pattern(out);
                }
            }
            NodeKind::Group | NodeKind::Assertion | NodeKind::CharClass => {
                if let Some(opener) = &self.metadata.opener {
                    out.push_str(opener);
                }
                for child in &self.children {
                    child.write_pattern(out);
                }
                if let Some(closer) = &self.metadata.closer {
                    out.push_str(closer);
                }
            }
            _ => {
                if let Some(value) = &self.value {
                    out.push_str(value);
                }
            }
        }

        if let Some(quantifier) = &self.quantifier {
            out.push_str(&quantifier.text());
        }
    }

    /// One-line summary used by tree dumps
    pub fn label(&self) -> String {
        let mut label = self.kind.name().to_string();
        if let Some(kind) = self.metadata.token_kind {
            label.push_str(&format!(" [{kind}]"));
        }
        match self.kind {
            NodeKind::Root | NodeKind::Sequence | NodeKind::Alternation => {}
            NodeKind::Group | NodeKind::Assertion => {
                if let Some(opener) = &self.metadata.opener {
                    label.push_str(&format!(" `{opener}`"));
                }
            }
            NodeKind::CharClass => {
                label.push_str(&format!(" `{}`", self.to_pattern_string()));
            }
            _ => {
                if let Some(value) = &self.value {
                    label.push_str(&format!(" `{value}`"));
                }
            }
        }
        if let Some(name) = &self.metadata.name {
            label.push_str(&format!(" name={name}"));
        }
        if let Some(number) = self.metadata.group_number {
            label.push_str(&format!(" #{number}"));
        }
        if let Some(range) = &self.metadata.range {
            label.push_str(&format!(" range={}..{}", range.from, range.to));
        }
        if self.kind == NodeKind::Group || self.kind == NodeKind::Assertion {
            if self.metadata.closer.is_none() {
                label.push_str(" (unclosed)");
            }
        }
        if let Some(quantifier) = &self.quantifier {
            label.push_str(&format!(" quantifier=`{}`", quantifier.text()));
        }
        label
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_pattern_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(c: &str, at: usize) -> Node {
        Node::leaf(
            NodeKind::Literal,
            c,
            Metadata::of(TokenKind::Literal),
            Span::single(at),
        )
    }

    #[test]
    fn test_sequence_reconstruction() {
        let seq = Node::branch(
            NodeKind::Sequence,
            vec![literal("a", 0), literal("b", 1), literal("c", 2)],
            Span::new(0, 3),
        );
        assert_eq!(seq.to_pattern_string(), "abc");
    }

    #[test]
    fn test_alternation_uses_bar_text() {
        let mut alt = Node::branch(
            NodeKind::Alternation,
            vec![literal("a", 0), literal("b", 3)],
            Span::new(0, 4),
        );
        alt.value = Some("\\|".to_string());
        assert_eq!(alt.to_pattern_string(), "a\\|b");
    }

    #[test]
    fn test_group_with_quantifier() {
        let mut group = Node::branch(NodeKind::Group, vec![literal("a", 1)], Span::new(0, 3));
        group.metadata = Metadata {
            token_kind: Some(TokenKind::GroupStart),
            opener: Some("(".to_string()),
            closer: Some(")".to_string()),
            capturing: Some(true),
            ..Metadata::default()
        };
        group.quantifier = Some(Quantifier {
            kind: QuantifierKind::Plus,
            raw: "+".to_string(),
            lazy: true,
            span: Span::new(3, 5),
        });
        assert_eq!(group.to_pattern_string(), "(a)+?");
    }

    #[test]
    fn test_unclosed_group_reconstruction() {
        let mut group = Node::branch(NodeKind::Group, vec![literal("a", 1)], Span::new(0, 2));
        group.metadata.opener = Some("(".to_string());
        assert_eq!(group.to_pattern_string(), "(a");
        assert!(group.label().ends_with("(unclosed)"));
    }

    #[test]
    fn test_quantifier_bounds() {
        assert_eq!(QuantifierKind::Star.min(), 0);
        assert_eq!(QuantifierKind::Star.max(), None);
        assert_eq!(QuantifierKind::Question.max(), Some(1));
        assert_eq!(QuantifierKind::Exact(4).min(), 4);
        assert_eq!(QuantifierKind::Exact(4).max(), Some(4));
        assert_eq!(QuantifierKind::AtLeast(2).max(), None);
        assert_eq!(QuantifierKind::Between(1, 3).max(), Some(3));
        assert_eq!(QuantifierKind::Between(1, 3).token_kind(), TokenKind::QuantRange);
    }

    #[test]
    fn test_walk_depths() {
        let root = Node::branch(
            NodeKind::Root,
            vec![Node::branch(
                NodeKind::Sequence,
                vec![literal("a", 0), literal("b", 1)],
                Span::new(0, 2),
            )],
            Span::new(0, 2),
        );

        let mut seen = Vec::new();
        root.walk(&mut |node, depth| seen.push((node.kind, depth)));
        assert_eq!(
            seen,
            vec![
                (NodeKind::Root, 0),
                (NodeKind::Sequence, 1),
                (NodeKind::Literal, 2),
                (NodeKind::Literal, 2),
            ]
        );
        assert_eq!(root.node_count(), 4);
    }

    #[test]
    fn test_label() {
        let mut node = Node::leaf(
            NodeKind::Escape,
            "\\d",
            Metadata::of(TokenKind::EscapeDigit),
            Span::new(0, 2),
        );
        node.quantifier = Some(Quantifier {
            kind: QuantifierKind::Exact(4),
            raw: "{4}".to_string(),
            lazy: false,
            span: Span::new(2, 5),
        });
        assert_eq!(node.label(), "escape [ESCAPE_DIGIT] `\\d` quantifier=`{4}`");
    }
}
