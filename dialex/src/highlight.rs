//! Highlight spans for overlaying a pattern
//!
//! Each token becomes exactly one [`Highlight`], so the spans cover the
//! pattern with no gaps or overlaps and an overlay built from them lines up
//! with the source text character for character.

use crate::lexer::{Token, TokenKind};

/// Broad styling family of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum HighlightClass {
    Literal,
    Metachar,
    Anchor,
    CharClass,
    Group,
    Assertion,
    Quantifier,
    Escape,
    Backref,
    Alternation,
    Modifier,
    Error,
}

impl HighlightClass {
    /// Styling family for a token kind
    pub fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Literal => HighlightClass::Literal,
            TokenKind::Dot => HighlightClass::Metachar,
            kind if kind.is_anchor() => HighlightClass::Anchor,
            TokenKind::CharClassStart | TokenKind::CharClassEnd | TokenKind::CharClassNegated => {
                HighlightClass::CharClass
            }
            kind if kind.is_lookaround() => HighlightClass::Assertion,
            kind if kind.is_group_open() || kind == TokenKind::GroupEnd => HighlightClass::Group,
            kind if kind.is_quantifier() || kind == TokenKind::QuantLazy => {
                HighlightClass::Quantifier
            }
            kind if kind.is_escape() => HighlightClass::Escape,
            TokenKind::BackrefNumber | TokenKind::BackrefNamed => HighlightClass::Backref,
            TokenKind::Alternation => HighlightClass::Alternation,
            TokenKind::ModeModifier | TokenKind::InlineModifier => HighlightClass::Modifier,
            _ => HighlightClass::Error,
        }
    }
}

/// Space-separated style classes for a token kind, without the `regex` base
pub fn css_class(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Literal => "literal",
        TokenKind::Dot => "metachar dot",
        TokenKind::AnchorStart => "anchor start",
        TokenKind::AnchorEnd => "anchor end",
        TokenKind::WordBoundary | TokenKind::NonWordBoundary => "anchor boundary",
        TokenKind::CharClassStart | TokenKind::CharClassEnd => "char-class bracket",
        TokenKind::CharClassNegated => "char-class bracket negated",
        TokenKind::GroupStart | TokenKind::GroupEnd => "group paren",
        TokenKind::NonCapturingGroup => "group non-capturing",
        TokenKind::NamedGroupStart => "group named",
        TokenKind::LookaheadPos => "assertion lookahead positive",
        TokenKind::LookaheadNeg => "assertion lookahead negative",
        TokenKind::LookbehindPos => "assertion lookbehind positive",
        TokenKind::LookbehindNeg => "assertion lookbehind negative",
        TokenKind::QuantStar => "quantifier star",
        TokenKind::QuantPlus => "quantifier plus",
        TokenKind::QuantQuestion => "quantifier question",
        TokenKind::QuantExact | TokenKind::QuantMin | TokenKind::QuantRange => "quantifier braces",
        TokenKind::QuantLazy => "quantifier lazy",
        TokenKind::Escape => "escape",
        TokenKind::EscapeDigit
        | TokenKind::EscapeNonDigit
        | TokenKind::EscapeWord
        | TokenKind::EscapeNonWord
        | TokenKind::EscapeSpace
        | TokenKind::EscapeNonSpace => "escape char-class",
        TokenKind::EscapeTab
        | TokenKind::EscapeNewline
        | TokenKind::EscapeReturn
        | TokenKind::EscapeFormFeed
        | TokenKind::EscapeVerticalTab => "escape whitespace",
        TokenKind::EscapeNull => "escape null",
        TokenKind::EscapeHex => "escape hex",
        TokenKind::EscapeUnicode => "escape unicode",
        TokenKind::EscapeControl => "escape control",
        TokenKind::BackrefNumber => "backref number",
        TokenKind::BackrefNamed => "backref named",
        TokenKind::Alternation => "alternation",
        TokenKind::ModeModifier => "modifier",
        TokenKind::InlineModifier => "modifier inline",
        TokenKind::Invalid => "error",
    }
}

/// One styled span of the pattern
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Highlight {
    pub text: String,
    pub offset: usize,
    pub length: usize,
    pub kind: TokenKind,
    pub class: HighlightClass,
    /// Style classes, e.g. `"quantifier lazy"`
    pub css_class: &'static str,
    /// Short tooltip text
    pub description: &'static str,
}

/// Map tokens to highlight spans, one per token
pub fn highlight(tokens: &[Token]) -> Vec<Highlight> {
    tokens
        .iter()
        .map(|token| Highlight {
            text: token.text.clone(),
            offset: token.offset,
            length: token.length,
            kind: token.kind,
            class: HighlightClass::of(token.kind),
            css_class: css_class(token.kind),
            description: token.kind.description(),
        })
        .collect()
}

/// Render tokens as `<span>` markup for an overlay
pub fn to_html(tokens: &[Token]) -> String {
    let mut html = String::new();
    for span in highlight(tokens) {
        html.push_str(&format!(
            "<span class=\"regex {}\" data-token-type=\"{}\" title=\"{}\">{}</span>",
            span.css_class,
            span.kind,
            escape_html(span.description),
            escape_html(&span.text)
        ));
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
