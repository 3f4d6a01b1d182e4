//! Human-readable explanation of a parsed pattern
//!
//! The tree is walked depth-first and every node below the root yields one
//! [`ExplanationEntry`]. Quantifiers are phrased separately so a renderer
//! can show them under the element they repeat.

use std::fmt;

use crate::ast::{Node, NodeKind, Quantifier, QuantifierKind};
use crate::dialect::Dialect;
use crate::lexer::TokenKind;
use crate::parser::ParseResult;

/// One line of an explanation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExplanationEntry {
    /// Nesting depth; children of the root are at depth 0
    pub depth: usize,
    pub kind: NodeKind,
    pub value: Option<String>,
    pub description: String,
    pub details: Vec<String>,
    /// Phrasing of the attached quantifier, if any
    pub quantifier: Option<String>,
}

/// Explanation of a whole pattern
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Explanation {
    pub pattern: String,
    pub dialect: Dialect,
    /// Description of the dialect, omitted for the default
    pub dialect_note: Option<&'static str>,
    pub entries: Vec<ExplanationEntry>,
    /// Error messages; entries then describe a partial tree
    pub errors: Vec<String>,
}

impl Explanation {
    /// Print a formatted report of the explanation
    pub fn report(&self) {
        print!("{self}");
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Pattern Explanation")?;
        writeln!(f, "===================")?;
        writeln!(f, "Pattern: {}", self.pattern)?;
        match self.dialect_note {
            Some(note) => writeln!(f, "Dialect: {} ({note})", self.dialect)?,
            None => writeln!(f, "Dialect: {}", self.dialect)?,
        }
        for error in &self.errors {
            writeln!(f, "Error:   {error}")?;
        }
        if !self.entries.is_empty() {
            writeln!(f)?;
        }

        for entry in &self.entries {
            let indent = "  ".repeat(entry.depth);
            match &entry.value {
                Some(value) => writeln!(f, "{indent}`{value}` {}", entry.description)?,
                None => writeln!(f, "{indent}{}", entry.description)?,
            }
            if let Some(quantifier) = &entry.quantifier {
                writeln!(f, "{indent}  -> {quantifier}")?;
            }
            for detail in &entry.details {
                writeln!(f, "{indent}  * {detail}")?;
            }
        }
        Ok(())
    }
}

/// Explain a parse result
pub fn explain(result: &ParseResult) -> Explanation {
    let mut entries = Vec::new();
    for child in &result.ast.children {
        child.walk(&mut |node, depth| entries.push(describe_node(node, depth)));
    }

    Explanation {
        pattern: result.pattern.clone(),
        dialect: result.dialect,
        dialect_note: (result.dialect != Dialect::Ecma).then(|| result.dialect.description()),
        entries,
        errors: result.errors.iter().map(ToString::to_string).collect(),
    }
}

fn describe_node(node: &Node, depth: usize) -> ExplanationEntry {
    let value = node.value.clone();
    let text = value.as_deref().unwrap_or_default();
    let token_kind = node.metadata.token_kind;
    let mut details = Vec::new();

    let description = match node.kind {
        NodeKind::Root | NodeKind::Sequence => "Matches the following sequence in order".to_string(),
        NodeKind::Alternation => {
            details.push("Tries each alternative from left to right".to_string());
            "Matches any one of the alternatives".to_string()
        }
        NodeKind::Group => {
            if let Some(name) = &node.metadata.name {
                details.push(format!("Captured as: \"{name}\""));
            }
            if let Some(number) = node.metadata.group_number {
                details.push(format!("Capture group #{number}"));
            }
            if node.metadata.closer.is_none() {
                details.push("Group is not closed".to_string());
            }
            match token_kind {
                Some(TokenKind::GroupStart) => {
                    "Capturing group - captures matched text for later use".to_string()
                }
                Some(TokenKind::NonCapturingGroup) => {
                    "Non-capturing group - groups without capturing".to_string()
                }
                Some(TokenKind::NamedGroupStart) => {
                    "Named capturing group - captures with a name".to_string()
                }
                Some(TokenKind::InlineModifier) => format!(
                    "Non-capturing group with flags: {}",
                    node.metadata.flags.as_deref().unwrap_or_default()
                ),
                _ => "Group".to_string(),
            }
        }
        NodeKind::Assertion => {
            details.push("Does not consume characters".to_string());
            match token_kind {
                Some(TokenKind::LookaheadPos) => "Positive lookahead - asserts what follows",
                Some(TokenKind::LookaheadNeg) => "Negative lookahead - asserts what does NOT follow",
                Some(TokenKind::LookbehindPos) => "Positive lookbehind - asserts what precedes",
                Some(TokenKind::LookbehindNeg) => {
                    "Negative lookbehind - asserts what does NOT precede"
                }
                _ => "Assertion",
            }
            .to_string()
        }
        NodeKind::CharClass => {
            if node.metadata.negated {
                format!("Matches any character NOT in the set: [{text}]")
            } else {
                format!("Matches any one character from the set: [{text}]")
            }
        }
        NodeKind::Literal => match (&node.metadata.range, token_kind) {
            (Some(range), _) => format!(
                "Matches any character from '{}' to '{}'",
                range.from, range.to
            ),
            (None, Some(TokenKind::Invalid)) => format!("Invalid syntax: {text}"),
            _ => format!("Matches the literal character \"{text}\""),
        },
        NodeKind::Dot => {
            details.push("Use the \"s\" flag to include newlines".to_string());
            "Matches any single character except newline".to_string()
        }
        NodeKind::Anchor => match token_kind {
            Some(TokenKind::AnchorStart) => {
                "Matches the start of the string (or line with \"m\" flag)"
            }
            Some(TokenKind::AnchorEnd) => "Matches the end of the string (or line with \"m\" flag)",
            Some(TokenKind::WordBoundary) => "Matches a word boundary (between \\w and \\W)",
            Some(TokenKind::NonWordBoundary) => "Matches a non-word boundary",
            _ => "Anchor",
        }
        .to_string(),
        NodeKind::Escape => describe_escape(token_kind, text),
        NodeKind::Backreference => {
            let target = match (&node.metadata.name, node.metadata.group_number) {
                (Some(name), _) => format!("named group \"{name}\""),
                (None, Some(number)) => format!("capturing group {number}"),
                (None, None) => text.to_string(),
            };
            format!("Backreference to {target}")
        }
        NodeKind::Modifier => match token_kind {
            Some(TokenKind::ModeModifier) => {
                details.push("Changes how the rest of the pattern is read".to_string());
                format!("Dialect mode switch {text}")
            }
            _ => {
                let flags = node.metadata.flags.as_deref().unwrap_or_default();
                details.extend(flags.chars().filter_map(flag_name).map(str::to_string));
                format!("Sets inline flags: {flags}")
            }
        },
    };

    ExplanationEntry {
        depth,
        kind: node.kind,
        value,
        description,
        details,
        quantifier: node.quantifier.as_ref().map(describe_quantifier),
    }
}

fn describe_escape(kind: Option<TokenKind>, text: &str) -> String {
    match kind {
        Some(TokenKind::EscapeDigit) => "Matches any digit (0-9)".to_string(),
        Some(TokenKind::EscapeNonDigit) => "Matches any non-digit".to_string(),
        Some(TokenKind::EscapeWord) => "Matches any word character (a-z, A-Z, 0-9, _)".to_string(),
        Some(TokenKind::EscapeNonWord) => "Matches any non-word character".to_string(),
        Some(TokenKind::EscapeSpace) => "Matches any whitespace character".to_string(),
        Some(TokenKind::EscapeNonSpace) => "Matches any non-whitespace character".to_string(),
        Some(TokenKind::EscapeTab) => "Matches a tab character".to_string(),
        Some(TokenKind::EscapeNewline) => "Matches a newline character".to_string(),
        Some(TokenKind::EscapeReturn) => "Matches a carriage return".to_string(),
        Some(TokenKind::EscapeFormFeed) => "Matches a form feed".to_string(),
        Some(TokenKind::EscapeVerticalTab) => "Matches a vertical tab".to_string(),
        Some(TokenKind::EscapeNull) => "Matches the null character".to_string(),
        Some(TokenKind::EscapeHex) => format!(
            "Matches the character with hex code {}",
            text.get(2..).unwrap_or_default()
        ),
        Some(TokenKind::EscapeUnicode) => format!("Matches the Unicode character {text}"),
        Some(TokenKind::EscapeControl) => format!("Matches the control character {text}"),
        _ => format!("Escaped character: {text}"),
    }
}

/// Phrase a quantifier, e.g. "Matches between 1 and 3 times (greedy)"
pub fn describe_quantifier(quantifier: &Quantifier) -> String {
    let mode = if quantifier.lazy {
        " (lazy/non-greedy)"
    } else {
        " (greedy)"
    };
    match quantifier.kind {
        QuantifierKind::Star => format!("Matches 0 or more times{mode}"),
        QuantifierKind::Plus => format!("Matches 1 or more times{mode}"),
        QuantifierKind::Question => format!("Matches 0 or 1 time{mode}"),
        QuantifierKind::Exact(n) => format!("Matches exactly {n} times"),
        QuantifierKind::AtLeast(n) => format!("Matches at least {n} times{mode}"),
        QuantifierKind::Between(n, m) => format!("Matches between {n} and {m} times{mode}"),
    }
}

fn flag_name(flag: char) -> Option<&'static str> {
    match flag {
        'i' => Some("i: case-insensitive"),
        'm' => Some("m: ^ and $ match at line breaks"),
        's' => Some("s: dot matches newline"),
        'x' => Some("x: whitespace and comments ignored"),
        'u' => Some("u: Unicode mode"),
        'U' => Some("U: quantifiers lazy by default"),
        'n' => Some("n: plain groups do not capture"),
        '-' => Some("-: following flags are turned off"),
        _ => None,
    }
}
