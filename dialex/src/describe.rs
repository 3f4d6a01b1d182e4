//! Tooltip text for tokens
//!
//! Tooltips are looked up purely by token kind, with the token text and the
//! dialect used only to fill in details and dialect notes. Nothing here
//! inspects the tree.

use crate::dialect::Dialect;
use crate::lexer::{Token, TokenKind};

impl TokenKind {
    /// Short human-readable description of the kind
    pub fn description(self) -> &'static str {
        match self {
            TokenKind::Literal => "Literal character",
            TokenKind::Dot => "Any character (except newline)",
            TokenKind::AnchorStart => "Start of string/line",
            TokenKind::AnchorEnd => "End of string/line",
            TokenKind::WordBoundary => "Word boundary",
            TokenKind::NonWordBoundary => "Non-word boundary",
            TokenKind::CharClassStart => "Character class start",
            TokenKind::CharClassEnd => "Character class end",
            TokenKind::CharClassNegated => "Negated character class",
            TokenKind::GroupStart => "Capturing group start",
            TokenKind::GroupEnd => "Group end",
            TokenKind::NonCapturingGroup => "Non-capturing group",
            TokenKind::NamedGroupStart => "Named capturing group",
            TokenKind::LookaheadPos => "Positive lookahead",
            TokenKind::LookaheadNeg => "Negative lookahead",
            TokenKind::LookbehindPos => "Positive lookbehind",
            TokenKind::LookbehindNeg => "Negative lookbehind",
            TokenKind::QuantStar => "Zero or more",
            TokenKind::QuantPlus => "One or more",
            TokenKind::QuantQuestion => "Zero or one (optional)",
            TokenKind::QuantExact => "Exactly n times",
            TokenKind::QuantMin => "At least n times",
            TokenKind::QuantRange => "Between n and m times",
            TokenKind::QuantLazy => "Lazy (non-greedy) modifier",
            TokenKind::Escape => "Escaped character",
            TokenKind::EscapeDigit => "Any digit (0-9)",
            TokenKind::EscapeNonDigit => "Any non-digit",
            TokenKind::EscapeWord => "Word character (letters, digits, underscore)",
            TokenKind::EscapeNonWord => "Non-word character",
            TokenKind::EscapeSpace => "Whitespace character",
            TokenKind::EscapeNonSpace => "Non-whitespace character",
            TokenKind::EscapeTab => "Tab character",
            TokenKind::EscapeNewline => "Newline character",
            TokenKind::EscapeReturn => "Carriage return",
            TokenKind::EscapeFormFeed => "Form feed",
            TokenKind::EscapeVerticalTab => "Vertical tab",
            TokenKind::EscapeNull => "Null character",
            TokenKind::EscapeHex => "Character by hex code",
            TokenKind::EscapeUnicode => "Unicode code point",
            TokenKind::EscapeControl => "Control character",
            TokenKind::BackrefNumber => "Numbered backreference",
            TokenKind::BackrefNamed => "Named backreference",
            TokenKind::Alternation => "Alternation (OR)",
            TokenKind::ModeModifier => "Pattern mode switch",
            TokenKind::InlineModifier => "Inline flags",
            TokenKind::Invalid => "Invalid syntax",
        }
    }

    /// Tooltip heading for the kind
    pub fn title(self) -> &'static str {
        match self {
            TokenKind::Literal => "Literal Character",
            TokenKind::Dot => "Dot (Any Character)",
            TokenKind::AnchorStart => "Start Anchor",
            TokenKind::AnchorEnd => "End Anchor",
            TokenKind::WordBoundary => "Word Boundary",
            TokenKind::NonWordBoundary => "Non-Word Boundary",
            TokenKind::CharClassStart | TokenKind::CharClassEnd => "Character Class",
            TokenKind::CharClassNegated => "Negated Character Class",
            TokenKind::GroupStart => "Capturing Group",
            TokenKind::GroupEnd => "Group End",
            TokenKind::NonCapturingGroup => "Non-Capturing Group",
            TokenKind::NamedGroupStart => "Named Capturing Group",
            TokenKind::LookaheadPos => "Positive Lookahead",
            TokenKind::LookaheadNeg => "Negative Lookahead",
            TokenKind::LookbehindPos => "Positive Lookbehind",
            TokenKind::LookbehindNeg => "Negative Lookbehind",
            TokenKind::QuantStar => "Star Quantifier",
            TokenKind::QuantPlus => "Plus Quantifier",
            TokenKind::QuantQuestion => "Optional Quantifier",
            TokenKind::QuantExact | TokenKind::QuantMin | TokenKind::QuantRange => {
                "Interval Quantifier"
            }
            TokenKind::QuantLazy => "Lazy Modifier",
            TokenKind::EscapeDigit | TokenKind::EscapeNonDigit => "Digit Character Class",
            TokenKind::EscapeWord | TokenKind::EscapeNonWord => "Word Character Class",
            TokenKind::EscapeSpace | TokenKind::EscapeNonSpace => "Whitespace Character Class",
            TokenKind::BackrefNumber | TokenKind::BackrefNamed => "Backreference",
            TokenKind::Alternation => "Alternation (OR)",
            TokenKind::ModeModifier => "Mode Modifier",
            TokenKind::InlineModifier => "Inline Modifier",
            TokenKind::Invalid => "Invalid Syntax",
            _ => "Escape Sequence",
        }
    }
}

/// Content of a tooltip for one token
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Tooltip {
    pub title: &'static str,
    pub description: String,
    pub notes: Vec<&'static str>,
}

/// Build the tooltip for a token under a dialect
pub fn tooltip(token: &Token, dialect: Dialect) -> Tooltip {
    let description = match token.kind {
        TokenKind::Literal => format!("Matches the exact character \"{}\"", token.text),
        TokenKind::Dot => "Matches any single character except newline".to_string(),
        TokenKind::AnchorStart => "Matches the start of string (or line with m flag)".to_string(),
        TokenKind::AnchorEnd => "Matches the end of string (or line with m flag)".to_string(),
        TokenKind::CharClassStart => "Matches any one character from the set".to_string(),
        TokenKind::CharClassNegated => "Matches any one character not in the set".to_string(),
        TokenKind::GroupStart => "Groups elements and captures matched text".to_string(),
        TokenKind::NamedGroupStart => "Captures with a name for easier reference".to_string(),
        TokenKind::LookaheadPos => "Asserts that what follows matches".to_string(),
        TokenKind::LookaheadNeg => "Asserts that what follows does not match".to_string(),
        TokenKind::LookbehindPos => "Asserts that what precedes matches".to_string(),
        TokenKind::LookbehindNeg => "Asserts that what precedes does not match".to_string(),
        TokenKind::QuantStar => "Matches 0 or more of the preceding element".to_string(),
        TokenKind::QuantPlus => "Matches 1 or more of the preceding element".to_string(),
        TokenKind::QuantQuestion => "Matches 0 or 1 of the preceding element".to_string(),
        TokenKind::QuantExact | TokenKind::QuantMin | TokenKind::QuantRange => {
            format!("{} ({})", token.kind.description(), token.text)
        }
        TokenKind::Alternation => "Matches either the left or right side".to_string(),
        TokenKind::Escape => match token.text.chars().nth(1) {
            Some(c) => format!("Matches the character \"{c}\" literally"),
            None => token.kind.description().to_string(),
        },
        TokenKind::ModeModifier | TokenKind::InlineModifier => {
            format!("{} {}", token.kind.description(), token.text)
        }
        kind => kind.description().to_string(),
    };

    Tooltip {
        title: token.kind.title(),
        description,
        notes: notes(token.kind, dialect),
    }
}

fn notes(kind: TokenKind, dialect: Dialect) -> Vec<&'static str> {
    let mut notes = Vec::new();
    let basic = dialect.is_basic();

    match kind {
        TokenKind::Literal => {
            notes.push("Case-sensitive by default (use i flag for case-insensitive)")
        }
        TokenKind::Dot => {
            notes.push("Use the s flag to include newlines");
            notes.push("Use \\. to match a literal dot");
        }
        TokenKind::EscapeDigit => {
            notes.push("Equivalent to [0-9]");
            if basic {
                notes.push("Not supported in POSIX basic syntax - use [0-9]");
            }
        }
        TokenKind::EscapeWord => {
            notes.push("Equivalent to [a-zA-Z0-9_]");
            if basic {
                notes.push("Not supported in POSIX basic syntax - use [a-zA-Z0-9_]");
            }
        }
        TokenKind::QuantStar => {
            notes.push("Greedy by default - use *? for lazy matching");
            notes.push("Always succeeds (can match empty string)");
        }
        TokenKind::QuantPlus => {
            notes.push("Greedy by default - use +? for lazy matching");
            if basic {
                notes.push("In basic syntax, must escape as \\+");
            }
        }
        TokenKind::QuantQuestion if basic => notes.push("In basic syntax, must escape as \\?"),
        TokenKind::QuantExact | TokenKind::QuantMin | TokenKind::QuantRange if basic => {
            notes.push("In basic syntax, braces must be escaped as \\{n,m\\}")
        }
        TokenKind::QuantLazy => notes.push("Matches as few repetitions as possible"),
        TokenKind::GroupStart => {
            notes.push("Access captures with $1, $2, etc. in replacements");
            notes.push("Use (?:...) for non-capturing groups");
            if basic {
                notes.push("In basic syntax, must escape as \\( \\)");
            }
        }
        TokenKind::CharClassStart | TokenKind::CharClassNegated => {
            notes.push("Use ^ at start to negate: [^aeiou]");
            notes.push("- is literal at start or end: [-a] or [a-]");
        }
        TokenKind::AnchorStart => {
            notes.push("Use m flag for multiline mode");
            notes.push("^ inside [...] means negation, not anchor");
        }
        TokenKind::AnchorEnd => notes.push("Use m flag for multiline mode"),
        TokenKind::Alternation => {
            notes.push("Use groups to limit scope: a(b|c)d");
            if basic {
                notes.push("In basic syntax, must escape as \\|");
            }
        }
        TokenKind::LookaheadPos
        | TokenKind::LookaheadNeg
        | TokenKind::LookbehindPos
        | TokenKind::LookbehindNeg => {
            notes.push("Does not consume characters");
            notes.push("Not supported in all regex flavors");
        }
        TokenKind::NamedGroupStart => {
            notes.push("Reference with \\k<name> or $<name>");
            if dialect == Dialect::Python {
                notes.push("Python uses (?P<name>...)");
            }
        }
        TokenKind::BackrefNamed if dialect == Dialect::Python => {
            notes.push("Python references named groups with (?P=name)")
        }
        TokenKind::ModeModifier => notes.push("Changes how the rest of the pattern is read"),
        _ => {}
    }

    notes
}
