//! Lexer for tokenizing regex patterns
//!
//! This module converts a pattern string into a flat list of [`Token`]s
//! under a chosen [`Dialect`]. The token stream is lossless: concatenating
//! every token's text in order reproduces the pattern exactly, which is what
//! highlighting overlays rely on.
//!
//! The lexer never fails. Malformed constructs become [`TokenKind::Invalid`]
//! tokens and an error diagnostic, and scanning continues.

use std::fmt;

use crate::dialect::{Dialect, DialectEscape, DialectSyntax};
use crate::error::{DiagnosticKind, Diagnostics, Span};

/// The syntactic role of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "SCREAMING_SNAKE_CASE")
)]
pub enum TokenKind {
    /// A literal character
    Literal,
    /// Any character `.`
    Dot,

    /// Start anchor `^`
    AnchorStart,
    /// End anchor `$`
    AnchorEnd,
    /// Word boundary `\b` (and Vim `\<`, `\>`)
    WordBoundary,
    /// Non-word boundary `\B`
    NonWordBoundary,

    /// Character class opener `[`
    CharClassStart,
    /// Character class closer `]`
    CharClassEnd,
    /// Negated character class opener `[^`
    CharClassNegated,

    /// Capturing group opener `(`
    GroupStart,
    /// Group closer `)`
    GroupEnd,
    /// Non-capturing group opener `(?:`
    NonCapturingGroup,
    /// Named group opener `(?<name>` or `(?P<name>`
    NamedGroupStart,

    /// Positive lookahead opener `(?=`
    LookaheadPos,
    /// Negative lookahead opener `(?!`
    LookaheadNeg,
    /// Positive lookbehind opener `(?<=`
    LookbehindPos,
    /// Negative lookbehind opener `(?<!`
    LookbehindNeg,

    /// Zero or more `*`
    QuantStar,
    /// One or more `+`
    QuantPlus,
    /// Zero or one `?`
    QuantQuestion,
    /// Exactly n times `{n}`
    QuantExact,
    /// At least n times `{n,}`
    QuantMin,
    /// Between n and m times `{n,m}`
    QuantRange,
    /// Lazy marker `?` following a quantifier
    QuantLazy,

    /// Generic escaped character `\X`
    Escape,
    /// Digit shorthand `\d`
    EscapeDigit,
    /// Non-digit shorthand `\D`
    EscapeNonDigit,
    /// Word character shorthand `\w`
    EscapeWord,
    /// Non-word character shorthand `\W`
    EscapeNonWord,
    /// Whitespace shorthand `\s`
    EscapeSpace,
    /// Non-whitespace shorthand `\S`
    EscapeNonSpace,
    /// Tab `\t`
    EscapeTab,
    /// Newline `\n`
    EscapeNewline,
    /// Carriage return `\r`
    EscapeReturn,
    /// Form feed `\f`
    EscapeFormFeed,
    /// Vertical tab `\v`
    EscapeVerticalTab,
    /// Null character `\0`
    EscapeNull,
    /// Hex escape `\xHH`
    EscapeHex,
    /// Unicode escape `\uHHHH` or `\u{H+}`
    EscapeUnicode,
    /// Control character `\cX`
    EscapeControl,

    /// Numbered backreference `\1` .. `\9`
    BackrefNumber,
    /// Named backreference `\k<name>` or `(?P=name)`
    BackrefNamed,

    /// Alternation `|`
    Alternation,

    /// Dialect mode switch embedded in the pattern (Vim `\v`, `\c`, ...)
    ModeModifier,
    /// Inline flags `(?imsx)` or scoped flags `(?i:`
    InlineModifier,

    /// Malformed input covering the unparsed remainder
    Invalid,
}

impl TokenKind {
    /// Stable upper-case name of the kind
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Literal => "LITERAL",
            TokenKind::Dot => "DOT",
            TokenKind::AnchorStart => "ANCHOR_START",
            TokenKind::AnchorEnd => "ANCHOR_END",
            TokenKind::WordBoundary => "WORD_BOUNDARY",
            TokenKind::NonWordBoundary => "NON_WORD_BOUNDARY",
            TokenKind::CharClassStart => "CHAR_CLASS_START",
            TokenKind::CharClassEnd => "CHAR_CLASS_END",
            TokenKind::CharClassNegated => "CHAR_CLASS_NEGATED",
            TokenKind::GroupStart => "GROUP_START",
            TokenKind::GroupEnd => "GROUP_END",
            TokenKind::NonCapturingGroup => "NON_CAPTURING_GROUP",
            TokenKind::NamedGroupStart => "NAMED_GROUP_START",
            TokenKind::LookaheadPos => "LOOKAHEAD_POS",
            TokenKind::LookaheadNeg => "LOOKAHEAD_NEG",
            TokenKind::LookbehindPos => "LOOKBEHIND_POS",
            TokenKind::LookbehindNeg => "LOOKBEHIND_NEG",
            TokenKind::QuantStar => "QUANT_STAR",
            TokenKind::QuantPlus => "QUANT_PLUS",
            TokenKind::QuantQuestion => "QUANT_QUESTION",
            TokenKind::QuantExact => "QUANT_EXACT",
            TokenKind::QuantMin => "QUANT_MIN",
            TokenKind::QuantRange => "QUANT_RANGE",
            TokenKind::QuantLazy => "QUANT_LAZY",
            TokenKind::Escape => "ESCAPE",
            TokenKind::EscapeDigit => "ESCAPE_DIGIT",
            TokenKind::EscapeNonDigit => "ESCAPE_NON_DIGIT",
            TokenKind::EscapeWord => "ESCAPE_WORD",
            TokenKind::EscapeNonWord => "ESCAPE_NON_WORD",
            TokenKind::EscapeSpace => "ESCAPE_SPACE",
            TokenKind::EscapeNonSpace => "ESCAPE_NON_SPACE",
            TokenKind::EscapeTab => "ESCAPE_TAB",
            TokenKind::EscapeNewline => "ESCAPE_NEWLINE",
            TokenKind::EscapeReturn => "ESCAPE_RETURN",
            TokenKind::EscapeFormFeed => "ESCAPE_FORM_FEED",
            TokenKind::EscapeVerticalTab => "ESCAPE_VERTICAL_TAB",
            TokenKind::EscapeNull => "ESCAPE_NULL",
            TokenKind::EscapeHex => "ESCAPE_HEX",
            TokenKind::EscapeUnicode => "ESCAPE_UNICODE",
            TokenKind::EscapeControl => "ESCAPE_CONTROL",
            TokenKind::BackrefNumber => "BACKREF_NUMBER",
            TokenKind::BackrefNamed => "BACKREF_NAMED",
            TokenKind::Alternation => "ALTERNATION",
            TokenKind::ModeModifier => "MODE_MODIFIER",
            TokenKind::InlineModifier => "INLINE_MODIFIER",
            TokenKind::Invalid => "INVALID",
        }
    }

    /// The six kinds that repeat the preceding element
    pub fn is_quantifier(self) -> bool {
        matches!(
            self,
            TokenKind::QuantStar
                | TokenKind::QuantPlus
                | TokenKind::QuantQuestion
                | TokenKind::QuantExact
                | TokenKind::QuantMin
                | TokenKind::QuantRange
        )
    }

    /// Every kind that opens a parenthesized group
    pub fn is_group_open(self) -> bool {
        matches!(
            self,
            TokenKind::GroupStart
                | TokenKind::NonCapturingGroup
                | TokenKind::NamedGroupStart
                | TokenKind::LookaheadPos
                | TokenKind::LookaheadNeg
                | TokenKind::LookbehindPos
                | TokenKind::LookbehindNeg
        )
    }

    /// Zero-width lookahead and lookbehind openers
    pub fn is_lookaround(self) -> bool {
        matches!(
            self,
            TokenKind::LookaheadPos
                | TokenKind::LookaheadNeg
                | TokenKind::LookbehindPos
                | TokenKind::LookbehindNeg
        )
    }

    pub fn is_anchor(self) -> bool {
        matches!(
            self,
            TokenKind::AnchorStart
                | TokenKind::AnchorEnd
                | TokenKind::WordBoundary
                | TokenKind::NonWordBoundary
        )
    }

    /// Backslash escapes that stand for a character or a class of characters
    pub fn is_escape(self) -> bool {
        matches!(
            self,
            TokenKind::Escape
                | TokenKind::EscapeDigit
                | TokenKind::EscapeNonDigit
                | TokenKind::EscapeWord
                | TokenKind::EscapeNonWord
                | TokenKind::EscapeSpace
                | TokenKind::EscapeNonSpace
                | TokenKind::EscapeTab
                | TokenKind::EscapeNewline
                | TokenKind::EscapeReturn
                | TokenKind::EscapeFormFeed
                | TokenKind::EscapeVerticalTab
                | TokenKind::EscapeNull
                | TokenKind::EscapeHex
                | TokenKind::EscapeUnicode
                | TokenKind::EscapeControl
        )
    }

    /// Kinds that denote exactly one character and may end a class range
    pub fn is_single_char(self) -> bool {
        matches!(
            self,
            TokenKind::Literal
                | TokenKind::Escape
                | TokenKind::EscapeTab
                | TokenKind::EscapeNewline
                | TokenKind::EscapeReturn
                | TokenKind::EscapeFormFeed
                | TokenKind::EscapeVerticalTab
                | TokenKind::EscapeNull
                | TokenKind::EscapeHex
                | TokenKind::EscapeUnicode
                | TokenKind::EscapeControl
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token in a regex pattern
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// Syntactic role
    pub kind: TokenKind,
    /// Exact source text, including backslashes and braces
    pub text: String,
    /// Character offset where the token begins
    pub offset: usize,
    /// Number of characters covered
    pub length: usize,
}

impl Token {
    /// Create a token; the length is the character count of `text`
    pub fn new(kind: TokenKind, text: impl Into<String>, offset: usize) -> Self {
        let text = text.into();
        let length = text.chars().count();
        Token {
            kind,
            text,
            offset,
            length,
        }
    }

    /// Offset just past the token
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn span(&self) -> Span {
        Span::new(self.offset, self.end())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind, self.text)
    }
}

/// Output of a tokenization pass
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenized {
    /// Tokens in source order
    pub tokens: Vec<Token>,
    /// Malformed-syntax errors and dialect warnings
    pub diagnostics: Diagnostics,
}

/// Lexer for tokenizing regex patterns
///
/// A lexer is a single scan session: create one per pattern, then consume
/// it with [`Lexer::tokenize`].
pub struct Lexer {
    chars: Vec<char>,
    syntax: &'static DialectSyntax,
    position: usize,
    tokens: Vec<Token>,
    diagnostics: Diagnostics,
}

impl Lexer {
    /// Create a new lexer for the given input string
    pub fn new(input: &str, dialect: Dialect) -> Self {
        Lexer {
            chars: input.chars().collect(),
            syntax: dialect.syntax(),
            position: 0,
            tokens: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Scan the entire input
    pub fn tokenize(mut self) -> Tokenized {
        while let Some(c) = self.peek(0) {
            self.scan(c);
        }
        Tokenized {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Look `ahead` characters past the cursor
    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.position + ahead).copied()
    }

    fn remaining(&self) -> usize {
        self.chars.len() - self.position
    }

    /// Index of the first `target` at or after `from`
    fn find(&self, from: usize, target: char) -> Option<usize> {
        self.chars
            .get(from..)?
            .iter()
            .position(|&c| c == target)
            .map(|i| from + i)
    }

    /// Emit a token covering `len` characters from the cursor and advance past it
    fn emit(&mut self, kind: TokenKind, len: usize) {
        let end = (self.position + len).min(self.chars.len());
        let text: String = self.chars[self.position..end].iter().collect();
        self.tokens.push(Token::new(kind, text, self.position));
        self.position = end;
    }

    /// Emit an invalid token covering the rest of the pattern
    fn emit_invalid_rest(&mut self, kind: DiagnosticKind) {
        let span = Span::new(self.position, self.chars.len());
        self.diagnostics.report(kind, span);
        self.emit(TokenKind::Invalid, self.remaining());
    }

    fn last_kind(&self) -> Option<TokenKind> {
        self.tokens.last().map(|t| t.kind)
    }

    fn scan(&mut self, c: char) {
        if let Some(kind) = (self.syntax.unescaped)(c) {
            self.emit(kind, 1);
            return;
        }

        match c {
            '.' => self.emit(TokenKind::Dot, 1),
            '^' => self.emit(TokenKind::AnchorStart, 1),
            '$' => self.emit(TokenKind::AnchorEnd, 1),
            '*' => self.scan_star(),
            '+' => self.emit(TokenKind::QuantPlus, 1),
            '?' => {
                if self.last_kind().is_some_and(TokenKind::is_quantifier) {
                    self.emit(TokenKind::QuantLazy, 1)
                } else {
                    self.emit(TokenKind::QuantQuestion, 1)
                }
            }
            '{' => self.scan_brace(),
            '(' => self.scan_group_open(),
            ')' => self.emit(TokenKind::GroupEnd, 1),
            '[' => {
                if self.peek(1) == Some('^') {
                    self.emit(TokenKind::CharClassNegated, 2)
                } else {
                    self.emit(TokenKind::CharClassStart, 1)
                }
            }
            ']' => self.emit(TokenKind::CharClassEnd, 1),
            '|' => self.emit(TokenKind::Alternation, 1),
            '\\' => self.scan_escape(),
            _ => self.emit(TokenKind::Literal, 1),
        }
    }

    /// `*` is literal at the start of a BRE expression
    fn scan_star(&mut self) {
        let starts_expression = matches!(
            self.last_kind(),
            None | Some(TokenKind::GroupStart | TokenKind::Alternation | TokenKind::AnchorStart)
        );
        if self.syntax.leading_star_literal && starts_expression {
            self.emit(TokenKind::Literal, 1);
        } else {
            self.emit(TokenKind::QuantStar, 1);
        }
    }

    /// Try `{n}`, `{n,}` or `{n,m}`; anything else leaves `{` as a literal
    fn scan_brace(&mut self) {
        let Some(close) = self.find(self.position + 1, '}') else {
            self.emit(TokenKind::Literal, 1);
            return;
        };
        let body: String = self.chars[self.position + 1..close].iter().collect();
        match classify_interval(&body) {
            Some(kind) => self.emit(kind, close + 1 - self.position),
            None => self.emit(TokenKind::Literal, 1),
        }
    }

    /// BRE `\{n,m\}`; the cursor is on the backslash
    fn scan_bre_interval(&mut self) {
        let body_start = self.position + 2;
        let mut close = None;
        let mut i = body_start;
        while i + 1 < self.chars.len() {
            if self.chars[i] == '\\' && self.chars[i + 1] == '}' {
                close = Some(i);
                break;
            }
            i += 1;
        }

        let kind = close.and_then(|close| {
            let body: String = self.chars[body_start..close].iter().collect();
            classify_interval(&body).map(|kind| (kind, close + 2 - self.position))
        });
        match kind {
            Some((kind, len)) => self.emit(kind, len),
            None => self.emit(TokenKind::Escape, 2),
        }
    }

    fn scan_group_open(&mut self) {
        if self.peek(1) != Some('?') {
            self.emit(TokenKind::GroupStart, 1);
            return;
        }

        match self.peek(2) {
            Some(':') => self.emit(TokenKind::NonCapturingGroup, 3),
            Some('=') => self.emit(TokenKind::LookaheadPos, 3),
            Some('!') => self.emit(TokenKind::LookaheadNeg, 3),
            Some('<') => match self.peek(3) {
                Some('=') => self.emit(TokenKind::LookbehindPos, 4),
                Some('!') => self.emit(TokenKind::LookbehindNeg, 4),
                _ => self.scan_named_group(3),
            },
            Some('P') if self.syntax.python_groups => match self.peek(3) {
                Some('<') => self.scan_named_group(4),
                Some('=') => self.scan_python_backref(),
                _ => {
                    let len = self.remaining().min(4);
                    let span = Span::new(self.position, self.position + len);
                    self.diagnostics
                        .report(DiagnosticKind::MalformedPythonGroup, span);
                    self.emit(TokenKind::Invalid, len);
                }
            },
            _ => self.scan_inline_modifier(),
        }
    }

    /// `(?<name>` or `(?P<name>`; `prefix` is the length before the name
    fn scan_named_group(&mut self, prefix: usize) {
        match self.find(self.position + prefix, '>') {
            Some(close) => self.emit(TokenKind::NamedGroupStart, close + 1 - self.position),
            None => self.emit_invalid_rest(DiagnosticKind::UnterminatedNamedGroup),
        }
    }

    /// Python `(?P=name)`
    fn scan_python_backref(&mut self) {
        match self.find(self.position + 4, ')') {
            Some(close) => self.emit(TokenKind::BackrefNamed, close + 1 - self.position),
            None => self.emit_invalid_rest(DiagnosticKind::UnterminatedBackreference),
        }
    }

    /// `(?imsx)`, scoped `(?i-s:`, or any other `(?...)` body taken verbatim
    fn scan_inline_modifier(&mut self) {
        let body_start = self.position + 2;
        let mut i = body_start;
        while i < self.chars.len() && (self.chars[i].is_ascii_alphabetic() || self.chars[i] == '-')
        {
            i += 1;
        }
        if i > body_start && self.chars.get(i) == Some(&':') {
            self.emit(TokenKind::InlineModifier, i + 1 - self.position);
            return;
        }

        match self.find(body_start, ')') {
            Some(close) => self.emit(TokenKind::InlineModifier, close + 1 - self.position),
            None => self.emit_invalid_rest(DiagnosticKind::UnterminatedModifier),
        }
    }

    fn scan_escape(&mut self) {
        let Some(next) = self.peek(1) else {
            self.diagnostics
                .report(DiagnosticKind::TrailingBackslash, Span::single(self.position));
            self.emit(TokenKind::Invalid, 1);
            return;
        };

        if let Some(action) = (self.syntax.escape)(next) {
            match action {
                DialectEscape::Token(kind) => self.emit(kind, 2),
                DialectEscape::ModeSwitch(description) => {
                    let span = Span::new(self.position, self.position + 2);
                    self.diagnostics
                        .report(DiagnosticKind::ModeSwitch(description), span);
                    self.emit(TokenKind::ModeModifier, 2);
                }
                DialectEscape::Interval => self.scan_bre_interval(),
            }
            return;
        }

        match next {
            'd' => self.emit(TokenKind::EscapeDigit, 2),
            'D' => self.emit(TokenKind::EscapeNonDigit, 2),
            'w' => self.emit(TokenKind::EscapeWord, 2),
            'W' => self.emit(TokenKind::EscapeNonWord, 2),
            's' => self.emit(TokenKind::EscapeSpace, 2),
            'S' => self.emit(TokenKind::EscapeNonSpace, 2),
            't' => self.emit(TokenKind::EscapeTab, 2),
            'n' => self.emit(TokenKind::EscapeNewline, 2),
            'r' => self.emit(TokenKind::EscapeReturn, 2),
            'f' => self.emit(TokenKind::EscapeFormFeed, 2),
            'v' => self.emit(TokenKind::EscapeVerticalTab, 2),
            '0' => self.emit(TokenKind::EscapeNull, 2),
            'b' => self.emit(TokenKind::WordBoundary, 2),
            'B' => self.emit(TokenKind::NonWordBoundary, 2),
            '1'..='9' => self.emit(TokenKind::BackrefNumber, 2),
            'k' if self.peek(2) == Some('<') => match self.find(self.position + 3, '>') {
                Some(close) => self.emit(TokenKind::BackrefNamed, close + 1 - self.position),
                None => self.emit_invalid_rest(DiagnosticKind::UnterminatedBackreference),
            },
            'x' => {
                if self.hex_run(2, 2) {
                    self.emit(TokenKind::EscapeHex, 4)
                } else {
                    self.emit(TokenKind::Escape, 2)
                }
            }
            'u' => self.scan_unicode_escape(),
            'c' => {
                if self.peek(2).is_some_and(|c| c.is_ascii_alphabetic()) {
                    self.emit(TokenKind::EscapeControl, 3)
                } else {
                    self.emit(TokenKind::Escape, 2)
                }
            }
            _ => self.emit(TokenKind::Escape, 2),
        }
    }

    /// `\uHHHH` or `\u{H+}`; anything else degrades to a bare `\u`
    fn scan_unicode_escape(&mut self) {
        if self.peek(2) == Some('{') {
            let digits_start = self.position + 3;
            let close = self.find(digits_start, '}').filter(|&close| {
                close > digits_start
                    && self.chars[digits_start..close]
                        .iter()
                        .all(|c| c.is_ascii_hexdigit())
            });
            if let Some(close) = close {
                self.emit(TokenKind::EscapeUnicode, close + 1 - self.position);
                return;
            }
        } else if self.hex_run(2, 4) {
            self.emit(TokenKind::EscapeUnicode, 6);
            return;
        }
        self.emit(TokenKind::Escape, 2);
    }

    /// Whether exactly `count` hex digits start `ahead` characters past the cursor
    fn hex_run(&self, ahead: usize, count: usize) -> bool {
        (ahead..ahead + count).all(|i| self.peek(i).is_some_and(|c| c.is_ascii_hexdigit()))
    }
}

/// Classify the body of a brace quantifier by its shape
fn classify_interval(body: &str) -> Option<TokenKind> {
    fn is_number(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    let parts: Vec<&str> = body.split(',').collect();
    match parts.as_slice() {
        [n] if is_number(n) => Some(TokenKind::QuantExact),
        [n, ""] if is_number(n) => Some(TokenKind::QuantMin),
        [n, m] if is_number(n) && is_number(m) => Some(TokenKind::QuantRange),
        _ => None,
    }
}

/// Tokenize a pattern under a dialect
pub fn tokenize(pattern: &str, dialect: Dialect) -> Tokenized {
    Lexer::new(pattern, dialect).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(pattern: &str, dialect: Dialect) -> Vec<TokenKind> {
        tokenize(pattern, dialect)
            .tokens
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    fn texts(pattern: &str, dialect: Dialect) -> Vec<String> {
        tokenize(pattern, dialect)
            .tokens
            .into_iter()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let result = tokenize("", Dialect::Ecma);
        assert!(result.tokens.is_empty());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_literal_sequence() {
        assert_eq!(
            kinds("abc", Dialect::Ecma),
            vec![TokenKind::Literal, TokenKind::Literal, TokenKind::Literal]
        );
    }

    #[test]
    fn test_offsets_and_lengths() {
        let tokens = tokenize(r"a\d{2,3}", Dialect::Ecma).tokens;
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[1].offset, 1);
        assert_eq!(tokens[1].length, 2);
        assert_eq!(tokens[2].offset, 3);
        assert_eq!(tokens[2].length, 5);
        assert_eq!(tokens[2].text, "{2,3}");
    }

    #[test]
    fn test_offsets_count_characters() {
        let tokens = tokenize("é+ü", Dialect::Ecma).tokens;
        assert_eq!(tokens[1].offset, 1);
        assert_eq!(tokens[2].offset, 2);
        assert_eq!(tokens[2].text, "ü");
    }

    #[test]
    fn test_anchors_and_dot() {
        assert_eq!(
            kinds("^a.$", Dialect::Ecma),
            vec![
                TokenKind::AnchorStart,
                TokenKind::Literal,
                TokenKind::Dot,
                TokenKind::AnchorEnd,
            ]
        );
    }

    #[test]
    fn test_quantifiers() {
        assert_eq!(
            kinds("a*b+c?", Dialect::Ecma),
            vec![
                TokenKind::Literal,
                TokenKind::QuantStar,
                TokenKind::Literal,
                TokenKind::QuantPlus,
                TokenKind::Literal,
                TokenKind::QuantQuestion,
            ]
        );
    }

    #[test]
    fn test_lazy_after_star() {
        assert_eq!(
            kinds("a*?", Dialect::Ecma),
            vec![TokenKind::Literal, TokenKind::QuantStar, TokenKind::QuantLazy]
        );
    }

    #[test]
    fn test_lazy_after_question() {
        assert_eq!(
            kinds("a??", Dialect::Ecma),
            vec![
                TokenKind::Literal,
                TokenKind::QuantQuestion,
                TokenKind::QuantLazy
            ]
        );
    }

    #[test]
    fn test_lazy_after_brace_quantifier() {
        assert_eq!(
            kinds("a{2,}?", Dialect::Ecma),
            vec![TokenKind::Literal, TokenKind::QuantMin, TokenKind::QuantLazy]
        );
    }

    #[test]
    fn test_question_after_lazy_is_not_lazy() {
        assert_eq!(
            kinds("a+??", Dialect::Ecma),
            vec![
                TokenKind::Literal,
                TokenKind::QuantPlus,
                TokenKind::QuantLazy,
                TokenKind::QuantQuestion,
            ]
        );
    }

    #[test]
    fn test_brace_quantifier_shapes() {
        assert_eq!(kinds("a{3}", Dialect::Ecma)[1], TokenKind::QuantExact);
        assert_eq!(kinds("a{3,}", Dialect::Ecma)[1], TokenKind::QuantMin);
        assert_eq!(kinds("a{3,5}", Dialect::Ecma)[1], TokenKind::QuantRange);
    }

    #[test]
    fn test_malformed_brace_is_literal() {
        let tokens = tokenize("a{bad}", Dialect::Ecma).tokens;
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert!(kinds.iter().all(|k| *k == TokenKind::Literal));
        assert_eq!(texts, vec!["a", "{", "b", "a", "d", "}"]);
    }

    #[test]
    fn test_brace_shapes_that_stay_literal() {
        for pattern in ["a{", "a{}", "a{,3}", "a{1,2,3}", "a{ 1}", "a{1"] {
            let result = tokenize(pattern, Dialect::Ecma);
            assert!(
                result.tokens.iter().all(|t| !t.kind.is_quantifier()),
                "{pattern}"
            );
            assert_eq!(result.tokens.len(), pattern.chars().count(), "{pattern}");
        }
    }

    #[test]
    fn test_malformed_brace_then_valid_brace() {
        let tokens = tokenize("{x}{2}", Dialect::Ecma).tokens;
        assert_eq!(tokens[0].kind, TokenKind::Literal);
        assert_eq!(tokens[3].kind, TokenKind::QuantExact);
        assert_eq!(tokens[3].offset, 3);
    }

    #[test]
    fn test_group_openers() {
        let cases = [
            ("(a)", TokenKind::GroupStart, "("),
            ("(?:a)", TokenKind::NonCapturingGroup, "(?:"),
            ("(?=a)", TokenKind::LookaheadPos, "(?="),
            ("(?!a)", TokenKind::LookaheadNeg, "(?!"),
            ("(?<=a)", TokenKind::LookbehindPos, "(?<="),
            ("(?<!a)", TokenKind::LookbehindNeg, "(?<!"),
            ("(?<year>a)", TokenKind::NamedGroupStart, "(?<year>"),
        ];
        for (pattern, kind, text) in cases {
            let tokens = tokenize(pattern, Dialect::Ecma).tokens;
            assert_eq!(tokens[0].kind, kind, "{pattern}");
            assert_eq!(tokens[0].text, text, "{pattern}");
            assert_eq!(tokens.last().unwrap().kind, TokenKind::GroupEnd);
        }
    }

    #[test]
    fn test_python_named_group() {
        let tokens = tokenize("(?P<year>\\d)", Dialect::Python).tokens;
        assert_eq!(tokens[0].kind, TokenKind::NamedGroupStart);
        assert_eq!(tokens[0].text, "(?P<year>");
    }

    #[test]
    fn test_python_named_backreference() {
        let tokens = tokenize("(?P<q>a)(?P=q)", Dialect::Python).tokens;
        assert_eq!(tokens[3].kind, TokenKind::BackrefNamed);
        assert_eq!(tokens[3].text, "(?P=q)");
    }

    #[test]
    fn test_python_group_outside_python_is_modifier() {
        let tokens = tokenize("(?P<x>a)", Dialect::Ecma).tokens;
        assert_eq!(tokens[0].kind, TokenKind::InlineModifier);
        assert_eq!(tokens[0].text, "(?P<x>a)");
    }

    #[test]
    fn test_malformed_python_group() {
        let result = tokenize("(?Px)", Dialect::Pcre);
        assert_eq!(result.tokens[0].kind, TokenKind::Invalid);
        assert_eq!(result.tokens[0].text, "(?Px");
        assert_eq!(
            result.diagnostics.errors()[0].kind,
            DiagnosticKind::MalformedPythonGroup
        );
    }

    #[test]
    fn test_unterminated_named_group() {
        let result = tokenize("a(?<name", Dialect::Ecma);
        let last = result.tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Invalid);
        assert_eq!(last.text, "(?<name");
        assert_eq!(
            result.diagnostics.errors()[0].kind,
            DiagnosticKind::UnterminatedNamedGroup
        );
    }

    #[test]
    fn test_inline_modifier() {
        let tokens = tokenize("(?imsx)abc", Dialect::Pcre).tokens;
        assert_eq!(tokens[0].kind, TokenKind::InlineModifier);
        assert_eq!(tokens[0].text, "(?imsx)");
        assert_eq!(tokens[1].offset, 7);
    }

    #[test]
    fn test_scoped_inline_modifier() {
        let tokens = tokenize("(?i-s:ab)", Dialect::Pcre).tokens;
        assert_eq!(tokens[0].kind, TokenKind::InlineModifier);
        assert_eq!(tokens[0].text, "(?i-s:");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::GroupEnd);
    }

    #[test]
    fn test_unterminated_inline_modifier() {
        let result = tokenize("(?i", Dialect::Pcre);
        assert_eq!(result.tokens.len(), 1);
        assert_eq!(result.tokens[0].kind, TokenKind::Invalid);
        assert_eq!(
            result.diagnostics.errors()[0].kind,
            DiagnosticKind::UnterminatedModifier
        );
    }

    #[test]
    fn test_character_classes() {
        assert_eq!(
            kinds("[^a]", Dialect::Ecma),
            vec![
                TokenKind::CharClassNegated,
                TokenKind::Literal,
                TokenKind::CharClassEnd
            ]
        );
        assert_eq!(texts("[^a]", Dialect::Ecma)[0], "[^");
        assert_eq!(kinds("[a]", Dialect::Ecma)[0], TokenKind::CharClassStart);
    }

    #[test]
    fn test_alternation() {
        assert_eq!(
            kinds("a|b", Dialect::Ecma),
            vec![TokenKind::Literal, TokenKind::Alternation, TokenKind::Literal]
        );
    }

    #[test]
    fn test_escape_table() {
        let cases = [
            (r"\d", TokenKind::EscapeDigit),
            (r"\D", TokenKind::EscapeNonDigit),
            (r"\w", TokenKind::EscapeWord),
            (r"\W", TokenKind::EscapeNonWord),
            (r"\s", TokenKind::EscapeSpace),
            (r"\S", TokenKind::EscapeNonSpace),
            (r"\t", TokenKind::EscapeTab),
            (r"\n", TokenKind::EscapeNewline),
            (r"\r", TokenKind::EscapeReturn),
            (r"\f", TokenKind::EscapeFormFeed),
            (r"\v", TokenKind::EscapeVerticalTab),
            (r"\0", TokenKind::EscapeNull),
            (r"\b", TokenKind::WordBoundary),
            (r"\B", TokenKind::NonWordBoundary),
            (r"\7", TokenKind::BackrefNumber),
            (r"\.", TokenKind::Escape),
            (r"\\", TokenKind::Escape),
        ];
        for (pattern, kind) in cases {
            let tokens = tokenize(pattern, Dialect::Ecma).tokens;
            assert_eq!(tokens.len(), 1, "{pattern}");
            assert_eq!(tokens[0].kind, kind, "{pattern}");
        }
    }

    #[test]
    fn test_backreference_is_single_digit() {
        let tokens = tokenize(r"\12", Dialect::Ecma).tokens;
        assert_eq!(tokens[0].kind, TokenKind::BackrefNumber);
        assert_eq!(tokens[0].text, r"\1");
        assert_eq!(tokens[1].kind, TokenKind::Literal);
    }

    #[test]
    fn test_named_backreference() {
        let tokens = tokenize(r"\k<year>", Dialect::Ecma).tokens;
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::BackrefNamed);
    }

    #[test]
    fn test_k_without_name_is_escape() {
        let tokens = tokenize(r"\kx", Dialect::Ecma).tokens;
        assert_eq!(tokens[0].kind, TokenKind::Escape);
        assert_eq!(tokens[0].text, r"\k");
    }

    #[test]
    fn test_unterminated_named_backreference() {
        let result = tokenize(r"\k<year", Dialect::Ecma);
        assert_eq!(result.tokens[0].kind, TokenKind::Invalid);
        assert_eq!(result.tokens[0].text, r"\k<year");
        assert!(result.diagnostics.has_errors());
    }

    #[test]
    fn test_hex_escape() {
        assert_eq!(texts(r"\x41", Dialect::Ecma), vec![r"\x41"]);
        assert_eq!(kinds(r"\x41", Dialect::Ecma), vec![TokenKind::EscapeHex]);
        assert_eq!(texts(r"\x4g", Dialect::Ecma), vec![r"\x", "4", "g"]);
        assert_eq!(kinds(r"\x4", Dialect::Ecma)[0], TokenKind::Escape);
    }

    #[test]
    fn test_unicode_escapes() {
        assert_eq!(texts(r"\u00e9", Dialect::Ecma), vec![r"\u00e9"]);
        assert_eq!(texts(r"\u{1F600}", Dialect::Ecma), vec![r"\u{1F600}"]);
        assert_eq!(kinds(r"\u{1F600}", Dialect::Ecma), vec![TokenKind::EscapeUnicode]);
        assert_eq!(texts(r"\u{}", Dialect::Ecma)[0], r"\u");
        assert_eq!(texts(r"\u{zz}", Dialect::Ecma)[0], r"\u");
        assert_eq!(texts(r"\u12", Dialect::Ecma)[0], r"\u");
    }

    #[test]
    fn test_control_escape() {
        assert_eq!(kinds(r"\cM", Dialect::Ecma), vec![TokenKind::EscapeControl]);
        assert_eq!(texts(r"\c1", Dialect::Ecma), vec![r"\c", "1"]);
        assert_eq!(kinds(r"\c", Dialect::Ecma), vec![TokenKind::Escape]);
    }

    #[test]
    fn test_trailing_backslash() {
        let result = tokenize(r"ab\", Dialect::Ecma);
        let last = result.tokens.last().unwrap();
        assert_eq!(last.kind, TokenKind::Invalid);
        assert_eq!(last.text, "\\");
        assert_eq!(
            result.diagnostics.errors()[0].kind,
            DiagnosticKind::TrailingBackslash
        );
    }

    #[test]
    fn test_bre_unescaped_specials_are_literal() {
        let tokens = tokenize("(a)", Dialect::PosixBre).tokens;
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Literal));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_bre_escaped_group() {
        assert_eq!(
            kinds(r"\(a\)", Dialect::PosixBre),
            vec![TokenKind::GroupStart, TokenKind::Literal, TokenKind::GroupEnd]
        );
    }

    #[test]
    fn test_bre_escaped_operators() {
        assert_eq!(
            kinds(r"a\+b\?c\|d", Dialect::Sed),
            vec![
                TokenKind::Literal,
                TokenKind::QuantPlus,
                TokenKind::Literal,
                TokenKind::QuantQuestion,
                TokenKind::Literal,
                TokenKind::Alternation,
                TokenKind::Literal,
            ]
        );
    }

    #[test]
    fn test_bre_interval() {
        let tokens = tokenize(r"a\{2,5\}b", Dialect::PosixBre).tokens;
        assert_eq!(tokens[1].kind, TokenKind::QuantRange);
        assert_eq!(tokens[1].text, r"\{2,5\}");
        assert_eq!(tokens[2].offset, 8);
    }

    #[test]
    fn test_bre_malformed_interval() {
        let tokens = tokenize(r"a\{x\}", Dialect::PosixBre).tokens;
        assert_eq!(tokens[1].kind, TokenKind::Escape);
        assert_eq!(tokens[1].text, r"\{");
    }

    #[test]
    fn test_bre_unescaped_braces_are_literal() {
        let tokens = tokenize("a{2}", Dialect::PosixBre).tokens;
        assert!(tokens.iter().all(|t| t.kind == TokenKind::Literal));
    }

    #[test]
    fn test_bre_leading_star_is_literal() {
        assert_eq!(kinds("*a", Dialect::PosixBre)[0], TokenKind::Literal);
        assert_eq!(kinds("^*", Dialect::PosixBre)[1], TokenKind::Literal);
        assert_eq!(kinds(r"\(*\)", Dialect::Sed)[1], TokenKind::Literal);
        assert_eq!(kinds("a*", Dialect::PosixBre)[1], TokenKind::QuantStar);
        assert_eq!(kinds("*a", Dialect::Ecma)[0], TokenKind::QuantStar);
    }

    #[test]
    fn test_ere_groups_unescaped() {
        assert_eq!(
            kinds("(a|b)+", Dialect::PosixEre),
            vec![
                TokenKind::GroupStart,
                TokenKind::Literal,
                TokenKind::Alternation,
                TokenKind::Literal,
                TokenKind::GroupEnd,
                TokenKind::QuantPlus,
            ]
        );
    }

    #[test]
    fn test_vim_mode_modifiers_warn() {
        let result = tokenize(r"\v\c(a)", Dialect::Vim);
        assert_eq!(result.tokens[0].kind, TokenKind::ModeModifier);
        assert_eq!(result.tokens[1].kind, TokenKind::ModeModifier);
        assert_eq!(result.diagnostics.warnings().len(), 2);
        assert!(!result.diagnostics.has_errors());
        assert_eq!(
            result.diagnostics.warnings()[0].message(),
            "Vim very magic mode"
        );
    }

    #[test]
    fn test_vim_word_boundaries() {
        assert_eq!(
            kinds(r"\<foo\>", Dialect::Vim),
            vec![
                TokenKind::WordBoundary,
                TokenKind::Literal,
                TokenKind::Literal,
                TokenKind::Literal,
                TokenKind::WordBoundary,
            ]
        );
    }

    #[test]
    fn test_vim_escapes_outside_vim() {
        assert_eq!(kinds(r"\v", Dialect::Ecma), vec![TokenKind::EscapeVerticalTab]);
        assert_eq!(kinds(r"\<", Dialect::Ecma), vec![TokenKind::Escape]);
    }

    #[test]
    fn test_vim_keeps_shared_escapes() {
        assert_eq!(kinds(r"\d", Dialect::Vim), vec![TokenKind::EscapeDigit]);
    }

    #[test]
    fn test_round_trip_tricky_patterns() {
        let patterns = [
            r"(?<y>\d{4})-(?<m>\d{2})",
            r"a{bad}{2,}?",
            r"[^\]a-z\\]+?",
            r"\u{110000}\xZZ\c",
            "(?",
            "(?P",
            "(?P=x",
            "\\",
        ];
        for dialect in Dialect::all() {
            for pattern in patterns {
                let tokens = tokenize(pattern, dialect).tokens;
                let rebuilt: String = tokens.iter().map(|t| t.text.as_str()).collect();
                assert_eq!(rebuilt, pattern, "{pattern} under {dialect}");
                for pair in tokens.windows(2) {
                    assert_eq!(pair[0].end(), pair[1].offset);
                }
            }
        }
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenKind::QuantExact, "{4}", 3);
        assert_eq!(token.to_string(), "QUANT_EXACT `{4}`");
        assert_eq!(token.span(), Span::new(3, 6));
    }
}
