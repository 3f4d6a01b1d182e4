//! Regex dialects and their lexical differences
//!
//! Each [`Dialect`] maps to a static [`DialectSyntax`] entry holding the
//! handlers the lexer consults before its shared rules. Adding a dialect
//! means adding one variant and one table entry.

use std::fmt;
use std::str::FromStr;

use crate::error::{DialexError, Result};
use crate::lexer::TokenKind;

/// A supported regex syntax flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "kebab-case")
)]
pub enum Dialect {
    /// JavaScript / ECMAScript `RegExp`
    #[default]
    Ecma,
    /// Perl Compatible Regular Expressions
    Pcre,
    /// POSIX Basic Regular Expressions (grep)
    PosixBre,
    /// POSIX Extended Regular Expressions (egrep)
    PosixEre,
    /// Vim search patterns
    Vim,
    /// Python `re`
    Python,
    /// sed (BRE syntax)
    Sed,
}

/// What a dialect-specific escape handler decided for `\X`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectEscape {
    /// A two-character token of the given kind
    Token(TokenKind),
    /// A two-character mode switch that also records a warning
    ModeSwitch(&'static str),
    /// A BRE interval `\{n,m\}`
    Interval,
}

/// Handler for the character after a backslash
pub type EscapeHandler = fn(char) -> Option<DialectEscape>;

/// Handler for an unescaped character; `Some` overrides the shared rules
pub type SpecialHandler = fn(char) -> Option<TokenKind>;

/// Lexical rules that vary between dialects
#[derive(Debug)]
pub struct DialectSyntax {
    /// Consulted before the shared escape table
    pub escape: EscapeHandler,
    /// Consulted before the shared special-character dispatch
    pub unescaped: SpecialHandler,
    /// Whether `(?P<name>` and `(?P=name)` are recognized
    pub python_groups: bool,
    /// Whether `*` at the start of an expression is a literal
    pub leading_star_literal: bool,
}

static STANDARD: DialectSyntax = DialectSyntax {
    escape: no_escape,
    unescaped: no_special,
    python_groups: false,
    leading_star_literal: false,
};

static PYTHON_GROUPS: DialectSyntax = DialectSyntax {
    escape: no_escape,
    unescaped: no_special,
    python_groups: true,
    leading_star_literal: false,
};

static BASIC: DialectSyntax = DialectSyntax {
    escape: bre_escape,
    unescaped: bre_special,
    python_groups: false,
    leading_star_literal: true,
};

static VIM: DialectSyntax = DialectSyntax {
    escape: vim_escape,
    unescaped: no_special,
    python_groups: false,
    leading_star_literal: false,
};

fn no_escape(_: char) -> Option<DialectEscape> {
    None
}

fn no_special(_: char) -> Option<TokenKind> {
    None
}

/// In BRE the grouping, interval and alternation characters are special
/// only when escaped
fn bre_escape(c: char) -> Option<DialectEscape> {
    match c {
        '(' => Some(DialectEscape::Token(TokenKind::GroupStart)),
        ')' => Some(DialectEscape::Token(TokenKind::GroupEnd)),
        '+' => Some(DialectEscape::Token(TokenKind::QuantPlus)),
        '?' => Some(DialectEscape::Token(TokenKind::QuantQuestion)),
        '|' => Some(DialectEscape::Token(TokenKind::Alternation)),
        '{' => Some(DialectEscape::Interval),
        _ => None,
    }
}

fn bre_special(c: char) -> Option<TokenKind> {
    match c {
        '(' | ')' | '+' | '?' | '{' | '}' | '|' => Some(TokenKind::Literal),
        _ => None,
    }
}

fn vim_escape(c: char) -> Option<DialectEscape> {
    match c {
        'v' => Some(DialectEscape::ModeSwitch("Vim very magic mode")),
        'V' => Some(DialectEscape::ModeSwitch("Vim very nomagic mode")),
        'm' => Some(DialectEscape::ModeSwitch("Vim magic mode")),
        'M' => Some(DialectEscape::ModeSwitch("Vim nomagic mode")),
        'c' => Some(DialectEscape::ModeSwitch("Vim case insensitive")),
        'C' => Some(DialectEscape::ModeSwitch("Vim case sensitive")),
        '<' | '>' => Some(DialectEscape::Token(TokenKind::WordBoundary)),
        _ => None,
    }
}

impl Dialect {
    /// Every supported dialect, in display order
    pub fn all() -> [Dialect; 7] {
        [
            Dialect::Ecma,
            Dialect::Pcre,
            Dialect::PosixBre,
            Dialect::PosixEre,
            Dialect::Vim,
            Dialect::Python,
            Dialect::Sed,
        ]
    }

    /// Canonical tag for this dialect
    pub fn tag(self) -> &'static str {
        match self {
            Dialect::Ecma => "ecma",
            Dialect::Pcre => "pcre",
            Dialect::PosixBre => "posix-bre",
            Dialect::PosixEre => "posix-ere",
            Dialect::Vim => "vim",
            Dialect::Python => "python",
            Dialect::Sed => "sed",
        }
    }

    /// One-line description of the flavor
    pub fn description(self) -> &'static str {
        match self {
            Dialect::Ecma => "JavaScript (ECMAScript) regular expressions",
            Dialect::Pcre => "Perl Compatible Regular Expressions - advanced features",
            Dialect::PosixBre => "Basic Regular Expressions (BRE) - special chars need escaping",
            Dialect::PosixEre => "Extended Regular Expressions (ERE) - more intuitive syntax",
            Dialect::Vim => "Vim editor regex - supports magic modes",
            Dialect::Python => "Python re module - uses (?P<name>) for named groups",
            Dialect::Sed => "Stream editor patterns - uses BRE syntax",
        }
    }

    /// Whether the dialect uses BRE escaping rules
    pub fn is_basic(self) -> bool {
        matches!(self, Dialect::PosixBre | Dialect::Sed)
    }

    /// Lexical rules for this dialect
    pub fn syntax(self) -> &'static DialectSyntax {
        match self {
            Dialect::Ecma | Dialect::PosixEre => &STANDARD,
            Dialect::Pcre | Dialect::Python => &PYTHON_GROUPS,
            Dialect::PosixBre | Dialect::Sed => &BASIC,
            Dialect::Vim => &VIM,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Dialect {
    type Err = DialexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ecma" | "ecmascript" | "javascript" | "js" => Ok(Dialect::Ecma),
            "pcre" => Ok(Dialect::Pcre),
            "posix-bre" | "bre" | "grep" => Ok(Dialect::PosixBre),
            "posix-ere" | "ere" | "egrep" => Ok(Dialect::PosixEre),
            "vim" => Ok(Dialect::Vim),
            "python" | "py" => Ok(Dialect::Python),
            "sed" => Ok(Dialect::Sed),
            _ => Err(DialexError::UnknownDialect(s.to_string())),
        }
    }
}
