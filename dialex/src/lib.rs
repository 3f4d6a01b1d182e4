//! Dialex Core Library
//!
//! A dialect-aware regex tokenizer and tree builder for highlighting,
//! explaining and annotating patterns written for ECMAScript, PCRE, POSIX
//! BRE/ERE, Vim, Python `re` and sed. Patterns are never executed.
//!
//! ```
//! use dialex::{Dialect, NodeKind, parse};
//!
//! let result = parse(r"(?<year>\d{4})", Dialect::Ecma);
//! assert!(result.success());
//! assert_eq!(result.reconstruct(), r"(?<year>\d{4})");
//! assert_eq!(result.ast.children[0].children[0].kind, NodeKind::Group);
//! ```

pub mod ast;
pub mod describe;
pub mod dialect;
pub mod error;
pub mod explain;
pub mod groups;
pub mod highlight;
pub mod lexer;
pub mod parser;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use ast::{ClassRange, Metadata, NameSyntax, Node, NodeKind, Quantifier, QuantifierKind};
pub use describe::{Tooltip, tooltip};
pub use dialect::Dialect;
pub use error::{DiagnosticKind, Diagnostic, Diagnostics, DialexError, Result, Severity, Span};
pub use explain::{Explanation, ExplanationEntry, explain};
pub use groups::{GroupInfo, GroupRegistry, GroupRegistryError};
pub use highlight::{Highlight, HighlightClass, highlight};
pub use lexer::{Lexer, Token, TokenKind, Tokenized, tokenize};
pub use parser::{Built, MAX_NESTING, ParseResult, Parser, parse};

/// Parse a pattern under a dialect given by its tag
///
/// This is the entry point for hosts that carry the dialect as a string.
///
/// # Errors
/// Returns [`DialexError::UnknownDialect`] when the tag is not recognized.
pub fn analyze(pattern: &str, dialect: &str) -> Result<ParseResult> {
    let dialect: Dialect = dialect.parse()?;
    Ok(parse(pattern, dialect))
}
