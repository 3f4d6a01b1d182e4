//! Error and diagnostic types
//!
//! Malformed patterns never produce an `Err`. Every problem found while
//! tokenizing or building the tree is recorded as a [`Diagnostic`] with the
//! character span it covers, so a caller can still render whatever tokens and
//! tree were produced. [`DialexError`] is reserved for configuration mistakes
//! such as an unknown dialect tag.

use thiserror::Error;

use crate::groups::GroupRegistryError;

/// The main error type for the crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DialexError {
    /// The dialect tag is not one of the supported flavors
    #[error(
        "unknown dialect '{0}' (expected one of: ecma, pcre, posix-bre, posix-ere, vim, python, sed)"
    )]
    UnknownDialect(String),
}

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Severity {
    /// The pattern cannot be fully rendered
    Error,
    /// A non-fatal advisory
    Warning,
}

/// Specific kinds of diagnostics
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A backslash is the last character of the pattern
    #[error("trailing backslash")]
    TrailingBackslash,

    /// `(?<name` or `(?P<name` without the closing `>`
    #[error("unterminated named group")]
    UnterminatedNamedGroup,

    /// `\k<name` or `(?P=name` without its terminator
    #[error("unterminated named backreference")]
    UnterminatedBackreference,

    /// `(?flags` without the closing `)`
    #[error("unterminated inline modifier")]
    UnterminatedModifier,

    /// `(?P` followed by something other than `<` or `=`
    #[error("malformed Python group extension")]
    MalformedPythonGroup,

    /// A dialect switch embedded in the pattern (Vim `\v`, `\c`, ...)
    #[error("{0}")]
    ModeSwitch(&'static str),

    /// A group opener without its closing parenthesis
    #[error("unclosed group")]
    UnclosedGroup,

    /// A `[` without its closing `]`
    #[error("unclosed character class")]
    UnclosedCharacterClass,

    /// A group opened inside more than the given number of enclosing groups
    #[error("groups nested deeper than {0} levels; inner parentheses are read as literals")]
    NestingTooDeep(usize),

    /// A `)` with no group open
    #[error("unmatched closing parenthesis")]
    UnmatchedGroupClose,

    /// A quantifier with no preceding element
    #[error("nothing to repeat")]
    NothingToRepeat,

    /// `{n,m}` with `n > m`
    #[error("quantifier range out of order: {{{min},{max}}}")]
    QuantifierOutOfOrder {
        /// Lower bound as written
        min: u32,
        /// Upper bound as written
        max: u32,
    },

    /// `[z-a]`
    #[error("character range out of order: {from}-{to}")]
    RangeOutOfOrder {
        /// Range start
        from: String,
        /// Range end
        to: String,
    },

    /// Capture group naming and backreference problems
    #[error(transparent)]
    Group(#[from] GroupRegistryError),
}

impl DiagnosticKind {
    /// Severity this kind of diagnostic is reported with
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::ModeSwitch(_)
            | DiagnosticKind::QuantifierOutOfOrder { .. }
            | DiagnosticKind::RangeOutOfOrder { .. }
            | DiagnosticKind::Group(_) => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A span of characters in the source pattern
///
/// Offsets count characters (Unicode scalar values), not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    /// Start position (inclusive)
    pub start: usize,
    /// End position (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Create a span for a single character
    pub fn single(pos: usize) -> Self {
        Span {
            start: pos,
            end: pos + 1,
        }
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(&self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A diagnostic with its source location
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// What went wrong
    pub kind: DiagnosticKind,
    /// Where in the pattern
    pub span: Span,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Diagnostic { kind, span }
    }

    /// Human-readable message
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Character offset where the problem starts
    pub fn offset(&self) -> usize {
        self.span.start
    }

    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at position {}", self.kind, self.span.start)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Diagnostic {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("Diagnostic", 4)?;
        state.serialize_field("message", &self.message())?;
        state.serialize_field("offset", &self.span.start)?;
        state.serialize_field("length", &self.span.len())?;
        state.serialize_field("severity", &self.severity())?;
        state.end()
    }
}

/// Collector for diagnostics raised during a single parse
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    errors: Vec<Diagnostic>,
    warnings: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collector
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Record a diagnostic, routed by the severity of its kind
    pub fn report(&mut self, kind: impl Into<DiagnosticKind>, span: Span) {
        let diagnostic = Diagnostic::new(kind.into(), span);
        match diagnostic.severity() {
            Severity::Error => self.errors.push(diagnostic),
            Severity::Warning => self.warnings.push(diagnostic),
        }
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True when neither errors nor warnings were recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Append everything recorded by another phase
    pub fn extend(&mut self, other: Diagnostics) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    /// Split into `(errors, warnings)`, each ordered by offset
    pub fn into_parts(mut self) -> (Vec<Diagnostic>, Vec<Diagnostic>) {
        self.errors.sort_by_key(|d| d.span.start);
        self.warnings.sort_by_key(|d| d.span.start);
        (self.errors, self.warnings)
    }
}

/// Result type alias for fallible configuration operations
pub type Result<T> = std::result::Result<T, DialexError>;
