//! Parser for regex patterns
//!
//! This module provides a recursive descent parser that converts the
//! lexer's token stream into an Abstract Syntax Tree (AST). The parser never
//! aborts: unclosed groups and classes, stray parentheses and dangling
//! quantifiers are recorded as diagnostics and a best-effort tree is still
//! returned.
//!
//! Grammar (in order of precedence, lowest to highest):
//!   regex       := alternation
//!   alternation := sequence ( '|' sequence )*
//!   sequence    := element*
//!   element     := atom quantifier?
//!   quantifier  := ( '*' | '+' | '?' | '{n}' | '{n,}' | '{n,m}' ) lazy?
//!   atom        := literal | dot | anchor | escape | backref | modifier
//!                | group | char_class
//!   group       := group_open alternation ')'
//!   char_class  := ( '[' | '[^' ) class_item* ']'
//!   class_item  := single ( '-' single )?

use crate::ast::{ClassRange, Metadata, NameSyntax, Node, NodeKind, Quantifier, QuantifierKind};
use crate::dialect::Dialect;
use crate::error::{Diagnostic, DiagnosticKind, Diagnostics, Span};
use crate::groups::GroupRegistry;
use crate::lexer::{Lexer, Token, TokenKind};

/// Deepest group nesting built as a tree; deeper openers become literals
pub const MAX_NESTING: usize = 128;

/// Output of a tree-building pass
#[derive(Debug, Clone)]
pub struct Built {
    /// The root node
    pub ast: Node,
    /// Capture groups in opener order
    pub groups: GroupRegistry,
    /// Structural errors and semantic warnings
    pub diagnostics: Diagnostics,
}

/// Tree builder over a token slice
///
/// A parser is a single build session: create one per token stream, then
/// consume it with [`Parser::build`].
pub struct Parser<'t> {
    tokens: &'t [Token],
    index: usize,
    last_end: usize,
    depth: usize,
    /// Openers past [`MAX_NESTING`] still waiting for their `)`
    flattened: usize,
    diagnostics: Diagnostics,
    groups: GroupRegistry,
}

impl<'t> Parser<'t> {
    /// Create a new parser over the given tokens
    pub fn new(tokens: &'t [Token]) -> Self {
        Parser {
            tokens,
            index: 0,
            last_end: 0,
            depth: 0,
            flattened: 0,
            diagnostics: Diagnostics::new(),
            groups: GroupRegistry::new(),
        }
    }

    /// Build the tree, then check backreferences against the capture groups
    pub fn build(mut self) -> Built {
        let body = self.parse_alternation(false);
        let end = self.tokens.last().map_or(0, Token::end);
        let mut ast = Node::branch(NodeKind::Root, body.into_iter().collect(), Span::new(0, end));

        self.resolve_backreferences(&mut ast);

        Built {
            ast,
            groups: self.groups,
            diagnostics: self.diagnostics,
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.index)
    }

    fn peek_at(&self, ahead: usize) -> Option<&'t Token> {
        self.tokens.get(self.index + ahead)
    }

    /// Consume the current token
    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        self.last_end = token.end();
        Some(token)
    }

    /// Offset of the next unconsumed token
    fn offset(&self) -> usize {
        self.peek().map_or(self.last_end, |t| t.offset)
    }

    /// Parse alternation (lowest precedence)
    ///
    /// Returns `None` for an empty body. With more than one branch the
    /// result is an n-ary alternation node whose value is the bar text, so
    /// BRE `\|` survives reconstruction.
    fn parse_alternation(&mut self, nested: bool) -> Option<Node> {
        let start = self.offset();
        let mut branches = vec![self.parse_sequence(nested)];
        let mut bar = None;

        while let Some(token) = self.peek().filter(|t| t.kind == TokenKind::Alternation) {
            self.advance();
            bar.get_or_insert_with(|| token.text.clone());
            branches.push(self.parse_sequence(nested));
        }

        if branches.len() == 1 {
            return branches.pop().filter(|seq| !seq.children.is_empty());
        }

        let mut alternation = Node::branch(
            NodeKind::Alternation,
            branches,
            Span::new(start, self.last_end.max(start)),
        );
        alternation.value = bar;
        alternation.metadata = Metadata::of(TokenKind::Alternation);
        Some(alternation)
    }

    /// Parse a sequence up to `|`, the end of input or, when nested, `)`
    fn parse_sequence(&mut self, nested: bool) -> Node {
        let start = self.offset();
        let mut children = Vec::new();

        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Alternation => break,
                TokenKind::GroupEnd if self.flattened > 0 => children.push(self.parse_element()),
                TokenKind::GroupEnd if nested => break,
                TokenKind::GroupEnd => {
                    self.diagnostics
                        .report(DiagnosticKind::UnmatchedGroupClose, token.span());
                    self.advance();
                }
                kind if kind.is_quantifier() || kind == TokenKind::QuantLazy => {
                    self.diagnostics
                        .report(DiagnosticKind::NothingToRepeat, token.span());
                    self.advance();
                }
                _ => children.push(self.parse_element()),
            }
        }

        let end = if children.is_empty() {
            start
        } else {
            self.last_end
        };
        Node::branch(NodeKind::Sequence, children, Span::new(start, end))
    }

    /// Parse an atom and its optional quantifier
    fn parse_element(&mut self) -> Node {
        let mut node = self.parse_atom();
        if let Some(quantifier) = self.parse_quantifier() {
            node.quantifier = Some(quantifier);
        }
        node
    }

    fn parse_atom(&mut self) -> Node {
        let Some(token) = self.advance() else {
            return Node::branch(NodeKind::Sequence, Vec::new(), Span::new(self.last_end, self.last_end));
        };

        match token.kind {
            kind if kind.is_group_open() || is_scoped_modifier(token) => {
                if self.depth < MAX_NESTING {
                    self.parse_group(token)
                } else {
                    self.flatten_group(token)
                }
            }
            TokenKind::GroupEnd => {
                self.flattened = self.flattened.saturating_sub(1);
                leaf(NodeKind::Literal, token)
            }
            TokenKind::CharClassStart | TokenKind::CharClassNegated => self.parse_char_class(token),
            TokenKind::Dot => leaf(NodeKind::Dot, token),
            kind if kind.is_anchor() => leaf(NodeKind::Anchor, token),
            kind if kind.is_escape() => leaf(NodeKind::Escape, token),
            TokenKind::BackrefNumber => {
                let mut node = leaf(NodeKind::Backreference, token);
                node.metadata.group_number = token.text[1..].parse().ok();
                node
            }
            TokenKind::BackrefNamed => {
                let mut node = leaf(NodeKind::Backreference, token);
                let (name, syntax) = backreference_name(&token.text);
                node.metadata.name = Some(name);
                node.metadata.name_syntax = Some(syntax);
                node
            }
            TokenKind::ModeModifier | TokenKind::InlineModifier => {
                let mut node = leaf(NodeKind::Modifier, token);
                node.metadata.flags = Some(modifier_flags(&token.text));
                node
            }
            _ => leaf(NodeKind::Literal, token),
        }
    }

    /// An opener past the nesting limit; it and its `)` stay literal leaves
    fn flatten_group(&mut self, opener: &'t Token) -> Node {
        if self.flattened == 0 {
            self.diagnostics
                .report(DiagnosticKind::NestingTooDeep(MAX_NESTING), opener.span());
        }
        self.flattened += 1;
        leaf(NodeKind::Literal, opener)
    }

    /// Parse a group body after its opener has been consumed
    fn parse_group(&mut self, opener: &'t Token) -> Node {
        let mut metadata = Metadata::of(opener.kind);
        metadata.opener = Some(opener.text.clone());

        let kind = if opener.kind.is_lookaround() {
            NodeKind::Assertion
        } else {
            NodeKind::Group
        };

        match opener.kind {
            TokenKind::GroupStart => metadata.capturing = Some(true),
            TokenKind::NamedGroupStart => {
                let (name, syntax) = group_name(&opener.text);
                metadata.capturing = Some(true);
                metadata.name = Some(name);
                metadata.name_syntax = Some(syntax);
            }
            TokenKind::InlineModifier => {
                metadata.capturing = Some(false);
                metadata.flags = Some(modifier_flags(&opener.text));
            }
            _ => metadata.capturing = Some(false),
        }

        if metadata.capturing == Some(true) {
            let (number, error) = self
                .groups
                .register_group(metadata.name.as_deref(), opener.offset);
            metadata.group_number = Some(number);
            if let Some(error) = error {
                self.diagnostics.report(error, opener.span());
            }
        }

        self.depth += 1;
        let body = self.parse_alternation(true);
        self.depth -= 1;

        match self.peek().filter(|t| t.kind == TokenKind::GroupEnd) {
            Some(closer) => {
                self.advance();
                metadata.closer = Some(closer.text.clone());
            }
            None => {
                self.diagnostics
                    .report(DiagnosticKind::UnclosedGroup, opener.span());
            }
        }

        Node {
            kind,
            value: Some(opener.text.clone()),
            children: body.into_iter().collect(),
            quantifier: None,
            metadata,
            span: Span::new(opener.offset, self.last_end),
        }
    }

    /// Parse a bracket expression after its opener has been consumed
    ///
    /// Every token up to the closing `]` is class content. `a-z` shapes fold
    /// into one literal node carrying the range endpoints.
    fn parse_char_class(&mut self, opener: &'t Token) -> Node {
        let mut metadata = Metadata::of(opener.kind);
        metadata.opener = Some(opener.text.clone());
        metadata.negated = opener.kind == TokenKind::CharClassNegated;

        let mut children = Vec::new();
        while let Some(token) = self.advance() {
            if token.kind == TokenKind::CharClassEnd {
                metadata.closer = Some(token.text.clone());
                break;
            }

            if let Some(range) = self.parse_class_range(token) {
                children.push(range);
                continue;
            }

            let node = if token.kind == TokenKind::Invalid {
                leaf(NodeKind::Literal, token)
            } else if token.kind.is_escape() || token.text.starts_with('\\') {
                leaf(NodeKind::Escape, token)
            } else {
                leaf(NodeKind::Literal, token)
            };
            children.push(node);
        }

        if metadata.closer.is_none() {
            self.diagnostics
                .report(DiagnosticKind::UnclosedCharacterClass, opener.span());
        }

        let body: String = children
            .iter()
            .filter_map(|child| child.value.as_deref())
            .collect();

        Node {
            kind: NodeKind::CharClass,
            value: Some(body),
            children,
            quantifier: None,
            metadata,
            span: Span::new(opener.offset, self.last_end),
        }
    }

    /// Fold `from '-' to` into a single range node
    fn parse_class_range(&mut self, from: &'t Token) -> Option<Node> {
        let dash = self.peek()?;
        let to = self.peek_at(1)?;
        let is_range = from.kind.is_single_char()
            && dash.kind == TokenKind::Literal
            && dash.text == "-"
            && to.kind.is_single_char();
        if !is_range {
            return None;
        }
        self.advance();
        self.advance();

        if from.kind == TokenKind::Literal && to.kind == TokenKind::Literal && from.text > to.text {
            self.diagnostics.report(
                DiagnosticKind::RangeOutOfOrder {
                    from: from.text.clone(),
                    to: to.text.clone(),
                },
                from.span().to(to.span()),
            );
        }

        Some(Node::leaf(
            NodeKind::Literal,
            format!("{}{}{}", from.text, dash.text, to.text),
            Metadata {
                range: Some(ClassRange {
                    from: from.text.clone(),
                    to: to.text.clone(),
                }),
                ..Metadata::default()
            },
            from.span().to(to.span()),
        ))
    }

    /// Parse a quantifier if present, folding a trailing lazy marker
    fn parse_quantifier(&mut self) -> Option<Quantifier> {
        let token = self.peek().filter(|t| t.kind.is_quantifier())?;
        self.advance();

        let kind = match token.kind {
            TokenKind::QuantStar => QuantifierKind::Star,
            TokenKind::QuantPlus => QuantifierKind::Plus,
            TokenKind::QuantQuestion => QuantifierKind::Question,
            TokenKind::QuantExact => QuantifierKind::Exact(interval_bounds(&token.text).0),
            TokenKind::QuantMin => QuantifierKind::AtLeast(interval_bounds(&token.text).0),
            _ => {
                let (min, max) = interval_bounds(&token.text);
                if min > max {
                    self.diagnostics
                        .report(DiagnosticKind::QuantifierOutOfOrder { min, max }, token.span());
                }
                QuantifierKind::Between(min, max)
            }
        };

        let mut span = token.span();
        let lazy = match self.peek().filter(|t| t.kind == TokenKind::QuantLazy) {
            Some(marker) => {
                self.advance();
                span = span.to(marker.span());
                true
            }
            None => false,
        };

        Some(Quantifier {
            kind,
            raw: token.text.clone(),
            lazy,
            span,
        })
    }

    /// Check every backreference against the registered groups
    fn resolve_backreferences(&mut self, ast: &mut Node) {
        let groups = &self.groups;
        let diagnostics = &mut self.diagnostics;

        ast.walk_mut(&mut |node| {
            if node.kind != NodeKind::Backreference {
                return;
            }
            let result = match (&node.metadata.name, node.metadata.group_number) {
                (Some(name), _) => groups.validate_backref_name(name),
                (None, Some(number)) => groups.validate_backref_number(number),
                (None, None) => return,
            };
            match result {
                Ok(number) => node.metadata.group_number = Some(number),
                Err(error) => diagnostics.report(error, node.span),
            }
        });
    }
}

/// `(?i:` and friends open a group; a bare `(?i)` does not
fn is_scoped_modifier(token: &Token) -> bool {
    token.kind == TokenKind::InlineModifier && token.text.ends_with(':')
}

fn leaf(kind: NodeKind, token: &Token) -> Node {
    Node::leaf(kind, token.text.clone(), Metadata::of(token.kind), token.span())
}

/// Name and spelling of a `(?<name>` or `(?P<name>` opener
fn group_name(text: &str) -> (String, NameSyntax) {
    let (rest, syntax) = match text.strip_prefix("(?P<") {
        Some(rest) => (rest, NameSyntax::Python),
        None => (text.strip_prefix("(?<").unwrap_or(text), NameSyntax::Angle),
    };
    (rest.strip_suffix('>').unwrap_or(rest).to_string(), syntax)
}

/// Name and spelling of a `\k<name>` or `(?P=name)` backreference
fn backreference_name(text: &str) -> (String, NameSyntax) {
    match text.strip_prefix("(?P=") {
        Some(rest) => (
            rest.strip_suffix(')').unwrap_or(rest).to_string(),
            NameSyntax::Python,
        ),
        None => {
            let rest = text.strip_prefix("\\k<").unwrap_or(text);
            (
                rest.strip_suffix('>').unwrap_or(rest).to_string(),
                NameSyntax::Angle,
            )
        }
    }
}

/// Flag letters of `(?imsx)`, `(?i-s:` or a Vim `\v`
fn modifier_flags(text: &str) -> String {
    if let Some(rest) = text.strip_prefix('\\') {
        return rest.to_string();
    }
    let rest = text.strip_prefix("(?").unwrap_or(text);
    rest.strip_suffix(')')
        .or_else(|| rest.strip_suffix(':'))
        .unwrap_or(rest)
        .to_string()
}

/// Bounds of `{n}`, `{n,}`, `{n,m}` or BRE `\{n,m\}`; oversized counts saturate
fn interval_bounds(text: &str) -> (u32, u32) {
    fn number(digits: &str) -> u32 {
        digits.bytes().fold(0u32, |acc, b| {
            acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
        })
    }

    let body: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    match body.split_once(',') {
        Some((min, "")) => (number(min), u32::MAX),
        Some((min, max)) => (number(min), number(max)),
        None => {
            let n = number(&body);
            (n, n)
        }
    }
}

/// Everything produced for one pattern
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The pattern as given
    pub pattern: String,
    pub dialect: Dialect,
    /// Root of the tree; always present, possibly partial
    pub ast: Node,
    /// Lossless token stream
    pub tokens: Vec<Token>,
    /// Capture groups in opener order
    pub groups: GroupRegistry,
    /// Diagnostics that prevent a full rendering, ordered by offset
    pub errors: Vec<Diagnostic>,
    /// Non-fatal advisories, ordered by offset
    pub warnings: Vec<Diagnostic>,
}

impl ParseResult {
    /// True iff no errors were recorded
    pub fn success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Concatenate token texts; always equals the input pattern
    pub fn reconstruct(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// Number of capturing groups
    pub fn group_count(&self) -> usize {
        self.groups.group_count()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ParseResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("ParseResult", 7)?;
        state.serialize_field("success", &self.success())?;
        state.serialize_field("pattern", &self.pattern)?;
        state.serialize_field("dialect", &self.dialect)?;
        state.serialize_field("ast", &self.ast)?;
        state.serialize_field("tokens", &self.tokens)?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field("warnings", &self.warnings)?;
        state.end()
    }
}

/// Tokenize and build a tree for `pattern` under `dialect`
///
/// Never fails on malformed input; problems are reported through
/// [`ParseResult::errors`] and [`ParseResult::warnings`].
pub fn parse(pattern: &str, dialect: Dialect) -> ParseResult {
    let tokenized = Lexer::new(pattern, dialect).tokenize();
    let built = Parser::new(&tokenized.tokens).build();

    let mut diagnostics = tokenized.diagnostics;
    diagnostics.extend(built.diagnostics);
    let (errors, warnings) = diagnostics.into_parts();

    ParseResult {
        pattern: pattern.to_string(),
        dialect,
        ast: built.ast,
        tokens: tokenized.tokens,
        groups: built.groups,
        errors,
        warnings,
    }
}
