//! End-to-end tests for the tokenize, build, highlight and explain pipeline

use dialex::{
    Dialect, DiagnosticKind, NodeKind, QuantifierKind, TokenKind, analyze, explain, highlight,
    parse, tokenize,
};

fn kinds(pattern: &str, dialect: Dialect) -> Vec<TokenKind> {
    tokenize(pattern, dialect)
        .tokens
        .iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_ipv4_end_to_end() {
    let result = analyze(r"\b\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}\b", "ecma").unwrap();
    assert!(result.success());
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());

    let sequence = &result.ast.children[0];
    assert_eq!(sequence.kind, NodeKind::Sequence);
    let nodes = &sequence.children;
    assert_eq!(nodes.len(), 9);

    assert_eq!(nodes[0].kind, NodeKind::Anchor);
    assert_eq!(nodes[0].metadata.token_kind, Some(TokenKind::WordBoundary));
    assert_eq!(nodes[8].metadata.token_kind, Some(TokenKind::WordBoundary));

    for i in [1, 3, 5, 7] {
        let digit = &nodes[i];
        assert_eq!(digit.kind, NodeKind::Escape);
        assert_eq!(digit.metadata.token_kind, Some(TokenKind::EscapeDigit));
        let quantifier = digit.quantifier.as_ref().unwrap();
        assert_eq!(quantifier.kind, QuantifierKind::Between(1, 3));
        assert_eq!(quantifier.kind.token_kind(), TokenKind::QuantRange);
        assert_eq!(quantifier.raw, "{1,3}");
    }
    for i in [2, 4, 6] {
        assert_eq!(nodes[i].kind, NodeKind::Escape);
        assert_eq!(nodes[i].value.as_deref(), Some(r"\."));
        assert!(nodes[i].quantifier.is_none());
    }
}

#[test]
fn test_lazy_marker_disambiguation() {
    assert_eq!(
        kinds("a*?", Dialect::Ecma),
        vec![TokenKind::Literal, TokenKind::QuantStar, TokenKind::QuantLazy]
    );
    assert_eq!(
        kinds("a??", Dialect::Ecma),
        vec![TokenKind::Literal, TokenKind::QuantQuestion, TokenKind::QuantLazy]
    );
    assert_eq!(
        kinds("a{2,}?", Dialect::Pcre),
        vec![TokenKind::Literal, TokenKind::QuantMin, TokenKind::QuantLazy]
    );
}

#[test]
fn test_malformed_brace_is_literal_run() {
    let tokenized = tokenize("a{bad}", Dialect::Ecma);
    let texts: Vec<_> = tokenized.tokens.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "{", "b", "a", "d", "}"]);
    assert!(tokenized.tokens.iter().all(|t| t.kind == TokenKind::Literal));

    let result = parse("a{bad}", Dialect::Ecma);
    assert!(result.success());
    assert_eq!(result.ast.children[0].children.len(), 6);
}

#[test]
fn test_unclosed_group_keeps_partial_tree() {
    for dialect in Dialect::all() {
        let pattern = if dialect.is_basic() { r"\(abc" } else { "(abc" };
        let result = parse(pattern, dialect);
        assert_eq!(result.errors.len(), 1, "{dialect}");
        assert_eq!(result.errors[0].kind, DiagnosticKind::UnclosedGroup);

        let group = &result.ast.children[0].children[0];
        assert_eq!(group.kind, NodeKind::Group, "{dialect}");
        let body = &group.children[0];
        assert_eq!(body.kind, NodeKind::Sequence);
        let values: Vec<_> = body
            .children
            .iter()
            .map(|n| n.value.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }
}

#[test]
fn test_range_folding() {
    let result = parse("[a-z0-9]", Dialect::Ecma);
    let class = &result.ast.children[0].children[0];
    assert_eq!(class.kind, NodeKind::CharClass);
    assert_eq!(class.children.len(), 2);

    let ranges: Vec<_> = class
        .children
        .iter()
        .map(|n| {
            let range = n.metadata.range.as_ref().unwrap();
            (range.from.as_str(), range.to.as_str())
        })
        .collect();
    assert_eq!(ranges, vec![("a", "z"), ("0", "9")]);
}

#[test]
fn test_malformed_input_reports_but_still_builds() {
    let patterns = [r"(?<name", r"\k<oops", "(?i", r"x\", "[abc", "a)b", "*a", "(?P", "((("];
    for pattern in patterns {
        let result = parse(pattern, Dialect::Python);
        assert_eq!(result.reconstruct(), pattern);
        assert_eq!(result.ast.kind, NodeKind::Root);
        assert!(result.ast.children.len() <= 1);
        assert!(
            !result.errors.is_empty() || !result.warnings.is_empty(),
            "{pattern}"
        );
    }
}

#[test]
fn test_error_spans_point_into_pattern() {
    let result = parse(r"ab(?<name", Dialect::Ecma);
    assert_eq!(result.errors.len(), 1);
    let error = &result.errors[0];
    assert_eq!(error.kind, DiagnosticKind::UnterminatedNamedGroup);
    assert_eq!(error.offset(), 2);
    assert_eq!(error.span.len(), 7);
    assert_eq!(result.tokens.last().unwrap().kind, TokenKind::Invalid);
}

#[test]
fn test_highlight_covers_every_token() {
    let result = parse(r"^(?:a|b)+\d{2}$", Dialect::Ecma);
    let spans = highlight(&result.tokens);
    assert_eq!(spans.len(), result.tokens.len());
    let rebuilt: String = spans.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(rebuilt, result.pattern);
    assert!(spans.iter().all(|s| !s.css_class.is_empty()));

    let html = highlight::to_html(&result.tokens);
    assert!(html.contains(r#"data-token-type="NON_CAPTURING_GROUP""#));
    assert!(html.contains(r#"data-token-type="QUANT_EXACT""#));
}

#[test]
fn test_explanation_follows_tree_order() {
    let result = parse(r"(?<word>\w+)\s\k<word>", Dialect::Ecma);
    assert!(result.success());
    let explanation = explain(&result);
    assert!(explanation.errors.is_empty());

    let kinds: Vec<_> = explanation.entries.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Sequence,
            NodeKind::Group,
            NodeKind::Sequence,
            NodeKind::Escape,
            NodeKind::Escape,
            NodeKind::Backreference,
        ]
    );
    let report = explanation.to_string();
    assert!(report.contains("Pattern Explanation"));
}

#[test]
fn test_explanation_carries_errors() {
    let result = parse("(a", Dialect::Ecma);
    let explanation = explain(&result);
    assert_eq!(explanation.errors.len(), 1);
}

#[test]
fn test_runaway_nesting_reports_instead_of_overflowing() {
    let pattern = "(".repeat(100_000);
    for dialect in [Dialect::Ecma, Dialect::Pcre, Dialect::Python] {
        let result = parse(&pattern, dialect);
        assert!(!result.success());
        assert!(
            result
                .errors
                .iter()
                .any(|d| d.kind == DiagnosticKind::NestingTooDeep(dialex::MAX_NESTING))
        );
        assert_eq!(result.reconstruct(), pattern);

        let explanation = explain(&result);
        assert!(!explanation.errors.is_empty());
        assert_eq!(highlight(&result.tokens).len(), 100_000);
    }
}

#[cfg(feature = "serde")]
#[test]
fn test_json_shape() {
    let result = parse(r"a+?", Dialect::Ecma);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["success"], true);
    assert_eq!(json["dialect"], "ecma");
    assert_eq!(json["tokens"][1]["kind"], "QUANT_PLUS");
    assert_eq!(json["tokens"][2]["kind"], "QUANT_LAZY");
    assert_eq!(json["tokens"][2]["offset"], 2);

    let literal = &json["ast"]["children"][0]["children"][0];
    assert_eq!(literal["kind"], "literal");
    assert_eq!(literal["quantifier"]["rawText"], "+");
    assert_eq!(literal["quantifier"]["lazy"], true);
}
