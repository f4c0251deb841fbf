use parser::{
    operator::OperatorId, lexer::CommentKind, NodeKind, ParseCallError, ParseExpressionResult,
    ParseOptions,
};
use syntax::ids::{numeric, operator};

fn parse(text: &str) -> ParseExpressionResult<'_> {
    parse_with(text, &ParseOptions::default())
}

fn parse_with<'t>(text: &'t str, options: &ParseOptions) -> ParseExpressionResult<'t> {
    let language = syntax::demo_language().unwrap();
    let result = parser::parse_expression(&language, text, options).unwrap();
    assert!(
        result.tree().check_invariants(text, result.root()).is_ok(),
        "{}",
        result.outline()
    );
    result
}

fn codes(result: &ParseExpressionResult) -> Vec<(usize, u32)> {
    result
        .errors()
        .iter()
        .map(|e| (e.offset(), e.code().code()))
        .collect()
}

/// The operator at the top of the first statement.
fn top_operator(text: &str) -> OperatorId {
    let result = parse(text);
    assert_eq!(codes(&result), vec![], "{}", text);

    let tree = result.tree();
    let first = tree.expression_items(result.root()).next().unwrap();
    match first.kind() {
        NodeKind::Operator { info, .. } => match tree[*info].kind() {
            NodeKind::OperatorInfo { operator, .. } => *operator,
            _ => unreachable!(),
        },
        other => panic!("not an operator: {:?}", other),
    }
}

#[test]
fn precedence() {
    assert_eq!(top_operator("a = b + c * d"), operator::ASSIGN);
    assert_eq!(top_operator("a * b + c"), operator::ADD);
    assert_eq!(top_operator("a.b * c"), operator::MULTIPLY);
    assert_eq!(top_operator("a < b == c > d"), operator::EQUAL);
    assert_eq!(top_operator("a && b || c"), operator::OR);
    assert_eq!(top_operator("a and b or c"), operator::OR_WORD);
    assert_eq!(top_operator("a ?? b = c"), operator::ASSIGN);
}

#[test]
fn prefix_and_postfix() {
    assert_eq!(top_operator("-a"), operator::NEGATE);
    assert_eq!(top_operator("typeof a"), operator::TYPEOF);
    assert_eq!(top_operator("x++ + y"), operator::ADD);
    assert_eq!(top_operator("--x"), operator::PRE_DECREMENT);
    assert_eq!(top_operator("a - -b"), operator::SUBTRACT);
}

#[test]
fn null_checks() {
    assert_eq!(top_operator("x is null"), operator::IS_NULL);
    assert_eq!(top_operator("x is not null"), operator::IS_NOT_NULL);
    assert_eq!(top_operator("x.y is /* really */ not null"), operator::IS_NOT_NULL);
    assert_eq!(top_operator("a == b is null"), operator::EQUAL);
}

#[test]
fn numbers() {
    let formats = |text: &str| -> Vec<_> {
        let result = parse(text);
        assert_eq!(codes(&result), vec![]);
        result
            .tree()
            .iter()
            .filter_map(|n| match n.kind() {
                NodeKind::Number { format } => Some((*format, n.text(text).to_string())),
                _ => None,
            })
            .collect()
    };

    assert_eq!(
        formats("f(0x1F, 1.5e3, 2e10, 42, 0)"),
        vec![
            (numeric::HEX, "0x1F".to_string()),
            (numeric::FLOAT, "1.5e3".to_string()),
            (numeric::FLOAT, "2e10".to_string()),
            (numeric::INTEGER, "42".to_string()),
            (numeric::INTEGER, "0".to_string()),
        ]
    );
}

#[test]
fn text() {
    let values = |text: &str| -> Vec<String> {
        let result = parse(text);
        assert_eq!(codes(&result), vec![]);
        result
            .tree()
            .iter()
            .filter_map(|n| match n.kind() {
                NodeKind::Text { value, .. } => Some(value.clone()),
                _ => None,
            })
            .collect()
    };

    assert_eq!(
        values(r#"f('It''s', "say ""hi""", `raw`)"#),
        vec!["It's", r#"say "hi""#, "raw"]
    );
}

#[test]
fn statements() {
    let result = parse("var x = 1; x += 2; return x");
    assert_eq!(codes(&result), vec![]);
    assert_eq!(result.tree().expression_items(result.root()).count(), 3);
}

#[test]
fn control_flow_needs_no_separators() {
    let result = parse("if (x > 1) { y = 1 } else { y = 2 } while (i < 10) { i++ }");
    assert_eq!(codes(&result), vec![]);
    assert_eq!(result.tree().expression_items(result.root()).count(), 3);
}

#[test]
fn functions() {
    let result = parse("public static function max(a, b) { return a > b }");
    assert_eq!(codes(&result), vec![]);

    let result = parse("function f() { return 1 } 2");
    assert_eq!(codes(&result), vec![]);
}

#[test]
fn attributes() {
    let result = parse("[Inline] [Since(2)] function f() {}");
    assert_eq!(codes(&result), vec![]);
}

#[test]
fn where_clauses() {
    let result = parse("max(a, b) where T : Ord & Copy");
    assert_eq!(codes(&result), vec![]);

    // Nothing to constrain.
    let result = parse("where T : Ord");
    assert_eq!(codes(&result), vec![(0, 502)]);

    let result = parse("1 where T : Ord");
    assert_eq!(codes(&result), vec![(2, 503)]);

    let result = parse("f where T Ord");
    assert_eq!(codes(&result)[0], (2, 500));
    assert_eq!(result.errors()[0].message(), "expected ':' after 'T' in where clause");
}

#[test]
fn pragmas() {
    let result = parse("::pragma(optimize, 3)");
    assert_eq!(codes(&result), vec![]);

    let result = parse("x = ::pragma(line) + 1");
    assert_eq!(codes(&result), vec![]);

    assert_eq!(codes(&parse("::pragma()")), vec![(0, 1000)]);
    assert_eq!(codes(&parse("::pragma(3)")), vec![(0, 1000)]);

    let result = parse("::pragma");
    assert_eq!(codes(&result), vec![(0, 500)]);
    assert_eq!(result.errors()[0].message(), "expected '(' after '::pragma'");
}

#[test]
fn metadata() {
    let result = parse("::metadata { author = 'me'; since = 2 } function f() { }");
    assert_eq!(codes(&result), vec![]);

    let result = parse("::metadata { author } x");
    assert_eq!(codes(&result), vec![(13, 1001)]);

    let result = parse("::metadata { a = 1 }");
    assert_eq!(codes(&result), vec![(0, 601)]);
}

#[test]
fn comments() {
    let options = ParseOptions::default().collect_comments(true);
    let result = parse_with("a /* one */ + b // two", &options);
    assert_eq!(codes(&result), vec![]);

    let kinds: Vec<_> = result.comments().iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![CommentKind::Block, CommentKind::Line]);
}

#[test]
fn stop_marker() {
    let options = ParseOptions::default().stop_marker("?>");
    let result = parse_with("a + b ?> <html>", &options);
    assert_eq!(codes(&result), vec![]);
    assert_eq!(result.completion(), 6);
}

#[test]
fn registry() {
    let registry = syntax::registry().unwrap();
    let options = ParseOptions::default();

    let result = registry
        .parse_expression(syntax::DEMO, "a + b", &options)
        .unwrap();
    assert!(result.errors().is_empty());

    let error = registry
        .parse_expression("nope", "a + b", &options)
        .unwrap_err();
    assert_eq!(error, ParseCallError::UnknownLanguage("nope".into()));
}

#[test]
fn registry_is_shared_between_threads() {
    let registry = std::sync::Arc::new(syntax::registry().unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || {
                let text = format!("x{} = ::pragma(inline) + {}", i, i);
                let result = registry
                    .parse_expression(syntax::DEMO, &text, &ParseOptions::default())
                    .unwrap();
                result.errors().len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 0);
    }
}
