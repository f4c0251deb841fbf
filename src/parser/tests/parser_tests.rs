//! Parser tests
//!
//! These run the parser over a small C-like language (see `common`) and look
//! at the trees and errors it produces. Trees are compared through
//! `common::render`, which writes operators as `(op left right)`.

mod common;

use common::{clean, codes, parse, parse_in, show};
use parser::{
    language::{KeywordId, LanguageBuilder},
    operator::{OperatorId, OperatorKind},
    tree::{BraceKind, NodeKind},
    ErrorCode, ParseOptions,
};

/// The operator kind of the first top-level item.
fn top_operator_kind(text: &str) -> OperatorKind {
    let result = clean(text);
    let tree = result.tree();
    let first = tree
        .expression_items(result.root())
        .next()
        .expect("an item");

    let mut node = first;
    // Unwrap a surrounding pair of braces.
    if let NodeKind::Braces { .. } = node.kind() {
        node = tree.expression_items(node.id()).next().expect("an item");
    }

    match node.kind() {
        NodeKind::Operator { info, .. } => match tree[*info].kind() {
            NodeKind::OperatorInfo { kind, .. } => *kind,
            other => panic!("operator info is {:?}", other),
        },
        other => panic!("not an operator: {:?}", other),
    }
}

#[test]
fn empty_input() {
    let result = clean("");
    assert_eq!(show(&result), "");
    assert!(result.is_complete());
    assert_eq!(result.tree().expression_items(result.root()).count(), 0);
}

#[test]
fn whitespace_only() {
    let result = clean("  \t\n ");
    assert_eq!(show(&result), "");
    assert!(result.is_complete());
}

#[test]
fn single_literal() {
    let result = clean("abc");
    assert_eq!(show(&result), "abc");
    let item = result.tree().expression_items(result.root()).next().unwrap();
    assert!(matches!(item.kind(), NodeKind::Literal { .. }));
    assert_eq!(item.range().start(), 0);
    assert_eq!(item.range().end(), 3);
}

#[test]
fn precedence() {
    assert_eq!(show(&clean("a + b * c")), "(+ a (* b c))");
    assert_eq!(show(&clean("a * b + c")), "(+ (* a b) c)");
    assert_eq!(show(&clean("a == b + c * d")), "(== a (+ b (* c d)))");
    assert_eq!(show(&clean("x = a bin_and b")), "(= x (bin_and a b))");
}

#[test]
fn left_associative() {
    assert_eq!(show(&clean("a - b - c")), "(- (- a b) c)");
    assert_eq!(show(&clean("a / b * c")), "(* (/ a b) c)");
    assert_eq!(show(&clean("a.b.c")), "(. (. a b) c)");
}

#[test]
fn prefix_operators_and_priority() {
    assert_eq!(show(&clean("-a.b")), "(- (. a b))");
    assert_eq!(show(&clean("-a + b")), "(+ (- a) b)");
    assert_eq!(show(&clean("!-a")), "(! (- a))");
    assert_eq!(show(&clean("a * -b")), "(* a (- b))");
}

#[test]
fn word_prefix_operators() {
    assert_eq!(show(&clean("pref_0_0 pref_1_0 y")), "(pref_0_0 (pref_1_0 y))");
}

#[test]
fn adjacent_items_without_separator() {
    let result = parse("x1 pref_0_0 pref_1_0 y");
    assert_eq!(codes(&result), vec![(3, 200)]);
    assert_eq!(show(&result), "x1; (pref_0_0 (pref_1_0 y))");
    common::assert_sound(&result);
}

#[test]
fn postfix_or_binary() {
    assert_eq!(top_operator_kind("a ++ b"), OperatorKind::Binary);
    assert_eq!(top_operator_kind("a ++"), OperatorKind::Postfix);
    assert_eq!(top_operator_kind("(a ++)"), OperatorKind::Postfix);
    assert_eq!(top_operator_kind("++a"), OperatorKind::Prefix);

    assert_eq!(show(&clean("a ++ b")), "(++ a b)");
    assert_eq!(show(&clean("a++ * b")), "(* (++ a) b)");
}

#[test]
fn multi_part_operators() {
    assert_eq!(show(&clean("x is null")), "(is null x)");
    assert_eq!(show(&clean("x is not null")), "(is not null x)");
    assert_eq!(show(&clean("x is /* really */ null")), "(is null x)");
    assert_eq!(show(&clean("x is not null == y")), "(== (is not null x) y)");
    assert_eq!(show(&clean("y == x is null")), "(== y (is null x))");
}

#[test]
fn operator_parts_are_recorded() {
    let result = clean("x is  not null");
    let tree = result.tree();
    let info = tree
        .iter()
        .find(|n| matches!(n.kind(), NodeKind::OperatorInfo { .. }))
        .unwrap();

    match info.kind() {
        NodeKind::OperatorInfo {
            operator,
            kind,
            parts,
            ..
        } => {
            assert_eq!(*operator, OperatorId(23));
            assert_eq!(*kind, OperatorKind::Postfix);
            let parts: Vec<_> = parts.iter().map(|p| p.slice(result.text())).collect();
            assert_eq!(parts, vec!["is", "not", "null"]);
        }
        _ => unreachable!(),
    }
    assert_eq!(info.range().start(), 2);
    assert_eq!(info.range().end(), 14);
}

#[test]
fn numbers() {
    assert_eq!(show(&clean("1 + 2.5")), "(+ 1 2.5)");

    let result = clean("12.75");
    let number = result
        .tree()
        .iter()
        .find(|n| matches!(n.kind(), NodeKind::Number { .. }))
        .unwrap();
    assert!(matches!(number.kind(), NodeKind::Number { format } if *format == common::FLOAT));
    assert_eq!(number.text(result.text()), "12.75");

    let result = clean(".5");
    let number = result
        .tree()
        .iter()
        .find(|n| matches!(n.kind(), NodeKind::Number { .. }))
        .unwrap();
    assert!(matches!(number.kind(), NodeKind::Number { format } if *format == common::FLOAT));
}

#[test]
fn text_with_doubled_delimiters() {
    let result = clean("'It''s ok'");
    let text = result
        .tree()
        .iter()
        .find(|n| matches!(n.kind(), NodeKind::Text { .. }))
        .unwrap();

    match text.kind() {
        NodeKind::Text {
            delimiter,
            value,
            terminated,
        } => {
            assert_eq!(*delimiter, '\'');
            assert_eq!(value, "It's ok");
            assert!(terminated);
        }
        _ => unreachable!(),
    }
    assert_eq!(text.range().end(), 10);
}

#[test]
fn text_delimiters_dont_mix() {
    let result = clean(r#""it's" + 'say "hi"'"#);
    let values: Vec<_> = result
        .tree()
        .iter()
        .filter_map(|n| match n.kind() {
            NodeKind::Text { value, .. } => Some(value.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec!["it's".to_string(), "say \"hi\"".to_string()]);
}

#[test]
fn unterminated_text() {
    let result = parse("a + 'abc");
    assert_eq!(codes(&result), vec![(4, 302)]);
    assert!(result.is_complete());
    common::assert_sound(&result);
}

#[test]
fn named_braces() {
    let result = clean("F(x, y)");
    assert_eq!(show(&result), "F(x, y)");

    let tree = result.tree();
    let braces = tree.expression_items(result.root()).next().unwrap();
    match braces.kind() {
        NodeKind::Braces {
            kind,
            name,
            closing,
            ..
        } => {
            assert_eq!(*kind, BraceKind::Round);
            assert_eq!(tree[name.unwrap()].text(result.text()), "F");
            assert!(closing.is_some());
        }
        other => panic!("not braces: {:?}", other),
    }

    assert_eq!(tree.expression_items(braces.id()).count(), 2);
    let commas = braces
        .regular_items()
        .iter()
        .filter(|c| matches!(tree[**c].kind(), NodeKind::Comma))
        .count();
    assert_eq!(commas, 1);
}

#[test]
fn braces() {
    assert_eq!(show(&clean("()")), "()");
    assert_eq!(show(&clean("(a, b)")), "(a, b)");
    assert_eq!(show(&clean("[1, 2]")), "[1, 2]");
    assert_eq!(show(&clean("(a + b) * c")), "(* ((+ a b)) c)");
    assert_eq!(show(&clean("x[0]")), "x[0]");
    assert_eq!(show(&clean("f(g(1), [2])")), "f(g(1), [2])");
}

#[test]
fn prefixes() {
    assert_eq!(show(&clean("[attr] x")), "[attr] x");
    assert_eq!(show(&clean("[a] [b] f(c)")), "[a] [b] f(c)");
    assert_eq!(show(&clean("[a] + b")), "(+ [a] b)");

    let result = clean("[attr] x");
    let item = result.tree().expression_items(result.root()).next().unwrap();
    assert_eq!(item.prefixes().len(), 1);
    assert_eq!(item.range().start(), 0);
    assert_eq!(item.range().end(), 8);
}

#[test]
fn prefixes_unsupported() {
    let language = common::builder().supports_prefixes(false).build().unwrap();
    let result = parse_in(&language, "[a] x");
    assert_eq!(codes(&result), vec![(4, 200)]);
}

#[test]
fn keywords() {
    assert_eq!(show(&clean("public static x")), "public static x");
    assert_eq!(show(&clean("var x = 1")), "(= var x 1)");

    let result = parse("public public x");
    assert_eq!(codes(&result), vec![(7, 400)]);

    let result = parse("var");
    assert_eq!(codes(&result), vec![(0, 401)]);
    assert_eq!(show(&result), "var _");
    common::assert_sound(&result);
}

#[test]
fn keywords_unsupported() {
    let language = common::builder().supports_keywords(false).build().unwrap();
    let result = parse_in(&language, "var x");
    assert_eq!(codes(&result), vec![(0, 402)]);
}

#[test]
fn longer_operators_beat_keywords() {
    let language = LanguageBuilder::new("words")
        .keyword(KeywordId(1), "not")
        .prefix(OperatorId(1), "not_x", 5)
        .build()
        .unwrap();

    let result = parse_in(&language, "not_x a");
    assert_eq!(codes(&result), vec![]);
    assert_eq!(show(&result), "(not_x a)");

    let result = parse_in(&language, "not a");
    assert_eq!(codes(&result), vec![]);
    assert_eq!(show(&result), "not a");
}

#[test]
fn case_insensitive_languages() {
    let language = LanguageBuilder::new("sql")
        .case_sensitive(false)
        .keyword(KeywordId(1), "select")
        .binary(OperatorId(1), "and", 10)
        .build()
        .unwrap();

    let result = parse_in(&language, "SELECT a AND b");
    assert_eq!(codes(&result), vec![]);
    assert_eq!(show(&result), "(AND SELECT a b)");
}

#[test]
fn separators() {
    assert_eq!(show(&clean("a; b")), "a; b");
    assert_eq!(show(&clean("a;")), "a");

    assert_eq!(codes(&parse("a;;b")), vec![(2, 109)]);
    assert_eq!(codes(&parse(";")), vec![(0, 109)]);
    assert_eq!(codes(&parse("a b")), vec![(2, 200)]);
    assert_eq!(codes(&parse("'x'y")), vec![(3, 301)]);
}

#[test]
fn misplaced_commas_and_separators() {
    let result = parse("a, b");
    assert_eq!(codes(&result)[0], (1, 105));
    common::assert_sound(&result);

    let result = parse("(a; b)");
    assert_eq!(codes(&result)[0], (2, 106));
    common::assert_sound(&result);
}

#[test]
fn missing_items_around_commas() {
    assert_eq!(codes(&parse("(a, )")), vec![(4, 108)]);
    assert_eq!(codes(&parse("(, a)")), vec![(1, 107)]);
    assert_eq!(codes(&parse("(a,")), vec![(0, 100), (2, 108)]);
}

#[test]
fn closing_braces() {
    let result = parse("(a");
    assert_eq!(codes(&result), vec![(0, 100)]);
    assert_eq!(show(&result), "(a");

    assert_eq!(codes(&parse("a)")), vec![(1, 101)]);

    let result = parse("(a]");
    assert_eq!(codes(&result), vec![(2, 102)]);
    assert_eq!(show(&result), "(a]");

    assert_eq!(codes(&parse("a }")), vec![(2, 104)]);
}

#[test]
fn closer_of_an_enclosing_container() {
    let result = parse("{ (a }");
    assert_eq!(codes(&result), vec![(2, 100)]);
    assert_eq!(show(&result), "{(a}");
    common::assert_sound(&result);
}

#[test]
fn code_blocks() {
    assert_eq!(show(&clean("{a; b}")), "{a; b}");
    assert_eq!(show(&clean("{}")), "{}");
    assert_eq!(show(&clean("f {a}")), "f {a}");
    assert_eq!(show(&clean("f(x) {a}")), "f(x) {a}");
    assert_eq!(show(&clean("{a} {b}")), "{a}; {b}");
    assert_eq!(show(&clean("f {a} {b}")), "f {a}; {b}");
    assert_eq!(show(&clean("x = {a} y")), "(= x {a}); y");
}

#[test]
fn code_block_after_a_constant() {
    let result = parse("1 {a}");
    assert_eq!(codes(&result), vec![(2, 702)]);
    assert_eq!(show(&result), "1 {a}");
}

#[test]
fn unclosed_code_block() {
    let result = parse("{a+b;");
    assert_eq!(codes(&result), vec![(0, 103)]);

    let block = result.tree().expression_items(result.root()).next().unwrap();
    assert!(matches!(block.kind(), NodeKind::CodeBlock { end: None, .. }));
    assert_eq!(block.range().start(), 0);
    assert_eq!(block.range().end(), 5);
    common::assert_sound(&result);
}

#[test]
fn comments() {
    assert_eq!(show(&clean("a /* x */ + b // end")), "(+ a b)");
    assert_eq!(show(&clean("a // one\n+ // two\nb")), "(+ a b)");

    let result = parse("a /* x");
    assert_eq!(codes(&result), vec![(2, 303)]);
}

#[test]
fn collected_comments() {
    let text = "a /* x */ + b // end";
    let options = ParseOptions::new().collect_comments(true);
    let result = parser::parse_expression(&common::language(), text, &options).unwrap();

    let ranges: Vec<_> = result
        .comments()
        .iter()
        .map(|c| (c.range.start(), c.range.end()))
        .collect();
    assert_eq!(ranges, vec![(2, 9), (14, 20)]);

    // Not asked for, not kept.
    assert!(common::parse(text).comments().is_empty());
}

#[test]
fn stop_marker() {
    let text = "a + b ?> c";
    let options = ParseOptions::new().stop_marker("?>");
    let result = parser::parse_expression(&common::language(), text, &options).unwrap();

    assert_eq!(codes(&result), vec![]);
    assert_eq!(show(&result), "(+ a b)");
    assert_eq!(result.completion(), 6);
    assert!(!result.is_complete());
}

#[test]
fn start_offset() {
    let text = "xx§ a + b";
    let options = ParseOptions::new().start_offset(5);
    let result = parser::parse_expression(&common::language(), text, &options).unwrap();

    assert_eq!(codes(&result), vec![]);
    assert_eq!(show(&result), "(+ a b)");
    assert_eq!(result.range().start(), 5);
    assert!(result.is_complete());
}

#[test]
fn invalid_options() {
    let language = common::language();
    let options = ParseOptions::new().start_offset(100);
    assert!(parser::parse_expression(&language, "abc", &options).is_err());
}

#[test]
fn maximum_depth() {
    let text = "((((((((((a))))))))))";
    let options = ParseOptions::new().max_depth(4);
    let result = parser::parse_expression(&common::language(), text, &options).unwrap();

    assert_eq!(codes(&result), vec![(4, 800)]);
    assert!(result.errors()[0].is_critical());
    common::assert_sound(&result);

    let options = ParseOptions::new().max_depth(3);
    let result = parser::parse_expression(&common::language(), "- - - - a", &options).unwrap();
    assert_eq!(
        result.errors().iter().filter(|e| e.code() == ErrorCode::MaximumDepthExceeded).count(),
        1
    );
    common::assert_sound(&result);
}

#[test]
fn critical_errors_end_their_container() {
    let options = ParseOptions::new().max_depth(1);
    let text = "((a)); b c";
    let result = parser::parse_expression(&common::language(), text, &options).unwrap();

    // The inner braces give up, but everything around them is still parsed.
    assert_eq!(codes(&result), vec![(1, 800), (9, 200)]);
    assert!(result.errors()[0].is_critical());
    assert_eq!(result.completion(), text.len());
    common::assert_sound(&result);

    let result = parser::parse_expression(&common::language(), "{ ((a)) x } y z", &options).unwrap();
    assert_eq!(codes(&result), vec![(2, 800), (8, 200), (14, 200)]);
    common::assert_sound(&result);
}

#[test]
fn critical_errors_at_the_root_stop_the_parse() {
    let options = ParseOptions::new().max_depth(1);
    let text = "- - a; b c";
    let result = parser::parse_expression(&common::language(), text, &options).unwrap();

    assert_eq!(codes(&result), vec![(2, 800)]);
    assert!(result.completion() < text.len());
    common::assert_sound(&result);
}

#[test]
fn missing_operands() {
    let result = parse("a +");
    assert_eq!(codes(&result), vec![(2, 201)]);
    assert_eq!(show(&result), "(+ a _)");
    common::assert_sound(&result);

    let result = parse("-");
    assert_eq!(codes(&result), vec![(0, 203)]);
    assert_eq!(show(&result), "(- _)");
    common::assert_sound(&result);

    let result = parse("* a");
    assert_eq!(codes(&result), vec![(0, 202)]);
    assert_eq!(show(&result), "(* _ a)");
    common::assert_sound(&result);
}

#[test]
fn binary_operator_missing_message() {
    let result = parse("(a +)");
    assert_eq!(codes(&result), vec![(3, 201)]);
    assert!(result.errors()[0].message().contains("'+'"));
}

#[test]
fn invalid_symbols() {
    let result = parse("§");
    assert_eq!(codes(&result), vec![(0, 300)]);
    assert!(result.is_complete());

    let result = parse("a § b");
    assert!(codes(&result).contains(&(2, 300)));
    common::assert_sound(&result);
}

#[test]
fn braces_entry_point() {
    let language = common::language();
    let options = ParseOptions::default();

    let result = parser::parse_braces_expression(&language, "(a, b)", &options).unwrap();
    assert_eq!(codes(&result), vec![]);
    assert_eq!(show(&result), "(a, b)");

    let result = parser::parse_braces_expression(&language, "a", &options).unwrap();
    assert_eq!(codes(&result), vec![(0, 110)]);

    let result = parser::parse_braces_expression(&language, "(a) b", &options).unwrap();
    assert_eq!(codes(&result), vec![(4, 110)]);
}

#[test]
fn code_block_entry_point() {
    let language = common::language();
    let options = ParseOptions::default();

    let result = parser::parse_code_block_expression(&language, " {a; b} ", &options).unwrap();
    assert_eq!(codes(&result), vec![]);
    assert_eq!(show(&result), "{a; b}");

    let result = parser::parse_code_block_expression(&language, "a", &options).unwrap();
    assert_eq!(codes(&result), vec![(0, 700)]);

    let result = parser::parse_code_block_expression(&language, "{a} b", &options).unwrap();
    assert_eq!(codes(&result), vec![(4, 700)]);
}

#[test]
fn node_lookup() {
    let result = clean("f(a + b)");
    let tree = result.tree();

    let node = tree.node_at(result.root(), 4).unwrap();
    assert!(matches!(node.kind(), NodeKind::OperatorInfo { .. }));

    let parents: Vec<_> = tree.ancestors(node.id()).map(|n| n.kind().name()).collect();
    assert_eq!(parents, vec!["Operator", "Braces", "Root"]);
}

#[test]
fn diagnostics_for_errors() {
    let result = parse("(a");
    let diagnostics = result.diagnostics();
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn unicode_offsets_are_bytes() {
    let result = clean("é + ü");
    let tree = result.tree();
    let info = tree
        .iter()
        .find(|n| matches!(n.kind(), NodeKind::OperatorInfo { .. }))
        .unwrap();
    assert_eq!(info.range().start(), 3);
    assert_eq!(show(&result), "(+ é ü)");
}
