//! Whatever the input, parsing finishes with a sound tree.

mod common;

use proptest::prelude::*;

const TOKENS: &[&str] = &[
    "a", "b", "f", "1", "2.5", ".5", "+", "-", "*", "++", "==", "=", "!", "(", ")", "[", "]",
    "{", "}", ",", ";", "'t'", "'", "\"", "// c\n", "/*", "*/", " ", " ", "\n", "public",
    "static", "is", "not", "null", "post_bang", "bin_and", "pref_0_0", "§", "é",
];

fn input() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(TOKENS), 0..40).prop_map(|tokens| tokens.concat())
}

/// A single expression in the test language with nothing wrong with it.
fn expression() -> impl Strategy<Value = String> {
    let leaf = prop::sample::select(vec!["a", "b", "x1", "42", "2.5", "'t'", "f()", "public a"])
        .prop_map(String::from);

    leaf.prop_recursive(3, 24, 4, |inner| {
        let binary = prop::sample::select(vec!["+", "-", "*", "/", "==", "=", "bin_and", "."]);
        let postfix = prop::sample::select(vec!["post_bang", "is null", "is not null"]);
        let prefix = prop::sample::select(vec!["-", "!"]);

        prop_oneof![
            (inner.clone(), binary, inner.clone())
                .prop_map(|(left, op, right)| format!("{} {} {}", left, op, right)),
            (inner.clone(), postfix).prop_map(|(operand, op)| format!("{} {}", operand, op)),
            (prefix, inner.clone()).prop_map(|(op, operand)| format!("{}{}", op, operand)),
            inner.clone().prop_map(|e| format!("({})", e)),
            (inner.clone(), inner).prop_map(|(a, b)| format!("f({}, {})", a, b)),
        ]
    })
}

fn statements() -> impl Strategy<Value = String> {
    prop::collection::vec(expression(), 1..4).prop_map(|items| items.join("; "))
}

proptest! {
    #[test]
    fn parsing_never_fails(text in input()) {
        let result = common::parse(&text);

        if let Err(problems) = result.tree().check_invariants(result.text(), result.root()) {
            prop_assert!(false, "broken tree for {:?}: {:?}", text, problems);
        }

        prop_assert!(result.completion() <= text.len());
        prop_assert!(result.errors().iter().all(|e| e.offset() <= text.len()));

        let offsets: Vec<_> = result.errors().iter().map(|e| e.offset()).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        prop_assert_eq!(offsets, sorted);
    }

    #[test]
    fn every_node_is_inside_the_text(text in input()) {
        let result = common::parse(&text);
        for node in result.tree().iter() {
            prop_assert!(node.start() <= node.end());
            prop_assert!(node.end() <= text.len());
            prop_assert!(text.is_char_boundary(node.start()));
            prop_assert!(text.is_char_boundary(node.end()));
        }
    }

    #[test]
    fn valid_input_has_no_errors(text in statements()) {
        let result = common::parse(&text);
        prop_assert!(result.errors().is_empty(), "{:?}: {:?}", text, result.errors());
        prop_assert!(result.is_complete());
    }

    #[test]
    fn parsing_twice_gives_the_same_tree(text in input()) {
        let first = common::parse(&text);
        let second = common::parse(&text);
        prop_assert_eq!(first.outline(), second.outline());
        prop_assert_eq!(first.errors(), second.errors());
    }

    #[test]
    fn leaves_are_slices_of_the_text(text in statements()) {
        let result = common::parse(&text);
        let mut covered = String::new();
        for node in result.tree().descendants(result.root()) {
            if !node.is_complex() {
                covered.push_str(node.text(&text));
            }
        }

        let expected: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        prop_assert_eq!(covered.replace(' ', ""), expected);
    }

    #[test]
    fn clean_parses_are_complete(text in input()) {
        let result = common::parse(&text);
        if !result.has_errors() {
            prop_assert_eq!(result.completion(), text.len());
        }
    }
}
