//! A small C-like test language, and helpers for looking at what the parser
//! makes of it.

#![allow(dead_code)]

use parser::{
    language::{KeywordId, LanguageBuilder, LanguageDefinition, NumericKindId},
    operator::{OperatorId, OperatorKind},
    tree::{ExpressionTree, NodeId, NodeKind},
    ParseExpressionResult, ParseOptions,
};

pub const PUBLIC: KeywordId = KeywordId(1);
pub const STATIC: KeywordId = KeywordId(2);
pub const VAR: KeywordId = KeywordId(3);

pub const INTEGER: NumericKindId = NumericKindId(1);
pub const FLOAT: NumericKindId = NumericKindId(2);

/// The test language, before it's built, so tests can add to it.
pub fn builder() -> LanguageBuilder {
    LanguageBuilder::new("test")
        .comments("//", "/*", "*/")
        .code_block("{", "}")
        .separator(';')
        .text_delimiter('\'')
        .text_delimiter('"')
        .numeric(FLOAT, &[r"^\d+\.\d+", r"^\.\d+"])
        .numeric(INTEGER, &[r"^\d+"])
        .keyword(PUBLIC, "public")
        .keyword(STATIC, "static")
        .keyword(VAR, "var")
        // prefix
        .prefix(OperatorId(1), "-", 5)
        .prefix(OperatorId(2), "!", 5)
        .prefix(OperatorId(3), "++", 5)
        .prefix(OperatorId(4), "pref_0_0", 0)
        .prefix(OperatorId(5), "pref_1_0", 1)
        // binary
        .binary(OperatorId(10), ".", 0)
        .binary(OperatorId(11), "*", 10)
        .binary(OperatorId(12), "/", 10)
        .binary(OperatorId(13), "+", 20)
        .binary(OperatorId(14), "-", 20)
        .binary(OperatorId(15), "++", 20)
        .binary(OperatorId(16), "==", 30)
        .binary(OperatorId(17), "bin_and", 35)
        .binary(OperatorId(18), "=", 40)
        // postfix
        .postfix(OperatorId(20), "++", 2)
        .postfix(OperatorId(21), "post_bang", 2)
        .operator(OperatorId(22), OperatorKind::Postfix, &["is", "null"], 25)
        .operator(OperatorId(23), OperatorKind::Postfix, &["is", "not", "null"], 25)
}

pub fn language() -> LanguageDefinition {
    builder().build().expect("the test language is valid")
}

pub fn parse(text: &str) -> ParseExpressionResult<'_> {
    parse_in(&language(), text)
}

pub fn parse_in<'t>(language: &LanguageDefinition, text: &'t str) -> ParseExpressionResult<'t> {
    parser::parse_expression(language, text, &ParseOptions::default())
        .expect("default options are valid")
}

/// Every error as `(offset, code)`.
pub fn codes(result: &ParseExpressionResult) -> Vec<(usize, u32)> {
    result
        .errors()
        .iter()
        .map(|e| (e.offset(), e.code().code()))
        .collect()
}

/// Parse text which should have no errors, and check the tree is sound.
pub fn clean(text: &str) -> ParseExpressionResult<'_> {
    let result = parse(text);
    assert_eq!(codes(&result), vec![], "errors parsing {:?}", text);
    assert_sound(&result);
    result
}

pub fn assert_sound(result: &ParseExpressionResult) {
    if let Err(problems) = result.tree().check_invariants(result.text(), result.root()) {
        panic!("broken tree for {:?}: {:?}", result.text(), problems);
    }
}

/// The whole result as a compact string, see [`render`].
pub fn show(result: &ParseExpressionResult) -> String {
    render(result.tree(), result.text(), result.root())
}

/// A compact, lisp-ish rendering of a tree, which is easier to compare than
/// the tree itself.
///
/// - operators are `(op left right)`, with operands left out if missing,
/// - braces are written as they appear, `f(a, b)` or `[a]`,
/// - code blocks are `{a; b}`,
/// - custom items are `#name`,
/// - placeholders are `_`,
/// - prefixes, keywords and postfixes are written around the item, separated
///   by spaces.
pub fn render(tree: &ExpressionTree, text: &str, id: NodeId) -> String {
    let node = &tree[id];

    let core = match node.kind() {
        NodeKind::Root => {
            return tree
                .expression_items(id)
                .map(|n| render(tree, text, n.id()))
                .collect::<Vec<_>>()
                .join("; ");
        }
        NodeKind::Literal { name } => tree[*name].text(text).to_string(),
        NodeKind::ConstantText { text: leaf } => tree[*leaf].text(text).to_string(),
        NodeKind::ConstantNumeric { number } => tree[*number].text(text).to_string(),
        NodeKind::Braces {
            kind,
            name,
            closing,
            ..
        } => {
            let items: Vec<_> = tree
                .expression_items(id)
                .map(|n| render(tree, text, n.id()))
                .collect();
            format!(
                "{}{}{}{}",
                name.map_or("", |n| tree[n].text(text)),
                kind.opening(),
                items.join(", "),
                closing.map_or(String::new(), |c| tree[c].text(text).to_string()),
            )
        }
        NodeKind::CodeBlock { end, .. } => {
            let items: Vec<_> = tree
                .expression_items(id)
                .map(|n| render(tree, text, n.id()))
                .collect();
            format!("{{{}{}", items.join("; "), if end.is_some() { "}" } else { "" })
        }
        NodeKind::Operator { info, left, right } => {
            let mut parts = vec![operator_spelling(tree, text, *info)];
            parts.extend(left.map(|l| render(tree, text, l)));
            parts.extend(right.map(|r| render(tree, text, r)));
            format!("({})", parts.join(" "))
        }
        NodeKind::Custom { item, .. } => format!("#{}", item.name()),
        NodeKind::Placeholder => "_".to_string(),
        _ => node.text(text).to_string(),
    };

    let mut out: Vec<String> = node
        .prefixes()
        .iter()
        .map(|p| render(tree, text, *p))
        .collect();
    out.extend(node.keywords().iter().filter_map(|k| match tree[*k].kind() {
        NodeKind::Keyword { .. } if !matches!(node.kind(), NodeKind::Custom { .. }) => {
            Some(tree[*k].text(text).to_string())
        }
        NodeKind::Keyword { .. } => None,
        _ => Some(render(tree, text, *k)),
    }));
    out.push(core);
    out.extend(node.postfixes().iter().map(|p| render(tree, text, *p)));
    out.join(" ")
}

fn operator_spelling(tree: &ExpressionTree, text: &str, info: NodeId) -> String {
    match tree[info].kind() {
        NodeKind::OperatorInfo { parts, .. } => parts
            .iter()
            .map(|p| p.slice(text))
            .collect::<Vec<_>>()
            .join(" "),
        _ => tree[info].text(text).to_string(),
    }
}
