//! Metadata attached to a declaration.
//!
//! # Grammar
//!
//! [`Metadata`] := `::metadata` CODE_BLOCK
//!
//! The block holds assignments, `::metadata { author = 'me'; since = 2 }`,
//! and applies to the operand after it, like a `[...]` prefix does.

use parser::{
    custom::{
        CustomExpressionItem, CustomItem, CustomItemCategory, CustomParseContext,
        CustomParseError,
    },
    ErrorSink, ExpressionTree, Node, NodeKind, ParseErrorItem, TextRange,
};

use crate::ids::{error::METADATA_NOT_ASSIGNMENT, operator::ASSIGN};

/// A `::metadata { ... }` prefix item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Metadata;

impl CustomExpressionItem for Metadata {
    fn name(&self) -> &str {
        "metadata"
    }

    /// Every entry in the block should be an assignment.
    fn on_parsed(&self, node: &Node, tree: &ExpressionTree, errors: &mut dyn ErrorSink) {
        let block = node
            .regular_items()
            .iter()
            .find(|child| matches!(tree[**child].kind(), NodeKind::CodeBlock { .. }));

        let block = match block {
            Some(block) => *block,
            None => return,
        };

        for entry in tree.expression_items(block) {
            if !is_assignment(entry, tree) {
                errors.add_error(ParseErrorItem::new(
                    entry.start(),
                    METADATA_NOT_ASSIGNMENT,
                    "metadata entries must look like 'name = value'",
                    false,
                ));
            }
        }
    }
}

fn is_assignment(entry: &Node, tree: &ExpressionTree) -> bool {
    match entry.kind() {
        NodeKind::Operator {
            info,
            left: Some(_),
            right: Some(_),
        } => matches!(
            tree[*info].kind(),
            NodeKind::OperatorInfo { operator, .. } if *operator == ASSIGN
        ),
        _ => false,
    }
}

pub(crate) fn parse(context: &mut CustomParseContext) -> Result<Option<CustomItem>, CustomParseError> {
    context.skip_whitespace_and_comments();
    if context.parse_code_block().is_none() {
        return Err(CustomParseError::new("expected a code block after '::metadata'"));
    }

    let range = TextRange::new(context.trigger().start(), context.last_token_end());
    Ok(Some(CustomItem::new(
        CustomItemCategory::Prefix,
        range,
        Metadata,
    )))
}
