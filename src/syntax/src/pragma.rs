//! Compiler directives.
//!
//! # Grammar
//!
//! [`Pragma`] := `::pragma` `(` NAME (`,` EXPRESSION)* `)`

use parser::{
    custom::{
        CustomExpressionItem, CustomItem, CustomItemCategory, CustomParseContext,
        CustomParseError,
    },
    ErrorSink, ExpressionTree, Node, NodeKind, ParseErrorItem, TextRange,
};

use crate::ids::error::PRAGMA_WITHOUT_NAME;

/// A `::pragma(...)` item. It stands where any operand can.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pragma {
    directive: Option<String>,
    arguments: usize,
}

impl Pragma {
    /// The pragma's name, its first argument, if that is a name.
    pub fn directive(&self) -> Option<&str> {
        self.directive.as_deref()
    }

    /// The number of arguments, including the name.
    pub fn arguments(&self) -> usize {
        self.arguments
    }
}

impl CustomExpressionItem for Pragma {
    fn name(&self) -> &str {
        "pragma"
    }

    fn on_parsed(&self, node: &Node, _tree: &ExpressionTree, errors: &mut dyn ErrorSink) {
        if self.directive.is_none() {
            errors.add_error(ParseErrorItem::new(
                node.start(),
                PRAGMA_WITHOUT_NAME,
                "'::pragma' must start with the name of the directive",
                false,
            ));
        }
    }
}

pub(crate) fn parse(context: &mut CustomParseContext) -> Result<Option<CustomItem>, CustomParseError> {
    context.skip_whitespace_and_comments();
    let braces = context
        .parse_braces()
        .ok_or_else(|| CustomParseError::new("expected '(' after '::pragma'"))?;

    let tree = context.tree();
    let arguments: Vec<_> = tree.expression_items(braces).collect();
    let directive = arguments.first().and_then(|argument| match argument.kind() {
        NodeKind::Literal { name } => Some(tree[*name].text(context.text()).to_string()),
        _ => None,
    });

    let pragma = Pragma {
        directive,
        arguments: arguments.len(),
    };

    let range = TextRange::new(context.trigger().start(), context.last_token_end());
    Ok(Some(CustomItem::new(
        CustomItemCategory::Regular,
        range,
        pragma,
    )))
}
