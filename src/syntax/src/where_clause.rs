//! Type constraints.
//!
//! # Grammar
//!
//! [`WhereClause`] := `where` NAME `:` NAME (`&` NAME)*
//!
//! A where clause is a postfix item, so it applies to the operand in front of
//! it, as in `function max(a, b) where T : Ord & Copy`.

use parser::{
    custom::{
        CustomExpressionItem, CustomItem, CustomItemCategory, CustomParseContext,
        CustomParseError,
    },
    TextRange,
};

/// A constraint on a type parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    parameter: String,
    bounds: Vec<String>,
}

impl WhereClause {
    /// The name being constrained.
    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// The constraints, in the order they're written. Never empty.
    pub fn bounds(&self) -> &[String] {
        &self.bounds
    }
}

impl CustomExpressionItem for WhereClause {
    fn name(&self) -> &str {
        "where"
    }
}

pub(crate) fn parse(context: &mut CustomParseContext) -> Result<Option<CustomItem>, CustomParseError> {
    context.skip_whitespace_and_comments();
    let parameter = context
        .consume_literal()
        .ok_or_else(|| CustomParseError::new("expected a type parameter after 'where'"))?
        .to_string();

    context.skip_whitespace_and_comments();
    if !context.consume_str(":") {
        return Err(CustomParseError::new(format!(
            "expected ':' after '{}' in where clause",
            parameter
        )));
    }

    let mut bounds = Vec::new();
    loop {
        context.skip_whitespace_and_comments();
        let bound = context
            .consume_literal()
            .ok_or_else(|| CustomParseError::new("expected a constraint in where clause"))?;
        bounds.push(bound.to_string());

        context.skip_whitespace_and_comments();
        // `&&` is an operator, not two bounds.
        if context.remaining().starts_with("&&") || !context.consume_str("&") {
            break;
        }
    }

    let range = TextRange::new(context.trigger().start(), context.last_token_end());
    tracing::trace!(%parameter, bounds = bounds.len(), "where clause");

    Ok(Some(CustomItem::new(
        CustomItemCategory::Postfix,
        range,
        WhereClause { parameter, bounds },
    )))
}
