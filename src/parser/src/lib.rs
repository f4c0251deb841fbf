//! A configurable expression parser.
//!
//! This doesn't parse any particular language. Instead a
//! [`LanguageDefinition`][language::LanguageDefinition] says what the
//! language's comments, code blocks, separators, text, numbers, keywords and
//! operators look like, and the parser turns text into an
//! [`ExpressionTree`][tree::ExpressionTree] using that.
//!
//! Parsing never fails because of what's in the text. Every problem is
//! recorded as a [`ParseErrorItem`][error::ParseErrorItem] with a stable
//! [`ErrorCode`][error::ErrorCode], placeholders are put where something is
//! missing, and parsing carries on. The only errors a parse call returns are
//! for calls that couldn't be made at all, see [`ParseCallError`].
//!
//! Languages can be extended with custom syntax through
//! [custom expression items][custom], which are parsed by user code when one
//! of the language's keywords is found.
//!
//! # Example
//!
//! ```
//! # use parser::{language::LanguageBuilder, operator::OperatorId, ParseOptions};
//! let language = LanguageBuilder::new("arithmetic")
//!     .binary(OperatorId(0), "+", 20)
//!     .binary(OperatorId(1), "*", 10)
//!     .build()
//!     .unwrap();
//!
//! let result = parser::parse_expression(&language, "a + b * c", &ParseOptions::default()).unwrap();
//! assert!(result.errors().is_empty());
//! assert_eq!(result.tree().expression_items(result.root()).count(), 1);
//! ```

pub mod custom;
pub mod error;
pub mod language;
pub mod lexer;
pub mod operator;
pub mod options;
pub mod result;
pub mod tree;

mod parser;

pub use crate::{
    error::{ErrorCode, ErrorSink, ParseErrorItem},
    language::{LanguageBuilder, LanguageDefinition, LanguageRegistry},
    options::ParseOptions,
    result::{ParseCallError, ParseExpressionResult},
    tree::{ExpressionTree, Node, NodeId, NodeKind, TextRange},
};

use crate::parser::Entry;

/// Parse any number of expressions, separated by the language's separator.
pub fn parse_expression<'t>(
    language: &LanguageDefinition,
    text: &'t str,
    options: &ParseOptions,
) -> Result<ParseExpressionResult<'t>, ParseCallError> {
    parser::parse(language, text, options, Entry::Expression)
}

/// Parse a single braces expression, like `(a, b)`. Anything else, or anything
/// after the braces, is reported as
/// [`InvalidBracesExpression`][ErrorCode::InvalidBracesExpression].
pub fn parse_braces_expression<'t>(
    language: &LanguageDefinition,
    text: &'t str,
    options: &ParseOptions,
) -> Result<ParseExpressionResult<'t>, ParseCallError> {
    parser::parse(language, text, options, Entry::Braces)
}

/// Parse a single code block. Anything else, or anything after the block, is
/// reported as [`InvalidCodeBlock`][ErrorCode::InvalidCodeBlock].
pub fn parse_code_block_expression<'t>(
    language: &LanguageDefinition,
    text: &'t str,
    options: &ParseOptions,
) -> Result<ParseExpressionResult<'t>, ParseCallError> {
    parser::parse(language, text, options, Entry::CodeBlock)
}
