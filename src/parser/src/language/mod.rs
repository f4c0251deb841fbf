//! Language definitions.
//!
//! A [`LanguageDefinition`] is everything the parser needs to know about a
//! particular expression language: its comment and code block markers, the
//! separator, text delimiters, numeric formats, keywords, operators, and any
//! custom expression item parsers.
//!
//! Definitions are put together with a [`LanguageBuilder`], and are checked
//! by the [validator][validate] when they're built. Once built they're
//! immutable, so they can be shared between threads and used for any number
//! of parses at once.

mod registry;
mod validate;

use std::{collections::HashMap, fmt, sync::Arc};

use regex::Regex;
use unicode_xid::UnicodeXID;

use crate::{
    custom::CustomItemParser,
    operator::{Operator, OperatorId, OperatorKind, OperatorTable, Priority},
};

pub use self::{
    registry::{LanguageRegistry, RegistryError},
    validate::{validate, ValidationError, ValidationIssue},
};

/// Characters with a fixed meaning which can never be part of an operator,
/// keyword or marker.
pub const SPECIAL_NON_OPERATOR_CHARACTERS: &[char] =
    &['(', ')', '[', ']', ',', ';', '\'', '"', '`'];

/// Characters which are reserved for operators, markers and separators, and
/// so can never be part of a literal.
pub const SPECIAL_OPERATOR_CHARACTERS: &[char] = &[
    '!', '~', '$', '%', '^', '&', '*', '+', '-', '=', '|', '\\', ':', '<', '>',
    '.', '?', '/', '@', '#', '{', '}',
];

/// The characters which can be used to delimit constant text.
pub const TEXT_DELIMITER_CHARACTERS: &[char] = &['\'', '"', '`'];

/// Is `c` one of the special characters, of either kind?
pub fn is_special_character(c: char) -> bool {
    SPECIAL_NON_OPERATOR_CHARACTERS.contains(&c)
        || SPECIAL_OPERATOR_CHARACTERS.contains(&c)
}

/// The default rule for which characters make up literals: identifier
/// characters as defined by Unicode, plus `_`.
pub fn is_identifier_character(c: char) -> bool {
    c == '_' || UnicodeXID::is_xid_continue(c)
}

/// Identifies a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeywordId(pub u32);

impl fmt::Display for KeywordId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A keyword, like `public` or `static`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    id: KeywordId,
    text: String,
}

impl Keyword {
    pub fn id(&self) -> KeywordId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Identifies a numeric format, so the tree says which format a number
/// matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NumericKindId(pub u32);

impl fmt::Display for NumericKindId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One regular expression describing numbers.
///
/// Patterns must be anchored at the start with `^` and must not be anchored
/// at the end. A pattern which failed to compile is kept so the validator can
/// report it.
#[derive(Debug, Clone)]
pub struct NumericPattern {
    source: String,
    compiled: Result<Regex, regex::Error>,
}

impl NumericPattern {
    fn new(source: &str) -> Self {
        NumericPattern {
            source: source.to_string(),
            compiled: Regex::new(source),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn regex(&self) -> Option<&Regex> {
        self.compiled.as_ref().ok()
    }

    pub(crate) fn compile_error(&self) -> Option<&regex::Error> {
        self.compiled.as_ref().err()
    }
}

/// A kind of number, which matches if any of its patterns match.
#[derive(Debug, Clone)]
pub struct NumericFormat {
    id: NumericKindId,
    patterns: Vec<NumericPattern>,
}

impl NumericFormat {
    pub fn id(&self) -> NumericKindId {
        self.id
    }

    pub fn patterns(&self) -> &[NumericPattern] {
        &self.patterns
    }
}

/// The markers around block comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockCommentMarkers {
    pub start: String,
    pub end: String,
}

/// The markers around code blocks, like `{` and `}`, or `begin` and `end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockMarkers {
    pub start: String,
    pub end: String,
}

type LiteralPredicate = Arc<dyn Fn(char) -> bool + Send + Sync>;

/// Everything the parser needs to know about one expression language.
///
/// These can only be made with a [`LanguageBuilder`], which validates them.
#[derive(Clone)]
pub struct LanguageDefinition {
    name: String,
    case_sensitive: bool,
    line_comment: Option<String>,
    block_comment: Option<BlockCommentMarkers>,
    code_block: Option<CodeBlockMarkers>,
    separator: Option<char>,
    text_delimiters: Vec<char>,
    numeric_formats: Vec<NumericFormat>,
    keywords: Vec<Keyword>,
    operators: OperatorTable,
    custom_parsers: HashMap<KeywordId, Vec<Arc<dyn CustomItemParser>>>,
    literal_characters: LiteralPredicate,
    supports_prefixes: bool,
    supports_keywords: bool,
}

impl LanguageDefinition {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Are keywords, operators and markers matched case sensitively?
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn line_comment(&self) -> Option<&str> {
        self.line_comment.as_deref()
    }

    pub fn block_comment(&self) -> Option<&BlockCommentMarkers> {
        self.block_comment.as_ref()
    }

    pub fn code_block(&self) -> Option<&CodeBlockMarkers> {
        self.code_block.as_ref()
    }

    pub fn separator(&self) -> Option<char> {
        self.separator
    }

    pub fn text_delimiters(&self) -> &[char] {
        &self.text_delimiters
    }

    pub fn is_text_delimiter(&self, c: char) -> bool {
        self.text_delimiters.contains(&c)
    }

    pub fn numeric_formats(&self) -> &[NumericFormat] {
        &self.numeric_formats
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn keyword(&self, id: KeywordId) -> Option<&Keyword> {
        self.keywords.iter().find(|k| k.id == id)
    }

    pub fn operators(&self) -> &OperatorTable {
        &self.operators
    }

    /// The custom parsers to try when keyword `id` is found, in the order
    /// they were registered.
    pub fn custom_parsers(&self, id: KeywordId) -> &[Arc<dyn CustomItemParser>] {
        self.custom_parsers
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn custom_parser_keywords(&self) -> impl Iterator<Item = KeywordId> + '_ {
        self.custom_parsers.keys().copied()
    }

    /// Can `c` be part of a literal?
    pub fn is_literal_character(&self, c: char) -> bool {
        (self.literal_characters)(c)
    }

    /// Can `[...]` prefixes be put in front of expressions?
    pub fn supports_prefixes(&self) -> bool {
        self.supports_prefixes
    }

    /// Can plain keywords be put in front of expressions?
    pub fn supports_keywords(&self) -> bool {
        self.supports_keywords
    }

    /// Compare two pieces of text the way this language compares keywords and
    /// operators.
    pub fn text_eq(&self, a: &str, b: &str) -> bool {
        if self.case_sensitive {
            a == b
        } else {
            a.chars()
                .flat_map(char::to_lowercase)
                .eq(b.chars().flat_map(char::to_lowercase))
        }
    }
}

impl fmt::Debug for LanguageDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut custom: Vec<_> = self
            .custom_parsers
            .iter()
            .map(|(id, parsers)| (*id, parsers.len()))
            .collect();
        custom.sort();

        f.debug_struct("LanguageDefinition")
            .field("name", &self.name)
            .field("case_sensitive", &self.case_sensitive)
            .field("line_comment", &self.line_comment)
            .field("block_comment", &self.block_comment)
            .field("code_block", &self.code_block)
            .field("separator", &self.separator)
            .field("text_delimiters", &self.text_delimiters)
            .field("numeric_formats", &self.numeric_formats)
            .field("keywords", &self.keywords)
            .field("operators", &self.operators)
            .field("custom_parsers", &custom)
            .field("supports_prefixes", &self.supports_prefixes)
            .field("supports_keywords", &self.supports_keywords)
            .finish()
    }
}

/// Puts together a [`LanguageDefinition`].
///
/// # Example
///
/// ```
/// # use parser::language::{LanguageBuilder, NumericKindId};
/// # use parser::operator::OperatorId;
/// let language = LanguageBuilder::new("arithmetic")
///     .numeric(NumericKindId(0), &[r"^\d+"])
///     .binary(OperatorId(0), "+", 20)
///     .binary(OperatorId(1), "*", 10)
///     .prefix(OperatorId(2), "-", 5)
///     .build()
///     .unwrap();
///
/// assert_eq!(language.operators().len(), 3);
/// ```
#[must_use]
pub struct LanguageBuilder {
    language: LanguageDefinition,
}

impl LanguageBuilder {
    /// Start a language with nothing but a name. Matching is case sensitive,
    /// and prefixes and keywords are supported.
    pub fn new(name: impl Into<String>) -> Self {
        LanguageBuilder {
            language: LanguageDefinition {
                name: name.into(),
                case_sensitive: true,
                line_comment: None,
                block_comment: None,
                code_block: None,
                separator: None,
                text_delimiters: Vec::new(),
                numeric_formats: Vec::new(),
                keywords: Vec::new(),
                operators: OperatorTable::default(),
                custom_parsers: HashMap::new(),
                literal_characters: Arc::new(is_identifier_character),
                supports_prefixes: true,
                supports_keywords: true,
            },
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.language.case_sensitive = case_sensitive;
        self
    }

    pub fn line_comment(mut self, marker: &str) -> Self {
        self.language.line_comment = Some(marker.to_string());
        self
    }

    pub fn block_comment(mut self, start: &str, end: &str) -> Self {
        self.language.block_comment = Some(BlockCommentMarkers {
            start: start.to_string(),
            end: end.to_string(),
        });
        self
    }

    /// Set both comment styles at once.
    pub fn comments(self, line: &str, block_start: &str, block_end: &str) -> Self {
        self.line_comment(line).block_comment(block_start, block_end)
    }

    pub fn code_block(mut self, start: &str, end: &str) -> Self {
        self.language.code_block = Some(CodeBlockMarkers {
            start: start.to_string(),
            end: end.to_string(),
        });
        self
    }

    /// The character which separates expressions in code blocks and at the
    /// top level.
    pub fn separator(mut self, separator: char) -> Self {
        self.language.separator = Some(separator);
        self
    }

    pub fn text_delimiter(mut self, delimiter: char) -> Self {
        self.language.text_delimiters.push(delimiter);
        self
    }

    /// Add a numeric format. Each pattern is a regular expression which must
    /// start with `^`.
    pub fn numeric(mut self, id: NumericKindId, patterns: &[&str]) -> Self {
        self.language.numeric_formats.push(NumericFormat {
            id,
            patterns: patterns.iter().map(|p| NumericPattern::new(p)).collect(),
        });
        self
    }

    pub fn keyword(mut self, id: KeywordId, text: &str) -> Self {
        self.language.keywords.push(Keyword {
            id,
            text: text.to_string(),
        });
        self
    }

    /// Add an operator with any number of name parts.
    pub fn operator(
        mut self,
        id: OperatorId,
        kind: OperatorKind,
        parts: &[&str],
        priority: i32,
    ) -> Self {
        self.language.operators.define(Operator::new(
            id,
            kind,
            parts.iter().map(|p| p.to_string()).collect(),
            Priority(priority),
        ));
        self
    }

    pub fn prefix(self, id: OperatorId, name: &str, priority: i32) -> Self {
        self.operator(id, OperatorKind::Prefix, &[name], priority)
    }

    pub fn binary(self, id: OperatorId, name: &str, priority: i32) -> Self {
        self.operator(id, OperatorKind::Binary, &[name], priority)
    }

    pub fn postfix(self, id: OperatorId, name: &str, priority: i32) -> Self {
        self.operator(id, OperatorKind::Postfix, &[name], priority)
    }

    /// Register a parser to try when `keyword` is found. Parsers for the same
    /// keyword are tried in registration order until one accepts.
    pub fn custom_parser(
        mut self,
        keyword: KeywordId,
        parser: impl CustomItemParser + 'static,
    ) -> Self {
        self.language
            .custom_parsers
            .entry(keyword)
            .or_default()
            .push(Arc::new(parser));
        self
    }

    /// Replace the rule for which characters make up literals.
    pub fn literal_characters(
        mut self,
        predicate: impl Fn(char) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.language.literal_characters = Arc::new(predicate);
        self
    }

    pub fn supports_prefixes(mut self, supported: bool) -> Self {
        self.language.supports_prefixes = supported;
        self
    }

    pub fn supports_keywords(mut self, supported: bool) -> Self {
        self.language.supports_keywords = supported;
        self
    }

    /// Validate and finish the definition.
    pub fn build(self) -> Result<LanguageDefinition, ValidationError> {
        validate(&self.language)?;
        tracing::debug!(
            language = %self.language.name,
            keywords = self.language.keywords.len(),
            operators = self.language.operators.len(),
            "language definition built"
        );
        Ok(self.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_literal_characters() {
        assert!(is_identifier_character('a'));
        assert!(is_identifier_character('_'));
        assert!(is_identifier_character('9'));
        assert!(is_identifier_character('é'));
        assert!(!is_identifier_character('+'));
        assert!(!is_identifier_character(' '));
    }

    #[test]
    fn special_character_sets_are_disjoint() {
        for c in SPECIAL_OPERATOR_CHARACTERS {
            assert!(!SPECIAL_NON_OPERATOR_CHARACTERS.contains(c));
        }
        for c in TEXT_DELIMITER_CHARACTERS {
            assert!(SPECIAL_NON_OPERATOR_CHARACTERS.contains(c));
        }
    }

    #[test]
    fn case_insensitive_comparison() {
        let language = LanguageBuilder::new("sql")
            .case_sensitive(false)
            .build()
            .unwrap();
        assert!(language.text_eq("SELECT", "select"));

        let language = LanguageBuilder::new("c").build().unwrap();
        assert!(!language.text_eq("SELECT", "select"));
    }

    #[test]
    fn custom_parsers_keep_registration_order() {
        use crate::custom::{CustomItem, CustomParseContext, CustomParseError};

        fn decline(_: &mut CustomParseContext) -> Result<Option<CustomItem>, CustomParseError> {
            Ok(None)
        }

        let language = LanguageBuilder::new("hooks")
            .keyword(KeywordId(1), "where")
            .custom_parser(KeywordId(1), decline)
            .custom_parser(KeywordId(1), decline)
            .build()
            .unwrap();

        assert_eq!(language.custom_parsers(KeywordId(1)).len(), 2);
        assert!(language.custom_parsers(KeywordId(2)).is_empty());
    }
}
