//! Custom expression items.
//!
//! A language can attach [`CustomItemParser`]s to any of its keywords. When
//! the parser finds such a keyword, it hands control to each parser in turn
//! through a [`CustomParseContext`], and the first one that recognises what
//! follows produces a [`CustomItem`]. That becomes a
//! [`NodeKind::Custom`][crate::tree::NodeKind::Custom] node in the tree, with
//! the trigger keyword and everything the custom parser consumed as its
//! children.
//!
//! Custom items come in three [categories](CustomItemCategory):
//!
//! - *regular* items are operands in their own right,
//! - *prefix* items apply to the operand after them, like `[..]` prefixes,
//! - *postfix* items apply to the operand before them.
//!
//! Custom parsers are untrusted as far as the parser is concerned. What they
//! return is checked, and if they fail or panic, the error is reported and
//! the parser carries on.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    error::{ErrorSink, ParseErrorItem},
    language::{KeywordId, LanguageDefinition},
    lexer::CharClass,
    parser::Parser,
    tree::{ExpressionTree, Node, NodeId, NodeKind, TextRange},
};

/// Where a custom item goes relative to the operand it's part of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomItemCategory {
    Prefix,
    Regular,
    Postfix,
}

impl CustomItemCategory {
    pub fn name(self) -> &'static str {
        match self {
            CustomItemCategory::Prefix => "prefix",
            CustomItemCategory::Regular => "regular",
            CustomItemCategory::Postfix => "postfix",
        }
    }
}

impl fmt::Display for CustomItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The answer to [`CustomExpressionItem::accepts_postfix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostfixVerdict {
    Accept,
    /// Rejected, optionally with a message to report instead of the generic
    /// one.
    Reject(Option<String>),
}

/// The value behind a custom node. Implement this for whatever your custom
/// parsers produce.
pub trait CustomExpressionItem: fmt::Debug + Send + Sync {
    /// A short name, used in tree outlines and messages.
    fn name(&self) -> &str;

    /// Where errors about this item should be reported, if not at its start.
    fn error_offset(&self) -> Option<usize> {
        None
    }

    /// Can the custom postfix item `postfix` follow this one?
    fn accepts_postfix(&self, _postfix: &dyn CustomExpressionItem) -> PostfixVerdict {
        PostfixVerdict::Accept
    }

    /// Called once the item's node is in the tree, so the item can check its
    /// children and report problems.
    fn on_parsed(&self, _node: &Node, _tree: &ExpressionTree, _errors: &mut dyn ErrorSink) {}
}

/// What a custom parser hands back when it recognises its input.
#[derive(Debug, Clone)]
pub struct CustomItem {
    category: CustomItemCategory,
    range: TextRange,
    item: Arc<dyn CustomExpressionItem>,
}

impl CustomItem {
    /// `range` must start where the trigger keyword starts, and end where the
    /// last thing the parser consumed ends (see
    /// [`CustomParseContext::last_token_end`]).
    pub fn new(
        category: CustomItemCategory,
        range: TextRange,
        item: impl CustomExpressionItem + 'static,
    ) -> Self {
        CustomItem {
            category,
            range,
            item: Arc::new(item),
        }
    }

    pub fn category(&self) -> CustomItemCategory {
        self.category
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn item(&self) -> &Arc<dyn CustomExpressionItem> {
        &self.item
    }
}

/// A custom parser which recognised its input but couldn't make sense of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CustomParseError {
    message: String,
    critical: bool,
}

impl CustomParseError {
    pub fn new(message: impl Into<String>) -> Self {
        CustomParseError {
            message: message.into(),
            critical: false,
        }
    }

    /// An error which stops parsing of the enclosing container.
    pub fn critical(message: impl Into<String>) -> Self {
        CustomParseError {
            message: message.into(),
            critical: true,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }
}

/// Recognises custom items after a keyword.
///
/// Return `Ok(None)` if the input isn't yours. Anything consumed through the
/// context is put back, and the next parser for the keyword is tried.
pub trait CustomItemParser: Send + Sync {
    fn try_parse(
        &self,
        context: &mut CustomParseContext,
    ) -> Result<Option<CustomItem>, CustomParseError>;
}

impl<F> CustomItemParser for F
where
    F: Fn(&mut CustomParseContext<'_, '_>) -> Result<Option<CustomItem>, CustomParseError>
        + Send
        + Sync,
{
    fn try_parse(
        &self,
        context: &mut CustomParseContext,
    ) -> Result<Option<CustomItem>, CustomParseError> {
        self(context)
    }
}

/// What a custom parser sees.
///
/// The cursor starts right after the trigger keyword. Everything consumed
/// becomes a child of the custom node: text read with
/// [`advance`][CustomParseContext::advance] becomes
/// [`CustomText`][NodeKind::CustomText], and braces or code blocks become
/// full nodes.
pub struct CustomParseContext<'p, 'a> {
    parser: &'p mut Parser<'a>,
    keyword: KeywordId,
    trigger: NodeId,
    prefixes: Vec<NodeId>,
    keywords: Vec<NodeId>,
    children: Vec<NodeId>,
    /// Start of text consumed with `advance` that isn't a node yet.
    raw_start: Option<usize>,
    last_token_end: usize,
}

impl<'p, 'a> CustomParseContext<'p, 'a> {
    pub(crate) fn new(
        parser: &'p mut Parser<'a>,
        keyword: KeywordId,
        trigger: NodeId,
        prefixes: Vec<NodeId>,
        keywords: Vec<NodeId>,
    ) -> Self {
        let last_token_end = parser.tree[trigger].end();
        CustomParseContext {
            parser,
            keyword,
            trigger,
            prefixes,
            keywords,
            children: Vec::new(),
            raw_start: None,
            last_token_end,
        }
    }

    /// The id of the keyword which triggered this parser.
    pub fn keyword_id(&self) -> KeywordId {
        self.keyword
    }

    /// Where the trigger keyword is.
    pub fn trigger(&self) -> TextRange {
        self.parser.tree[self.trigger].range()
    }

    /// Prefixes parsed before the trigger. Empty for postfix positions.
    pub fn prefixes(&self) -> &[NodeId] {
        &self.prefixes
    }

    /// Keywords parsed before the trigger, not including it.
    pub fn keywords(&self) -> &[NodeId] {
        &self.keywords
    }

    /// The tree so far, for looking at prefixes, keywords and anything parsed
    /// with [`parse_braces`][CustomParseContext::parse_braces] or
    /// [`parse_code_block`][CustomParseContext::parse_code_block].
    pub fn tree(&self) -> &ExpressionTree {
        &self.parser.tree
    }

    pub fn language(&self) -> &LanguageDefinition {
        self.parser.language
    }

    /// The whole text being parsed.
    pub fn text(&self) -> &'a str {
        self.parser.scanner.input()
    }

    pub fn offset(&self) -> usize {
        self.parser.scanner.offset()
    }

    /// The end of the last thing consumed, not counting whitespace and
    /// comments. A returned [`CustomItem`] must end here.
    pub fn last_token_end(&self) -> usize {
        self.last_token_end
    }

    /// The next character, or `None` at the end of the input.
    pub fn peek(&self) -> Option<char> {
        if self.is_at_end() {
            None
        } else {
            self.parser.scanner.peek()
        }
    }

    pub fn remaining(&self) -> &'a str {
        self.parser.scanner.remaining_input()
    }

    pub fn is_at_end(&self) -> bool {
        self.parser.scanner.is_at_end()
    }

    /// Consume up to `chars` characters as raw text, returning what was
    /// consumed.
    pub fn advance(&mut self, chars: usize) -> &'a str {
        let start = self.offset();
        for _ in 0..chars {
            if self.is_at_end() {
                break;
            }
            self.parser.scanner.advance();
        }

        let end = self.offset();
        if end > start {
            self.raw_start.get_or_insert(start);
            self.last_token_end = end;
        }

        &self.text()[start..end]
    }

    /// Skip whitespace and comments, returning whether anything was skipped.
    pub fn skip_whitespace_and_comments(&mut self) -> bool {
        self.flush();
        self.parser.skip_trivia().skipped
    }

    /// Consume a literal, like a name.
    pub fn consume_literal(&mut self) -> Option<&'a str> {
        self.flush();
        let start = self.offset();
        let end = self.parser.scanner.match_literal(start)?;
        if self.parser.scanner.is_end_at(start) {
            return None;
        }

        let range = TextRange::new(start, end);
        self.push_leaf(NodeKind::Name, range);
        Some(range.slice(self.text()))
    }

    /// Consume `word` if it's next, matching it the way keywords are matched.
    pub fn consume_str(&mut self, word: &str) -> bool {
        self.flush();
        let start = self.offset();
        if word.is_empty() || self.parser.scanner.is_end_at(start) {
            return false;
        }

        match self.parser.scanner.match_word(start, word) {
            Some(end) => {
                self.push_leaf(NodeKind::CustomText, TextRange::new(start, end));
                true
            }
            None => false,
        }
    }

    /// Parse a braces expression if one starts here.
    pub fn parse_braces(&mut self) -> Option<NodeId> {
        self.flush();
        let start = self.offset();
        if !matches!(self.parser.scanner.classify(start), CharClass::OpeningBrace(_)) {
            return None;
        }

        let node = self.parser.braces(None);
        self.push_child(node);
        Some(node)
    }

    /// Parse a code block if one starts here.
    pub fn parse_code_block(&mut self) -> Option<NodeId> {
        self.flush();
        let start = self.offset();
        if self.parser.scanner.classify(start) != CharClass::CodeBlockStart {
            return None;
        }

        let node = self.parser.code_block();
        self.push_child(node);
        Some(node)
    }

    fn push_leaf(&mut self, kind: NodeKind, range: TextRange) {
        let node = self.parser.tree.add(kind, range);
        self.parser.scanner.set_offset(range.end());
        self.push_child(node);
    }

    fn push_child(&mut self, node: NodeId) {
        self.last_token_end = self.parser.tree[node].end();
        self.children.push(node);
    }

    /// Turn any raw text consumed so far into a node.
    fn flush(&mut self) {
        if let Some(start) = self.raw_start.take() {
            let range = TextRange::new(start, self.last_token_end);
            let node = self.parser.tree.add(NodeKind::CustomText, range);
            self.children.push(node);
        }
    }

    /// Finish up, returning the children and where the last one ends.
    pub(crate) fn finish(mut self) -> (Vec<NodeId>, usize) {
        self.flush();
        (self.children, self.last_token_end)
    }
}

impl ErrorSink for CustomParseContext<'_, '_> {
    fn add_error(&mut self, error: ParseErrorItem) {
        self.parser.record(error);
    }
}

impl fmt::Debug for CustomParseContext<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CustomParseContext")
            .field("keyword", &self.keyword)
            .field("trigger", &self.trigger())
            .field("offset", &self.offset())
            .field("children", &self.children)
            .finish()
    }
}
