//! What a parse call gives back.

use diagnostic::Diagnostic;
use thiserror::Error;

use crate::{
    error::{ErrorSink, ParseErrorItem},
    lexer::Comment,
    tree::{ExpressionTree, Node, NodeId, TextRange},
};

/// Why a parse call couldn't be made at all.
///
/// Problems with the text being parsed are never reported this way, they're
/// in [`ParseExpressionResult::errors`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCallError {
    #[error("no language named '{0}' is registered")]
    UnknownLanguage(String),

    #[error("invalid parse options: {0}")]
    InvalidOptions(String),
}

/// The tree, errors and other details of one parse.
#[derive(Debug, Clone)]
pub struct ParseExpressionResult<'t> {
    text: &'t str,
    tree: ExpressionTree,
    root: NodeId,
    errors: Vec<ParseErrorItem>,
    range: TextRange,
    comments: Vec<Comment>,
}

impl<'t> ParseExpressionResult<'t> {
    pub(crate) fn new(
        text: &'t str,
        tree: ExpressionTree,
        root: NodeId,
        errors: Vec<ParseErrorItem>,
        range: TextRange,
        comments: Vec<Comment>,
    ) -> Self {
        ParseExpressionResult {
            text,
            tree,
            root,
            errors,
            range,
            comments,
        }
    }

    /// The text that was parsed. Every offset in the result is into this.
    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn tree(&self) -> &ExpressionTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node {
        &self.tree[self.root]
    }

    /// Every error found, ordered by offset.
    pub fn errors(&self) -> &[ParseErrorItem] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// From the start offset to where parsing stopped.
    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Where parsing stopped: the end of the text, the stop marker, or where a
    /// critical error ended things.
    pub fn completion(&self) -> usize {
        self.range.end()
    }

    /// Was the whole text parsed?
    pub fn is_complete(&self) -> bool {
        self.range.end() == self.text.len()
    }

    /// The comments skipped, if they were asked for.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// The tree as an indented outline.
    pub fn outline(&self) -> String {
        self.tree.outline(self.text, self.root)
    }

    /// Every error as a [`Diagnostic`], in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.errors
            .iter()
            .map(|e| e.to_diagnostic(self.text))
            .collect()
    }
}

/// Errors can be added after parsing, say by a later checking pass. They're
/// kept in order.
impl ErrorSink for ParseExpressionResult<'_> {
    fn add_error(&mut self, error: ParseErrorItem) {
        let seen = self
            .errors
            .iter()
            .any(|e| e.offset() == error.offset() && e.code() == error.code());

        if !seen {
            let at = self.errors.partition_point(|e| e.offset() <= error.offset());
            self.errors.insert(at, error);
        }
    }
}
