//! The parser engine.
//!
//! This is a recursive descent parser over nested *containers* (the root,
//! braces and code blocks), with precedence climbing for operators inside
//! each one. See [`container`], [`expression`] and [`operator_parsing`] for
//! the three layers, and [`custom_items`] for how custom parsers are run.
//!
//! Nothing here ever gives up on the input. Problems are recorded in
//! [`ParseErrors`], placeholders stand in for anything missing, and parsing
//! carries on. A critical error ends the container it's found in: braces
//! and code blocks skip to their closer, and at the root the parse stops.

mod container;
mod custom_items;
mod expression;
mod operator_parsing;

use crate::{
    error::{ErrorCode, ErrorSink, ParseErrorItem, ParseErrors},
    language::LanguageDefinition,
    lexer::{Closer, Comment, Scanner, Trivia},
    options::ParseOptions,
    result::{ParseCallError, ParseExpressionResult},
    tree::{BraceKind, ExpressionTree, NodeId, NodeKind, TextRange},
};

/// What a parse call starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    /// Any number of separated expressions.
    Expression,
    /// A single braces expression.
    Braces,
    /// A single code block.
    CodeBlock,
}

/// The kinds of container expressions are parsed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Container {
    Root,
    Braces(BraceKind),
    CodeBlock,
}

impl Container {
    /// What ends this container.
    fn closer(self) -> Option<Closer> {
        match self {
            Container::Root => None,
            Container::Braces(kind) => Some(Closer::Brace(kind)),
            Container::CodeBlock => Some(Closer::CodeBlockEnd),
        }
    }

    /// Are expressions in this container statements, which are separated by
    /// the language's separator?
    fn holds_statements(self) -> bool {
        !matches!(self, Container::Braces(_))
    }
}

/// A saved parser state to go back to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Checkpoint {
    offset: usize,
    nodes: usize,
    errors: usize,
    comments: usize,
    containers: usize,
    depth: usize,
    critical: bool,
}

/// The state of one parse.
#[derive(Debug)]
pub(crate) struct Parser<'a> {
    pub(crate) language: &'a LanguageDefinition,
    pub(crate) scanner: Scanner<'a>,
    pub(crate) tree: ExpressionTree,
    errors: ParseErrors,

    /// Comments skipped so far, in order, if they're being kept.
    comments: Vec<Comment>,
    collect_comments: bool,

    /// The containers we're currently inside, innermost last.
    containers: Vec<Container>,

    /// Braces, code blocks and prefix operators can nest. We track how deep
    /// we are to keep from blowing the stack.
    depth: usize,
    max_depth: usize,

    /// Set by a critical error, until the container it was found in has
    /// skipped to its closer.
    critical: bool,
}

impl<'a> Parser<'a> {
    fn new(language: &'a LanguageDefinition, text: &'a str, options: &'a ParseOptions) -> Self {
        let mut scanner =
            Scanner::new(language, text).with_stop_marker(options.stop_marker.as_deref());
        scanner.set_offset(options.start_offset);

        Parser {
            language,
            scanner,
            tree: ExpressionTree::new(),
            errors: ParseErrors::default(),
            comments: Vec::new(),
            collect_comments: options.collect_comments,
            containers: Vec::new(),
            depth: 0,
            max_depth: options.max_depth,
            critical: false,
        }
    }

    /// Record an error. Critical errors stop the parse.
    pub(crate) fn record(&mut self, error: ParseErrorItem) {
        if error.is_critical() {
            self.critical = true;
        }
        self.errors.push(error);
    }

    /// Record an error with the code's generic message.
    pub(crate) fn error(&mut self, offset: usize, code: ErrorCode) {
        self.record(ParseErrorItem::from_code(offset, code));
    }

    /// Skip whitespace and comments, keeping the comments if asked to.
    pub(crate) fn skip_trivia(&mut self) -> Trivia {
        let trivia = self.scanner.skip_trivia();

        for comment in &trivia.comments {
            if !comment.terminated {
                self.error(comment.range.start(), ErrorCode::CommentEndMarkerMissing);
            }

            let is_new = self
                .comments
                .last()
                .map_or(true, |last| last.range.start() < comment.range.start());

            if self.collect_comments && is_new {
                self.comments.push(*comment);
            }
        }

        trivia
    }

    /// Where the next token starts, without moving.
    pub(crate) fn peek_past_trivia(&self) -> usize {
        self.scanner.skip_trivia_at(self.scanner.offset())
    }

    /// Add a leaf covering `range`, and move past it.
    pub(crate) fn leaf(&mut self, kind: NodeKind, range: TextRange) -> NodeId {
        debug_assert!(!kind.is_complex());
        let node = self.tree.add(kind, range);
        self.scanner.set_offset(range.end());
        node
    }

    /// A zero-width placeholder at `offset`.
    pub(crate) fn placeholder(&mut self, offset: usize) -> NodeId {
        self.tree.add(NodeKind::Placeholder, TextRange::empty(offset))
    }

    /// Is something outside the current container closed by `closer`?
    fn encloses(&self, closer: Closer) -> bool {
        self.containers
            .iter()
            .rev()
            .skip(1)
            .any(|c| c.closer() == Some(closer))
    }
}

// Backtracking
impl<'a> Parser<'a> {
    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            offset: self.scanner.offset(),
            nodes: self.tree.len(),
            errors: self.errors.len(),
            comments: self.comments.len(),
            containers: self.containers.len(),
            depth: self.depth,
            critical: self.critical,
        }
    }

    /// Go back to a checkpoint, forgetting every node, error and comment
    /// found since.
    ///
    /// Nodes made before the checkpoint must not have been attached to nodes
    /// made after it.
    pub(crate) fn rewind(&mut self, checkpoint: Checkpoint) {
        self.scanner.set_offset(checkpoint.offset);
        self.tree.truncate(checkpoint.nodes);
        self.errors.truncate(checkpoint.errors);
        self.comments.truncate(checkpoint.comments);
        self.containers.truncate(checkpoint.containers);
        self.depth = checkpoint.depth;
        self.critical = checkpoint.critical;
    }

    /// Attempt the inner parser action, but if it returns `None` the parser is
    /// returned to the state it was in before.
    pub(crate) fn with_backtracking<T, F>(&mut self, inner: F) -> Option<T>
    where
        F: FnOnce(&mut Self) -> Option<T>,
    {
        let checkpoint = self.checkpoint();
        let result = inner(self);
        if result.is_none() {
            self.rewind(checkpoint);
        }
        result
    }
}

// Depth tracking
impl<'a> Parser<'a> {
    /// Run `inner` one level deeper. If that's too deep, a critical error is
    /// recorded at `offset` instead and `None` is returned.
    pub(crate) fn depth_track<T, F>(&mut self, offset: usize, inner: F) -> Option<T>
    where
        F: FnOnce(&mut Self) -> T,
    {
        if self.depth >= self.max_depth {
            self.record(ParseErrorItem::new(
                offset,
                ErrorCode::MaximumDepthExceeded,
                format!("nesting is deeper than the limit of {}", self.max_depth),
                true,
            ));
            return None;
        }

        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        Some(result)
    }
}

impl ErrorSink for Parser<'_> {
    fn add_error(&mut self, error: ParseErrorItem) {
        self.record(error);
    }
}

/// Run a parse from `entry`.
pub(crate) fn parse<'t>(
    language: &LanguageDefinition,
    text: &'t str,
    options: &ParseOptions,
    entry: Entry,
) -> Result<ParseExpressionResult<'t>, ParseCallError> {
    options.check(text)?;

    tracing::debug!(
        language = %language.name(),
        length = text.len(),
        start = options.start_offset,
        ?entry,
        "parse started"
    );

    let mut parser = Parser::new(language, text, options);
    let start = options.start_offset;
    let root = parser.tree.add(NodeKind::Root, TextRange::empty(start));

    match entry {
        Entry::Expression => {
            parser.items(root, Container::Root);
        }
        Entry::Braces => parser.standalone(root, Entry::Braces),
        Entry::CodeBlock => parser.standalone(root, Entry::CodeBlock),
    }
    parser.tree.close(root);

    let completion = parser.scanner.offset();

    debug_assert!(
        parser.tree.check_invariants(text, root).is_ok(),
        "tree invariants broken: {:?}",
        parser.tree.check_invariants(text, root)
    );

    let Parser {
        tree,
        errors,
        comments,
        ..
    } = parser;

    let errors = errors.into_sorted();
    tracing::debug!(
        language = %language.name(),
        errors = errors.len(),
        completion,
        nodes = tree.len(),
        "parse finished"
    );

    Ok(ParseExpressionResult::new(
        text,
        tree,
        root,
        errors,
        TextRange::new(start, completion),
        comments,
    ))
}
