//! The things a [`Scanner`][super::Scanner] can find.

use crate::{
    language::{Keyword, NumericKindId},
    operator::Operator,
    tree::{BraceKind, TextRange},
};

/// The structural meaning of the text at some offset.
///
/// Anything which isn't structural is [`CharClass::Other`], and the parser
/// works out what it is by trying the matchers in turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    End,
    CodeBlockStart,
    CodeBlockEnd,
    OpeningBrace(BraceKind),
    ClosingBrace(BraceKind),
    Comma,
    Separator,
    TextDelimiter(char),
    Other,
}

/// What closes a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closer {
    Brace(BraceKind),
    CodeBlockEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    Line,
    Block,
}

/// A comment found while skipping trivia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Comment {
    pub kind: CommentKind,
    pub range: TextRange,
    /// False for block comments which run off the end of the input.
    pub terminated: bool,
}

/// What was skipped by [`Scanner::skip_trivia`][super::Scanner::skip_trivia].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trivia {
    /// Was anything skipped at all?
    pub skipped: bool,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch<'l> {
    pub keyword: &'l Keyword,
    pub range: TextRange,
}

/// An operator, and where each of its parts was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorMatch<'l> {
    pub operator: &'l Operator,
    pub parts: Vec<TextRange>,
}

impl<'l> OperatorMatch<'l> {
    /// From the start of the first part to the end of the last.
    pub fn range(&self) -> TextRange {
        match (self.parts.first(), self.parts.last()) {
            (Some(first), Some(last)) => TextRange::new(first.start(), last.end()),
            _ => TextRange::default(),
        }
    }

    pub fn end(&self) -> usize {
        self.range().end()
    }

    /// Is this a better match than `other`? More parts wins, then a longer
    /// final part, then covering more text.
    pub(crate) fn beats(&self, other: &OperatorMatch) -> bool {
        let key = |m: &OperatorMatch| {
            (
                m.parts.len(),
                m.parts.last().map(|p| p.len()).unwrap_or(0),
                m.end(),
            )
        };
        key(self) > key(other)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericMatch {
    pub format: NumericKindId,
    pub range: TextRange,
}

/// Constant text, like `'it''s'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMatch {
    pub delimiter: char,
    pub range: TextRange,
    /// The text between the delimiters, with doubled delimiters collapsed.
    pub value: String,
    pub terminated: bool,
}
