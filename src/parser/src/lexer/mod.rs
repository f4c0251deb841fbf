//! Scanning - reading the input character by character.
//!
//! There's no separate tokenizing pass. What a piece of text means depends on
//! where the parser is (`-` is an operator, but inside `'-'` it's text) and on
//! the language, so the parser asks the [`Scanner`] to try to match specific
//! things at specific offsets instead.
//!
//! The scanner has a cursor, but nearly everything it can match takes an
//! explicit offset and doesn't move it. This keeps lookahead cheap: the parser
//! can ask "would an operand start here?" without having to put anything
//! back.

mod matching;
mod rules;
mod token;

use crate::language::LanguageDefinition;

pub use self::token::{
    CharClass, Closer, Comment, CommentKind, KeywordMatch, NumericMatch,
    OperatorMatch, TextMatch, Trivia,
};

/// A read cursor over the input, which knows the language being parsed.
///
/// # Example
///
/// ```
/// # use parser::{language::LanguageBuilder, lexer::Scanner};
/// let language = LanguageBuilder::new("l").comments("#", "/*", "*/").build().unwrap();
/// let mut scanner = Scanner::new(&language, "  # note\n  abc");
/// let trivia = scanner.skip_trivia();
/// assert!(trivia.skipped);
/// assert_eq!(trivia.comments.len(), 1);
/// assert_eq!(scanner.match_literal(scanner.offset()), Some(14));
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'i> {
    /// The whole input, as utf8.
    input: &'i str,

    language: &'i LanguageDefinition,

    /// The location of the cursor, as a byte offset.
    offset: usize,

    /// Treated as the end of the input wherever a token would start.
    stop_marker: Option<&'i str>,
}

impl<'i> Scanner<'i> {
    pub fn new(language: &'i LanguageDefinition, input: &'i str) -> Self {
        Scanner {
            input,
            language,
            offset: 0,
            stop_marker: None,
        }
    }

    pub fn with_stop_marker(mut self, marker: Option<&'i str>) -> Self {
        self.stop_marker = marker;
        self
    }

    pub fn input(&self) -> &'i str {
        self.input
    }

    pub fn language(&self) -> &'i LanguageDefinition {
        self.language
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move the cursor. This must be onto a character boundary.
    pub fn set_offset(&mut self, offset: usize) {
        debug_assert!(self.input.is_char_boundary(offset));
        self.offset = offset;
    }

    /// The next character, regardless of the stop marker.
    pub fn peek(&self) -> Option<char> {
        self.char_at(self.offset)
    }

    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.input.get(offset..)?.chars().next()
    }

    pub fn char_before(&self, offset: usize) -> Option<char> {
        self.input.get(..offset)?.chars().next_back()
    }

    /// Consume one character.
    pub fn advance(&mut self) -> Option<char> {
        let next = self.peek()?;
        self.offset += next.len_utf8();
        Some(next)
    }

    /// Has the scanner reached the end of the input, or the stop marker?
    pub fn is_at_end(&self) -> bool {
        self.is_end_at(self.offset)
    }

    /// Would a token starting at `offset` be past the end of the input?
    pub fn is_end_at(&self, offset: usize) -> bool {
        if offset >= self.input.len() {
            return true;
        }

        match self.stop_marker {
            Some(marker) => self.input[offset..].starts_with(marker),
            None => false,
        }
    }

    /// The input that hasn't been consumed yet.
    pub fn remaining_input(&self) -> &'i str {
        &self.input[self.offset..]
    }
}
