//! Highlights mark the part of the input a diagnostic is about.
//!
//! The parser reports problems at byte offsets. Highlights are built from
//! those, and keep a [`Span`] which counts characters, since that's what
//! gets shown.

use crate::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    span: Span,
    note: Option<String>,
}

impl Highlight {
    /// Highlight `span`, with a note shown next to it.
    pub fn new(span: Span, note: impl Into<String>) -> Highlight {
        Highlight {
            span,
            note: Some(note.into()),
        }
    }

    /// Highlight the bytes `start..end` of `input`, without a note.
    pub fn range(input: &str, start: usize, end: usize) -> Highlight {
        Highlight {
            span: Span::from_offsets(input, start, end),
            note: None,
        }
    }

    /// Highlight the character which starts at byte `offset`.
    ///
    /// Past the last character there's nothing to cover, so the highlight is
    /// an empty spot at the end of the input. That's where most "missing"
    /// errors end up.
    pub fn at(input: &str, offset: usize) -> Highlight {
        let offset = offset.min(input.len());
        let end = input
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(offset, |c| offset + c.len_utf8());

        Highlight::range(input, offset, end)
    }

    /// Add or replace the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Highlight {
        self.note = Some(note.into());
        self
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Does this mark a spot between characters rather than any text?
    pub fn is_point(&self) -> bool {
        self.span.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_covers_one_character() {
        let input = "a é b";
        let highlight = Highlight::at(input, 2);
        assert_eq!(highlight.span().start().column(), 2);
        assert_eq!(highlight.span().end().column(), 3);
        assert!(!highlight.is_point());
    }

    #[test]
    fn at_the_end_is_a_point() {
        let highlight = Highlight::at("a +", 3).with_note("operand missing");
        assert!(highlight.is_point());
        assert_eq!(highlight.note(), Some("operand missing"));

        assert!(Highlight::at("a +", 10).is_point());
    }
}
