//! Trivia and structural characters.

use crate::{
    lexer::{CharClass, Comment, CommentKind, Scanner, Trivia},
    tree::{BraceKind, TextRange},
};

impl<'i> Scanner<'i> {
    /// Skip whitespace and comments, moving the cursor.
    pub fn skip_trivia(&mut self) -> Trivia {
        let mut trivia = Trivia::default();
        let mut offset = self.offset;

        loop {
            let next = self.skip_whitespace_at(offset);
            if let Some(comment) = self.comment_at(next) {
                offset = comment.range.end();
                trivia.comments.push(comment);
            } else {
                offset = next;
                break;
            }
        }

        trivia.skipped = offset != self.offset;
        self.offset = offset;
        trivia
    }

    /// Where the next token after `offset` starts, skipping whitespace and
    /// comments. Doesn't move the cursor.
    pub fn skip_trivia_at(&self, mut offset: usize) -> usize {
        loop {
            offset = self.skip_whitespace_at(offset);
            match self.comment_at(offset) {
                Some(comment) => offset = comment.range.end(),
                None => return offset,
            }
        }
    }

    fn skip_whitespace_at(&self, offset: usize) -> usize {
        let rest = &self.input[offset..];
        let trimmed = rest.trim_start();
        let end = offset + (rest.len() - trimmed.len());

        // The stop marker can't be skipped over, even if it's whitespace.
        match self.stop_marker {
            Some(marker) => match self.input[offset..end].find(marker) {
                Some(i) => offset + i,
                None => end,
            },
            None => end,
        }
    }

    /// The comment starting at `offset`, if there is one.
    pub fn comment_at(&self, offset: usize) -> Option<Comment> {
        if self.is_end_at(offset) {
            return None;
        }

        let language = self.language;

        if let Some(marker) = language.line_comment() {
            if self.match_word(offset, marker).is_some() {
                let end = self.input[offset..]
                    .find('\n')
                    .map(|i| offset + i)
                    .unwrap_or(self.input.len());

                return Some(Comment {
                    kind: CommentKind::Line,
                    range: TextRange::new(offset, end),
                    terminated: true,
                });
            }
        }

        if let Some(block) = language.block_comment() {
            if let Some(body) = self.match_word(offset, &block.start) {
                let (end, terminated) = match self.find_text(body, &block.end) {
                    Some(at) => (at + block.end.len(), true),
                    None => (self.input.len(), false),
                };

                return Some(Comment {
                    kind: CommentKind::Block,
                    range: TextRange::new(offset, end),
                    terminated,
                });
            }
        }

        None
    }

    /// Find `needle` at or after `from`, using the language's case rule.
    fn find_text(&self, from: usize, needle: &str) -> Option<usize> {
        if self.language.is_case_sensitive() {
            return self.input[from..].find(needle).map(|i| from + i);
        }

        self.input[from..]
            .char_indices()
            .map(|(i, _)| from + i)
            .find(|at| starts_with_at(self.input, *at, needle, false).is_some())
    }

    /// What's structurally at `offset`. Comments and whitespace should be
    /// skipped first.
    pub fn classify(&self, offset: usize) -> CharClass {
        if self.is_end_at(offset) {
            return CharClass::End;
        }

        if self.match_code_block_start(offset).is_some() {
            return CharClass::CodeBlockStart;
        }

        if self.match_code_block_end(offset).is_some() {
            return CharClass::CodeBlockEnd;
        }

        let c = match self.char_at(offset) {
            Some(c) => c,
            None => return CharClass::End,
        };

        if let Some(kind) = BraceKind::from_opening(c) {
            return CharClass::OpeningBrace(kind);
        }

        if let Some(kind) = BraceKind::from_closing(c) {
            return CharClass::ClosingBrace(kind);
        }

        if c == ',' {
            return CharClass::Comma;
        }

        if Some(c) == self.language.separator() {
            return CharClass::Separator;
        }

        if self.language.is_text_delimiter(c) {
            return CharClass::TextDelimiter(c);
        }

        CharClass::Other
    }
}

/// If `pattern` is at `offset` in `text`, where does it end? Without case
/// sensitivity, characters are compared by their lowercase forms.
pub(crate) fn starts_with_at(
    text: &str,
    offset: usize,
    pattern: &str,
    case_sensitive: bool,
) -> Option<usize> {
    let rest = text.get(offset..)?;

    if case_sensitive {
        return rest.starts_with(pattern).then(|| offset + pattern.len());
    }

    let mut chars = rest.char_indices();
    for p in pattern.chars() {
        let (_, c) = chars.next()?;
        if c != p && !c.to_lowercase().eq(p.to_lowercase()) {
            return None;
        }
    }

    let consumed = chars.next().map(|(i, _)| i).unwrap_or(rest.len());
    Some(offset + consumed)
}
