//! Matching the language's tokens at an offset.
//!
//! Words only match at word boundaries: if a keyword, operator part or
//! marker begins (or ends) with a literal character, the character before
//! (or after) it must not be one. So with the operator `and`, `a and b`
//! matches but `android` doesn't.

use crate::{
    language::Keyword,
    lexer::{
        rules::starts_with_at, Closer, KeywordMatch, NumericMatch, OperatorMatch,
        Scanner, TextMatch,
    },
    operator::OperatorKind,
    tree::{BraceKind, TextRange},
};

impl<'i> Scanner<'i> {
    /// If `word` is at `offset`, on word boundaries, where does it end?
    pub fn match_word(&self, offset: usize, word: &str) -> Option<usize> {
        let end = starts_with_at(
            self.input,
            offset,
            word,
            self.language.is_case_sensitive(),
        )?;

        let literal = |c: Option<char>| c.map_or(false, |c| self.language.is_literal_character(c));

        let first = word.chars().next();
        let last = word.chars().next_back();

        if literal(first) && literal(self.char_before(offset)) {
            return None;
        }

        if literal(last) && literal(self.char_at(end)) {
            return None;
        }

        Some(end)
    }

    /// The end of the run of literal characters at `offset`, if there are
    /// any.
    pub fn match_literal(&self, offset: usize) -> Option<usize> {
        let rest = self.input.get(offset..)?;
        let len: usize = rest
            .chars()
            .take_while(|c| self.language.is_literal_character(*c))
            .map(char::len_utf8)
            .sum();

        if len == 0 {
            None
        } else {
            Some(offset + len)
        }
    }

    /// The longest keyword at `offset`.
    pub fn match_keyword(&self, offset: usize) -> Option<KeywordMatch<'i>> {
        let keywords: &'i [Keyword] = self.language.keywords();

        keywords
            .iter()
            .filter_map(|keyword| {
                self.match_word(offset, keyword.text())
                    .map(|end| KeywordMatch {
                        keyword,
                        range: TextRange::new(offset, end),
                    })
            })
            .fold(None, |best: Option<KeywordMatch<'i>>, m| match best {
                Some(b) if b.range.end() >= m.range.end() => Some(b),
                _ => Some(m),
            })
    }

    /// The best operator of `kind` at `offset`.
    ///
    /// Parts after the first may be separated by whitespace and comments. If
    /// several operators match, the one with the most parts wins, then the
    /// one with the longest final part, then the one defined first.
    pub fn match_operator(&self, offset: usize, kind: OperatorKind) -> Option<OperatorMatch<'i>> {
        let mut best: Option<OperatorMatch<'i>> = None;

        for operator in self.language.operators().of_kind(kind) {
            let mut parts = Vec::with_capacity(operator.parts().len());
            let mut at = offset;

            for (i, part) in operator.parts().iter().enumerate() {
                if i > 0 {
                    at = self.skip_trivia_at(at);
                    if self.is_end_at(at) {
                        break;
                    }
                }

                match self.match_word(at, part) {
                    Some(end) => {
                        parts.push(TextRange::new(at, end));
                        at = end;
                    }
                    None => break,
                }
            }

            if parts.len() != operator.parts().len() || parts.is_empty() {
                continue;
            }

            let candidate = OperatorMatch { operator, parts };
            match &best {
                Some(b) if !candidate.beats(b) => {}
                _ => best = Some(candidate),
            }
        }

        best
    }

    /// The end of the longest operator of any kind at `offset`.
    pub fn match_any_operator(&self, offset: usize) -> Option<usize> {
        [OperatorKind::Prefix, OperatorKind::Binary, OperatorKind::Postfix]
            .into_iter()
            .filter_map(|kind| self.match_operator(offset, kind))
            .map(|m| m.end())
            .max()
    }

    /// The number at `offset`. Formats are tried in definition order, and
    /// each format's patterns in the order given; the first match wins even
    /// if a later one would be longer.
    pub fn match_numeric(&self, offset: usize) -> Option<NumericMatch> {
        let rest = self.input.get(offset..)?;

        self.language.numeric_formats().iter().find_map(|format| {
            format
                .patterns()
                .iter()
                .filter_map(|p| p.regex())
                .find_map(|regex| match regex.find(rest) {
                    Some(m) if m.start() == 0 && m.end() > 0 => Some(NumericMatch {
                        format: format.id(),
                        range: TextRange::new(offset, offset + m.end()),
                    }),
                    _ => None,
                })
        })
    }

    /// Constant text starting at `offset`. A doubled delimiter inside the
    /// text stands for a single one. Unterminated text runs to the end of
    /// the input.
    pub fn match_text(&self, offset: usize) -> Option<TextMatch> {
        let delimiter = self.char_at(offset)?;
        if !self.language.is_text_delimiter(delimiter) {
            return None;
        }

        let body = offset + delimiter.len_utf8();
        let mut value = String::new();
        let mut chars = self.input[body..].char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c != delimiter {
                value.push(c);
                continue;
            }

            if matches!(chars.peek(), Some((_, next)) if *next == delimiter) {
                chars.next();
                value.push(delimiter);
                continue;
            }

            return Some(TextMatch {
                delimiter,
                range: TextRange::new(offset, body + i + c.len_utf8()),
                value,
                terminated: true,
            });
        }

        Some(TextMatch {
            delimiter,
            range: TextRange::new(offset, self.input.len()),
            value,
            terminated: false,
        })
    }

    pub fn match_code_block_start(&self, offset: usize) -> Option<TextRange> {
        let markers = self.language.code_block()?;
        self.match_word(offset, &markers.start)
            .map(|end| TextRange::new(offset, end))
    }

    pub fn match_code_block_end(&self, offset: usize) -> Option<TextRange> {
        let markers = self.language.code_block()?;
        self.match_word(offset, &markers.end)
            .map(|end| TextRange::new(offset, end))
    }

    /// Find what closes a container, starting at `from` inside it.
    ///
    /// Nested braces and code blocks are skipped over, as are text and
    /// comments. Returns the offset of the closer, or if something else closes
    /// the container first (or the input ends), the offset where the search
    /// stopped.
    pub fn find_closer(&self, from: usize, target: Closer) -> Result<usize, usize> {
        let mut open: Vec<Closer> = Vec::new();
        let mut at = from;

        loop {
            at = self.skip_trivia_at(at);

            if self.is_end_at(at) {
                return Err(at);
            }

            if let Some(text) = self.match_text(at) {
                at = text.range.end();
                continue;
            }

            if let Some(start) = self.match_code_block_start(at) {
                open.push(Closer::CodeBlockEnd);
                at = start.end();
                continue;
            }

            let closer = match self.match_code_block_end(at) {
                Some(end) => Some((Closer::CodeBlockEnd, end.end())),
                None => self
                    .char_at(at)
                    .and_then(BraceKind::from_closing)
                    .map(|kind| (Closer::Brace(kind), at + 1)),
            };

            if let Some((closer, end)) = closer {
                if open.pop().is_none() {
                    return if closer == target { Ok(at) } else { Err(at) };
                }
                at = end;
                continue;
            }

            match self.char_at(at) {
                Some(c) => {
                    if let Some(kind) = BraceKind::from_opening(c) {
                        open.push(Closer::Brace(kind));
                    }
                    at += c.len_utf8();
                }
                None => return Err(at),
            }
        }
    }
}
