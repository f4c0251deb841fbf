//! Language definition validation.
//!
//! Validation looks at the whole definition and reports every problem it
//! finds, not just the first one, so a language author can fix everything in
//! one go.
//!
//! Most rules are about tokens getting in each other's way. A marker,
//! keyword or operator part "conflicts" with another when one could be read
//! as part of the other. Words are only matched at word boundaries, so the
//! keyword `not` doesn't conflict with the operator `not_null`, but the
//! line comment marker `--` does conflict with the operator `--`.

use thiserror::Error;

use super::{
    LanguageDefinition, SPECIAL_NON_OPERATOR_CHARACTERS,
    SPECIAL_OPERATOR_CHARACTERS, TEXT_DELIMITER_CHARACTERS,
};
use crate::operator::{OperatorId, OperatorKind};

/// One problem with a language definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationIssue {
    #[error("{what} must not be empty")]
    Empty { what: String },

    #[error("{what} '{text}' must not contain whitespace")]
    Whitespace { what: String, text: String },

    #[error("{what} '{text}' must not contain the reserved character '{character}'")]
    ReservedCharacter {
        what: String,
        text: String,
        character: char,
    },

    #[error("comment markers must all be given or all be left out, but only the {given} is")]
    IncompleteCommentMarkers { given: String },

    #[error("{first} conflicts with {second}")]
    Conflict { first: String, second: String },

    #[error("separator '{0}' must be ';' or one of the special operator characters")]
    InvalidSeparator(char),

    #[error("'{0}' can't be used as a text delimiter")]
    InvalidTextDelimiter(char),

    #[error("text delimiter '{0}' is defined more than once")]
    DuplicateTextDelimiter(char),

    #[error("keyword id {0} is used more than once")]
    DuplicateKeywordId(super::KeywordId),

    #[error("keyword '{0}' is defined more than once")]
    DuplicateKeyword(String),

    #[error("operator {0} has no name parts")]
    EmptyOperator(OperatorId),

    #[error("operator id {0} is used more than once")]
    DuplicateOperatorId(OperatorId),

    #[error("{kind} operator '{spelling}' is defined more than once")]
    DuplicateOperator { kind: OperatorKind, spelling: String },

    #[error("numeric format id {0} is used more than once")]
    DuplicateNumericFormatId(super::NumericKindId),

    #[error("numeric format {0} has no patterns")]
    EmptyNumericFormat(super::NumericKindId),

    #[error("numeric format {id} pattern '{pattern}' does not compile: {reason}")]
    InvalidNumericPattern {
        id: super::NumericKindId,
        pattern: String,
        reason: String,
    },

    #[error("numeric format {id} pattern '{pattern}' must start with '^'")]
    UnanchoredNumericPattern {
        id: super::NumericKindId,
        pattern: String,
    },

    #[error("numeric format {id} pattern '{pattern}' must not end with '$'")]
    EndAnchoredNumericPattern {
        id: super::NumericKindId,
        pattern: String,
    },

    #[error("literal characters must not include '{0}'")]
    LiteralCharacter(char),

    #[error("custom parsers are registered for undefined keyword {0}")]
    UnknownCustomParserKeyword(super::KeywordId),
}

/// Everything wrong with a language definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("language '{language}' is invalid: {}", summarize(.issues))]
pub struct ValidationError {
    pub language: String,
    pub issues: Vec<ValidationIssue>,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ValidationIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check a language definition, returning every issue found.
pub fn validate(language: &LanguageDefinition) -> Result<(), ValidationError> {
    let mut validator = Validator {
        language,
        issues: Vec::new(),
    };

    validator.markers();
    validator.separator();
    validator.text_delimiters();
    validator.keywords();
    validator.operators();
    validator.numeric_formats();
    validator.literal_characters();
    validator.custom_parsers();
    validator.conflicts();

    if validator.issues.is_empty() {
        Ok(())
    } else {
        tracing::warn!(
            language = %language.name(),
            issues = validator.issues.len(),
            "language definition failed validation"
        );
        Err(ValidationError {
            language: language.name().to_string(),
            issues: validator.issues,
        })
    }
}

struct Validator<'l> {
    language: &'l LanguageDefinition,
    issues: Vec<ValidationIssue>,
}

impl<'l> Validator<'l> {
    fn issue(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// The shape every marker, keyword and operator part must have.
    fn token(&mut self, what: String, text: &str) {
        if text.is_empty() {
            self.issue(ValidationIssue::Empty { what });
            return;
        }

        if text.chars().any(char::is_whitespace) {
            self.issue(ValidationIssue::Whitespace {
                what: what.clone(),
                text: text.to_string(),
            });
        }

        if let Some(character) = text
            .chars()
            .find(|c| SPECIAL_NON_OPERATOR_CHARACTERS.contains(c))
        {
            self.issue(ValidationIssue::ReservedCharacter {
                what,
                text: text.to_string(),
                character,
            });
        }
    }

    /// The markers, named, in a fixed order.
    fn named_markers(&self) -> Vec<(String, &'l str)> {
        let mut markers = Vec::new();

        if let Some(line) = self.language.line_comment() {
            markers.push((format!("line comment marker '{}'", line), line));
        }
        if let Some(block) = self.language.block_comment() {
            markers.push((
                format!("block comment start marker '{}'", block.start),
                block.start.as_str(),
            ));
            markers.push((
                format!("block comment end marker '{}'", block.end),
                block.end.as_str(),
            ));
        }
        if let Some(code) = self.language.code_block() {
            markers.push((
                format!("code block start marker '{}'", code.start),
                code.start.as_str(),
            ));
            markers.push((
                format!("code block end marker '{}'", code.end),
                code.end.as_str(),
            ));
        }

        markers
    }

    fn markers(&mut self) {
        let language = self.language;

        match (language.line_comment(), language.block_comment()) {
            (Some(_), None) => self.issue(ValidationIssue::IncompleteCommentMarkers {
                given: "line comment marker".into(),
            }),
            (None, Some(_)) => self.issue(ValidationIssue::IncompleteCommentMarkers {
                given: "block comment markers".into(),
            }),
            _ => {}
        }

        if let Some(line) = language.line_comment() {
            self.token("line comment marker".into(), line);
        }

        // Equal start and end markers are caught with the other marker
        // conflicts.
        if let Some(block) = language.block_comment() {
            self.token("block comment start marker".into(), &block.start);
            self.token("block comment end marker".into(), &block.end);
        }

        if let Some(code) = language.code_block() {
            self.token("code block start marker".into(), &code.start);
            self.token("code block end marker".into(), &code.end);
        }
    }

    fn separator(&mut self) {
        let separator = match self.language.separator() {
            Some(separator) => separator,
            None => return,
        };

        if separator != ';' && !SPECIAL_OPERATOR_CHARACTERS.contains(&separator) {
            self.issue(ValidationIssue::InvalidSeparator(separator));
        }
    }

    fn text_delimiters(&mut self) {
        let language = self.language;
        let delimiters = language.text_delimiters();

        for (i, delimiter) in delimiters.iter().enumerate() {
            if !TEXT_DELIMITER_CHARACTERS.contains(delimiter) {
                self.issue(ValidationIssue::InvalidTextDelimiter(*delimiter));
            }
            if delimiters[..i].contains(delimiter) {
                self.issue(ValidationIssue::DuplicateTextDelimiter(*delimiter));
            }
        }
    }

    fn keywords(&mut self) {
        let language = self.language;
        let keywords = language.keywords();

        for (i, keyword) in keywords.iter().enumerate() {
            self.token(format!("keyword {}", keyword.id()), keyword.text());

            let earlier = &keywords[..i];
            if earlier.iter().any(|k| k.id() == keyword.id()) {
                self.issue(ValidationIssue::DuplicateKeywordId(keyword.id()));
            }
            if earlier
                .iter()
                .any(|k| language.text_eq(k.text(), keyword.text()))
            {
                self.issue(ValidationIssue::DuplicateKeyword(keyword.text().to_string()));
            }
        }
    }

    fn operators(&mut self) {
        let language = self.language;
        let operators: Vec<_> = language.operators().iter().collect();

        for (i, operator) in operators.iter().enumerate() {
            if operator.parts().is_empty() {
                self.issue(ValidationIssue::EmptyOperator(operator.id()));
            }

            for part in operator.parts() {
                self.token(format!("operator {} part", operator.id()), part);
            }

            let earlier = &operators[..i];
            if earlier.iter().any(|o| o.id() == operator.id()) {
                self.issue(ValidationIssue::DuplicateOperatorId(operator.id()));
            }

            let same_spelling = earlier.iter().any(|o| {
                o.kind() == operator.kind()
                    && o.parts().len() == operator.parts().len()
                    && o.parts()
                        .iter()
                        .zip(operator.parts())
                        .all(|(a, b)| language.text_eq(a, b))
            });
            if same_spelling {
                self.issue(ValidationIssue::DuplicateOperator {
                    kind: operator.kind(),
                    spelling: operator.spelling(),
                });
            }
        }
    }

    fn numeric_formats(&mut self) {
        let language = self.language;
        let formats = language.numeric_formats();

        for (i, format) in formats.iter().enumerate() {
            if formats[..i].iter().any(|f| f.id() == format.id()) {
                self.issue(ValidationIssue::DuplicateNumericFormatId(format.id()));
            }

            if format.patterns().is_empty() {
                self.issue(ValidationIssue::EmptyNumericFormat(format.id()));
            }

            for pattern in format.patterns() {
                let source = pattern.source();

                if let Some(error) = pattern.compile_error() {
                    self.issue(ValidationIssue::InvalidNumericPattern {
                        id: format.id(),
                        pattern: source.to_string(),
                        reason: error.to_string(),
                    });
                }

                if !source.starts_with('^') {
                    self.issue(ValidationIssue::UnanchoredNumericPattern {
                        id: format.id(),
                        pattern: source.to_string(),
                    });
                }

                if ends_with_unescaped_dollar(source) {
                    self.issue(ValidationIssue::EndAnchoredNumericPattern {
                        id: format.id(),
                        pattern: source.to_string(),
                    });
                }
            }
        }
    }

    fn literal_characters(&mut self) {
        let reserved = SPECIAL_NON_OPERATOR_CHARACTERS
            .iter()
            .chain(SPECIAL_OPERATOR_CHARACTERS)
            .chain(&[' ', '\t', '\n', '\r']);

        for c in reserved {
            if self.language.is_literal_character(*c) {
                self.issue(ValidationIssue::LiteralCharacter(*c));
            }
        }
    }

    fn custom_parsers(&mut self) {
        let language = self.language;
        let mut unknown: Vec<_> = language
            .custom_parser_keywords()
            .filter(|id| language.keyword(*id).is_none())
            .collect();
        unknown.sort();

        for id in unknown {
            self.issue(ValidationIssue::UnknownCustomParserKeyword(id));
        }
    }

    fn conflicts(&mut self) {
        let language = self.language;
        let markers = self.named_markers();

        // Markers against each other. These are matched before anything
        // else, so one being a prefix of another is already ambiguous.
        for (i, (first, a)) in markers.iter().enumerate() {
            for (second, b) in &markers[i + 1..] {
                let a_starts_b = self.starts_with(b, a);
                let b_starts_a = self.starts_with(a, b);

                if !a.is_empty() && !b.is_empty() && (a_starts_b || b_starts_a) {
                    self.issue(ValidationIssue::Conflict {
                        first: first.clone(),
                        second: second.clone(),
                    });
                }
            }
        }

        let keywords: Vec<_> = language
            .keywords()
            .iter()
            .map(|k| (format!("keyword '{}'", k.text()), k.text()))
            .collect();

        let parts: Vec<_> = language
            .operators()
            .iter()
            .flat_map(|o| {
                o.parts()
                    .iter()
                    .map(move |p| (format!("{} operator '{}'", o.kind(), o.spelling()), p.as_str()))
            })
            .collect();

        // Markers embedded in keywords or operators.
        for (marker_name, marker) in &markers {
            for (name, text) in keywords.iter().chain(&parts) {
                if self.embedded(marker, text) {
                    self.issue(ValidationIssue::Conflict {
                        first: marker_name.clone(),
                        second: name.clone(),
                    });
                }
            }
        }

        // Keywords embedded in operators. The other way around is fine, an
        // operator can be part of a longer keyword.
        for (keyword_name, keyword) in &keywords {
            for (name, part) in &parts {
                if self.embedded(keyword, part) {
                    self.issue(ValidationIssue::Conflict {
                        first: keyword_name.clone(),
                        second: name.clone(),
                    });
                }
            }
        }

        if let Some(separator) = language.separator() {
            let everything = markers
                .iter()
                .map(|(n, t)| (n, *t))
                .chain(keywords.iter().map(|(n, t)| (n, *t)))
                .chain(parts.iter().map(|(n, t)| (n, *t)));

            let mut found = Vec::new();
            for (name, text) in everything {
                if text.contains(separator) {
                    found.push(name.clone());
                }
            }

            for name in found {
                self.issue(ValidationIssue::Conflict {
                    first: format!("separator '{}'", separator),
                    second: name,
                });
            }
        }
    }

    fn fold(&self, text: &str) -> String {
        if self.language.is_case_sensitive() {
            text.to_string()
        } else {
            text.chars().flat_map(char::to_lowercase).collect()
        }
    }

    fn starts_with(&self, text: &str, prefix: &str) -> bool {
        self.fold(text).starts_with(&self.fold(prefix))
    }

    /// Does `inner` appear in `outer` somewhere it would be matched on its
    /// own, i.e. not in the middle of a word?
    fn embedded(&self, inner: &str, outer: &str) -> bool {
        let inner = self.fold(inner);
        let outer = self.fold(outer);

        let (first, last) = match (inner.chars().next(), inner.chars().next_back()) {
            (Some(first), Some(last)) => (first, last),
            _ => return false,
        };

        let literal = |c: char| self.language.is_literal_character(c);

        outer.match_indices(inner.as_str()).any(|(start, m)| {
            let before = outer[..start].chars().next_back();
            let after = outer[start + m.len()..].chars().next();

            let left = before.map_or(true, |b| !(literal(b) && literal(first)));
            let right = after.map_or(true, |a| !(literal(a) && literal(last)));

            left && right
        })
    }
}

fn ends_with_unescaped_dollar(pattern: &str) -> bool {
    if !pattern.ends_with('$') {
        return false;
    }

    let backslashes = pattern[..pattern.len() - 1]
        .chars()
        .rev()
        .take_while(|c| *c == '\\')
        .count();

    backslashes % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dollar_anchors() {
        assert!(ends_with_unescaped_dollar(r"^\d+$"));
        assert!(!ends_with_unescaped_dollar(r"^\d+\$"));
        assert!(ends_with_unescaped_dollar(r"^\d+\\$"));
        assert!(!ends_with_unescaped_dollar(r"^\d+"));
    }
}
