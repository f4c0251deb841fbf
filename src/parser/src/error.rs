//! Parse errors.
//!
//! Parsing never stops at the first problem. Everything that goes wrong is
//! recorded as a [`ParseErrorItem`] at a byte offset into the input, and the
//! tree is still built around it.
//!
//! Codes are grouped by hundreds:
//!
//! | range | kind of problem                         |
//! |-------|-----------------------------------------|
//! | 1xx   | braces, code blocks and separators      |
//! | 2xx   | operators                               |
//! | 3xx   | symbols, text and comments              |
//! | 4xx   | keywords                                |
//! | 5xx   | custom expression items                 |
//! | 6xx   | prefixes                                |
//! | 7xx   | code blocks used as expressions         |
//! | 8xx   | limits                                  |

use std::fmt;

use diagnostic::{Caret, Diagnostic, Highlight, Level};

/// The kinds of problems the parser reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    ClosingBraceMissing,
    ClosingBraceWithoutOpeningBrace,
    ClosingBraceDoesNotMatchOpeningBrace,
    CodeBlockEndMarkerMissing,
    CodeBlockClosingMarkerWithoutOpeningMarker,
    CommaWithoutParentBraces,
    ExpressionSeparatorWithoutParentCodeBlock,
    ExpressionMissingBeforeComma,
    ExpressionMissingAfterComma,
    ExpressionMissingBeforeCodeItemSeparator,
    InvalidBracesExpression,

    BinaryOperatorMissing,
    ExpectedPostfixOperator,
    ExpectedPrefixOperator,
    OperandMissingAfterPrefixOperator,

    InvalidSymbol,
    NoSeparationBetweenSymbols,
    ConstantTextEndMarkerMissing,
    CommentEndMarkerMissing,

    MultipleOccurrencesOfKeyword,
    InvalidUseOfKeywords,
    KeywordsNotSupported,

    CustomExpressionParserFailed,
    CustomPostfixExpressionItemAfterNonRegularExpressionItem,
    CustomPostfixExpressionItemHasNoTargetExpression,
    CustomPostfixExpressionItemFollowsInvalidExpression,
    CustomPostfixExpressionItemRejectedByPrecedingCustomExpressionItem,
    ParsedCustomExpressionItemHasInvalidIndex,
    ParsedCustomExpressionItemHasNonPositiveLength,

    InvalidUseOfPrefixes,
    CustomPrefixExpressionHasNoTarget,

    InvalidCodeBlock,
    CodeBlockUsedAfterPostfixCustomExpression,
    CodeBlockCannotFollowThePrecedingExpression,

    MaximumDepthExceeded,

    /// A code added by a custom expression item or by post-processing. These
    /// should be 1000 or above to stay clear of the built in ones.
    Custom(u32),
}

impl ErrorCode {
    /// Every built in code, in numeric order.
    pub const BUILT_IN: &'static [ErrorCode] = {
        use ErrorCode::*;
        &[
            ClosingBraceMissing,
            ClosingBraceWithoutOpeningBrace,
            ClosingBraceDoesNotMatchOpeningBrace,
            CodeBlockEndMarkerMissing,
            CodeBlockClosingMarkerWithoutOpeningMarker,
            CommaWithoutParentBraces,
            ExpressionSeparatorWithoutParentCodeBlock,
            ExpressionMissingBeforeComma,
            ExpressionMissingAfterComma,
            ExpressionMissingBeforeCodeItemSeparator,
            InvalidBracesExpression,
            BinaryOperatorMissing,
            ExpectedPostfixOperator,
            ExpectedPrefixOperator,
            OperandMissingAfterPrefixOperator,
            InvalidSymbol,
            NoSeparationBetweenSymbols,
            ConstantTextEndMarkerMissing,
            CommentEndMarkerMissing,
            MultipleOccurrencesOfKeyword,
            InvalidUseOfKeywords,
            KeywordsNotSupported,
            CustomExpressionParserFailed,
            CustomPostfixExpressionItemAfterNonRegularExpressionItem,
            CustomPostfixExpressionItemHasNoTargetExpression,
            CustomPostfixExpressionItemFollowsInvalidExpression,
            CustomPostfixExpressionItemRejectedByPrecedingCustomExpressionItem,
            ParsedCustomExpressionItemHasInvalidIndex,
            ParsedCustomExpressionItemHasNonPositiveLength,
            InvalidUseOfPrefixes,
            CustomPrefixExpressionHasNoTarget,
            InvalidCodeBlock,
            CodeBlockUsedAfterPostfixCustomExpression,
            CodeBlockCannotFollowThePrecedingExpression,
            MaximumDepthExceeded,
        ]
    };

    /// The stable numeric value of the code.
    pub fn code(self) -> u32 {
        use ErrorCode::*;
        match self {
            ClosingBraceMissing => 100,
            ClosingBraceWithoutOpeningBrace => 101,
            ClosingBraceDoesNotMatchOpeningBrace => 102,
            CodeBlockEndMarkerMissing => 103,
            CodeBlockClosingMarkerWithoutOpeningMarker => 104,
            CommaWithoutParentBraces => 105,
            ExpressionSeparatorWithoutParentCodeBlock => 106,
            ExpressionMissingBeforeComma => 107,
            ExpressionMissingAfterComma => 108,
            ExpressionMissingBeforeCodeItemSeparator => 109,
            InvalidBracesExpression => 110,

            BinaryOperatorMissing => 200,
            ExpectedPostfixOperator => 201,
            ExpectedPrefixOperator => 202,
            OperandMissingAfterPrefixOperator => 203,

            InvalidSymbol => 300,
            NoSeparationBetweenSymbols => 301,
            ConstantTextEndMarkerMissing => 302,
            CommentEndMarkerMissing => 303,

            MultipleOccurrencesOfKeyword => 400,
            InvalidUseOfKeywords => 401,
            KeywordsNotSupported => 402,

            CustomExpressionParserFailed => 500,
            CustomPostfixExpressionItemAfterNonRegularExpressionItem => 501,
            CustomPostfixExpressionItemHasNoTargetExpression => 502,
            CustomPostfixExpressionItemFollowsInvalidExpression => 503,
            CustomPostfixExpressionItemRejectedByPrecedingCustomExpressionItem => 504,
            ParsedCustomExpressionItemHasInvalidIndex => 505,
            ParsedCustomExpressionItemHasNonPositiveLength => 506,

            InvalidUseOfPrefixes => 600,
            CustomPrefixExpressionHasNoTarget => 601,

            InvalidCodeBlock => 700,
            CodeBlockUsedAfterPostfixCustomExpression => 701,
            CodeBlockCannotFollowThePrecedingExpression => 702,

            MaximumDepthExceeded => 800,

            Custom(code) => code,
        }
    }

    /// Look up a code by its numeric value. Anything that isn't built in is
    /// [`ErrorCode::Custom`].
    pub fn from_code(code: u32) -> ErrorCode {
        ErrorCode::BUILT_IN
            .iter()
            .copied()
            .find(|c| c.code() == code)
            .unwrap_or(ErrorCode::Custom(code))
    }

    /// Errors which abort parsing of the container they're found in.
    pub fn is_critical(self) -> bool {
        matches!(self, ErrorCode::MaximumDepthExceeded)
    }

    /// A short generic description, used when there's nothing more specific
    /// to say.
    pub fn description(self) -> &'static str {
        use ErrorCode::*;
        match self {
            ClosingBraceMissing => "closing brace is missing",
            ClosingBraceWithoutOpeningBrace => "closing brace has no opening brace",
            ClosingBraceDoesNotMatchOpeningBrace => "closing brace does not match the opening brace",
            CodeBlockEndMarkerMissing => "code block end marker is missing",
            CodeBlockClosingMarkerWithoutOpeningMarker => "code block end marker has no start marker",
            CommaWithoutParentBraces => "comma used outside of braces",
            ExpressionSeparatorWithoutParentCodeBlock => "separator used inside braces",
            ExpressionMissingBeforeComma => "expression missing before comma",
            ExpressionMissingAfterComma => "expression missing after comma",
            ExpressionMissingBeforeCodeItemSeparator => "expression missing before separator",
            InvalidBracesExpression => "expected a braces expression",
            BinaryOperatorMissing => "binary operator missing between expressions",
            ExpectedPostfixOperator => "expected an operand or postfix operator",
            ExpectedPrefixOperator => "expected an operand or prefix operator",
            OperandMissingAfterPrefixOperator => "operand missing after prefix operator",
            InvalidSymbol => "invalid symbol",
            NoSeparationBetweenSymbols => "no separation between symbols",
            ConstantTextEndMarkerMissing => "text is missing its closing delimiter",
            CommentEndMarkerMissing => "comment is missing its end marker",
            MultipleOccurrencesOfKeyword => "keyword used more than once",
            InvalidUseOfKeywords => "keywords have nothing to apply to",
            KeywordsNotSupported => "keywords are not supported",
            CustomExpressionParserFailed => "custom expression parser failed",
            CustomPostfixExpressionItemAfterNonRegularExpressionItem => {
                "custom postfix item must follow a regular expression item"
            }
            CustomPostfixExpressionItemHasNoTargetExpression => {
                "custom postfix item has no expression to apply to"
            }
            CustomPostfixExpressionItemFollowsInvalidExpression => {
                "custom postfix item cannot follow this expression"
            }
            CustomPostfixExpressionItemRejectedByPrecedingCustomExpressionItem => {
                "custom postfix item was rejected by the preceding custom item"
            }
            ParsedCustomExpressionItemHasInvalidIndex => "parsed custom item has an invalid position",
            ParsedCustomExpressionItemHasNonPositiveLength => "parsed custom item is empty",
            InvalidUseOfPrefixes => "prefixes are not supported",
            CustomPrefixExpressionHasNoTarget => "custom prefix item has no expression to apply to",
            InvalidCodeBlock => "expected a code block",
            CodeBlockUsedAfterPostfixCustomExpression => {
                "code block cannot follow a custom postfix item"
            }
            CodeBlockCannotFollowThePrecedingExpression => {
                "code block cannot follow the preceding expression"
            }
            MaximumDepthExceeded => "maximum nesting depth exceeded",
            Custom(_) => "custom error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// A single problem found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorItem {
    offset: usize,
    code: ErrorCode,
    message: String,
    critical: bool,
}

impl ParseErrorItem {
    pub fn new(
        offset: usize,
        code: ErrorCode,
        message: impl Into<String>,
        critical: bool,
    ) -> Self {
        ParseErrorItem {
            offset,
            code,
            message: message.into(),
            critical,
        }
    }

    /// An error using the code's generic description and criticality.
    pub fn from_code(offset: usize, code: ErrorCode) -> Self {
        ParseErrorItem::new(offset, code, code.description(), code.is_critical())
    }

    /// Byte offset into the parsed text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Did this error abort parsing of its container?
    pub fn is_critical(&self) -> bool {
        self.critical
    }

    /// Turn this into a [`Diagnostic`], using `text` (the text that was
    /// parsed) to work out the line and column.
    pub fn to_diagnostic(&self, text: &str) -> Diagnostic {
        let diagnostic = Diagnostic::new(self.message.clone())
            .level(Level::for_error(self.critical))
            .code(self.code.code())
            .location(Caret::from_offset(text, self.offset.min(text.len())))
            .with_highlight(Highlight::at(text, self.offset).with_note(self.code.description()));

        if self.critical {
            diagnostic.info("parsing of the enclosing expression stopped here")
        } else {
            diagnostic
        }
    }
}

impl fmt::Display for ParseErrorItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} at {}: {}", self.code, self.offset, self.message)
    }
}

/// Anything which can have errors added to it.
///
/// This is what custom expression items and post-processing code see, so they
/// can report problems of their own alongside the parser's.
pub trait ErrorSink {
    fn add_error(&mut self, error: ParseErrorItem);
}

/// The errors found during a parse.
///
/// At most one error is kept per offset and code, so backtracking and
/// re-scanning the same text never reports the same problem twice.
#[derive(Debug, Default, Clone)]
pub struct ParseErrors {
    items: Vec<ParseErrorItem>,
}

impl ParseErrors {
    /// Record an error, returning whether it was new.
    pub fn push(&mut self, error: ParseErrorItem) -> bool {
        let seen = self
            .items
            .iter()
            .any(|e| e.offset == error.offset && e.code == error.code);

        if seen {
            false
        } else {
            self.items.push(error);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseErrorItem> {
        self.items.iter()
    }

    /// Drop everything recorded after the first `len` errors.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.items.truncate(len);
    }

    /// The errors, ordered by offset. Errors at the same offset keep the order
    /// they were found in.
    pub fn into_sorted(mut self) -> Vec<ParseErrorItem> {
        self.items.sort_by_key(|e| e.offset);
        self.items
    }
}

impl ErrorSink for ParseErrors {
    fn add_error(&mut self, error: ParseErrorItem) {
        self.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for code in ErrorCode::BUILT_IN {
            assert!(seen.insert(code.code()), "{:?} reuses a number", code);
            assert_eq!(ErrorCode::from_code(code.code()), *code);
        }
    }

    #[test]
    fn custom_codes() {
        assert_eq!(ErrorCode::from_code(1234), ErrorCode::Custom(1234));
        assert_eq!(ErrorCode::Custom(1234).code(), 1234);
        assert_eq!(ErrorCode::from_code(200).to_string(), "E0200");
    }

    #[test]
    fn dedup_on_offset_and_code() {
        let mut errors = ParseErrors::default();
        assert!(errors.push(ParseErrorItem::from_code(3, ErrorCode::InvalidSymbol)));
        assert!(!errors.push(ParseErrorItem::new(3, ErrorCode::InvalidSymbol, "again", false)));
        assert!(errors.push(ParseErrorItem::from_code(3, ErrorCode::BinaryOperatorMissing)));
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn sorted_by_offset() {
        let mut errors = ParseErrors::default();
        errors.push(ParseErrorItem::from_code(9, ErrorCode::InvalidSymbol));
        errors.push(ParseErrorItem::from_code(1, ErrorCode::ClosingBraceMissing));
        let offsets: Vec<_> = errors.into_sorted().iter().map(|e| e.offset()).collect();
        assert_eq!(offsets, vec![1, 9]);
    }

    #[test]
    fn diagnostic_location() {
        let text = "a +\n  §";
        let error = ParseErrorItem::from_code(6, ErrorCode::InvalidSymbol);
        let d = error.to_diagnostic(text);
        assert_eq!(d.get_location(), Some(Caret::new(1, 2)));
        assert_eq!(d.get_code(), Some(300));
        assert_eq!(d.get_highlights().len(), 1);
    }

    #[test]
    fn critical_errors_say_so() {
        let error = ParseErrorItem::from_code(0, ErrorCode::MaximumDepthExceeded);
        assert!(error.is_critical());
        let d = error.to_diagnostic("(");
        assert_eq!(d.get_level(), Level::Critical);
        assert_eq!(d.get_notes().len(), 1);

        let d = ParseErrorItem::from_code(3, ErrorCode::ExpectedPostfixOperator).to_diagnostic("a +");
        assert_eq!(d.get_level(), Level::Error);
        assert!(d.get_highlights()[0].is_point());
    }
}
