//! Per-parse settings.

use crate::result::ParseCallError;

/// Settings for one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Byte offset to start parsing at. Offsets in the result are still
    /// relative to the start of the whole text.
    pub start_offset: usize,

    /// Keep the ranges of comments in the result.
    pub collect_comments: bool,

    /// Stop parsing, as if at the end of the text, where this marker is
    /// found at the start of a token.
    pub stop_marker: Option<String>,

    /// How deeply braces, code blocks and prefix operators may nest.
    pub max_depth: usize,
}

impl ParseOptions {
    /// The default nesting limit.
    pub const MAX_DEPTH: usize = 128;

    pub fn new() -> Self {
        ParseOptions::default()
    }

    pub fn start_offset(mut self, offset: usize) -> Self {
        self.start_offset = offset;
        self
    }

    pub fn collect_comments(mut self, collect: bool) -> Self {
        self.collect_comments = collect;
        self
    }

    pub fn stop_marker(mut self, marker: impl Into<String>) -> Self {
        self.stop_marker = Some(marker.into());
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Check the options make sense for `text`.
    pub(crate) fn check(&self, text: &str) -> Result<(), ParseCallError> {
        if self.start_offset > text.len() {
            return Err(ParseCallError::InvalidOptions(format!(
                "start offset {} is past the end of the text ({} bytes)",
                self.start_offset,
                text.len()
            )));
        }

        if !text.is_char_boundary(self.start_offset) {
            return Err(ParseCallError::InvalidOptions(format!(
                "start offset {} is not on a character boundary",
                self.start_offset
            )));
        }

        if matches!(&self.stop_marker, Some(marker) if marker.is_empty()) {
            return Err(ParseCallError::InvalidOptions(
                "stop marker must not be empty".into(),
            ));
        }

        if self.max_depth == 0 {
            return Err(ParseCallError::InvalidOptions(
                "maximum depth must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            start_offset: 0,
            collect_comments: false,
            stop_marker: None,
            max_depth: ParseOptions::MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_fine() {
        assert!(ParseOptions::default().check("").is_ok());
    }

    #[test]
    fn bad_options() {
        assert!(ParseOptions::new().start_offset(4).check("abc").is_err());
        assert!(ParseOptions::new().start_offset(1).check("é").is_err());
        assert!(ParseOptions::new().stop_marker("").check("abc").is_err());
        assert!(ParseOptions::new().max_depth(0).check("abc").is_err());
        assert!(ParseOptions::new().start_offset(3).check("abc").is_ok());
    }
}
