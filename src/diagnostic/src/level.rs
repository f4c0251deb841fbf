//! How serious a diagnostic, or a note attached to one, is.

use std::fmt;

/// Levels sort from most to least serious.
///
/// Parse errors come in two strengths. A critical one ended the braces or
/// code block it was found in, so nothing after it in there was looked at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Critical,
    Error,
    Help,
    Info,
}

impl Level {
    /// The level to report a parse error at.
    pub fn for_error(critical: bool) -> Level {
        if critical {
            Level::Critical
        } else {
            Level::Error
        }
    }

    /// Does a diagnostic at this level mean the input wasn't parsed cleanly?
    pub fn is_error(self) -> bool {
        matches!(self, Level::Critical | Level::Error)
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Critical => "critical error",
            Level::Error => "error",
            Level::Help => "help",
            Level::Info => "info",
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Error
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_levels() {
        assert_eq!(Level::for_error(true), Level::Critical);
        assert_eq!(Level::for_error(false), Level::Error);
        assert!(Level::Critical < Level::Error);
        assert!(Level::Critical.is_error());
        assert!(!Level::Help.is_error());
        assert_eq!(Level::Critical.to_string(), "critical error");
    }
}
