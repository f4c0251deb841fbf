//! A generic message

use std::fmt;

use crate::level::Level;

/// Some text with a [`Level`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    level: Level,
    text: String,
}

impl Message {
    pub fn new(level: Level, text: impl Into<String>) -> Message {
        Message {
            level,
            text: text.into(),
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.text)
    }
}
