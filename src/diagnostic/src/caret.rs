//! Caret
//!
//! A [`Caret`] is a line and column number in plain text, i.e. where a caret is
//! in the source text.

use std::fmt;

/// A location in some input stream or document.
///
/// Carets are zero-indexed, and with the cursor before the first character. So
/// `Caret::new(0, 0)` is with the caret at the beginning of the document,
/// typically 0 bytes into some input.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Caret {
    line: u32,
    column: u32,
}

impl Caret {
    /// Create a new [`Caret`], from a line and column number. These are
    /// 0-indexed.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Find the caret for a byte offset into `input`.
    ///
    /// Offsets past the end of the input are clamped to the end. An offset
    /// that falls inside a multi-byte character is treated as pointing at
    /// that character.
    pub fn from_offset(input: &str, offset: usize) -> Self {
        let mut caret = Caret::default();

        for (index, c) in input.char_indices() {
            if index >= offset {
                break;
            }
            caret.increment(c);
        }

        caret
    }

    /// The line the caret in on.
    pub fn line(self) -> u32 {
        self.line
    }

    /// The column of the caret.
    pub fn column(self) -> u32 {
        self.column
    }

    /// Increment a caret by a character. The only character that increments the
    /// line count is `\n`, which should work on Windows as the `\r\n` return
    /// sequence ends with the `\n` byte.
    ///
    /// This counts [`char`]s i.e. unicode code points, which means some things
    /// which span multiple code points (such as some emoji) might increment the
    /// column by more than one. This matches what most editors show in their
    /// status bars, which is where people will go looking.
    pub fn increment(&mut self, c: char) {
        match c {
            '\n' => {
                self.line += 1;
                self.column = 0;
            }
            _ => self.column += 1,
        }
    }
}

impl fmt::Display for Caret {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn caret_order() {
        let l = Caret::new(2, 200);
        let r = Caret::new(10, 100);
        assert!(l < r);
    }

    #[test]
    fn caret_unicode() {
        let mut caret = Caret::new(0, 0);

        for c in "🤦🏼‍♀️".chars() {
            caret.increment(c);
        }

        assert_eq!(caret.column(), 5);
    }

    #[test]
    fn caret_newline_resets_column() {
        let mut caret = Caret::new(0, 4);
        caret.increment('\n');
        assert_eq!(caret, Caret::new(1, 0));
    }

    #[test]
    fn caret_from_offset() {
        let input = "ab\ncdé f";
        assert_eq!(Caret::from_offset(input, 0), Caret::new(0, 0));
        assert_eq!(Caret::from_offset(input, 3), Caret::new(1, 0));
        // 'é' is two bytes but one column.
        assert_eq!(Caret::from_offset(input, 8), Caret::new(1, 4));
        assert_eq!(Caret::from_offset(input, 100), Caret::new(1, 5));
    }
}
