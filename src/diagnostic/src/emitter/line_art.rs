//! The characters code windows are drawn with.

/// What to draw a code window's frame and markers with.
#[derive(Debug, Clone, Copy)]
pub struct LineArt {
    /// The gutter between line numbers and code.
    pub(crate) vertical: char,
    pub(crate) horizontal: char,
    /// Where the header meets the gutter.
    pub(crate) tee: char,
    /// Underlines highlighted text.
    pub(crate) up: char,
    /// Marks a spot between two characters, like where an operand is
    /// missing.
    pub(crate) insert: char,
    /// Stands in for the line number of skipped lines.
    pub(crate) more: &'static str,
}

impl LineArt {
    pub const UNICODE: LineArt = LineArt {
        vertical: '│',
        horizontal: '─',
        tee: '┬',
        up: '↑',
        insert: '‸',
        more: "…",
    };

    /// For terminals, files and pipes which can't be trusted with anything
    /// else.
    pub const ASCII: LineArt = LineArt {
        vertical: '|',
        horizontal: '-',
        tee: '+',
        up: '^',
        insert: '^',
        more: "...",
    };

    /// The marker for a highlight.
    pub(crate) fn marker(&self, is_point: bool) -> char {
        if is_point {
            self.insert
        } else {
            self.up
        }
    }
}
