//! Code windows are previews into the source code presented when displaying
//! diagnostic messages to help the user locate problems.

use std::io::{Result, Write};

use termcolor::{Color, ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use crate::{emitter::line_art::LineArt, highlight::Highlight};

/// A preview into the source code with highlights and notes under the lines
/// they refer to.
///
/// Note that the code window doesn't know where the owning diagnostic begins,
/// or other more general diagnostic information.
#[derive(Debug)]
pub(crate) struct CodeWindow<'i, 'd> {
    /// Sorted by where they start.
    highlights: Vec<&'d Highlight>,
    input: &'i str,
    line_art: LineArt,
}

impl<'i, 'd> CodeWindow<'i, 'd> {
    /// Lines this far apart from the previous highlighted line are elided.
    const MAX_GAP: u32 = 2;

    pub fn new(
        highlights: &'d [Highlight],
        input: &'i str,
        line_art: LineArt,
    ) -> Self {
        let mut highlights: Vec<_> = highlights.iter().collect();
        highlights.sort_by_key(|h| (h.span().start(), h.span().end()));

        CodeWindow {
            highlights,
            input,
            line_art,
        }
    }

    /// The line number the code window starts at.
    fn starting_line(&self) -> Option<u32> {
        self.highlights.first().map(|h| h.span().start().line())
    }

    /// The line number the code windows ends at.
    fn ending_line(&self) -> Option<u32> {
        self.highlights.iter().map(|h| h.span().end().line()).max()
    }

    /// Width of the gutter, which holds line numbers.
    fn gutter_width(&self) -> usize {
        self.ending_line()
            .map(|l| (l + 1).to_string().len())
            .unwrap_or(1)
    }

    /// Print the code window, with `label` (usually the input name) in the
    /// header.
    pub fn print(&self, out: &mut dyn WriteColor, label: &str) -> Result<()> {
        let (start, end) = match (self.starting_line(), self.ending_line()) {
            (Some(start), Some(end)) => (start, end),
            _ => return Ok(()),
        };

        self.header(out, label)?;

        let mut last_printed: Option<u32> = None;
        for (number, line) in self
            .input
            .split('\n')
            .enumerate()
            .map(|(n, l)| (n as u32, l.trim_end_matches('\r')))
            .skip(start as usize)
            .take((end - start + 1) as usize)
        {
            let marked = self.marks_on(number, line);
            let is_edge = number == start || number == end;

            if marked.is_empty() && !is_edge {
                continue;
            }

            if let Some(last) = last_printed {
                if number - last > Self::MAX_GAP {
                    self.elision(out)?;
                }
            }

            self.line(out, number, line)?;
            for mark in marked {
                self.marker(out, mark)?;
            }

            last_printed = Some(number);
        }

        Ok(())
    }

    /// The highlighted regions on one line.
    fn marks_on<'a>(&'a self, number: u32, line: &str) -> Vec<Mark<'a>> {
        let line_len = line.chars().count() as u32;

        self.highlights
            .iter()
            .filter(|h| {
                h.span().start().line() <= number
                    && number <= h.span().end().line()
            })
            .map(|h| {
                let span = h.span();
                let from = if span.start().line() == number {
                    span.start().column()
                } else {
                    0
                };
                let to = if span.end().line() == number {
                    span.end().column()
                } else {
                    line_len
                };

                let column = presentation_width(line, from);
                let width = presentation_width(line, to).saturating_sub(column);
                let note = if span.end().line() == number {
                    h.note()
                } else {
                    None
                };

                Mark {
                    column,
                    width: width.max(1),
                    note,
                    is_point: h.is_point(),
                }
            })
            .collect()
    }

    fn header(&self, out: &mut dyn WriteColor, label: &str) -> Result<()> {
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        pad(out, self.line_art.horizontal, self.gutter_width() + 1)?;
        write!(out, "{}", self.line_art.tee)?;
        pad(out, self.line_art.horizontal, 2)?;
        out.reset()?;
        writeln!(out, " {}", label)
    }

    fn line(&self, out: &mut dyn WriteColor, number: u32, line: &str) -> Result<()> {
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(
            out,
            "{:>width$} {}",
            number + 1,
            self.line_art.vertical,
            width = self.gutter_width()
        )?;
        out.reset()?;
        writeln!(out, " {}", line)
    }

    fn elision(&self, out: &mut dyn WriteColor) -> Result<()> {
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(
            out,
            "{:>width$} {}",
            self.line_art.more,
            self.line_art.vertical,
            width = self.gutter_width()
        )?;
        out.reset()?;
        writeln!(out)
    }

    fn marker(&self, out: &mut dyn WriteColor, mark: Mark) -> Result<()> {
        out.set_color(ColorSpec::new().set_dimmed(true))?;
        pad(out, ' ', self.gutter_width() + 1)?;
        write!(out, "{}", self.line_art.vertical)?;
        out.reset()?;

        pad(out, ' ', mark.column + 1)?;
        out.set_color(ColorSpec::new().set_bold(true).set_fg(Some(Color::Yellow)))?;
        pad(out, self.line_art.marker(mark.is_point), mark.width)?;
        out.reset()?;

        if let Some(note) = mark.note {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)))?;
            write!(out, " {}", note)?;
            out.reset()?;
        }

        writeln!(out)
    }
}

/// Where a highlight goes on one line, in terminal cells.
#[derive(Debug, Clone, Copy)]
struct Mark<'a> {
    column: usize,
    width: usize,
    /// Only shown on the highlight's last line.
    note: Option<&'a str>,
    is_point: bool,
}

/// How wide the first `columns` characters of `line` are when printed.
///
/// This isn't the same as the byte length, and some characters take two
/// terminal cells.
fn presentation_width(line: &str, columns: u32) -> usize {
    let end = line
        .char_indices()
        .nth(columns as usize)
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    UnicodeWidthStr::width(&line[..end])
}

/// Prints `len` number of the `padding` character.
pub(crate) fn pad(out: &mut dyn Write, padding: char, len: usize) -> Result<()> {
    for _ in 0..len {
        write!(out, "{}", padding)?;
    }
    Ok(())
}
