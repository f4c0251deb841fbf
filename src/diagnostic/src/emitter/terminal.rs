//! Pretty printing of diagnostic messages.
//!
//! This module handles all the external libraries we need to do this (mostly)
//! right, and wraps them up in a single configurable printer.

use std::borrow::Cow;
use std::io::{Result, Write};

use term_size::dimensions_stderr;
use termcolor::{BufferedStandardStream, Color, ColorChoice, ColorSpec, WriteColor};
use unicode_width::UnicodeWidthStr;

use super::{
    code_window::{pad, CodeWindow},
    line_art::LineArt,
    Emitter,
};
use crate::{level::Level, message::Message, Diagnostic, InputCoordinator};

/// A printer for terminals, with colour, line wrapping, and code windows.
pub struct FancyEmitter {
    /// Output stream.
    out: Box<dyn WriteColor>,
    /// The set of line art characters to use.
    line_art: LineArt,
    /// The max width of the output
    width: usize,
}

impl FancyEmitter {
    /// The default terminal width used if the actual terminal is below
    /// `MIN_WIDTH`.
    pub const DEFAULT_WIDTH: usize = 80;

    /// The narrowest allowed terminal size that things will be wrapped to, any
    /// smaller and we use `DEFAULT_WIDTH` instead to maintain readability.
    pub const MIN_WIDTH: usize = 40;

    /// Plain ASCII line art and no colour, but still wrapped.
    pub fn simpler() -> Self {
        FancyEmitter {
            out: Box::new(BufferedStandardStream::stderr(ColorChoice::Never)),
            line_art: LineArt::ASCII,
            width: FancyEmitter::DEFAULT_WIDTH,
        }
    }

    /// Prints to stderr, using all the fancy features.
    pub fn full() -> Self {
        let width = match dimensions_stderr() {
            Some((w, _)) if w >= Self::MIN_WIDTH => w,
            _ => Self::DEFAULT_WIDTH,
        };

        FancyEmitter {
            out: Box::new(BufferedStandardStream::stderr(ColorChoice::Auto)),
            line_art: LineArt::UNICODE,
            width,
        }
    }

    /// Line wrapping for message text.
    fn wrap<'a>(&self, text: &'a str, width: usize) -> Vec<Cow<'a, str>> {
        textwrap::wrap(text, width.max(1))
    }

    /// Set the spec of the settings for this level.
    fn set_level_spec(&mut self, level: Level) -> Result<()> {
        let color = match level {
            Level::Critical => Color::Magenta,
            Level::Error => Color::Red,
            Level::Help => Color::Green,
            Level::Info => Color::Cyan,
        };
        self.out
            .set_color(ColorSpec::new().set_bold(true).set_fg(Some(color)))
    }

    fn emit_message(&mut self, msg: &Message, code: Option<u32>) -> Result<()> {
        // The coloured prefix also decides how much subsequent lines are
        // indented.
        let prefix_length = self.emit_message_level(msg, code)?;
        let wrap_width = self.width.saturating_sub(prefix_length);

        let lines = self.wrap(msg.text(), wrap_width);
        let mut lines = lines.iter();

        // First line doesn't have a prefix, since it comes after the level.
        writeln!(self.out, "{}", lines.next().map(|l| l.as_ref()).unwrap_or(""))?;

        for line in lines {
            pad(&mut self.out, ' ', prefix_length)?;
            writeln!(self.out, "{}", line)?;
        }

        Ok(())
    }

    /// Emits the coloured prefix of the message, which is the level name with a
    /// `": "` at the end for spacing. This will set and reset the colour too.
    fn emit_message_level(&mut self, msg: &Message, code: Option<u32>) -> Result<usize> {
        let prefix = match code {
            Some(code) => format!("{}[E{:04}]", msg.level().name(), code),
            None => msg.level().name().to_string(),
        };

        self.set_level_spec(msg.level())?;
        write!(self.out, "{}: ", prefix)?;
        self.out.reset()?;
        Ok(UnicodeWidthStr::width(prefix.as_str()) + ": ".len())
    }
}

impl Emitter for FancyEmitter {
    fn emit(&mut self, d: &Diagnostic, inputs: &InputCoordinator) -> Result<()> {
        self.emit_message(d.get_message(), d.get_code())?;

        if let Some(id) = d.get_input() {
            if let (Some(buffer), Some(name)) =
                (inputs.get_input_buffer(id), inputs.get_input_name(id))
            {
                let label = match d.get_location() {
                    Some(location) => format!("{}:{}", name, location),
                    None => name,
                };
                CodeWindow::new(d.get_highlights(), buffer, self.line_art)
                    .print(&mut self.out, &label)?;
            }
        }

        for note in d.get_notes() {
            self.emit_message(note, None)?;
        }

        self.out.flush()
    }
}
