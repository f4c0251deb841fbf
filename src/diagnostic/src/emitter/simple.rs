//! A simple, safe, ascii-focused plain-text emitter.
//!
//! This should be a safe fall-back when we don't know what the output device
//! looks like.

use std::io::{self, Write};

use termcolor::NoColor;

use super::{code_window::CodeWindow, line_art::LineArt, Emitter};
use crate::input_coordinator::InputCoordinator;
use crate::Diagnostic;

/// Writes diagnostics as plain ASCII text, with no colour.
pub struct ASCIIEmitter<W: Write = io::Stderr> {
    out: NoColor<W>,
}

impl ASCIIEmitter {
    /// An emitter that writes to standard error.
    pub fn stderr() -> Self {
        ASCIIEmitter::new(io::stderr())
    }
}

impl<W: Write> ASCIIEmitter<W> {
    pub fn new(out: W) -> Self {
        ASCIIEmitter {
            out: NoColor::new(out),
        }
    }

    /// Get back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> Emitter for ASCIIEmitter<W> {
    fn emit(
        &mut self,
        d: &Diagnostic,
        inputs: &InputCoordinator,
    ) -> io::Result<()> {
        write!(self.out, "{}", d.get_level())?;

        if let Some(code) = d.get_code() {
            write!(self.out, "[E{:04}]", code)?;
        }

        let name = d.get_input().and_then(|id| inputs.get_input_name(id));

        match (name, d.get_location()) {
            (None, None) => write!(self.out, ": ")?,
            (None, Some(l)) => write!(self.out, " {l}: ")?,
            (Some(n), None) => write!(self.out, ": {n} - ")?,
            (Some(n), Some(l)) => write!(self.out, ": {n}:{l} - ")?,
        }

        writeln!(self.out, "{}", d.get_text())?;

        if let Some(id) = d.get_input() {
            if let (Some(buffer), Some(name)) =
                (inputs.get_input_buffer(id), inputs.get_input_name(id))
            {
                CodeWindow::new(d.get_highlights(), buffer, LineArt::ASCII)
                    .print(&mut self.out, &name)?;
            }
        }

        for note in d.get_notes() {
            writeln!(self.out, "{}", note)?;
        }

        self.out.flush()
    }
}
