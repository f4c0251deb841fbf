//! An interactive mode.

use std::io::Write;

use rustyline::{error::ReadlineError, Editor};

use crate::{report::Reporter, Args};

/// Parse lines interactively
#[derive(clap::Parser)]
pub struct ReplArgs; // Everything the repl needs comes from the global flags.

impl ReplArgs {
    /// Run a repl with the given settings.
    pub(crate) fn run(&self, args: &Args) -> bool {
        let reporter = match args.reporter() {
            Ok(reporter) => reporter,
            Err(e) => {
                eprintln!("Error: {}", e);
                return false;
            }
        };

        let repl = Repl {
            editor: Editor::<()>::new(),
            reporter,
        };
        repl.start();
        true
    }
}

struct Repl {
    editor: Editor<()>,
    reporter: Reporter,
}

impl Repl {
    /// The prompt used to ask for more input.
    const PROMPT: &'static str = ">>> ";

    /// Lines which are the result of parsing begin with this.
    const RESULT_PROMPT: &'static str = "//> ";

    fn start(mut self) {
        loop {
            match self.step() {
                Ok(()) => continue,
                Err(ReplError::Clear) => continue,
                Err(ReplError::Exit) => break,
                Err(ReplError::Readline(e)) => {
                    println!("{}", e);
                    println!("  (press control-d to exit)");
                }
            }
        }
    }

    fn step(&mut self) -> Result<(), ReplError> {
        let input = self.read()?;
        if input.trim().is_empty() {
            return Ok(());
        }

        self.editor.add_history_entry(input.as_str());

        let summary = self.reporter.repl(input);
        if summary.clean && self.reporter.is_quiet() {
            println!(
                "{}ok, {} items from {} tokens",
                Repl::RESULT_PROMPT,
                summary.items,
                summary.tokens
            );
        }

        self.flush();
        Ok(())
    }

    fn read(&mut self) -> Result<String, ReplError> {
        let line = self.editor.readline(Repl::PROMPT);
        match line {
            Ok(line) => Ok(line),
            Err(ReadlineError::Interrupted) => {
                // User hit Control-C
                Err(ReplError::Clear)
            }

            Err(ReadlineError::Eof) => {
                // User hit Control-D at end of line, to exit.
                Err(ReplError::Exit)
            }

            Err(e) => Err(ReplError::Readline(e)),
        }
    }

    fn flush(&self) {
        if let Err(e) = std::io::stdout().flush() {
            tracing::warn!(error = %e, "failed to flush stdout");
        }
    }
}

#[derive(Debug)]
enum ReplError {
    Clear,
    Exit,
    Readline(ReadlineError),
}

impl std::error::Error for ReplError {}

impl std::fmt::Display for ReplError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplError::Clear => write!(f, "^C"),
            ReplError::Exit => write!(f, "^D"),
            ReplError::Readline(e) => write!(f, "{}", e),
        }
    }
}
