//! Parse an expression taken from the command line.

use crate::Args;

/// Parse the command line argument and print any errors
#[derive(clap::Parser)]
pub struct Evaluate {
    /// The code to parse
    input: String,
}

impl Evaluate {
    /// Run the subcommand, returning whether the input parsed cleanly.
    pub(crate) fn run(&self, args: &Args) -> bool {
        let mut reporter = match args.reporter() {
            Ok(reporter) => reporter,
            Err(e) => {
                eprintln!("Error: {}", e);
                return false;
            }
        };

        reporter.eval(self.input.clone())
    }
}
