//! Parse the contents of a file.

use std::{fs::File, io::Read, path::PathBuf};

use crate::Args;

/// Parse a file and print any errors
#[derive(clap::Parser)]
pub struct ParseFile {
    filename: PathBuf,
}

impl ParseFile {
    /// Parse the file `filename`, returning whether it parsed cleanly.
    pub(crate) fn run(&self, args: &Args) -> bool {
        let mut input = String::new();

        if let Err(e) = File::open(&self.filename)
            .and_then(|mut file| file.read_to_string(&mut input))
        {
            eprintln!(
                "Error: cannot read '{}': {}",
                &self.filename.display(),
                e
            );
            return false;
        }

        let mut reporter = match args.reporter() {
            Ok(reporter) => reporter,
            Err(e) => {
                eprintln!("Error: {}", e);
                return false;
            }
        };

        tracing::info!(file = %self.filename.display(), bytes = input.len(), "parsing file");
        reporter.file(input, self.filename.clone())
    }
}
