//! exparse - parse expressions, and show what the parser makes of them.

mod eval;
mod file;
mod repl;
mod report;

use clap::Parser as _;
use parser::ParseOptions;

use crate::report::{Entry, Reporter};

/// Parse text with the demo language, printing any errors found
#[derive(clap::Parser)]
#[clap(author, version, about)]
pub struct Args {
    #[clap(subcommand)]
    command: Option<Command>,

    /// Parse the input as a single braces expression, like `(a, b)`
    #[clap(long, global = true)]
    braces: bool,

    /// Parse the input as a single code block
    #[clap(long = "code-block", global = true)]
    code_block: bool,

    /// Print the parsed tree
    #[clap(long, global = true)]
    tree: bool,

    /// Stop parsing where this marker is found
    #[clap(long = "stop-at", value_name = "MARKER", global = true)]
    stop_at: Option<String>,

    /// Start parsing at this byte offset
    #[clap(long, value_name = "N", default_value = "0", global = true)]
    start: usize,

    /// Print the comments found
    #[clap(long, global = true)]
    comments: bool,

    /// Print diagnostics as plain ASCII
    #[clap(long, global = true)]
    ascii: bool,

    /// Log more, repeat for even more
    #[clap(short, long, parse(from_occurrences), global = true)]
    verbose: usize,
}

#[derive(clap::Subcommand)]
enum Command {
    Eval(eval::Evaluate),
    File(file::ParseFile),
    Repl(repl::ReplArgs),
}

impl Args {
    fn entry(&self) -> Entry {
        if self.braces {
            Entry::Braces
        } else if self.code_block {
            Entry::CodeBlock
        } else {
            Entry::Expression
        }
    }

    fn options(&self) -> ParseOptions {
        let options = ParseOptions::default()
            .start_offset(self.start)
            .collect_comments(self.comments);

        match &self.stop_at {
            Some(marker) => options.stop_marker(marker.as_str()),
            None => options,
        }
    }

    /// Everything needed to parse and print results the way these arguments
    /// ask for.
    pub(crate) fn reporter(&self) -> Result<Reporter, String> {
        if self.braces && self.code_block {
            return Err("--braces and --code-block can't be used together".into());
        }

        let registry = syntax::registry().map_err(|e| e.to_string())?;
        Ok(Reporter::new(
            registry,
            self.entry(),
            self.options(),
            self.tree,
            self.ascii,
        ))
    }

    fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();

    let ok = match &args.command {
        Some(Command::Eval(eval)) => eval.run(&args),
        Some(Command::File(file)) => file.run(&args),
        Some(Command::Repl(repl)) => repl.run(&args),
        None => repl::ReplArgs.run(&args),
    };

    if !ok {
        std::process::exit(1);
    }
}
