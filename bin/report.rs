//! Parsing some input and printing what was found.

use std::path::PathBuf;

use diagnostic::{ASCIIEmitter, DiagnosticCoordinator, FancyEmitter, InputCoordinator, InputId};
use parser::{
    tree::Visitor, ExpressionTree, LanguageRegistry, Node, ParseCallError, ParseExpressionResult,
    ParseOptions,
};

/// Which parse call to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Entry {
    Expression,
    Braces,
    CodeBlock,
}

/// What one parse found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) clean: bool,
    /// Expression items, not counting the root.
    pub(crate) items: usize,
    pub(crate) tokens: usize,
}

impl Visitor for Summary {
    fn enter(&mut self, _: &ExpressionTree, node: &Node) {
        if node.kind().is_expression() {
            self.items += 1;
        }
    }

    fn leaf(&mut self, _: &ExpressionTree, _: &Node) {
        self.tokens += 1;
    }
}

/// Parses input with the demo language and prints the results.
///
/// Input is kept around for as long as the reporter is, so diagnostics can
/// always show the code they're about.
pub(crate) struct Reporter {
    registry: LanguageRegistry,
    inputs: InputCoordinator,
    entry: Entry,
    options: ParseOptions,
    tree: bool,
    ascii: bool,
}

impl Reporter {
    pub(crate) fn new(
        registry: LanguageRegistry,
        entry: Entry,
        options: ParseOptions,
        tree: bool,
        ascii: bool,
    ) -> Self {
        Reporter {
            registry,
            inputs: InputCoordinator::default(),
            entry,
            options,
            tree,
            ascii,
        }
    }

    /// Will a successful parse print anything?
    pub(crate) fn is_quiet(&self) -> bool {
        !self.tree && !self.options.collect_comments
    }

    pub(crate) fn eval(&mut self, input: String) -> bool {
        let id = self.inputs.eval_input(input);
        self.report(id).clean
    }

    pub(crate) fn file(&mut self, input: String, path: PathBuf) -> bool {
        let id = self.inputs.file_input(input, path);
        self.report(id).clean
    }

    pub(crate) fn repl(&mut self, input: String) -> Summary {
        let id = self.inputs.repl_input(input);
        self.report(id)
    }

    /// Parse the input `id`, and print everything asked for.
    fn report(&self, id: InputId) -> Summary {
        let mut summary = Summary::default();

        let text = match self.inputs.get_input_buffer(id) {
            Some(text) => text,
            None => return summary,
        };

        let result = match self.parse(text) {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: {}", e);
                return summary;
            }
        };

        if self.tree {
            print!("{}", result.outline());
        }

        for comment in result.comments() {
            println!("comment {:?} {}", comment.kind, comment.range);
        }

        if !result.is_complete() {
            println!("stopped at offset {}", result.completion());
        }

        let mut diagnostics = DiagnosticCoordinator::default();
        for error in result.errors() {
            diagnostics.register(error.to_diagnostic(text).input(id));
        }

        summary.clean = !diagnostics.has_errors();
        result.tree().walk(result.root(), &mut summary);

        let emitted = if self.ascii {
            diagnostics.emit(&self.inputs, &mut ASCIIEmitter::stderr())
        } else {
            diagnostics.emit(&self.inputs, &mut FancyEmitter::full())
        };

        if let Err(e) = emitted {
            eprintln!("Error: cannot write diagnostics: {}", e);
        }

        summary
    }

    fn parse<'t>(&self, text: &'t str) -> Result<ParseExpressionResult<'t>, ParseCallError> {
        let language = syntax::DEMO;
        match self.entry {
            Entry::Expression => self.registry.parse_expression(language, text, &self.options),
            Entry::Braces => self
                .registry
                .parse_braces_expression(language, text, &self.options),
            Entry::CodeBlock => self
                .registry
                .parse_code_block_expression(language, text, &self.options),
        }
    }
}
