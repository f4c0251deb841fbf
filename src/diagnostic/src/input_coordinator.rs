//! Input Manager

use std::path::PathBuf;

/// A unique ID that corresponds to a piece of input tracked by an
/// [`InputCoordinator`].
///
/// This is used to manage source maps used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct InputId(usize);

/// Keeps every piece of input we've parsed around so diagnostics can show the
/// code they refer to.
#[derive(Debug, Default)]
pub struct InputCoordinator {
    /// Inputs, where [`InputId`] are the corresponding indexes.
    inputs: Vec<Input>,
}

impl InputCoordinator {
    pub fn repl_input(&mut self, buffer: String) -> InputId {
        self.push(buffer, Name::Repl)
    }

    pub fn eval_input(&mut self, buffer: String) -> InputId {
        self.push(buffer, Name::Eval)
    }

    pub fn file_input(&mut self, buffer: String, path: PathBuf) -> InputId {
        self.push(buffer, Name::File(path))
    }

    fn push(&mut self, buffer: String, name: Name) -> InputId {
        let id = self.inputs.len();
        self.inputs.push(Input { buffer, name });
        InputId(id)
    }

    /// The text of some input, if the id belongs to this coordinator.
    pub fn get_input_buffer(&self, id: InputId) -> Option<&str> {
        self.inputs.get(id.0).map(|i| i.buffer.as_str())
    }

    pub fn get_input_name(&self, id: InputId) -> Option<String> {
        let input = self.inputs.get(id.0)?;
        let name = match &input.name {
            Name::File(path) => format!("{}", path.display()),
            Name::Repl => format!("<repl {}>", id.0),
            Name::Eval if id.0 == 0 => "<eval>".into(),
            Name::Eval => format!("<eval-{}>", id.0),
        };
        Some(name)
    }
}

/// A piece of input has a name, and a buffer which contains it's code.
#[derive(Debug)]
struct Input {
    name: Name,
    buffer: String,
}

/// A piece of input is named based on where it came from.
///
/// Usually this is a path to the file we loaded, but it could also be the repl
/// or an an `eval` expression at the command line.
#[derive(Debug)]
enum Name {
    Repl,
    Eval,
    File(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names() {
        let mut inputs = InputCoordinator::default();
        let eval = inputs.eval_input("1".into());
        let repl = inputs.repl_input("2".into());
        let file = inputs.file_input("3".into(), "a/b.txt".into());

        assert_eq!(inputs.get_input_name(eval).as_deref(), Some("<eval>"));
        assert_eq!(inputs.get_input_name(repl).as_deref(), Some("<repl 1>"));
        assert_eq!(inputs.get_input_name(file).as_deref(), Some("a/b.txt"));
        assert_eq!(inputs.get_input_buffer(file), Some("3"));
    }
}
