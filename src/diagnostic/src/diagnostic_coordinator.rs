//! Diagnostic Coordinator handles collecting any diagnostics produced, and
//! emitting them at the right times, and in the right formats.

use crate::{diagnostic::Diagnostic, emitter::Emitter, InputCoordinator};

#[derive(Debug, Default)]
pub struct DiagnosticCoordinator {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCoordinator {
    pub fn register(&mut self, issue: Diagnostic) {
        self.diagnostics.push(issue);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Were any of the registered diagnostics errors?
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.get_level().is_error())
    }

    /// Emit everything registered so far, ordered by input and location, and
    /// forget about them.
    pub fn emit(
        &mut self,
        inputs: &InputCoordinator,
        emitter: &mut dyn Emitter,
    ) -> std::io::Result<()> {
        self.diagnostics
            .sort_by_key(|d| (d.get_input(), d.get_location()));

        for d in self.diagnostics.drain(..) {
            emitter.emit(&d, inputs)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ASCIIEmitter, Caret};

    #[test]
    fn emits_sorted() {
        let mut inputs = InputCoordinator::default();
        let id = inputs.eval_input("a b c".into());

        let mut coordinator = DiagnosticCoordinator::default();
        coordinator.register(Diagnostic::new("second").input(id).location(Caret::new(0, 4)));
        coordinator.register(Diagnostic::new("first").input(id).location(Caret::new(0, 2)));
        assert!(coordinator.has_errors());

        let mut emitter = ASCIIEmitter::new(Vec::new());
        coordinator.emit(&inputs, &mut emitter).unwrap();
        assert!(coordinator.is_empty());

        let out = String::from_utf8(emitter.into_inner()).unwrap();
        let first = out.find("first").unwrap();
        let second = out.find("second").unwrap();
        assert!(first < second);
    }
}
