//! Structural self-checks.
//!
//! Every finished parse satisfies these, whatever errors were found. Debug
//! builds check them at the end of every parse.

use std::fmt;

use super::{ExpressionTree, NodeId};

/// Something wrong with the shape of a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    pub node: NodeId,
    pub problem: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.node, self.problem)
    }
}

impl ExpressionTree {
    /// Check that every node under `root` is where it says it is.
    ///
    /// - ranges lie within `text`, on character boundaries,
    /// - expression items span exactly from their first to last child,
    /// - children are in source order and don't overlap,
    /// - parent links match child lists,
    /// - leaves have no children,
    /// - every node in the arena is reachable from `root`.
    pub fn check_invariants(
        &self,
        text: &str,
        root: NodeId,
    ) -> Result<(), Vec<InvariantViolation>> {
        let mut problems = Vec::new();
        let mut problem = |node: NodeId, problem: String| {
            problems.push(InvariantViolation { node, problem });
        };

        let mut reached = 0;

        for node in self.descendants(root) {
            reached += 1;
            let id = node.id();
            let range = node.range();

            if range.end() > text.len()
                || !text.is_char_boundary(range.start())
                || !text.is_char_boundary(range.end())
            {
                problem(id, format!("range {} doesn't fit the text", range));
                continue;
            }

            if !node.is_complex() {
                if !node.children().is_empty() {
                    problem(id, "leaf has children".into());
                }
                continue;
            }

            let mut previous_end = None;
            for child in node.children().all() {
                let child_node = &self[child];

                if child_node.parent() != Some(id) {
                    problem(child, format!("child of {} has the wrong parent", id));
                }

                if let Some(end) = previous_end {
                    if child_node.start() < end {
                        problem(child, "child overlaps or precedes its sibling".into());
                    }
                }
                previous_end = Some(child_node.end());
            }

            let children = node.children();
            if let (Some(first), Some(last)) = (children.all().next(), children.all().next_back()) {
                if range.start() != self[first].start() || range.end() != self[last].end() {
                    problem(
                        id,
                        format!(
                            "range {} doesn't span children {}..{}",
                            range,
                            self[first].start(),
                            self[last].end()
                        ),
                    );
                }
            }
        }

        if self[root].parent().is_some() {
            problem(root, "root has a parent".into());
        }

        if reached != self.len() {
            problem(
                root,
                format!("{} of {} nodes are reachable", reached, self.len()),
            );
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}
