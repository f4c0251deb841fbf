//! A readable dump of a tree.

use std::fmt::Write;

use super::{ExpressionTree, NodeId, NodeKind, Slot};

impl ExpressionTree {
    /// An indented outline of `from` and everything under it, one node per
    /// line. Leaves show the text they cover.
    ///
    /// ```text
    /// Operator 0..5
    ///   Literal 0..1
    ///     Name 0..1 "a"
    ///   OperatorInfo 2..3 "+"
    ///   Literal 4..5
    ///     Name 4..5 "b"
    /// ```
    pub fn outline(&self, text: &str, from: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![(from, 0usize, Slot::Regular)];

        while let Some((id, depth, slot)) = stack.pop() {
            let node = &self[id];

            for _ in 0..depth {
                out.push_str("  ");
            }

            match slot {
                Slot::Prefix => out.push_str("[prefix] "),
                Slot::Keyword => out.push_str("[keyword] "),
                Slot::Postfix => out.push_str("[postfix] "),
                Slot::Regular => {}
            }

            let _ = write!(out, "{} {}", node.kind().name(), node.range());

            match node.kind() {
                NodeKind::Text { value, .. } => {
                    let _ = write!(out, " {:?}", value);
                }
                NodeKind::Custom { item, .. } => {
                    let _ = write!(out, " ({})", item.name());
                }
                kind if !kind.is_complex() => {
                    let _ = write!(out, " {:?}", node.text(text));
                }
                _ => {}
            }

            out.push('\n');

            let children: Vec<_> = node.children().all_with_slots().collect();
            for (slot, child) in children.into_iter().rev() {
                stack.push((child, depth + 1, slot));
            }
        }

        out
    }
}
