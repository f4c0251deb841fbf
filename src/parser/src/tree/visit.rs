//! Walking a tree with a [`Visitor`].

use super::{ExpressionTree, Node, NodeId};

/// Callbacks for [`ExpressionTree::walk`].
///
/// Expression items get an [`enter`][Visitor::enter] before their children
/// and a [`leave`][Visitor::leave] after them. Leaves only get
/// [`leaf`][Visitor::leaf].
pub trait Visitor {
    fn enter(&mut self, _tree: &ExpressionTree, _node: &Node) {}
    fn leave(&mut self, _tree: &ExpressionTree, _node: &Node) {}
    fn leaf(&mut self, _tree: &ExpressionTree, _node: &Node) {}
}

enum Step {
    Enter(NodeId),
    Leave(NodeId),
}

impl ExpressionTree {
    /// Visit `from` and everything under it, in source order.
    ///
    /// This doesn't recurse, so long operator chains can't overflow the
    /// stack.
    pub fn walk(&self, from: NodeId, visitor: &mut dyn Visitor) {
        let mut stack = vec![Step::Enter(from)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(id) => {
                    let node = &self[id];
                    if node.is_complex() {
                        visitor.enter(self, node);
                        stack.push(Step::Leave(id));
                        stack.extend(node.children().all().rev().map(Step::Enter));
                    } else {
                        visitor.leaf(self, node);
                    }
                }
                Step::Leave(id) => visitor.leave(self, &self[id]),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{NodeKind, Slot, TextRange};

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl Visitor for Trace {
        fn enter(&mut self, _: &ExpressionTree, node: &Node) {
            self.0.push(format!("+{}", node.kind().name()));
        }
        fn leave(&mut self, _: &ExpressionTree, node: &Node) {
            self.0.push(format!("-{}", node.kind().name()));
        }
        fn leaf(&mut self, _: &ExpressionTree, node: &Node) {
            self.0.push(node.kind().name().to_string());
        }
    }

    #[test]
    fn enter_leave_order() {
        let mut tree = ExpressionTree::new();
        let root = tree.add(NodeKind::Root, TextRange::empty(0));
        let name = tree.add(NodeKind::Name, TextRange::new(0, 1));
        let literal = tree.add(NodeKind::Literal { name }, TextRange::empty(0));
        tree.attach(literal, Slot::Regular, name);
        tree.close(literal);
        tree.attach(root, Slot::Regular, literal);
        tree.close(root);

        let mut trace = Trace::default();
        tree.walk(root, &mut trace);
        assert_eq!(trace.0, vec!["+Root", "+Literal", "Name", "-Literal", "-Root"]);
    }
}
