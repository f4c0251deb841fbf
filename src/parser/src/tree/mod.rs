//! The expression tree.
//!
//! Nodes live in an arena ([`ExpressionTree`]) and refer to each other by
//! [`NodeId`]. Children are owned by the arena, and every node also knows its
//! parent's id, so it's easy to walk either way.
//!
//! There are two sorts of node. *Expression items* like [`NodeKind::Literal`]
//! or [`NodeKind::Operator`] have children, and *leaves* like
//! [`NodeKind::Name`] or [`NodeKind::Comma`] cover a single token.
//!
//! An expression item's children are kept in four lists, in source order:
//! prefixes (`[..]` items or custom prefix items), keywords, regular items,
//! and postfixes (custom postfix items or a trailing code block). An item's
//! range always runs from the start of its first child to the end of its
//! last.

mod check;
mod outline;
mod visit;

use std::{fmt, ops::Index, sync::Arc};

use crate::{
    custom::{CustomExpressionItem, CustomItemCategory},
    language::{KeywordId, NumericKindId},
    operator::{OperatorId, OperatorKind, Priority},
};

pub use self::{check::InvariantViolation, visit::Visitor};

/// A half-open range of bytes in the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TextRange {
    start: usize,
    end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "range {}..{} is backwards", start, end);
        TextRange { start, end }
    }

    /// A zero-width range.
    pub fn empty(at: usize) -> Self {
        TextRange::new(at, at)
    }

    pub fn start(self) -> usize {
        self.start
    }

    pub fn end(self) -> usize {
        self.end
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    pub fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// The smallest range covering both.
    pub fn cover(self, other: TextRange) -> TextRange {
        TextRange::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The text under this range.
    pub fn slice(self, text: &str) -> &str {
        &text[self.start..self.end]
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Identifies a node in an [`ExpressionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Round `()` or square `[]` braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BraceKind {
    Round,
    Square,
}

impl BraceKind {
    pub fn from_opening(c: char) -> Option<BraceKind> {
        match c {
            '(' => Some(BraceKind::Round),
            '[' => Some(BraceKind::Square),
            _ => None,
        }
    }

    pub fn from_closing(c: char) -> Option<BraceKind> {
        match c {
            ')' => Some(BraceKind::Round),
            ']' => Some(BraceKind::Square),
            _ => None,
        }
    }

    pub fn opening(self) -> char {
        match self {
            BraceKind::Round => '(',
            BraceKind::Square => '[',
        }
    }

    pub fn closing(self) -> char {
        match self {
            BraceKind::Round => ')',
            BraceKind::Square => ']',
        }
    }
}

/// Which of a node's child lists a child is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Prefix,
    Keyword,
    Regular,
    Postfix,
}

/// What a node is.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The top of the tree.
    Root,
    /// A name, like `x`.
    Literal { name: NodeId },
    ConstantText { text: NodeId },
    ConstantNumeric { number: NodeId },
    /// `(...)` or `[...]`, optionally named as in `f(...)`.
    Braces {
        kind: BraceKind,
        name: Option<NodeId>,
        opening: NodeId,
        closing: Option<NodeId>,
    },
    CodeBlock { start: NodeId, end: Option<NodeId> },
    /// Prefix operators only have a `right` operand, postfix operators only
    /// have a `left`, and binary operators have both.
    Operator {
        info: NodeId,
        left: Option<NodeId>,
        right: Option<NodeId>,
    },
    /// Something a custom expression item parser recognised.
    Custom {
        category: CustomItemCategory,
        trigger: NodeId,
        item: Arc<dyn CustomExpressionItem>,
    },
    /// Stands in for something which should have been there, but wasn't.
    Placeholder,

    Name,
    Text {
        delimiter: char,
        value: String,
        terminated: bool,
    },
    Number { format: NumericKindId },
    Keyword { id: KeywordId },
    /// The operator token(s). The range covers every part, and `parts` has
    /// the range of each one.
    OperatorInfo {
        operator: OperatorId,
        kind: OperatorKind,
        priority: Priority,
        parts: Vec<TextRange>,
    },
    Comma,
    Separator,
    OpeningBrace(BraceKind),
    ClosingBrace(BraceKind),
    CodeBlockStart,
    CodeBlockEnd,
    /// Text consumed by a custom parser that isn't any other kind of token.
    CustomText,
}

impl NodeKind {
    /// Does this kind of node have children?
    pub fn is_complex(&self) -> bool {
        matches!(
            self,
            NodeKind::Root
                | NodeKind::Literal { .. }
                | NodeKind::ConstantText { .. }
                | NodeKind::ConstantNumeric { .. }
                | NodeKind::Braces { .. }
                | NodeKind::CodeBlock { .. }
                | NodeKind::Operator { .. }
                | NodeKind::Custom { .. }
                | NodeKind::Placeholder
        )
    }

    /// Is this an expression item, i.e. something that can be an operand?
    pub fn is_expression(&self) -> bool {
        self.is_complex() && !matches!(self, NodeKind::Root)
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::ConstantText { .. } => "ConstantText",
            NodeKind::ConstantNumeric { .. } => "ConstantNumeric",
            NodeKind::Braces { .. } => "Braces",
            NodeKind::CodeBlock { .. } => "CodeBlock",
            NodeKind::Operator { .. } => "Operator",
            NodeKind::Custom { .. } => "Custom",
            NodeKind::Placeholder => "Placeholder",
            NodeKind::Name => "Name",
            NodeKind::Text { .. } => "Text",
            NodeKind::Number { .. } => "Number",
            NodeKind::Keyword { .. } => "Keyword",
            NodeKind::OperatorInfo { .. } => "OperatorInfo",
            NodeKind::Comma => "Comma",
            NodeKind::Separator => "Separator",
            NodeKind::OpeningBrace(_) => "OpeningBrace",
            NodeKind::ClosingBrace(_) => "ClosingBrace",
            NodeKind::CodeBlockStart => "CodeBlockStart",
            NodeKind::CodeBlockEnd => "CodeBlockEnd",
            NodeKind::CustomText => "CustomText",
        }
    }
}

/// A node's children, in their four lists.
#[derive(Debug, Clone, Default)]
pub struct Children {
    prefixes: Vec<NodeId>,
    keywords: Vec<NodeId>,
    regular: Vec<NodeId>,
    postfixes: Vec<NodeId>,
}

impl Children {
    pub fn slot(&self, slot: Slot) -> &[NodeId] {
        match slot {
            Slot::Prefix => &self.prefixes,
            Slot::Keyword => &self.keywords,
            Slot::Regular => &self.regular,
            Slot::Postfix => &self.postfixes,
        }
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Vec<NodeId> {
        match slot {
            Slot::Prefix => &mut self.prefixes,
            Slot::Keyword => &mut self.keywords,
            Slot::Regular => &mut self.regular,
            Slot::Postfix => &mut self.postfixes,
        }
    }

    /// Every child, in source order.
    pub fn all(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.prefixes
            .iter()
            .chain(&self.keywords)
            .chain(&self.regular)
            .chain(&self.postfixes)
            .copied()
    }

    /// Every child with the list it's in, in source order.
    pub fn all_with_slots(&self) -> impl Iterator<Item = (Slot, NodeId)> + '_ {
        [Slot::Prefix, Slot::Keyword, Slot::Regular, Slot::Postfix]
            .into_iter()
            .flat_map(move |slot| self.slot(slot).iter().map(move |id| (slot, *id)))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
            && self.keywords.is_empty()
            && self.regular.is_empty()
            && self.postfixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len() + self.keywords.len() + self.regular.len() + self.postfixes.len()
    }
}

/// A node in the tree.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    kind: NodeKind,
    range: TextRange,
    parent: Option<NodeId>,
    children: Children,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn prefixes(&self) -> &[NodeId] {
        &self.children.prefixes
    }

    pub fn keywords(&self) -> &[NodeId] {
        &self.children.keywords
    }

    pub fn regular_items(&self) -> &[NodeId] {
        &self.children.regular
    }

    pub fn postfixes(&self) -> &[NodeId] {
        &self.children.postfixes
    }

    pub fn is_complex(&self) -> bool {
        self.kind.is_complex()
    }

    /// The source text this node covers.
    pub fn text<'t>(&self, source: &'t str) -> &'t str {
        self.range.slice(source)
    }
}

/// An arena of [`Node`]s.
#[derive(Debug, Clone, Default)]
pub struct ExpressionTree {
    nodes: Vec<Node>,
}

impl ExpressionTree {
    pub(crate) fn new() -> Self {
        ExpressionTree::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Every node, in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn parent(&self, id: NodeId) -> Option<&Node> {
        self[id].parent.map(|p| &self[p])
    }

    /// The node's parent, its parent, and so on up to the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        std::iter::successors(self.parent(id), move |n| self.parent(n.id))
    }

    /// The node and everything under it, in source order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }

    /// The regular children which are expressions, skipping punctuation.
    ///
    /// For braces these are the comma separated items, for code blocks and
    /// the root these are the separated expressions.
    pub fn expression_items(&self, id: NodeId) -> impl Iterator<Item = &Node> {
        self[id]
            .children
            .regular
            .iter()
            .map(move |c| &self[*c])
            .filter(|n| n.kind.is_expression())
    }

    /// Find the innermost node covering `offset`.
    pub fn node_at(&self, root: NodeId, offset: usize) -> Option<&Node> {
        let mut current = &self[root];
        if !current.range.contains(offset) {
            return None;
        }

        'descend: loop {
            for child in current.children.all() {
                let child = &self[child];
                if child.range.contains(offset) {
                    current = child;
                    continue 'descend;
                }
            }
            return Some(current);
        }
    }

    pub(crate) fn add(&mut self, kind: NodeKind, range: TextRange) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            kind,
            range,
            parent: None,
            children: Children::default(),
        });
        id
    }

    /// Make `child` the last child in `parent`'s `slot` list. The parent's
    /// range isn't updated until it's [closed][ExpressionTree::close].
    pub(crate) fn attach(&mut self, parent: NodeId, slot: Slot, child: NodeId) {
        debug_assert!(self[parent].kind.is_complex());
        debug_assert!(self[child].parent.is_none(), "{} already has a parent", child);

        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.slot_mut(slot).push(child);
    }

    /// Recompute a node's range from its children. Nodes without children
    /// keep the range they were made with.
    pub(crate) fn close(&mut self, id: NodeId) {
        let children = &self[id].children;
        let first = children.all().next();
        let last = children.all().next_back();

        if let (Some(first), Some(last)) = (first, last) {
            let range = TextRange::new(self[first].range.start, self[last].range.end);
            self.nodes[id.index()].range = range;
        }
    }

    pub(crate) fn kind_mut(&mut self, id: NodeId) -> &mut NodeKind {
        &mut self.nodes[id.index()].kind
    }

    /// Forget every node made after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }
}

impl Index<NodeId> for ExpressionTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }
}

/// Pre-order iterator over part of a tree. See
/// [`ExpressionTree::descendants`].
pub struct Descendants<'t> {
    tree: &'t ExpressionTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = &'t Node;

    fn next(&mut self) -> Option<&'t Node> {
        let id = self.stack.pop()?;
        let node = &self.tree[id];
        self.stack.extend(node.children.all().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges() {
        let r = TextRange::new(2, 5);
        assert_eq!(r.len(), 3);
        assert!(r.contains(2));
        assert!(!r.contains(5));
        assert_eq!(r.cover(TextRange::empty(9)), TextRange::new(2, 9));
        assert_eq!(r.slice("abcdefg"), "cde");
    }

    #[test]
    fn close_spans_children() {
        let mut tree = ExpressionTree::new();
        let root = tree.add(NodeKind::Root, TextRange::empty(0));
        let name = tree.add(NodeKind::Name, TextRange::new(2, 3));
        let literal = tree.add(NodeKind::Literal { name }, TextRange::empty(2));
        let keyword = tree.add(NodeKind::Keyword { id: KeywordId(0) }, TextRange::new(0, 1));

        tree.attach(literal, Slot::Regular, name);
        tree.attach(literal, Slot::Keyword, keyword);
        tree.close(literal);
        assert_eq!(tree[literal].range(), TextRange::new(0, 3));

        tree.attach(root, Slot::Regular, literal);
        tree.close(root);

        let order: Vec<_> = tree.descendants(root).map(|n| n.kind().name()).collect();
        assert_eq!(order, vec!["Root", "Literal", "Keyword", "Name"]);

        let ancestors: Vec<_> = tree.ancestors(name).map(|n| n.id()).collect();
        assert_eq!(ancestors, vec![literal, root]);

        assert_eq!(tree.node_at(root, 2).map(Node::id), Some(name));
        assert_eq!(tree.expression_items(root).count(), 1);
    }
}
