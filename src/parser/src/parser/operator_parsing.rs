//! Operator Parsing
//!
//! Binary and postfix operators are parsed by precedence climbing. Each call
//! to [`Parser::expression`] has a *limit*, and only takes operators which
//! bind strictly tighter than it. The right operand of a binary operator is
//! parsed with the operator's own priority as the limit, which is what makes
//! operators of equal priority left-associative.
//!
//! ## Binary or postfix?
//!
//! After an operand, the same text could be the start of a binary operator
//! or a postfix one. We take:
//!
//! 1. whichever matches, if only one does,
//! 2. the longer one, if both match but one is longer,
//! 3. if both end in the same place, the binary one if an operand can start
//!    after it, otherwise the postfix one.
//!
//! This means with `++` defined as both, `a ++ b` is binary but `a ++` and
//! `(a ++)` are postfix.

use crate::{
    error::{ErrorCode, ParseErrorItem},
    lexer::OperatorMatch,
    operator::{OperatorKind, Priority},
    parser::Parser,
    tree::{NodeId, NodeKind, Slot, TextRange},
};

impl<'a> Parser<'a> {
    /// Parse an operand and any operators after it which bind tighter than
    /// `limit`. With no limit, every operator is taken.
    pub(crate) fn expression(&mut self, limit: Option<Priority>) -> Option<NodeId> {
        let mut lhs = self.operand()?;

        loop {
            if self.critical {
                break;
            }

            let at = self.peek_past_trivia();
            let operator = match self.operator_after(at) {
                Some(operator) => operator,
                None => break,
            };

            let priority = operator.operator.priority();
            if let Some(limit) = limit {
                if !priority.binds_tighter_than(limit) {
                    break;
                }
            }

            self.skip_trivia();
            lhs = match operator.operator.kind() {
                OperatorKind::Binary => self.binary_operator(lhs, operator),
                OperatorKind::Postfix => {
                    let node = self.postfix_operator(lhs, operator);
                    self.postfix_items(node)
                }
                OperatorKind::Prefix => unreachable!("prefix operators can't follow operands"),
            };
        }

        Some(lhs)
    }

    /// Which operator, if any, continues an expression at `offset`.
    fn operator_after(&self, offset: usize) -> Option<OperatorMatch<'a>> {
        if self.scanner.is_end_at(offset) {
            return None;
        }

        let binary = self.scanner.match_operator(offset, OperatorKind::Binary);
        let postfix = self.scanner.match_operator(offset, OperatorKind::Postfix);

        match (binary, postfix) {
            (None, None) => None,
            (Some(binary), None) => Some(binary),
            (None, Some(postfix)) => Some(postfix),
            (Some(binary), Some(postfix)) => {
                if binary.end() > postfix.end() {
                    Some(binary)
                } else if postfix.end() > binary.end() {
                    Some(postfix)
                } else {
                    let next = self.scanner.skip_trivia_at(binary.end());
                    if self.starts_operand(next) {
                        Some(binary)
                    } else {
                        Some(postfix)
                    }
                }
            }
        }
    }

    /// Consume an operator's parts as an info leaf. Comments between the
    /// parts are skipped like anywhere else.
    pub(crate) fn operator_info(&mut self, operator: &OperatorMatch<'a>) -> NodeId {
        let range = operator.range();

        for (i, part) in operator.parts.iter().enumerate() {
            if i > 0 {
                self.skip_trivia();
            }
            debug_assert_eq!(self.scanner.offset(), part.start());
            self.scanner.set_offset(part.end());
        }

        self.tree.add(
            NodeKind::OperatorInfo {
                operator: operator.operator.id(),
                kind: operator.operator.kind(),
                priority: operator.operator.priority(),
                parts: operator.parts.clone(),
            },
            range,
        )
    }

    fn binary_operator(&mut self, lhs: NodeId, operator: OperatorMatch<'a>) -> NodeId {
        let start = operator.range().start();
        let priority = operator.operator.priority();
        let info = self.operator_info(&operator);

        let rhs = match self.expression(Some(priority)) {
            Some(rhs) => rhs,
            None => {
                let end = self.tree[info].end();
                self.record(ParseErrorItem::new(
                    start,
                    ErrorCode::ExpectedPostfixOperator,
                    format!(
                        "operand missing after '{}', and it isn't a postfix operator",
                        operator.operator.spelling()
                    ),
                    false,
                ));
                self.placeholder(end)
            }
        };

        self.operator_node(info, Some(lhs), Some(rhs))
    }

    fn postfix_operator(&mut self, lhs: NodeId, operator: OperatorMatch<'a>) -> NodeId {
        let info = self.operator_info(&operator);
        self.operator_node(info, Some(lhs), None)
    }

    pub(crate) fn operator_node(
        &mut self,
        info: NodeId,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> NodeId {
        let start = left.map_or(self.tree[info].start(), |l| self.tree[l].start());
        let node = self
            .tree
            .add(NodeKind::Operator { info, left, right }, TextRange::empty(start));

        if let Some(left) = left {
            self.tree.attach(node, Slot::Regular, left);
        }
        self.tree.attach(node, Slot::Regular, info);
        if let Some(right) = right {
            self.tree.attach(node, Slot::Regular, right);
        }

        self.tree.close(node);
        node
    }
}
