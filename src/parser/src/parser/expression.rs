//! Operands.
//!
//! An operand is made of up to four parts, in this order:
//!
//! 1. a *head* of `[..]` prefixes, custom prefix items and keywords,
//! 2. a *core* item: a literal, text, a number, braces, a code block, a
//!    prefix operator applied to its own operand, or a custom item,
//! 3. postfixes: custom postfix items and a trailing code block.
//!
//! Binary and postfix operators between operands are handled in
//! [`operator_parsing`][super::operator_parsing].

use crate::{
    custom::CustomItemCategory,
    error::ErrorCode,
    language::KeywordId,
    lexer::{CharClass, KeywordMatch, OperatorMatch},
    operator::OperatorKind,
    parser::{custom_items::HookOutcome, Parser},
    tree::{BraceKind, NodeId, NodeKind, Slot, TextRange},
};

/// The prefixes and keywords in front of an operand.
#[derive(Debug, Default)]
struct Head {
    prefixes: Vec<NodeId>,
    keywords: Vec<NodeId>,
    keyword_ids: Vec<KeywordId>,
    has_custom_prefix: bool,
}

impl Head {
    fn is_empty(&self) -> bool {
        self.prefixes.is_empty() && self.keywords.is_empty()
    }
}

/// What a keyword in the head turned out to be.
enum HeadStep {
    /// Part of the head, keep going.
    Continue,
    /// The operand's core item.
    Core(NodeId),
}

impl<'a> Parser<'a> {
    /// Parse an operand, returning `None` if there's nothing here that could
    /// start one.
    pub(crate) fn operand(&mut self) -> Option<NodeId> {
        let mut head = Head::default();

        let core = loop {
            if self.critical {
                break None;
            }

            self.skip_trivia();
            let at = self.scanner.offset();

            match self.scanner.classify(at) {
                CharClass::End
                | CharClass::ClosingBrace(_)
                | CharClass::CodeBlockEnd
                | CharClass::Comma
                | CharClass::Separator => break None,
                _ => {}
            }

            if head.keywords.is_empty()
                && self.language.supports_prefixes()
                && self.scanner.char_at(at) == Some(BraceKind::Square.opening())
            {
                let braces = self.braces(None);
                let next = self.peek_past_trivia();
                if !self.critical && self.starts_operand(next) {
                    head.prefixes.push(braces);
                    continue;
                }
                break Some(braces);
            }

            if let Some(keyword) = self.keyword_at(at) {
                match self.head_keyword(keyword, &mut head) {
                    HeadStep::Continue => continue,
                    HeadStep::Core(node) => break Some(node),
                }
            }

            match self.core_item(at) {
                Some(node) => break Some(node),
                None => {
                    self.error(at, ErrorCode::InvalidSymbol);
                    let width = self.scanner.char_at(at).map_or(1, char::len_utf8);
                    self.scanner.set_offset(at + width);
                }
            }
        };

        let core = match core {
            Some(core) => core,
            None if head.is_empty() => return None,
            None => return Some(self.headless(head)),
        };

        for prefix in head.prefixes {
            self.tree.attach(core, Slot::Prefix, prefix);
        }
        for keyword in head.keywords {
            self.tree.attach(core, Slot::Keyword, keyword);
        }
        self.tree.close(core);

        Some(self.postfix_items(core))
    }

    /// The keyword at `offset`, if there is one and no operator there is
    /// longer.
    pub(crate) fn keyword_at(&self, offset: usize) -> Option<KeywordMatch<'a>> {
        let keyword = self.scanner.match_keyword(offset)?;
        match self.scanner.match_any_operator(offset) {
            Some(end) if end >= keyword.range.end() => None,
            _ => Some(keyword),
        }
    }

    fn head_keyword(&mut self, keyword: KeywordMatch<'a>, head: &mut Head) -> HeadStep {
        let id = keyword.keyword.id();

        if !self.language.custom_parsers(id).is_empty() {
            match self.try_custom(keyword, &head.prefixes, &head.keywords) {
                HookOutcome::Parsed(parsed) => {
                    let category = parsed.item.category();
                    let node = match category {
                        CustomItemCategory::Prefix => {
                            let keywords = std::mem::take(&mut head.keywords);
                            head.keyword_ids.clear();
                            self.custom_node(parsed, &[], &keywords)
                        }
                        CustomItemCategory::Regular | CustomItemCategory::Postfix => {
                            let prefixes = std::mem::take(&mut head.prefixes);
                            let keywords = std::mem::take(&mut head.keywords);
                            self.custom_node(parsed, &prefixes, &keywords)
                        }
                    };

                    let at = self.custom_error_offset(node);
                    return match category {
                        CustomItemCategory::Prefix => {
                            if !self.language.supports_prefixes() {
                                self.error(at, ErrorCode::InvalidUseOfPrefixes);
                            }
                            head.prefixes.push(node);
                            head.has_custom_prefix = true;
                            HeadStep::Continue
                        }
                        CustomItemCategory::Regular => HeadStep::Core(node),
                        CustomItemCategory::Postfix => {
                            self.error(
                                at,
                                ErrorCode::CustomPostfixExpressionItemHasNoTargetExpression,
                            );
                            HeadStep::Core(node)
                        }
                    };
                }
                HookOutcome::Failed => {
                    let trigger = self.leaf(NodeKind::Keyword { id }, keyword.range);
                    let node = self.placeholder(keyword.range.start());
                    for prefix in std::mem::take(&mut head.prefixes) {
                        self.tree.attach(node, Slot::Prefix, prefix);
                    }
                    for earlier in std::mem::take(&mut head.keywords) {
                        self.tree.attach(node, Slot::Keyword, earlier);
                    }
                    self.tree.attach(node, Slot::Keyword, trigger);
                    self.tree.close(node);
                    return HeadStep::Core(node);
                }
                HookOutcome::Declined => {}
            }
        }

        let at = keyword.range.start();
        if !self.language.supports_keywords() {
            self.error(at, ErrorCode::KeywordsNotSupported);
        } else if head.keyword_ids.contains(&id) {
            self.error(at, ErrorCode::MultipleOccurrencesOfKeyword);
        }

        let leaf = self.leaf(NodeKind::Keyword { id }, keyword.range);
        head.keywords.push(leaf);
        head.keyword_ids.push(id);
        HeadStep::Continue
    }

    /// A head with nothing to apply to becomes a placeholder.
    fn headless(&mut self, head: Head) -> NodeId {
        let first = head.prefixes.first().or_else(|| head.keywords.first());
        let at = first.map_or(self.scanner.offset(), |n| self.tree[*n].start());

        let code = if head.has_custom_prefix {
            ErrorCode::CustomPrefixExpressionHasNoTarget
        } else {
            ErrorCode::InvalidUseOfKeywords
        };
        self.error(at, code);

        let node = self.placeholder(at);
        for prefix in head.prefixes {
            self.tree.attach(node, Slot::Prefix, prefix);
        }
        for keyword in head.keywords {
            self.tree.attach(node, Slot::Keyword, keyword);
        }
        self.tree.close(node);
        node
    }

    /// The core of an operand, starting at `at`. Returns `None` if nothing
    /// here can start one.
    fn core_item(&mut self, at: usize) -> Option<NodeId> {
        match self.scanner.classify(at) {
            CharClass::CodeBlockStart => return Some(self.code_block()),
            CharClass::OpeningBrace(_) => return Some(self.braces(None)),
            CharClass::TextDelimiter(_) => {
                if let Some(text) = self.scanner.match_text(at) {
                    if !text.terminated {
                        self.error(at, ErrorCode::ConstantTextEndMarkerMissing);
                    }

                    let leaf = self.leaf(
                        NodeKind::Text {
                            delimiter: text.delimiter,
                            value: text.value,
                            terminated: text.terminated,
                        },
                        text.range,
                    );
                    return Some(self.wrap(NodeKind::ConstantText { text: leaf }, leaf));
                }
            }
            _ => {}
        }

        if let Some(number) = self.scanner.match_numeric(at) {
            let leaf = self.leaf(NodeKind::Number { format: number.format }, number.range);
            return Some(self.wrap(NodeKind::ConstantNumeric { number: leaf }, leaf));
        }

        if let Some(operator) = self.scanner.match_operator(at, OperatorKind::Prefix) {
            return Some(self.prefix_operator(operator));
        }

        let misplaced = self
            .scanner
            .match_operator(at, OperatorKind::Binary)
            .or_else(|| self.scanner.match_operator(at, OperatorKind::Postfix));
        if let Some(operator) = misplaced {
            return Some(self.misplaced_operator(operator));
        }

        if let Some(end) = self.scanner.match_literal(at) {
            let name = self.leaf(NodeKind::Name, TextRange::new(at, end));

            if let CharClass::OpeningBrace(_) = self.scanner.classify(end) {
                return Some(self.braces(Some(name)));
            }

            return Some(self.wrap(NodeKind::Literal { name }, name));
        }

        None
    }

    /// Make an expression item with a single regular child.
    fn wrap(&mut self, kind: NodeKind, child: NodeId) -> NodeId {
        let range = self.tree[child].range();
        let node = self.tree.add(kind, range);
        self.tree.attach(node, Slot::Regular, child);
        self.tree.close(node);
        node
    }

    /// Custom postfix items and a trailing code block after `target`.
    pub(crate) fn postfix_items(&mut self, target: NodeId) -> NodeId {
        let mut last_custom: Option<NodeId> = None;

        loop {
            if self.critical {
                break;
            }

            let at = self.peek_past_trivia();
            if self.scanner.is_end_at(at) {
                break;
            }

            if !self.is_terminated(target) && self.scanner.match_code_block_start(at).is_some() {
                if last_custom.is_some() {
                    self.error(at, ErrorCode::CodeBlockUsedAfterPostfixCustomExpression);
                } else if !self.accepts_code_block(target) {
                    self.error(at, ErrorCode::CodeBlockCannotFollowThePrecedingExpression);
                }

                self.skip_trivia();
                let block = self.code_block();
                self.tree.attach(target, Slot::Postfix, block);
                self.tree.close(target);
                continue;
            }

            let keyword = match self.keyword_at(at) {
                Some(keyword) if !self.language.custom_parsers(keyword.keyword.id()).is_empty() => {
                    keyword
                }
                _ => break,
            };

            let attached = self.with_backtracking(|p| {
                p.skip_trivia();
                match p.try_custom(keyword, &[], &[]) {
                    HookOutcome::Parsed(parsed)
                        if parsed.item.category() == CustomItemCategory::Postfix =>
                    {
                        let node = p.custom_node(parsed, &[], &[]);
                        p.check_postfix_target(target, last_custom, node);
                        Some(node)
                    }
                    HookOutcome::Failed => {
                        let id = keyword.keyword.id();
                        let trigger = p.leaf(NodeKind::Keyword { id }, keyword.range);
                        let node = p.placeholder(keyword.range.start());
                        p.tree.attach(node, Slot::Keyword, trigger);
                        p.tree.close(node);
                        Some(node)
                    }
                    _ => None,
                }
            });

            match attached {
                Some(node) => {
                    self.tree.attach(target, Slot::Postfix, node);
                    self.tree.close(target);
                    if let NodeKind::Custom { .. } = self.tree[node].kind() {
                        last_custom = Some(node);
                    }
                }
                None => break,
            }
        }

        target
    }

    /// Can a code block follow this item as a postfix?
    fn accepts_code_block(&self, node: NodeId) -> bool {
        matches!(
            self.tree[node].kind(),
            NodeKind::Braces { .. }
                | NodeKind::Literal { .. }
                | NodeKind::Custom {
                    category: CustomItemCategory::Regular,
                    ..
                }
        )
    }

    /// Does `node` end with a code block? Statements which do don't need a
    /// separator after them.
    pub(crate) fn is_terminated(&self, node: NodeId) -> bool {
        let mut current = &self.tree[node];
        loop {
            if let NodeKind::CodeBlock { .. } = current.kind() {
                return true;
            }

            match current.children().all().next_back() {
                Some(last) => current = &self.tree[last],
                None => return false,
            }
        }
    }

    /// Could an operand start at `offset`?
    pub(crate) fn starts_operand(&self, offset: usize) -> bool {
        match self.scanner.classify(offset) {
            CharClass::End
            | CharClass::ClosingBrace(_)
            | CharClass::CodeBlockEnd
            | CharClass::Comma
            | CharClass::Separator => return false,
            CharClass::CodeBlockStart
            | CharClass::OpeningBrace(_)
            | CharClass::TextDelimiter(_) => return true,
            CharClass::Other => {}
        }

        if self.scanner.match_numeric(offset).is_some() || self.keyword_at(offset).is_some() {
            return true;
        }

        if self.scanner.match_operator(offset, OperatorKind::Prefix).is_some() {
            let infix = self.scanner.match_operator(offset, OperatorKind::Binary).is_some()
                || self.scanner.match_operator(offset, OperatorKind::Postfix).is_some();
            return !infix;
        }

        if self.scanner.match_any_operator(offset).is_some() {
            return false;
        }

        self.scanner.match_literal(offset).is_some()
    }

    /// Parse a prefix operator and its operand.
    fn prefix_operator(&mut self, operator: OperatorMatch<'a>) -> NodeId {
        let start = operator.range().start();
        let priority = operator.operator.priority();
        let info = self.operator_info(&operator);

        let operand = self.depth_track(start, |p| p.expression(Some(priority)));
        let operand = match operand {
            Some(Some(operand)) => operand,
            Some(None) => {
                let end = self.tree[info].end();
                self.error(start, ErrorCode::OperandMissingAfterPrefixOperator);
                self.placeholder(end)
            }
            None => {
                let end = self.tree[info].end();
                self.placeholder(end)
            }
        };

        self.operator_node(info, None, Some(operand))
    }

    /// A binary or postfix operator where an operand should be. Its missing
    /// left operand becomes a placeholder, and a binary operator still gets
    /// its right one.
    fn misplaced_operator(&mut self, operator: OperatorMatch<'a>) -> NodeId {
        let start = operator.range().start();
        let priority = operator.operator.priority();
        self.error(start, ErrorCode::ExpectedPrefixOperator);

        let left = self.placeholder(start);
        let info = self.operator_info(&operator);

        let right = match operator.operator.kind() {
            OperatorKind::Binary => {
                let right = self
                    .depth_track(start, |p| p.expression(Some(priority)))
                    .flatten();
                Some(right.unwrap_or_else(|| {
                    let end = self.tree[info].end();
                    self.placeholder(end)
                }))
            }
            _ => None,
        };

        self.operator_node(info, Some(left), right)
    }
}
