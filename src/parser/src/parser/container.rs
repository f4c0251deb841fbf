//! Containers: the root, braces and code blocks.
//!
//! Each container is a loop over the items in it. Braces hold comma
//! separated items, and the root and code blocks hold statements separated
//! by the language's separator. The loop is where closers, commas and
//! separators are dealt with, including the ones which are in the wrong
//! place.

use crate::{
    error::ErrorCode,
    lexer::{CharClass, Closer},
    parser::{Container, Entry, Parser},
    tree::{BraceKind, NodeId, NodeKind, Slot, TextRange},
};

/// Why a container's loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Closing {
    /// The cursor is at this container's closer.
    Closed,
    /// The cursor is at the closer of a container further out.
    Enclosing,
    /// The end of the input.
    End,
    /// A critical error was found.
    Aborted,
}

/// What's been seen since the last comma or separator.
#[derive(Debug, Default)]
struct Segment {
    last: Option<NodeId>,
    /// A comma which nothing has followed yet.
    dangling_comma: Option<usize>,
}

impl<'a> Parser<'a> {
    /// Parse the items of a container into `node`, up to whatever ends it.
    pub(crate) fn items(&mut self, node: NodeId, container: Container) -> Closing {
        tracing::trace!(?container, offset = self.scanner.offset(), "entering container");
        self.containers.push(container);

        let mut segment = Segment::default();

        let closing = loop {
            if self.critical {
                break Closing::Aborted;
            }

            let trivia = self.skip_trivia();
            let at = self.scanner.offset();

            match self.scanner.classify(at) {
                CharClass::End => break Closing::End,

                CharClass::ClosingBrace(kind) => {
                    if container == Container::Braces(kind) {
                        break Closing::Closed;
                    }

                    if self.encloses(Closer::Brace(kind)) {
                        break Closing::Enclosing;
                    }

                    if let Container::Braces(_) = container {
                        self.error(at, ErrorCode::ClosingBraceDoesNotMatchOpeningBrace);
                        break Closing::Closed;
                    }

                    self.error(at, ErrorCode::ClosingBraceWithoutOpeningBrace);
                    self.scanner.set_offset(at + kind.closing().len_utf8());
                }

                CharClass::CodeBlockEnd => {
                    if container == Container::CodeBlock {
                        break Closing::Closed;
                    }

                    if self.encloses(Closer::CodeBlockEnd) {
                        break Closing::Enclosing;
                    }

                    self.error(at, ErrorCode::CodeBlockClosingMarkerWithoutOpeningMarker);
                    let end = self
                        .scanner
                        .match_code_block_end(at)
                        .map_or(at + 1, TextRange::end);
                    self.scanner.set_offset(end);
                }

                CharClass::Comma => {
                    if container.holds_statements() {
                        self.error(at, ErrorCode::CommaWithoutParentBraces);
                        self.scanner.set_offset(at + 1);
                        continue;
                    }

                    if segment.last.is_none() {
                        self.error(at, ErrorCode::ExpressionMissingBeforeComma);
                    }

                    let comma = self.leaf(NodeKind::Comma, TextRange::new(at, at + 1));
                    self.tree.attach(node, Slot::Regular, comma);
                    segment = Segment {
                        last: None,
                        dangling_comma: Some(at),
                    };
                }

                CharClass::Separator => {
                    let width = self.scanner.char_at(at).map_or(1, char::len_utf8);

                    if !container.holds_statements() {
                        self.error(at, ErrorCode::ExpressionSeparatorWithoutParentCodeBlock);
                        self.scanner.set_offset(at + width);
                        continue;
                    }

                    if segment.last.is_none() {
                        self.error(at, ErrorCode::ExpressionMissingBeforeCodeItemSeparator);
                    }

                    let separator = self.leaf(NodeKind::Separator, TextRange::new(at, at + width));
                    self.tree.attach(node, Slot::Regular, separator);
                    segment = Segment::default();
                }

                _ => {
                    let item = match self.expression(None) {
                        Some(item) => item,
                        None => continue,
                    };

                    if let Some(previous) = segment.last {
                        let terminated =
                            container.holds_statements() && self.is_terminated(previous);

                        if !terminated {
                            let code = if trivia.skipped {
                                ErrorCode::BinaryOperatorMissing
                            } else {
                                ErrorCode::NoSeparationBetweenSymbols
                            };
                            self.error(at, code);
                        }
                    }

                    self.tree.attach(node, Slot::Regular, item);
                    segment.last = Some(item);
                    segment.dangling_comma = None;
                }
            }
        };

        if let Some(comma) = segment.dangling_comma {
            if closing != Closing::Aborted {
                let at = if closing == Closing::Closed {
                    self.scanner.offset()
                } else {
                    comma
                };
                self.error(at, ErrorCode::ExpressionMissingAfterComma);
            }
        }

        self.containers.pop();
        tracing::trace!(?container, ?closing, offset = self.scanner.offset(), "leaving container");
        closing
    }

    /// Parse braces starting at the cursor, optionally named by the literal
    /// `name` right before them.
    pub(crate) fn braces(&mut self, name: Option<NodeId>) -> NodeId {
        let at = self.scanner.offset();
        let kind = match self.scanner.char_at(at).and_then(BraceKind::from_opening) {
            Some(kind) => kind,
            None => unreachable!("braces must start with an opening brace"),
        };

        let opening = self.leaf(NodeKind::OpeningBrace(kind), TextRange::new(at, at + 1));
        let node = self.tree.add(
            NodeKind::Braces {
                kind,
                name,
                opening,
                closing: None,
            },
            TextRange::empty(at),
        );

        if let Some(name) = name {
            self.tree.attach(node, Slot::Regular, name);
        }
        self.tree.attach(node, Slot::Regular, opening);

        let closing = self
            .depth_track(at, |p| p.items(node, Container::Braces(kind)))
            .unwrap_or(Closing::Aborted);

        let closer = match closing {
            Closing::Closed => {
                let close_at = self.scanner.offset();
                match self.scanner.char_at(close_at).and_then(BraceKind::from_closing) {
                    Some(found) => Some(self.leaf(
                        NodeKind::ClosingBrace(found),
                        TextRange::new(close_at, close_at + 1),
                    )),
                    None => None,
                }
            }
            Closing::Enclosing | Closing::End => {
                self.error(at, ErrorCode::ClosingBraceMissing);
                None
            }
            Closing::Aborted => self.recover(Closer::Brace(kind)),
        };

        if let Some(closer) = closer {
            self.tree.attach(node, Slot::Regular, closer);
            if let NodeKind::Braces { closing, .. } = self.tree.kind_mut(node) {
                *closing = Some(closer);
            }
        }

        self.tree.close(node);
        node
    }

    /// Parse a code block starting at the cursor.
    pub(crate) fn code_block(&mut self) -> NodeId {
        let at = self.scanner.offset();
        let range = match self.scanner.match_code_block_start(at) {
            Some(range) => range,
            None => unreachable!("code blocks must start with the start marker"),
        };

        let start = self.leaf(NodeKind::CodeBlockStart, range);
        let node = self
            .tree
            .add(NodeKind::CodeBlock { start, end: None }, TextRange::empty(at));
        self.tree.attach(node, Slot::Regular, start);

        let closing = self
            .depth_track(at, |p| p.items(node, Container::CodeBlock))
            .unwrap_or(Closing::Aborted);

        let end = match closing {
            Closing::Closed => {
                let close_at = self.scanner.offset();
                self.scanner
                    .match_code_block_end(close_at)
                    .map(|range| self.leaf(NodeKind::CodeBlockEnd, range))
            }
            Closing::Enclosing | Closing::End => {
                self.error(at, ErrorCode::CodeBlockEndMarkerMissing);
                None
            }
            Closing::Aborted => self.recover(Closer::CodeBlockEnd),
        };

        if let Some(end_marker) = end {
            self.tree.attach(node, Slot::Regular, end_marker);
            if let NodeKind::CodeBlock { end, .. } = self.tree.kind_mut(node) {
                *end = Some(end_marker);
            }
        }

        self.tree.close(node);
        node
    }

    /// After a critical error, skip to what closes the current container. If
    /// it's found, it's returned as a leaf.
    ///
    /// A critical error only ends the container it was found in, so the
    /// containers around this one carry on afterwards.
    fn recover(&mut self, closer: Closer) -> Option<NodeId> {
        let from = self.scanner.offset();
        self.critical = false;

        match self.scanner.find_closer(from, closer) {
            Ok(at) => {
                let range = match closer {
                    Closer::Brace(kind) => Some((
                        NodeKind::ClosingBrace(kind),
                        TextRange::new(at, at + 1),
                    )),
                    Closer::CodeBlockEnd => self
                        .scanner
                        .match_code_block_end(at)
                        .map(|range| (NodeKind::CodeBlockEnd, range)),
                };

                range.map(|(kind, range)| self.leaf(kind, range))
            }
            Err(at) => {
                self.scanner.set_offset(at);
                None
            }
        }
    }

    /// Parse a single braces expression or code block, as the whole input.
    pub(crate) fn standalone(&mut self, root: NodeId, entry: Entry) {
        self.skip_trivia();
        let at = self.scanner.offset();
        let class = self.scanner.classify(at);

        let (node, code) = match (entry, class) {
            (Entry::Braces, CharClass::OpeningBrace(_)) => {
                (Some(self.braces(None)), ErrorCode::InvalidBracesExpression)
            }
            (Entry::Braces, _) => (None, ErrorCode::InvalidBracesExpression),
            (Entry::CodeBlock, CharClass::CodeBlockStart) => {
                (Some(self.code_block()), ErrorCode::InvalidCodeBlock)
            }
            (Entry::CodeBlock, _) => (None, ErrorCode::InvalidCodeBlock),
            (Entry::Expression, _) => unreachable!("expressions aren't standalone"),
        };

        match node {
            Some(node) => self.tree.attach(root, Slot::Regular, node),
            None => {
                self.error(at, code);
                return;
            }
        }

        if self.critical {
            return;
        }

        self.skip_trivia();
        if !self.scanner.is_at_end() {
            self.error(self.scanner.offset(), code);
        }
    }
}
