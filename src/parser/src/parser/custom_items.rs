//! Running custom parsers.
//!
//! Custom parsers are tried one at a time from a checkpoint. Anything a parser
//! does is undone if it declines, fails, panics, or returns an item which
//! doesn't line up with what it consumed.

use std::{
    any::Any,
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use crate::{
    custom::{CustomItem, CustomParseContext, PostfixVerdict},
    error::{ErrorCode, ParseErrorItem, ParseErrors},
    lexer::KeywordMatch,
    parser::Parser,
    tree::{NodeId, NodeKind, Slot},
};

/// A custom item a parser accepted, with the nodes it consumed. None of the
/// nodes are attached yet.
#[derive(Debug)]
pub(crate) struct Parsed {
    pub(crate) item: CustomItem,
    trigger: NodeId,
    children: Vec<NodeId>,
}

#[derive(Debug)]
pub(crate) enum HookOutcome {
    Parsed(Parsed),
    /// A parser failed. The error is recorded and the cursor is back at the
    /// keyword.
    Failed,
    /// Every parser declined. Nothing has changed.
    Declined,
}

impl<'a> Parser<'a> {
    /// Try the custom parsers for `keyword`, which must be at the cursor.
    ///
    /// `prefixes` and `keywords` are what's been parsed in front of the
    /// keyword, which the parsers get to look at.
    pub(crate) fn try_custom(
        &mut self,
        keyword: KeywordMatch<'a>,
        prefixes: &[NodeId],
        keywords: &[NodeId],
    ) -> HookOutcome {
        let id = keyword.keyword.id();
        let at = keyword.range.start();
        let language = self.language;
        let checkpoint = self.checkpoint();

        debug_assert_eq!(self.scanner.offset(), at);

        for parser in language.custom_parsers(id) {
            self.rewind(checkpoint);

            let trigger = self.leaf(NodeKind::Keyword { id }, keyword.range);
            let mut context =
                CustomParseContext::new(self, id, trigger, prefixes.to_vec(), keywords.to_vec());
            let result = panic::catch_unwind(AssertUnwindSafe(|| parser.try_parse(&mut context)));
            let (children, last_token_end) = context.finish();

            let item = match result {
                Ok(Ok(Some(item))) => item,
                Ok(Ok(None)) => continue,
                Ok(Err(error)) => {
                    tracing::warn!(
                        keyword = %keyword.keyword.text(),
                        offset = at,
                        %error,
                        "custom parser failed"
                    );
                    self.rewind(checkpoint);
                    self.record(ParseErrorItem::new(
                        at,
                        ErrorCode::CustomExpressionParserFailed,
                        error.message(),
                        error.is_critical(),
                    ));
                    return HookOutcome::Failed;
                }
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    tracing::warn!(
                        keyword = %keyword.keyword.text(),
                        offset = at,
                        panic = %message,
                        "custom parser panicked"
                    );
                    self.rewind(checkpoint);
                    self.record(ParseErrorItem::new(
                        at,
                        ErrorCode::CustomExpressionParserFailed,
                        format!("custom parser panicked: {}", message),
                        false,
                    ));
                    return HookOutcome::Failed;
                }
            };

            let range = item.range();
            let problem = if range.is_empty() {
                Some(ErrorCode::ParsedCustomExpressionItemHasNonPositiveLength)
            } else if range.start() != at || range.end() != last_token_end {
                Some(ErrorCode::ParsedCustomExpressionItemHasInvalidIndex)
            } else {
                None
            };

            if let Some(code) = problem {
                tracing::warn!(
                    keyword = %keyword.keyword.text(),
                    %range,
                    consumed = last_token_end,
                    "custom parser returned a bad range"
                );
                self.rewind(checkpoint);
                self.error(at, code);
                return HookOutcome::Failed;
            }

            tracing::trace!(
                keyword = %keyword.keyword.text(),
                category = %item.category(),
                %range,
                "custom item parsed"
            );
            return HookOutcome::Parsed(Parsed {
                item,
                trigger,
                children,
            });
        }

        self.rewind(checkpoint);
        HookOutcome::Declined
    }

    /// Put a parsed custom item in the tree, after the given prefixes and
    /// keywords.
    pub(crate) fn custom_node(
        &mut self,
        parsed: Parsed,
        prefixes: &[NodeId],
        keywords: &[NodeId],
    ) -> NodeId {
        let Parsed {
            item,
            trigger,
            children,
        } = parsed;

        let node = self.tree.add(
            NodeKind::Custom {
                category: item.category(),
                trigger,
                item: Arc::clone(item.item()),
            },
            item.range(),
        );

        for prefix in prefixes {
            self.tree.attach(node, Slot::Prefix, *prefix);
        }
        for keyword in keywords {
            self.tree.attach(node, Slot::Keyword, *keyword);
        }
        self.tree.attach(node, Slot::Keyword, trigger);
        for child in children {
            self.tree.attach(node, Slot::Regular, child);
        }
        self.tree.close(node);

        let mut found = ParseErrors::default();
        item.item().on_parsed(&self.tree[node], &self.tree, &mut found);
        for error in found.into_sorted() {
            self.record(error);
        }

        node
    }

    /// Check a custom postfix item can follow `target`. `previous` is the
    /// custom postfix item already on `target`, if there is one.
    pub(crate) fn check_postfix_target(
        &mut self,
        target: NodeId,
        previous: Option<NodeId>,
        postfix: NodeId,
    ) {
        let at = self.custom_error_offset(postfix);

        match self.tree[target].kind() {
            NodeKind::Operator { .. } => {
                self.error(
                    at,
                    ErrorCode::CustomPostfixExpressionItemAfterNonRegularExpressionItem,
                );
            }
            NodeKind::ConstantText { .. }
            | NodeKind::ConstantNumeric { .. }
            | NodeKind::CodeBlock { .. }
            | NodeKind::Placeholder => {
                self.error(
                    at,
                    ErrorCode::CustomPostfixExpressionItemFollowsInvalidExpression,
                );
            }
            _ => {}
        }

        let preceding = previous.or_else(|| match self.tree[target].kind() {
            NodeKind::Custom { .. } => Some(target),
            _ => None,
        });

        let verdict = match preceding.map(|p| (self.tree[p].kind(), self.tree[postfix].kind())) {
            Some((NodeKind::Custom { item: before, .. }, NodeKind::Custom { item: after, .. })) => {
                before.accepts_postfix(after.as_ref())
            }
            _ => PostfixVerdict::Accept,
        };

        if let PostfixVerdict::Reject(message) = verdict {
            let code = ErrorCode::CustomPostfixExpressionItemRejectedByPrecedingCustomExpressionItem;
            let message = message.unwrap_or_else(|| code.description().to_string());
            self.record(ParseErrorItem::new(at, code, message, false));
        }
    }

    /// Where errors about a custom node go.
    pub(crate) fn custom_error_offset(&self, node: NodeId) -> usize {
        let node = &self.tree[node];
        match node.kind() {
            NodeKind::Custom { item, .. } => item.error_offset().unwrap_or_else(|| node.start()),
            _ => node.start(),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
