//! Diagnostics - user-readable messages
//!
//! Parse errors are recorded as byte offsets into the input. Before they're
//! shown to a person they're turned into [`Diagnostic`]s, which talk about
//! lines and columns ([`Caret`]s) instead, and can carry highlighted
//! [`Span`]s, an error code, and follow-up notes.
//!
//! Diagnostics are collected by a [`DiagnosticCoordinator`] and written out
//! by an [`Emitter`].

mod caret;
mod diagnostic;
mod diagnostic_coordinator;
mod emitter;
mod highlight;
mod input_coordinator;
mod level;
mod message;
mod span;

pub use self::{
    caret::Caret,
    diagnostic::Diagnostic,
    diagnostic_coordinator::DiagnosticCoordinator,
    emitter::{ASCIIEmitter, Emitter, FancyEmitter},
    highlight::Highlight,
    input_coordinator::{InputCoordinator, InputId},
    level::Level,
    message::Message,
    span::Span,
};
