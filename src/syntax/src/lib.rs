//! Syntax - a ready-made language for the expression parser.
//!
//! The demo language looks roughly like C with a few extras. It's what the
//! command line tool parses with, and it's a worked example of defining a
//! language, including three custom expression items:
//!
//! - `where`, a postfix type constraint, `T where T : Ord`,
//! - `::pragma(...)`, a regular item with arguments,
//! - `::metadata { ... }`, a prefix carrying a code block of assignments.

pub mod ids;

mod language;
mod metadata;
mod pragma;
mod where_clause;

pub use crate::{
    language::{builder, demo_language, registry, DEMO},
    metadata::Metadata,
    pragma::Pragma,
    where_clause::WhereClause,
};
