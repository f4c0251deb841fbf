//! Operator definitions.
//!
//! Every operator has a kind ([`OperatorKind`]), a priority, and one or more
//! name parts. Most operators have a single part, like `+` or `and`, but an
//! operator like `is not null` has three. When matching, the parts of an
//! operator may be separated by whitespace and comments.
//!
//! ## Priority
//!
//! A *lower* priority number binds *tighter*. With `*` at 10 and `+` at 20,
//! `a + b * c` is read as `a + (b * c)`. Operators with equal priority are
//! left-associative, so `a - b - c` is `(a - b) - c`.
//!
//! Prefix operators take part in this too. The operand of a prefix operator
//! only swallows operators which bind strictly tighter than the prefix
//! operator does, which means with `-` at 5 and `.` at 0, `-a.b` is
//! `-(a.b)`, but with `+` at 20, `-a + b` is `(-a) + b`.
//!
//! When the same spelling is defined as both a postfix and a binary operator,
//! which one is meant is decided by what follows it. If an operand can start
//! right after the operator, it's binary, otherwise it's postfix.

use std::fmt;

/// The position an operator is used in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperatorKind {
    /// Before its operand, like `-a`.
    Prefix,
    /// Between two operands, like `a - b`.
    Binary,
    /// After its operand, like `a++`.
    Postfix,
}

impl OperatorKind {
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Prefix => "prefix",
            OperatorKind::Binary => "binary",
            OperatorKind::Postfix => "postfix",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An identifier chosen by whoever defines the language, so they can tell
/// operators apart in the finished tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperatorId(pub u32);

impl fmt::Display for OperatorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How tightly an operator binds. Lower is tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Priority(pub i32);

impl Priority {
    /// Does an operator with this priority bind tighter than one with
    /// `other`?
    pub fn binds_tighter_than(self, other: Priority) -> bool {
        self.0 < other.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single operator definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    id: OperatorId,
    kind: OperatorKind,
    parts: Vec<String>,
    priority: Priority,
}

impl Operator {
    pub fn new(
        id: OperatorId,
        kind: OperatorKind,
        parts: Vec<String>,
        priority: Priority,
    ) -> Self {
        Operator {
            id,
            kind,
            parts,
            priority,
        }
    }

    pub fn id(&self) -> OperatorId {
        self.id
    }

    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    /// The name parts, in the order they must appear.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// The parts joined with single spaces, for messages.
    pub fn spelling(&self) -> String {
        self.parts.join(" ")
    }
}

/// A dictionary-like value for keeping track of which operators are defined,
/// and what kind of use they support.
///
/// Definition order is kept, as it's the final tie-breaker when two operators
/// match the same text equally well.
#[derive(Debug, Default, Clone)]
pub struct OperatorTable {
    defined: Vec<Operator>,
}

impl OperatorTable {
    /// Define a new operator.
    pub fn define(&mut self, operator: Operator) {
        self.defined.push(operator);
    }

    pub fn len(&self) -> usize {
        self.defined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defined.is_empty()
    }

    /// All operators, in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Operator> {
        self.defined.iter()
    }

    /// The operators usable in one position.
    pub fn of_kind(&self, kind: OperatorKind) -> impl Iterator<Item = &Operator> {
        self.defined.iter().filter(move |o| o.kind == kind)
    }

    pub fn get(&self, id: OperatorId) -> Option<&Operator> {
        self.defined.iter().find(|o| o.id == id)
    }

    /// Is some spelling (parts joined by single spaces) defined for prefix
    /// use?
    pub fn is_prefix(&self, spelling: &str) -> bool {
        self.is_defined(OperatorKind::Prefix, spelling)
    }

    /// Is some spelling defined for binary use?
    pub fn is_binary(&self, spelling: &str) -> bool {
        self.is_defined(OperatorKind::Binary, spelling)
    }

    /// Is some spelling defined for postfix use?
    pub fn is_postfix(&self, spelling: &str) -> bool {
        self.is_defined(OperatorKind::Postfix, spelling)
    }

    fn is_defined(&self, kind: OperatorKind, spelling: &str) -> bool {
        self.of_kind(kind).any(|o| o.spelling() == spelling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> OperatorTable {
        let mut table = OperatorTable::default();
        for (id, kind, parts, priority) in [
            (1, OperatorKind::Prefix, vec!["-"], 5),
            (2, OperatorKind::Binary, vec!["-"], 20),
            (3, OperatorKind::Postfix, vec!["is", "null"], 40),
        ] {
            table.define(Operator::new(
                OperatorId(id),
                kind,
                parts.into_iter().map(String::from).collect(),
                Priority(priority),
            ));
        }
        table
    }

    #[test]
    fn lookups() {
        let table = table();
        assert!(table.is_prefix("-"));
        assert!(table.is_binary("-"));
        assert!(!table.is_postfix("-"));
        assert!(table.is_postfix("is null"));
        assert_eq!(table.of_kind(OperatorKind::Binary).count(), 1);
        assert_eq!(table.get(OperatorId(3)).map(Operator::spelling), Some("is null".into()));
    }

    #[test]
    fn lower_binds_tighter() {
        assert!(Priority(5).binds_tighter_than(Priority(20)));
        assert!(!Priority(20).binds_tighter_than(Priority(20)));
    }
}
