//! The ids the demo language gives its keywords, numbers and operators.

/// Keyword ids.
pub mod keyword {
    use parser::language::KeywordId;

    pub const IF: KeywordId = KeywordId(1);
    pub const ELSE: KeywordId = KeywordId(2);
    pub const WHILE: KeywordId = KeywordId(3);
    pub const RETURN: KeywordId = KeywordId(4);
    pub const VAR: KeywordId = KeywordId(5);
    pub const LET: KeywordId = KeywordId(6);
    pub const CONST: KeywordId = KeywordId(7);
    pub const PUBLIC: KeywordId = KeywordId(8);
    pub const PRIVATE: KeywordId = KeywordId(9);
    pub const STATIC: KeywordId = KeywordId(10);
    pub const NEW: KeywordId = KeywordId(11);
    pub const FUNCTION: KeywordId = KeywordId(12);

    // These trigger custom items.
    pub const WHERE: KeywordId = KeywordId(20);
    pub const PRAGMA: KeywordId = KeywordId(21);
    pub const METADATA: KeywordId = KeywordId(22);
}

/// Numeric format ids.
pub mod numeric {
    use parser::language::NumericKindId;

    pub const HEX: NumericKindId = NumericKindId(1);
    pub const FLOAT: NumericKindId = NumericKindId(2);
    pub const INTEGER: NumericKindId = NumericKindId(3);
}

/// Operator ids. Where the same spelling is used by more than one kind of
/// operator, the name says which this is.
pub mod operator {
    use parser::operator::OperatorId;

    // member access
    pub const DOT: OperatorId = OperatorId(1);
    pub const SAFE_DOT: OperatorId = OperatorId(2);

    // postfix
    pub const POST_INCREMENT: OperatorId = OperatorId(10);
    pub const POST_DECREMENT: OperatorId = OperatorId(11);
    pub const IS_NULL: OperatorId = OperatorId(12);
    pub const IS_NOT_NULL: OperatorId = OperatorId(13);

    // prefix
    pub const NEGATE: OperatorId = OperatorId(20);
    pub const PLUS: OperatorId = OperatorId(21);
    pub const NOT: OperatorId = OperatorId(22);
    pub const COMPLEMENT: OperatorId = OperatorId(23);
    pub const PRE_INCREMENT: OperatorId = OperatorId(24);
    pub const PRE_DECREMENT: OperatorId = OperatorId(25);
    pub const TYPEOF: OperatorId = OperatorId(26);

    // binary
    pub const MULTIPLY: OperatorId = OperatorId(30);
    pub const DIVIDE: OperatorId = OperatorId(31);
    pub const REMAINDER: OperatorId = OperatorId(32);
    pub const ADD: OperatorId = OperatorId(33);
    pub const SUBTRACT: OperatorId = OperatorId(34);
    pub const SHIFT_LEFT: OperatorId = OperatorId(35);
    pub const SHIFT_RIGHT: OperatorId = OperatorId(36);
    pub const LESS: OperatorId = OperatorId(37);
    pub const GREATER: OperatorId = OperatorId(38);
    pub const LESS_EQUAL: OperatorId = OperatorId(39);
    pub const GREATER_EQUAL: OperatorId = OperatorId(40);
    pub const IN: OperatorId = OperatorId(41);
    pub const EQUAL: OperatorId = OperatorId(42);
    pub const NOT_EQUAL: OperatorId = OperatorId(43);
    pub const AND: OperatorId = OperatorId(44);
    pub const AND_WORD: OperatorId = OperatorId(45);
    pub const OR: OperatorId = OperatorId(46);
    pub const OR_WORD: OperatorId = OperatorId(47);
    pub const COALESCE: OperatorId = OperatorId(48);
    pub const ASSIGN: OperatorId = OperatorId(49);
    pub const ADD_ASSIGN: OperatorId = OperatorId(50);
    pub const SUBTRACT_ASSIGN: OperatorId = OperatorId(51);
}

/// Codes for the errors the custom items report themselves.
pub mod error {
    use parser::ErrorCode;

    /// A `::pragma` whose first argument isn't a name.
    pub const PRAGMA_WITHOUT_NAME: ErrorCode = ErrorCode::Custom(1000);

    /// Something other than an assignment in a `::metadata` block.
    pub const METADATA_NOT_ASSIGNMENT: ErrorCode = ErrorCode::Custom(1001);
}
