//! The demo language's definition.

use parser::{
    language::{LanguageBuilder, LanguageDefinition, LanguageRegistry, RegistryError, ValidationError},
    operator::OperatorKind,
};

use crate::{
    ids::{keyword, numeric, operator},
    metadata, pragma, where_clause,
};

/// The name the demo language is registered under.
pub const DEMO: &str = "demo";

/// The demo language, before it's built.
///
/// Lower priorities bind tighter, so `.` (0) binds before `*` (10), which
/// binds before `+` (20), and assignment (60) binds last.
pub fn builder() -> LanguageBuilder {
    LanguageBuilder::new(DEMO)
        .comments("//", "/*", "*/")
        .code_block("{", "}")
        .separator(';')
        .text_delimiter('\'')
        .text_delimiter('"')
        .text_delimiter('`')
        .numeric(numeric::HEX, &[r"^0[xX][0-9a-fA-F]+"])
        .numeric(
            numeric::FLOAT,
            &[r"^\d+\.\d+([eE][+-]?\d+)?", r"^\d+[eE][+-]?\d+"],
        )
        .numeric(numeric::INTEGER, &[r"^\d+"])
        .keyword(keyword::IF, "if")
        .keyword(keyword::ELSE, "else")
        .keyword(keyword::WHILE, "while")
        .keyword(keyword::RETURN, "return")
        .keyword(keyword::VAR, "var")
        .keyword(keyword::LET, "let")
        .keyword(keyword::CONST, "const")
        .keyword(keyword::PUBLIC, "public")
        .keyword(keyword::PRIVATE, "private")
        .keyword(keyword::STATIC, "static")
        .keyword(keyword::NEW, "new")
        .keyword(keyword::FUNCTION, "function")
        .keyword(keyword::WHERE, "where")
        .keyword(keyword::PRAGMA, "::pragma")
        .keyword(keyword::METADATA, "::metadata")
        .binary(operator::DOT, ".", 0)
        .binary(operator::SAFE_DOT, "?.", 0)
        .postfix(operator::POST_INCREMENT, "++", 2)
        .postfix(operator::POST_DECREMENT, "--", 2)
        .prefix(operator::NEGATE, "-", 5)
        .prefix(operator::PLUS, "+", 5)
        .prefix(operator::NOT, "!", 5)
        .prefix(operator::COMPLEMENT, "~", 5)
        .prefix(operator::PRE_INCREMENT, "++", 5)
        .prefix(operator::PRE_DECREMENT, "--", 5)
        .prefix(operator::TYPEOF, "typeof", 5)
        .binary(operator::MULTIPLY, "*", 10)
        .binary(operator::DIVIDE, "/", 10)
        .binary(operator::REMAINDER, "%", 10)
        .binary(operator::ADD, "+", 20)
        .binary(operator::SUBTRACT, "-", 20)
        .binary(operator::SHIFT_LEFT, "<<", 25)
        .binary(operator::SHIFT_RIGHT, ">>", 25)
        .binary(operator::LESS, "<", 30)
        .binary(operator::GREATER, ">", 30)
        .binary(operator::LESS_EQUAL, "<=", 30)
        .binary(operator::GREATER_EQUAL, ">=", 30)
        .binary(operator::IN, "in", 30)
        .operator(operator::IS_NULL, OperatorKind::Postfix, &["is", "null"], 30)
        .operator(
            operator::IS_NOT_NULL,
            OperatorKind::Postfix,
            &["is", "not", "null"],
            30,
        )
        .binary(operator::EQUAL, "==", 35)
        .binary(operator::NOT_EQUAL, "!=", 35)
        .binary(operator::AND, "&&", 40)
        .binary(operator::AND_WORD, "and", 40)
        .binary(operator::OR, "||", 45)
        .binary(operator::OR_WORD, "or", 45)
        .binary(operator::COALESCE, "??", 50)
        .binary(operator::ASSIGN, "=", 60)
        .binary(operator::ADD_ASSIGN, "+=", 60)
        .binary(operator::SUBTRACT_ASSIGN, "-=", 60)
        .custom_parser(keyword::WHERE, where_clause::parse)
        .custom_parser(keyword::PRAGMA, pragma::parse)
        .custom_parser(keyword::METADATA, metadata::parse)
}

/// The demo language, built.
pub fn demo_language() -> Result<LanguageDefinition, ValidationError> {
    builder().build()
}

/// A registry holding just the demo language.
pub fn registry() -> Result<LanguageRegistry, RegistryError> {
    let registry = LanguageRegistry::new();
    registry.register(builder())?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_language_is_valid() {
        let language = demo_language().unwrap();
        assert_eq!(language.name(), DEMO);
        assert!(language.keyword(keyword::WHERE).is_some());
        assert_eq!(language.custom_parsers(keyword::PRAGMA).len(), 1);
        assert!(language.custom_parsers(keyword::IF).is_empty());
    }

    #[test]
    fn registry_has_the_demo_language() {
        let registry = registry().unwrap();
        assert_eq!(registry.names(), vec![DEMO.to_string()]);
        assert!(registry.get(DEMO).is_some());
    }
}
