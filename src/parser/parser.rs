//! Statement parser
//!
//! This module provides the [`Parser`] struct and the [`parse`] entry point.
//!
//! # Parser Architecture
//!
//! The parser works on the raw source text, not on the lexer's token stream.
//! It strips comments, splits the remainder on `;`, and matches every
//! non-empty fragment against `<type> <identifier> = <expression>`.  Each
//! phase therefore derives its own error messages from the same input.
//!
//! Comment stripping is plain text substitution: a `//` or `/*` inside a
//! string literal is treated as a comment too.

use crate::parser::ast::*;
use crate::parser::grammar::{is_primitive_type, IDENTIFIER};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//[^\n]*|/\*[\s\S]*?\*/").expect("comment pattern must compile"));

static STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(\S+)\s+(\S+?)\s*=\s*(.+)$").expect("statement pattern must compile")
});

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error: {message}")]
pub struct SyntaxError {
    pub message: String,
}

impl SyntaxError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parse `source` into a `Program` tree in one call.
pub fn parse(source: &str) -> Result<AstNode, SyntaxError> {
    Parser::new(source).parse_program()
}

/// Parser for the declaration language
pub struct Parser<'a> {
    source: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Parse the entire program. The first malformed statement aborts parsing.
    pub fn parse_program(&mut self) -> Result<AstNode, SyntaxError> {
        let stripped = COMMENT.replace_all(self.source, " ");

        let mut declarations = Vec::new();
        for fragment in stripped.split(';').map(str::trim).filter(|f| !f.is_empty()) {
            let decl = Self::parse_statement(fragment)?;
            declarations.push(AstNode::VariableDeclaration(decl));
        }

        log::debug!("parsed {} declaration(s)", declarations.len());
        Ok(AstNode::program(declarations))
    }

    /// Parse one `;`-free fragment: `type identifier = expression`
    fn parse_statement(fragment: &str) -> Result<VariableDeclaration, SyntaxError> {
        let caps = STATEMENT.captures(fragment).ok_or_else(|| {
            SyntaxError::new(format!(
                "invalid statement '{}', expected `type identifier = value;`",
                fragment
            ))
        })?;

        let declared_type = &caps[1];
        let identifier = &caps[2];
        let expression = &caps[3];

        if !is_primitive_type(declared_type) {
            return Err(SyntaxError::new(format!(
                "'{}' is not a valid type",
                declared_type
            )));
        }

        if identifier.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(SyntaxError::new(format!(
                "identifier '{}' cannot start with a digit",
                identifier
            )));
        }

        if !IDENTIFIER.is_match(identifier) {
            return Err(SyntaxError::new(format!(
                "'{}' is not a valid identifier",
                identifier
            )));
        }

        Ok(VariableDeclaration::new(declared_type, identifier, expression))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decl(ty: &str, id: &str, expr: &str) -> AstNode {
        AstNode::VariableDeclaration(VariableDeclaration::new(ty, id, expr))
    }

    #[test]
    fn test_parse_single_declaration() {
        let program = parse("int x = 5;").unwrap();
        assert_eq!(program, AstNode::program(vec![decl("int", "x", "5")]));
    }

    #[test]
    fn test_parse_multiple_declarations_in_order() {
        let source = "int a = 1;\ndouble b = 2.5;\nString s = \"hi\";";
        let program = parse(source).unwrap();
        assert_eq!(
            program,
            AstNode::program(vec![
                decl("int", "a", "1"),
                decl("double", "b", "2.5"),
                decl("String", "s", "\"hi\""),
            ])
        );
    }

    #[test]
    fn test_parse_empty_source() {
        let program = parse("  // only a comment\n/* and a block */ ;; ").unwrap();
        assert_eq!(
            program,
            AstNode::Program {
                children: vec![AstNode::Empty]
            }
        );
    }

    #[test]
    fn test_expression_is_kept_verbatim() {
        let program = parse("int x = a  +  b;").unwrap();
        let decl = program.declarations().next().unwrap();
        assert_eq!(decl.expression, "a  +  b");
    }

    #[test]
    fn test_missing_semicolon_on_last_statement() {
        let program = parse("int x = 5").unwrap();
        assert_eq!(program.declarations().count(), 1);
    }

    #[test]
    fn test_invalid_statement() {
        let err = parse("int x 5;").unwrap_err();
        assert!(err.message.starts_with("invalid statement"));

        let err = parse("int x = ;").unwrap_err();
        assert!(err.message.starts_with("invalid statement"));
    }

    #[test]
    fn test_invalid_type() {
        let err = parse("integer x = 5;").unwrap_err();
        assert_eq!(err.message, "'integer' is not a valid type");
    }

    #[test]
    fn test_identifier_starting_with_digit() {
        let err = parse("int 1x = 5;").unwrap_err();
        assert_eq!(err.message, "identifier '1x' cannot start with a digit");
    }

    #[test]
    fn test_invalid_identifier() {
        let err = parse("int x$ = 5;").unwrap_err();
        assert_eq!(err.message, "'x$' is not a valid identifier");
    }

    #[test]
    fn test_first_error_aborts() {
        let err = parse("int a = 1; bogus b = 2; int 9c = 3;").unwrap_err();
        assert_eq!(err.message, "'bogus' is not a valid type");
    }

    #[test]
    fn test_comment_inside_string_is_stripped() {
        // Comment stripping is not literal-aware.
        // The rest of the first line disappears, so the next statement is
        // swallowed into the string's expression.
        let program = parse("String s = \"a // b\";\nint x = 1;").unwrap();
        let decls: Vec<_> = program.declarations().collect();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].expression, "\"a  \nint x = 1");
    }
}
