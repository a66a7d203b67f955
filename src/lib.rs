//! # Introduction
//!
//! declcheck analyzes a small declaration language in which every statement
//! reads `<type> <identifier> = <expression>;`.  Three independent phases
//! report on the same source text, and a terminal UI built with
//! [ratatui](https://docs.rs/ratatui) shows their output side by side.
//!
//! ## Analysis pipeline
//!
//! ```text
//! Source → Lexer  → Tokens
//! Source → Parser → AST → Checker → Findings
//! ```
//!
//! 1. [`parser`]: the lexical phase ([`lex`]) and syntax phase ([`parse`]).
//!    Both read the raw source; the parser does not consume tokens.
//! 2. [`checker`]: the semantic phase ([`check`]): declared types, duplicate
//!    names, and literal-to-type widening.
//! 3. [`pipeline`]: runs the phases in order, stopping at the first failure,
//!    and runs `.decl` fixtures against expected outcomes.
//! 4. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! let tokens = declcheck::lex("int x = 5;").unwrap();
//! assert_eq!(tokens.len(), 5);
//!
//! let ast = declcheck::parse("int x = 3.14;").unwrap();
//! let findings = declcheck::check(&ast);
//! assert!(findings.iter().any(|f| f.is_error()));
//! ```

pub mod checker;
pub mod parser;
pub mod pipeline;
pub mod ui;

pub use checker::findings::{Level, SemanticFinding};
pub use checker::semantic::check;
pub use parser::ast::AstNode;
pub use parser::lexer::{lex, LexicalError, Token, TokenKind};
pub use parser::parser::{parse, SyntaxError};
