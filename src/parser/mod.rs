//! Lexical and syntax phases
//!
//! This module turns declaration source text into tokens and a syntax tree:
//! - [`grammar`]: Shared read-only tables (types, keywords, token patterns)
//! - [`lexer`]: Tokenization (source text → tokens with byte spans)
//! - [`parser`]: Parsing (source text → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported Language
//!
//! Every statement has the form `<type> <identifier> = <expression>;` where
//! the type is one of `byte`, `short`, `int`, `long`, `float`, `double`,
//! `char`, `boolean` or `String`.  `//` and `/* */` comments are allowed
//! anywhere.  There is no control flow and only one declarator per statement.
//!
//! # Phase Independence
//!
//! The parser does not consume the lexer's tokens.  Both phases read the raw
//! source, so each reports its own errors even when called alone.

pub mod ast;
pub mod grammar;
pub mod lexer;
pub mod parser;
