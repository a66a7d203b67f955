//! Lexer (tokenizer) for declaration source text
//!
//! Converts raw source text into a flat [`Token`] stream with exact byte
//! offsets.  Lexing happens in two passes:
//!
//! 1. A pre-scan marks every byte that belongs to whitespace, a `//` line
//!    comment, or a terminated `/* ... */` block comment.  String and char
//!    literals are stepped over so comment markers inside them stay literal
//!    text.  An unterminated `/*` is left unmarked and later rejected as an
//!    invalid character at the opening `/`.
//! 2. The scan tries the ordered productions of [`TOKEN_PATTERNS`] at every
//!    unmarked position.  A marked position never starts a token, and a
//!    position that no production claims is rejected, so every byte of the
//!    input ends up either ignored or inside exactly one token.

use super::ast::SourceLocation;
use super::grammar::{is_keyword, Production, BOOLEAN_LITERALS, OPERATORS, TOKEN_PATTERNS};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Token categories produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword,
    String,
    Char,
    Number,
    Boolean,
    Operator,
    Punctuation,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::String => "string",
            TokenKind::Char => "char",
            TokenKind::Number => "number",
            TokenKind::Boolean => "boolean",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
        };
        f.write_str(name)
    }
}

/// A lexeme with its kind and half-open byte span in the original source.
///
/// `&source[start..end] == lexeme` holds for every token the lexer returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}' [{}..{})", self.kind, self.lexeme, self.start, self.end)
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexical error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct LexicalError {
    pub message: String,
    pub location: SourceLocation,
}

impl LexicalError {
    fn at(source: &str, offset: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: SourceLocation::from_offset(source, offset),
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

/// Tokenize `source` in one call.
pub fn lex(source: &str) -> Result<Vec<Token>, LexicalError> {
    Lexer::new(source).tokenize()
}

/// Lexer for declaration source text
pub struct Lexer<'a> {
    source: &'a str,
    /// One flag per byte: consumed by whitespace or a comment.
    ignored: Vec<bool>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            ignored: vec![false; source.len()],
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexicalError> {
        self.mark_ignored();

        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < self.source.len() {
            if self.ignored[pos] {
                pos += 1;
                continue;
            }

            let token = self.next_token(pos)?;
            pos = token.end;
            tokens.push(token);
        }

        log::debug!("lexed {} token(s) from {} byte(s)", tokens.len(), self.source.len());
        Ok(tokens)
    }

    /// Match the first production that applies at `pos` and classify it.
    fn next_token(&self, pos: usize) -> Result<Token, LexicalError> {
        let rest = &self.source[pos..];

        let matched = TOKEN_PATTERNS
            .iter()
            .find_map(|(production, re)| re.find(rest).map(|m| (*production, m.end())));

        let Some((production, len)) = matched else {
            return Err(self.unmatched_character(pos));
        };

        let end = pos + len;
        let lexeme = &self.source[pos..end];
        let kind = self.classify(production, lexeme, pos)?;

        Ok(Token {
            kind,
            lexeme: lexeme.to_string(),
            start: pos,
            end,
        })
    }

    fn classify(
        &self,
        production: Production,
        lexeme: &str,
        pos: usize,
    ) -> Result<TokenKind, LexicalError> {
        let kind = match production {
            Production::StringLiteral => TokenKind::String,
            Production::CharLiteral => {
                let content = &lexeme[1..lexeme.len() - 1];
                if !is_single_char(content) {
                    return Err(LexicalError::at(
                        self.source,
                        pos,
                        format!(
                            "invalid character literal {}: character literals may hold only one character",
                            lexeme
                        ),
                    ));
                }
                TokenKind::Char
            }
            Production::FloatWithSuffix
            | Production::FloatPlain
            | Production::IntegerWithSuffix
            | Production::IntegerPlain => TokenKind::Number,
            Production::Word => {
                if BOOLEAN_LITERALS.contains(&lexeme) {
                    TokenKind::Boolean
                } else if is_keyword(lexeme) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Identifier
                }
            }
            Production::Symbol => {
                if lexeme.chars().all(|c| OPERATORS.contains(&c)) {
                    TokenKind::Operator
                } else {
                    TokenKind::Punctuation
                }
            }
        };
        Ok(kind)
    }

    fn unmatched_character(&self, pos: usize) -> LexicalError {
        let ch = self.source[pos..].chars().next().unwrap_or('\0');
        let message = match ch {
            '"' => "unterminated string literal".to_string(),
            '\'' => "unterminated character literal".to_string(),
            '/' if self.source[pos..].starts_with("/*") => "unterminated block comment".to_string(),
            _ => format!("invalid character '{}'", ch),
        };
        LexicalError::at(self.source, pos, message)
    }

    /// Pre-scan: mark whitespace and comments, stepping over quoted literals.
    fn mark_ignored(&mut self) {
        let source = self.source;
        let mut pos = 0;

        while let Some(ch) = source[pos..].chars().next() {
            let rest = &source[pos..];

            if ch == '"' || ch == '\'' {
                pos = skip_literal(source, pos, ch);
            } else if rest.starts_with("//") {
                let end = rest.find('\n').map_or(source.len(), |nl| pos + nl);
                self.mark(pos..end);
                pos = end;
            } else if rest.starts_with("/*") {
                match rest[2..].find("*/") {
                    Some(close) => {
                        let end = pos + 2 + close + 2;
                        self.mark(pos..end);
                        pos = end;
                    }
                    // Unterminated: left unmarked for the scan to reject.
                    None => pos += 1,
                }
            } else if ch.is_whitespace() {
                self.mark(pos..pos + ch.len_utf8());
                pos += ch.len_utf8();
            } else {
                pos += ch.len_utf8();
            }
        }
    }

    fn mark(&mut self, range: Range<usize>) {
        for flag in &mut self.ignored[range] {
            *flag = true;
        }
    }
}

/// Content of a char literal must be one raw character or a two-character
/// backslash escape.
fn is_single_char(content: &str) -> bool {
    let mut chars = content.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some('\\'), Some(_), None) => true,
        (Some(c), None, None) => c != '\\',
        _ => false,
    }
}

/// Return the offset just past the literal opened at `start`, or just past the
/// opening quote if the literal is not closed on the same line.
fn skip_literal(source: &str, start: usize, quote: char) -> usize {
    let mut chars = source[start + 1..].char_indices();
    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '\n' => break,
            c if c == quote => return start + 1 + i + 1,
            _ => {}
        }
    }
    start + quote.len_utf8()
}
