//! Grammar tables shared by the lexer, parser and semantic checker
//!
//! Everything here is read-only.  The pattern tables are compiled once on
//! first use and may be shared across threads.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

/// Primitive type names accepted in declarations.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "byte", "short", "int", "long", "float", "double", "char", "boolean", "String",
];

pub const BOOLEAN_LITERALS: &[&str] = &["true", "false"];

pub const OPERATORS: &[char] = &['='];

pub const PUNCTUATION: &[char] = &[';', ','];

/// Reserved words: the primitive type names plus the boolean literals.
pub static KEYWORDS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    PRIMITIVE_TYPES
        .iter()
        .chain(BOOLEAN_LITERALS.iter())
        .copied()
        .collect()
});

pub fn is_primitive_type(word: &str) -> bool {
    PRIMITIVE_TYPES.contains(&word)
}

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word)
}

/// Lexical productions, in the order they are tried at each position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    StringLiteral,
    CharLiteral,
    FloatWithSuffix,
    FloatPlain,
    IntegerWithSuffix,
    IntegerPlain,
    Word,
    Symbol,
}

fn anchored(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{})", pattern)).expect("grammar pattern must compile")
}

/// Ordered token-pattern precedence. Each regex is anchored at the slice start.
pub static TOKEN_PATTERNS: Lazy<Vec<(Production, Regex)>> = Lazy::new(|| {
    vec![
        (Production::StringLiteral, anchored(r#""(?:\\.|[^"\\\n])*""#)),
        (Production::CharLiteral, anchored(r"'(?:\\.|[^'\\\n])*'")),
        (
            Production::FloatWithSuffix,
            anchored(r"-?(?:\d+\.\d*|\.\d+|\d+)[fFdD]"),
        ),
        (Production::FloatPlain, anchored(r"-?(?:\d+\.\d*|\.\d+)")),
        (Production::IntegerWithSuffix, anchored(r"-?\d+[lL]")),
        (Production::IntegerPlain, anchored(r"-?\d+")),
        (Production::Word, anchored(r"[A-Za-z_][A-Za-z0-9_]*")),
        (Production::Symbol, anchored(r"[=;,]")),
    ]
});

/// Whole-text identifier shape used by the parser.
pub static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern must compile"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_cover_types_and_booleans() {
        for ty in PRIMITIVE_TYPES {
            assert!(is_keyword(ty));
        }
        assert!(is_keyword("true"));
        assert!(is_keyword("false"));
        assert!(!is_keyword("x"));
        assert!(!is_keyword("Int"));
    }

    #[test]
    fn test_symbol_tables_match_symbol_pattern() {
        let (_, symbol) = TOKEN_PATTERNS
            .iter()
            .find(|(production, _)| *production == Production::Symbol)
            .unwrap();
        for c in OPERATORS.iter().chain(PUNCTUATION.iter()) {
            assert!(symbol.is_match(&c.to_string()));
        }
        assert!(!symbol.is_match("+"));
    }

    #[test]
    fn test_float_suffix_wins_over_plain_integer() {
        let first_match = |text: &str| {
            TOKEN_PATTERNS
                .iter()
                .find(|(_, re)| re.is_match(text))
                .map(|(production, _)| *production)
        };
        assert_eq!(first_match("1.5f"), Some(Production::FloatWithSuffix));
        assert_eq!(first_match("1.5"), Some(Production::FloatPlain));
        assert_eq!(first_match("10L"), Some(Production::IntegerWithSuffix));
        assert_eq!(first_match("-42"), Some(Production::IntegerPlain));
        assert_eq!(first_match("name"), Some(Production::Word));
    }
}
