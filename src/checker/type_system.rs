//! Literal type inference and type compatibility
//!
//! This module provides the two rules the semantic checker relies on:
//!
//! - [`infer`]: the primitive type of a literal expression, if it is one
//! - [`compatible`]: whether a value of the inferred type may initialize a
//!   variable of the declared type without an explicit cast
//!
//! # Type Inference Rules
//!
//! Patterns are tried in order: boolean, string, char, float (`f`/`F`),
//! double (decimal point with optional `d`/`D`, or digits with `d`/`D`),
//! long (`l`/`L`), then bare integers.  A bare integer takes the narrowest of
//! `byte`, `short`, `int` that holds it and falls back to `long`.
//!
//! # Widening Rules
//!
//! Numeric types widen along `byte < short < int < long < float < double`.
//! `char` widens to `int`, `long`, `float` and `double` but not to `byte` or
//! `short`.  `boolean` and `String` only accept themselves.

use crate::parser::grammar::is_primitive_type;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Primitive types of the declaration language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Boolean,
    String,
}

impl PrimitiveType {
    /// Look up a type by its source spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        if !is_primitive_type(name) {
            return None;
        }
        let ty = match name {
            "byte" => PrimitiveType::Byte,
            "short" => PrimitiveType::Short,
            "int" => PrimitiveType::Int,
            "long" => PrimitiveType::Long,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "char" => PrimitiveType::Char,
            "boolean" => PrimitiveType::Boolean,
            "String" => PrimitiveType::String,
            _ => return None,
        };
        Some(ty)
    }

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::Char => "char",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::String => "String",
        }
    }

    /// Position on the numeric widening ladder, `None` for non-numeric types.
    fn numeric_rank(self) -> Option<u8> {
        match self {
            PrimitiveType::Byte => Some(0),
            PrimitiveType::Short => Some(1),
            PrimitiveType::Int => Some(2),
            PrimitiveType::Long => Some(3),
            PrimitiveType::Float => Some(4),
            PrimitiveType::Double => Some(5),
            PrimitiveType::Char | PrimitiveType::Boolean | PrimitiveType::String => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn literal(pattern: &str) -> Regex {
    Regex::new(&format!("^(?:{})$", pattern)).expect("literal pattern must compile")
}

static BOOLEAN: Lazy<Regex> = Lazy::new(|| literal("true|false"));
static STRING: Lazy<Regex> = Lazy::new(|| literal(r#""(?:\\.|[^"\\])*""#));
static CHAR: Lazy<Regex> = Lazy::new(|| literal(r"'(?:\\.|[^'\\])'"));
static FLOAT: Lazy<Regex> = Lazy::new(|| literal(r"-?(?:\d+\.\d*|\.\d+|\d+)[fF]"));
static DOUBLE: Lazy<Regex> = Lazy::new(|| literal(r"-?(?:(?:\d+\.\d*|\.\d+)[dD]?|\d+[dD])"));
static LONG: Lazy<Regex> = Lazy::new(|| literal(r"-?\d+[lL]"));
static INTEGER: Lazy<Regex> = Lazy::new(|| literal(r"-?\d+"));

/// Infer the type of a literal expression
///
/// Returns `None` for anything that is not a literal (names, arithmetic,
/// calls); such expressions cannot be verified and are accepted as-is.
pub fn infer(expression: &str) -> Option<PrimitiveType> {
    let expr = expression.trim();

    if BOOLEAN.is_match(expr) {
        Some(PrimitiveType::Boolean)
    } else if STRING.is_match(expr) {
        Some(PrimitiveType::String)
    } else if CHAR.is_match(expr) {
        Some(PrimitiveType::Char)
    } else if FLOAT.is_match(expr) {
        Some(PrimitiveType::Float)
    } else if DOUBLE.is_match(expr) {
        Some(PrimitiveType::Double)
    } else if LONG.is_match(expr) {
        Some(PrimitiveType::Long)
    } else if INTEGER.is_match(expr) {
        Some(narrowest_integer(expr))
    } else {
        None
    }
}

/// Narrow a bare integer literal to the smallest type whose range holds it.
fn narrowest_integer(digits: &str) -> PrimitiveType {
    // Beyond i128 is certainly beyond int.
    let Ok(value) = digits.parse::<i128>() else {
        return PrimitiveType::Long;
    };

    if (i8::MIN as i128..=i8::MAX as i128).contains(&value) {
        PrimitiveType::Byte
    } else if (i16::MIN as i128..=i16::MAX as i128).contains(&value) {
        PrimitiveType::Short
    } else if (i32::MIN as i128..=i32::MAX as i128).contains(&value) {
        PrimitiveType::Int
    } else {
        PrimitiveType::Long
    }
}

/// Check whether a value of type `inferred` may initialize a `declared` variable.
pub fn compatible(declared: PrimitiveType, inferred: PrimitiveType) -> bool {
    if declared == inferred {
        return true;
    }

    if let (Some(to), Some(from)) = (declared.numeric_rank(), inferred.numeric_rank()) {
        return to >= from;
    }

    inferred == PrimitiveType::Char
        && matches!(
            declared,
            PrimitiveType::Int | PrimitiveType::Long | PrimitiveType::Float | PrimitiveType::Double
        )
}

#[cfg(test)]
mod tests {
    use super::PrimitiveType::*;
    use super::*;

    #[test]
    fn test_infer_literals() {
        assert_eq!(infer("true"), Some(Boolean));
        assert_eq!(infer("false"), Some(Boolean));
        assert_eq!(infer(r#""hello""#), Some(String));
        assert_eq!(infer(r#""say \"hi\"""#), Some(String));
        assert_eq!(infer("'a'"), Some(Char));
        assert_eq!(infer(r"'\n'"), Some(Char));
        assert_eq!(infer("1.5f"), Some(Float));
        assert_eq!(infer("2F"), Some(Float));
        assert_eq!(infer("3.14"), Some(Double));
        assert_eq!(infer("3.14D"), Some(Double));
        assert_eq!(infer(".5"), Some(Double));
        assert_eq!(infer("2d"), Some(Double));
        assert_eq!(infer("10L"), Some(Long));
    }

    #[test]
    fn test_integer_narrowing() {
        assert_eq!(infer("5"), Some(Byte));
        assert_eq!(infer("127"), Some(Byte));
        assert_eq!(infer("-128"), Some(Byte));
        assert_eq!(infer("128"), Some(Short));
        assert_eq!(infer("300"), Some(Short));
        assert_eq!(infer("-32769"), Some(Int));
        assert_eq!(infer("2147483647"), Some(Int));
        assert_eq!(infer("2147483648"), Some(Long));
        assert_eq!(infer("-2147483648"), Some(Int));
        assert_eq!(infer("999999999999999999999999999999999999999999"), Some(Long));
    }

    #[test]
    fn test_non_literals() {
        assert_eq!(infer("x"), None);
        assert_eq!(infer("a + b"), None);
        assert_eq!(infer("'ab'"), None);
        assert_eq!(infer("1.2.3"), None);
        assert_eq!(infer(""), None);
    }

    #[test]
    fn test_numeric_widening() {
        assert!(compatible(Int, Byte));
        assert!(compatible(Float, Int));
        assert!(compatible(Double, Float));
        assert!(compatible(Long, Long));
        assert!(!compatible(Int, Double));
        assert!(!compatible(Byte, Short));
        assert!(!compatible(Long, Float));
    }

    #[test]
    fn test_char_widening() {
        assert!(compatible(Char, Char));
        assert!(compatible(Int, Char));
        assert!(compatible(Double, Char));
        assert!(!compatible(Short, Char));
        assert!(!compatible(Byte, Char));
        assert!(!compatible(Char, Byte));
    }

    #[test]
    fn test_non_numeric_types() {
        assert!(compatible(Boolean, Boolean));
        assert!(compatible(String, String));
        assert!(!compatible(String, Char));
        assert!(!compatible(Boolean, Byte));
        assert!(!compatible(Int, Boolean));
    }

    #[test]
    fn test_from_name_round_trips_display() {
        for name in crate::parser::grammar::PRIMITIVE_TYPES {
            let ty = PrimitiveType::from_name(name).unwrap();
            assert_eq!(ty.to_string(), *name);
        }
        assert_eq!(PrimitiveType::from_name("Integer"), None);
    }
}
