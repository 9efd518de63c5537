//! Literal terms and the term-creation rule for raw values.

use serde_json::Value;

use super::Expression;
use crate::dialect::quote_string;
use crate::error::{RenderError, TermError};

/// A numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer literal, rendered without a decimal point.
    Integer(i64),
    /// Float literal, rendered in its shortest round-trip form.
    Float(f64),
}

impl Number {
    /// Renders the number independently of any locale.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NonFiniteNumber`] for NaN and infinities.
    pub fn render(&self) -> Result<String, RenderError> {
        match self {
            Self::Integer(n) => Ok(n.to_string()),
            Self::Float(f) if f.is_finite() => Ok(f.to_string()),
            Self::Float(f) => Err(RenderError::NonFiniteNumber(*f)),
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Number literal.
    Number(Number),
    /// String literal, rendered in single quotes without escaping.
    String(String),
    /// Boolean literal.
    Boolean(bool),
    /// NULL literal.
    Null,
    /// Parenthesized list of expressions.
    List(Vec<Expression>),
}

impl Literal {
    /// Renders the literal.
    ///
    /// # Errors
    ///
    /// Propagates render failures of list elements and non-finite floats.
    pub fn render(&self) -> Result<String, RenderError> {
        match self {
            Self::Number(n) => n.render(),
            Self::String(s) => Ok(quote_string(s)),
            Self::Boolean(true) => Ok(String::from("TRUE")),
            Self::Boolean(false) => Ok(String::from("FALSE")),
            Self::Null => Ok(String::from("NULL")),
            Self::List(items) => {
                let rendered = items
                    .iter()
                    .map(Expression::render)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("({})", rendered.join(", ")))
            }
        }
    }

    /// Builds a literal from a JSON value by type detection.
    ///
    /// Integers and floats become numbers, strings, booleans and null map to
    /// their literal kinds, and arrays become lists of recursively coerced
    /// elements.
    ///
    /// # Errors
    ///
    /// Objects have no literal mapping and fail with
    /// [`TermError::UnsupportedValue`]; unsigned integers above `i64::MAX`
    /// fail with [`TermError::IntegerOutOfRange`].
    pub fn from_json(value: &Value) -> Result<Self, TermError> {
        match value {
            Value::Null => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Boolean(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Number(Number::Integer(i)))
                } else if let Some(u) = n.as_u64() {
                    Err(TermError::IntegerOutOfRange(u))
                } else {
                    n.as_f64()
                        .map(|f| Self::Number(Number::Float(f)))
                        .ok_or_else(|| TermError::UnsupportedValue(n.to_string()))
                }
            }
            Value::String(s) => Ok(Self::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| Self::from_json(item).map(Expression::Literal))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            Value::Object(_) => Err(TermError::UnsupportedValue(format!(
                "object {value} has no literal mapping"
            ))),
        }
    }
}

macro_rules! impl_integer_literal {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::Integer(i64::from(value)))
                }
            }
        )+
    };
}

impl_integer_literal!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Self::Number(Number::Float(value))
    }
}

impl From<f32> for Literal {
    fn from(value: f32) -> Self {
        Self::Number(Number::Float(f64::from(value)))
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::String(String::from(value))
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl TryFrom<u64> for Literal {
    type Error = TermError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .map(|i| Self::Number(Number::Integer(i)))
            .map_err(|_| TermError::IntegerOutOfRange(value))
    }
}

impl TryFrom<usize> for Literal {
    type Error = TermError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        // usize is at most 64 bits on supported targets
        Self::try_from(value as u64)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_render_numbers() {
        assert_eq!(Literal::from(42).render().unwrap(), "42");
        assert_eq!(Literal::from(-7_i64).render().unwrap(), "-7");
        assert_eq!(Literal::from(-12.34).render().unwrap(), "-12.34");
        assert_eq!(Literal::from(0.5).render().unwrap(), "0.5");
        assert_eq!(Literal::from(3.0).render().unwrap(), "3");
    }

    #[test]
    fn test_render_non_finite_float_fails() {
        assert!(matches!(
            Literal::from(f64::NAN).render(),
            Err(RenderError::NonFiniteNumber(_))
        ));
        assert!(Literal::from(f64::INFINITY).render().is_err());
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(Literal::from("foo").render().unwrap(), "'foo'");
        assert_eq!(Literal::from(true).render().unwrap(), "TRUE");
        assert_eq!(Literal::from(false).render().unwrap(), "FALSE");
        assert_eq!(Literal::Null.render().unwrap(), "NULL");
    }

    #[test]
    fn test_render_lists() {
        let list = Literal::List(vec![Expression::from(1), Expression::from(2)]);
        assert_eq!(list.render().unwrap(), "(1, 2)");
        assert_eq!(Literal::List(vec![]).render().unwrap(), "()");
    }

    #[test]
    fn test_from_json_detects_kind() {
        assert_eq!(Literal::from_json(&json!(null)).unwrap(), Literal::Null);
        assert_eq!(
            Literal::from_json(&json!(12)).unwrap(),
            Literal::Number(Number::Integer(12))
        );
        assert_eq!(
            Literal::from_json(&json!(-12.34)).unwrap(),
            Literal::Number(Number::Float(-12.34))
        );
        assert_eq!(
            Literal::from_json(&json!("x")).unwrap(),
            Literal::String(String::from("x"))
        );
        assert_eq!(
            Literal::from_json(&json!([1, [true]])).unwrap().render().unwrap(),
            "(1, (TRUE))"
        );
    }

    #[test]
    fn test_from_json_rejects_objects() {
        let err = Literal::from_json(&json!({"a": 1})).unwrap_err();
        assert!(matches!(err, TermError::UnsupportedValue(_)));
        assert!(Literal::from_json(&json!([1, {"a": 1}])).is_err());
    }

    #[test]
    fn test_from_json_rejects_huge_integers() {
        assert_eq!(
            Literal::from_json(&json!(u64::MAX)).unwrap_err(),
            TermError::IntegerOutOfRange(u64::MAX)
        );
    }

    #[test]
    fn test_try_from_unsigned() {
        assert!(Literal::try_from(5_u64).is_ok());
        assert!(Literal::try_from(u64::MAX).is_err());
        assert!(Literal::try_from(3_usize).is_ok());
    }
}
