//! Unary and binary operators.

use std::fmt;
use std::str::FromStr;

use crate::error::TermError;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    NullSafeEq,

    // Logical
    And,
    Or,
    Xor,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,

    // Pattern matching
    Like,
    NotLike,
    Regexp,
    NotRegexp,

    // Membership and identity
    In,
    NotIn,
    Is,
    IsNot,
}

impl BinaryOperator {
    /// Every operator, in declaration order.
    pub const ALL: [Self; 28] = [
        Self::Eq,
        Self::NotEq,
        Self::Lt,
        Self::LtEq,
        Self::Gt,
        Self::GtEq,
        Self::NullSafeEq,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::LeftShift,
        Self::RightShift,
        Self::Like,
        Self::NotLike,
        Self::Regexp,
        Self::NotRegexp,
        Self::In,
        Self::NotIn,
        Self::Is,
        Self::IsNot,
    ];

    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::NullSafeEq => "<=>",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Regexp => "REGEXP",
            Self::NotRegexp => "NOT REGEXP",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BinaryOperator {
    type Err = TermError;

    /// Parses the SQL spelling of an operator, case-insensitively for keywords.
    /// `<>` is accepted as an alias of `!=`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ").to_uppercase();
        if normalized == "<>" {
            return Ok(Self::NotEq);
        }
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == normalized)
            .ok_or_else(|| TermError::UnknownOperator(String::from(s)))
    }
}

/// Unary operators.
///
/// Besides the three built-in operators, any function name can be applied to
/// a single operand, which is how aggregate helpers such as `SUM` are built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Logical NOT
    Not,
    /// Arithmetic negation (-)
    Neg,
    /// Bitwise negation (~)
    BitNeg,
    /// A single-argument function such as `SUM` or `COUNT`.
    Function(String),
}

impl UnaryOperator {
    /// Returns the SQL token placed before the parenthesized operand.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Not => "NOT",
            Self::Neg => "-",
            Self::BitNeg => "~",
            Self::Function(name) => name,
        }
    }

    /// Parses an operator name.
    ///
    /// `NOT`, `NEG` and `BNEG` map to the built-in operators; anything else is
    /// taken as a function name.
    ///
    /// # Errors
    ///
    /// Returns [`TermError::UnknownOperator`] for an empty name.
    pub fn parse(name: &str) -> Result<Self, TermError> {
        let trimmed = name.trim();
        match trimmed.to_uppercase().as_str() {
            "" => Err(TermError::UnknownOperator(String::from(name))),
            "NOT" => Ok(Self::Not),
            "NEG" | "-" => Ok(Self::Neg),
            "BNEG" | "~" => Ok(Self::BitNeg),
            _ => Ok(Self::Function(String::from(trimmed))),
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
