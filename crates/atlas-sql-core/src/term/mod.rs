//! Expression model.
//!
//! An [`Expression`] is an immutable tree of SQL terms. Rendering is a pure
//! function of the tree, except for [`RawSql`] callbacks which run at compile
//! time and may fail.
//!
//! Raw values passed where an expression is expected are converted once, at
//! construction, by the term-creation rule: integers and floats become
//! numbers, strings become string literals, booleans and `None` map to
//! `TRUE`/`FALSE`/`NULL`, and sequences become lists of converted elements.
//!
//! ```rust
//! use atlas_sql_core::{col, sum, Expression};
//!
//! let expr = col("age").gt(18).and(col("status").in_list(["active", "new"]));
//! assert_eq!(
//!     expr.render().unwrap(),
//!     "((`age` > 18) AND (`status` IN ('active', 'new')))"
//! );
//! assert_eq!(sum(col("total")).render().unwrap(), "SUM(`total`)");
//! ```

mod column;
mod literal;
mod operator;
mod raw;

pub use column::Column;
pub use literal::{Literal, Number};
pub use operator::{BinaryOperator, UnaryOperator};
pub use raw::RawSql;

use serde_json::Value;

use crate::dialect::variable_marker;
use crate::error::{BoxError, RenderError, TermError};

/// A function call with an argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name, emitted verbatim.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expression>,
}

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A literal value.
    Literal(Literal),

    /// A column reference.
    Column(Column),

    /// A unary operator or single-argument function: `operator(operand)`.
    Unary {
        /// Operator.
        operator: UnaryOperator,
        /// Operand.
        operand: Box<Expression>,
    },

    /// A binary expression, always rendered parenthesized.
    Binary {
        /// Left operand.
        left: Box<Expression>,
        /// Operator.
        operator: BinaryOperator,
        /// Right operand.
        right: Box<Expression>,
    },

    /// `expr [NOT ]BETWEEN(low AND high)`.
    Between {
        /// The tested expression.
        expr: Box<Expression>,
        /// Lower bound.
        low: Box<Expression>,
        /// Upper bound.
        high: Box<Expression>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// A function call.
    Function(FunctionCall),

    /// A named variable, rendered as a `??{name}??` marker.
    Variable(String),

    /// A raw fragment rendered by a callback.
    Raw(RawSql),
}

impl Expression {
    /// Renders the expression to an SQL fragment.
    ///
    /// # Errors
    ///
    /// Fails when a raw callback fails or a float literal is not finite.
    pub fn render(&self) -> Result<String, RenderError> {
        match self {
            Self::Literal(literal) => literal.render(),
            Self::Column(column) => Ok(column.render()),
            Self::Unary { operator, operand } => {
                Ok(format!("{}({})", operator.as_str(), operand.render()?))
            }
            Self::Binary {
                left,
                operator,
                right,
            } => Ok(format!(
                "({} {} {})",
                left.render()?,
                operator.as_str(),
                right.render()?
            )),
            Self::Between {
                expr,
                low,
                high,
                negated,
            } => {
                let keyword = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
                Ok(format!(
                    "{} {keyword}({} AND {})",
                    expr.render()?,
                    low.render()?,
                    high.render()?
                ))
            }
            Self::Function(call) => {
                let args = call
                    .args
                    .iter()
                    .map(Self::render)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(format!("{}({})", call.name, args.join(", ")))
            }
            Self::Variable(name) => Ok(variable_marker(name)),
            Self::Raw(raw) => raw.render(),
        }
    }

    /// Builds an expression from a JSON value by the term-creation rule.
    ///
    /// # Errors
    ///
    /// Returns a [`TermError`] for values with no term mapping (objects).
    pub fn coerce(value: &Value) -> Result<Self, TermError> {
        Literal::from_json(value).map(Self::Literal)
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, operator: BinaryOperator, right: impl Into<Self>) -> Self {
        Self::Binary {
            left: Box::new(self),
            operator,
            right: Box::new(right.into()),
        }
    }

    /// Creates a unary expression.
    #[must_use]
    pub fn unary(operator: UnaryOperator, operand: impl Into<Self>) -> Self {
        Self::Unary {
            operator,
            operand: Box::new(operand.into()),
        }
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Eq, right)
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn not_eq(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::NotEq, right)
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Lt, right)
    }

    /// Creates a less-than-or-equal expression.
    #[must_use]
    pub fn lt_eq(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::LtEq, right)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Gt, right)
    }

    /// Creates a greater-than-or-equal expression.
    #[must_use]
    pub fn gt_eq(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::GtEq, right)
    }

    /// Creates a NULL-safe equality (`<=>`) expression.
    #[must_use]
    pub fn null_safe_eq(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::NullSafeEq, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Or, right)
    }

    /// Creates an XOR expression.
    #[must_use]
    pub fn xor(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Xor, right)
    }

    /// Creates an addition.
    #[must_use]
    pub fn plus(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Add, right)
    }

    /// Creates a subtraction.
    #[must_use]
    pub fn minus(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Sub, right)
    }

    /// Creates a multiplication.
    #[must_use]
    pub fn times(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Mul, right)
    }

    /// Creates a division.
    #[must_use]
    pub fn divided_by(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Div, right)
    }

    /// Creates a modulo expression.
    #[must_use]
    pub fn modulo(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Mod, right)
    }

    /// Creates a bitwise AND.
    #[must_use]
    pub fn bit_and(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::BitAnd, right)
    }

    /// Creates a bitwise OR.
    #[must_use]
    pub fn bit_or(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::BitOr, right)
    }

    /// Creates a bitwise XOR.
    #[must_use]
    pub fn bit_xor(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::BitXor, right)
    }

    /// Creates a left shift.
    #[must_use]
    pub fn shift_left(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::LeftShift, right)
    }

    /// Creates a right shift.
    #[must_use]
    pub fn shift_right(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::RightShift, right)
    }

    /// Creates a LIKE expression.
    #[must_use]
    pub fn like(self, pattern: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Like, pattern)
    }

    /// Creates a NOT LIKE expression.
    #[must_use]
    pub fn not_like(self, pattern: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::NotLike, pattern)
    }

    /// Creates a REGEXP expression.
    #[must_use]
    pub fn regexp(self, pattern: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Regexp, pattern)
    }

    /// Creates a NOT REGEXP expression.
    #[must_use]
    pub fn not_regexp(self, pattern: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::NotRegexp, pattern)
    }

    /// Creates an IN expression against a list of values.
    #[must_use]
    pub fn in_list<I, T>(self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        self.binary(BinaryOperator::In, list(values))
    }

    /// Creates a NOT IN expression against a list of values.
    #[must_use]
    pub fn not_in_list<I, T>(self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        self.binary(BinaryOperator::NotIn, list(values))
    }

    /// Creates an IS expression.
    #[must_use]
    pub fn is(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::Is, right)
    }

    /// Creates an IS NOT expression.
    #[must_use]
    pub fn is_not(self, right: impl Into<Self>) -> Self {
        self.binary(BinaryOperator::IsNot, right)
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Self {
        self.is(null())
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        self.is_not(null())
    }

    /// Creates a BETWEEN expression.
    #[must_use]
    pub fn between(self, low: impl Into<Self>, high: impl Into<Self>) -> Self {
        Self::Between {
            expr: Box::new(self),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: false,
        }
    }

    /// Creates a NOT BETWEEN expression.
    #[must_use]
    pub fn not_between(self, low: impl Into<Self>, high: impl Into<Self>) -> Self {
        Self::Between {
            expr: Box::new(self),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: true,
        }
    }

    /// Negates the expression with NOT.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::unary(UnaryOperator::Not, self)
    }

    /// Negates the expression arithmetically.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn neg(self) -> Self {
        Self::unary(UnaryOperator::Neg, self)
    }

    /// Negates the expression bitwise.
    #[must_use]
    pub fn bit_neg(self) -> Self {
        Self::unary(UnaryOperator::BitNeg, self)
    }
}

/// Creates a column reference expression.
#[must_use]
pub fn col(name: &str) -> Expression {
    Expression::Column(Column::new(name))
}

/// Creates the `*` column marker.
#[must_use]
pub fn all() -> Expression {
    Expression::Column(Column::wildcard())
}

/// Creates a literal expression from any convertible value.
#[must_use]
pub fn lit(value: impl Into<Literal>) -> Expression {
    Expression::Literal(value.into())
}

/// Creates a NULL literal.
#[must_use]
pub const fn null() -> Expression {
    Expression::Literal(Literal::Null)
}

/// Creates a list literal.
#[must_use]
pub fn list<I, T>(values: I) -> Expression
where
    I: IntoIterator<Item = T>,
    T: Into<Expression>,
{
    Expression::Literal(Literal::List(values.into_iter().map(Into::into).collect()))
}

/// Creates a variable rendered as a `??{name}??` marker.
#[must_use]
pub fn var(name: impl Into<String>) -> Expression {
    Expression::Variable(name.into())
}

/// Creates a raw fragment from a callback evaluated at compile time.
pub fn raw<F>(render: F) -> Expression
where
    F: Fn() -> Result<String, BoxError> + Send + Sync + 'static,
{
    Expression::Raw(RawSql::new(render))
}

/// Creates a function call with any number of arguments.
#[must_use]
pub fn func<I, T>(name: impl Into<String>, args: I) -> Expression
where
    I: IntoIterator<Item = T>,
    T: Into<Expression>,
{
    Expression::Function(FunctionCall {
        name: name.into(),
        args: args.into_iter().map(Into::into).collect(),
    })
}

macro_rules! aggregate {
    ($($(#[$doc:meta])* $name:ident => $sql:literal),+ $(,)?) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $name(operand: impl Into<Expression>) -> Expression {
                Expression::unary(UnaryOperator::Function(String::from($sql)), operand)
            }
        )+
    };
}

aggregate! {
    /// Creates `SUM(operand)`.
    sum => "SUM",
    /// Creates `COUNT(operand)`.
    count => "COUNT",
    /// Creates `MIN(operand)`.
    min => "MIN",
    /// Creates `MAX(operand)`.
    max => "MAX",
    /// Creates `AVG(operand)`.
    avg => "AVG",
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Self::Literal(literal)
    }
}

impl From<Column> for Expression {
    fn from(column: Column) -> Self {
        Self::Column(column)
    }
}

impl From<FunctionCall> for Expression {
    fn from(call: FunctionCall) -> Self {
        Self::Function(call)
    }
}

impl From<RawSql> for Expression {
    fn from(raw: RawSql) -> Self {
        Self::Raw(raw)
    }
}

macro_rules! impl_literal_expression {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Expression {
                fn from(value: $ty) -> Self {
                    Self::Literal(Literal::from(value))
                }
            }
        )+
    };
}

impl_literal_expression!(i8, i16, i32, i64, u8, u16, u32, f32, f64, bool, &str, String);

impl From<&String> for Expression {
    fn from(value: &String) -> Self {
        Self::Literal(Literal::String(value.clone()))
    }
}

impl<T: Into<Self>> From<Option<T>> for Expression {
    fn from(value: Option<T>) -> Self {
        value.map_or_else(null, Into::into)
    }
}

impl<T: Into<Self>> From<Vec<T>> for Expression {
    fn from(values: Vec<T>) -> Self {
        list(values)
    }
}

impl<T: Into<Self>, const N: usize> From<[T; N]> for Expression {
    fn from(values: [T; N]) -> Self {
        list(values)
    }
}

impl TryFrom<&Value> for Expression {
    type Error = TermError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::coerce(value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_render_column_literal_mix() {
        let expr = col("name").eq("Alice");
        assert_eq!(expr.render().unwrap(), "(`name` = 'Alice')");
    }

    #[test]
    fn test_binary_always_parenthesized() {
        assert_eq!(lit(1).plus(2).render().unwrap(), "(1 + 2)");
        assert_eq!(
            lit(1).plus(2).times(3).render().unwrap(),
            "((1 + 2) * 3)"
        );
        assert_eq!(
            col("a").or(col("b")).and(col("c")).render().unwrap(),
            "((`a` OR `b`) AND `c`)"
        );
    }

    #[test]
    fn test_unary_rendering() {
        assert_eq!(col("active").not().render().unwrap(), "NOT(`active`)");
        assert_eq!(col("n").neg().render().unwrap(), "-(`n`)");
        assert_eq!(col("flags").bit_neg().render().unwrap(), "~(`flags`)");
        assert_eq!(count(all()).render().unwrap(), "COUNT(*)");
        assert_eq!(
            max(Column::qualified("t", "x")).render().unwrap(),
            "MAX(`t`.`x`)"
        );
    }

    #[test]
    fn test_between_rendering() {
        assert_eq!(
            col("price").between(10, 100).render().unwrap(),
            "`price` BETWEEN(10 AND 100)"
        );
        assert_eq!(
            col("price").not_between(1.5, 2.5).render().unwrap(),
            "`price` NOT BETWEEN(1.5 AND 2.5)"
        );
    }

    #[test]
    fn test_function_rendering() {
        assert_eq!(
            func("COALESCE", [col("a"), lit("none")]).render().unwrap(),
            "COALESCE(`a`, 'none')"
        );
        assert_eq!(func("NOW", Vec::<Expression>::new()).render().unwrap(), "NOW()");
    }

    #[test]
    fn test_in_list_and_null_tests() {
        assert_eq!(
            col("id").in_list([1, 2, 3]).render().unwrap(),
            "(`id` IN (1, 2, 3))"
        );
        assert_eq!(
            col("id").not_in_list(Vec::<i32>::new()).render().unwrap(),
            "(`id` NOT IN ())"
        );
        assert_eq!(
            col("deleted_at").is_null().render().unwrap(),
            "(`deleted_at` IS NULL)"
        );
        assert_eq!(
            col("deleted_at").is_not_null().render().unwrap(),
            "(`deleted_at` IS NOT NULL)"
        );
    }

    #[test]
    fn test_variable_and_raw() {
        assert_eq!(
            col("id").eq(var("id")).render().unwrap(),
            "(`id` = ??{id}??)"
        );
        assert_eq!(
            col("created").lt(raw(|| Ok(String::from("NOW()")))).render().unwrap(),
            "(`created` < NOW())"
        );
    }

    #[test]
    fn test_raw_failure_propagates() {
        let expr = col("a").eq(raw(|| Err("no clock".into())));
        assert!(matches!(expr.render(), Err(RenderError::Raw(_))));
    }

    #[test]
    fn test_option_and_collections_convert() {
        assert_eq!(Expression::from(None::<i32>).render().unwrap(), "NULL");
        assert_eq!(Expression::from(Some("x")).render().unwrap(), "'x'");
        assert_eq!(Expression::from(vec![1, 2]).render().unwrap(), "(1, 2)");
        assert_eq!(
            Expression::from([lit("a"), col("b")]).render().unwrap(),
            "('a', `b`)"
        );
    }

    #[test]
    fn test_coerce() {
        assert_eq!(Expression::coerce(&json!(-12.34)).unwrap().render().unwrap(), "-12.34");
        assert_eq!(Expression::coerce(&json!(null)).unwrap().render().unwrap(), "NULL");
        assert_eq!(Expression::coerce(&json!([1, 2])).unwrap().render().unwrap(), "(1, 2)");
        assert!(Expression::coerce(&json!({"x": 1})).is_err());
    }
}
