//! Column-shaped clause entries: select columns, grouping and ordering terms.

use serde::{Deserialize, Serialize};

use crate::dialect::WILDCARD;
use crate::term::{Column, Expression};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sort {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl Sort {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A column of a SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectColumn {
    /// The `*` marker.
    Wildcard,
    /// A plain column name.
    Name(String),
    /// An arbitrary expression without alias.
    Expr(Expression),
    /// An expression with an `AS` alias.
    Aliased {
        /// The selected expression.
        expr: Expression,
        /// The alias.
        alias: String,
    },
}

impl SelectColumn {
    /// Creates an aliased column from a name or expression.
    #[must_use]
    pub fn aliased(expr: impl Into<Expression>, alias: impl Into<String>) -> Self {
        Self::Aliased {
            expr: expr.into(),
            alias: alias.into(),
        }
    }

    /// Creates an aliased plain column.
    #[must_use]
    pub fn named_as(name: &str, alias: impl Into<String>) -> Self {
        Self::aliased(Column::new(name), alias)
    }
}

impl From<&str> for SelectColumn {
    fn from(name: &str) -> Self {
        if name == WILDCARD {
            Self::Wildcard
        } else {
            Self::Name(String::from(name))
        }
    }
}

impl From<String> for SelectColumn {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<Expression> for SelectColumn {
    fn from(expr: Expression) -> Self {
        Self::Expr(expr)
    }
}

impl From<Column> for SelectColumn {
    fn from(column: Column) -> Self {
        Self::Expr(Expression::Column(column))
    }
}

impl<E: Into<Expression>> From<(E, &str)> for SelectColumn {
    fn from((expr, alias): (E, &str)) -> Self {
        Self::aliased(expr, alias)
    }
}

/// A GROUP BY term.
///
/// Without a sort the column is rendered bare; with one the direction follows
/// the column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTerm {
    /// Grouped column.
    pub column: Column,
    /// Explicit direction, if any.
    pub sort: Option<Sort>,
}

impl GroupTerm {
    /// Creates a bare grouping term.
    #[must_use]
    pub fn new(column: impl Into<Column>) -> Self {
        Self {
            column: column.into(),
            sort: None,
        }
    }

    /// Creates a grouping term with an explicit direction.
    #[must_use]
    pub fn sorted(column: impl Into<Column>, sort: Sort) -> Self {
        Self {
            column: column.into(),
            sort: Some(sort),
        }
    }
}

macro_rules! impl_from_column {
    ($target:ty, $build:expr) => {
        impl From<&str> for $target {
            fn from(name: &str) -> Self {
                $build(Column::new(name))
            }
        }

        impl From<String> for $target {
            fn from(name: String) -> Self {
                $build(Column::new(name))
            }
        }

        impl From<Column> for $target {
            fn from(column: Column) -> Self {
                $build(column)
            }
        }
    };
}

impl_from_column!(GroupTerm, GroupTerm::new);

/// An ORDER BY term. The direction is always rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    /// Ordered column.
    pub column: Column,
    /// Direction.
    pub sort: Sort,
}

impl OrderTerm {
    /// Creates an ordering term.
    #[must_use]
    pub fn new(column: impl Into<Column>, sort: Sort) -> Self {
        Self {
            column: column.into(),
            sort,
        }
    }
}

impl_from_column!(OrderTerm, |column| OrderTerm::new(column, Sort::default()));
