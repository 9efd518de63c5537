//! Row sources: tables, sub-queries and joins.

use crate::query::Select;
use crate::term::Expression;

/// A FROM or JOIN source.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// A table, optionally aliased.
    Table {
        /// Table name.
        name: String,
        /// Alias.
        alias: Option<String>,
    },
    /// A nested SELECT, rendered parenthesized.
    Subquery {
        /// The sub-query.
        query: Box<Select>,
        /// Alias.
        alias: Option<String>,
    },
}

impl Source {
    /// Creates a table source.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            name: name.into(),
            alias: None,
        }
    }

    /// Creates a sub-query source.
    #[must_use]
    pub fn subquery(query: Select) -> Self {
        Self::Subquery {
            query: Box::new(query),
            alias: None,
        }
    }

    /// Returns a copy with `alias` set.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        match self {
            Self::Table { name, .. } => Self::Table {
                name,
                alias: Some(alias.into()),
            },
            Self::Subquery { query, .. } => Self::Subquery {
                query,
                alias: Some(alias.into()),
            },
        }
    }
}

impl From<&str> for Source {
    fn from(name: &str) -> Self {
        Self::table(name)
    }
}

impl From<String> for Source {
    fn from(name: String) -> Self {
        Self::table(name)
    }
}

impl From<Select> for Source {
    fn from(query: Select) -> Self {
        Self::subquery(query)
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinKind {
    /// INNER JOIN.
    #[default]
    Inner,
    /// LEFT JOIN.
    Left,
    /// RIGHT JOIN.
    Right,
    /// FULL JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinKind {
    /// Returns the keyword placed before `JOIN`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Cross => "CROSS",
        }
    }

    /// Parses a join keyword, case-insensitively.
    #[must_use]
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.trim().to_uppercase().as_str() {
            "INNER" => Some(Self::Inner),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "FULL" => Some(Self::Full),
            "CROSS" => Some(Self::Cross),
            _ => None,
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The type of join.
    pub kind: JoinKind,
    /// The joined source.
    pub source: Source,
    /// The ON condition.
    pub condition: Option<Expression>,
}

impl Join {
    /// Creates a join without condition.
    #[must_use]
    pub fn new(kind: JoinKind, source: impl Into<Source>) -> Self {
        Self {
            kind,
            source: source.into(),
            condition: None,
        }
    }

    /// Returns a copy with the ON condition set.
    #[must_use]
    pub fn on(self, condition: impl Into<Expression>) -> Self {
        Self {
            condition: Some(condition.into()),
            ..self
        }
    }
}
