//! Column references.

use crate::dialect::{quote_identifier, WILDCARD};

/// A column reference, optionally qualified with a table name.
///
/// The name `*` is the "all columns" marker and is never quoted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    /// Optional table qualifier.
    pub table: Option<String>,
    /// Column name.
    pub name: String,
    /// Whether the reference is prefixed with `DISTINCT`.
    pub distinct: bool,
}

impl Column {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
            distinct: false,
        }
    }

    /// Creates a table-qualified column reference.
    #[must_use]
    pub fn qualified(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
            distinct: false,
        }
    }

    /// Creates the `*` marker.
    #[must_use]
    pub fn wildcard() -> Self {
        Self::new(WILDCARD)
    }

    /// Returns a copy rendered with a `DISTINCT ` prefix.
    #[must_use]
    pub fn distinct(&self) -> Self {
        Self {
            distinct: true,
            ..self.clone()
        }
    }

    /// Returns a copy qualified with `table`.
    #[must_use]
    pub fn of(&self, table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            ..self.clone()
        }
    }

    /// Renders the column reference.
    #[must_use]
    pub fn render(&self) -> String {
        let column = match &self.table {
            Some(table) => format!("{}.{}", quote_identifier(table), quote_identifier(&self.name)),
            None => quote_identifier(&self.name),
        };
        if self.distinct {
            format!("DISTINCT {column}")
        } else {
            column
        }
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&String> for Column {
    fn from(name: &String) -> Self {
        Self::new(name.as_str())
    }
}
