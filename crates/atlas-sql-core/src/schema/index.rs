//! Index definitions.

use indexmap::IndexMap;

use crate::clause::Sort;

/// An index over ordered columns, each with an optional direction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Index {
    /// Whether this is a UNIQUE index.
    pub unique: bool,
    /// Indexed columns with optional sort direction.
    pub columns: IndexMap<String, Option<Sort>>,
}

impl Index {
    /// Creates an empty, non-unique index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty unique index.
    #[must_use]
    pub fn unique() -> Self {
        Self {
            unique: true,
            columns: IndexMap::new(),
        }
    }

    /// Adds a column without direction.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.columns.insert(name.into(), None);
        self
    }

    /// Adds a column with an explicit direction.
    #[must_use]
    pub fn column_sorted(mut self, name: impl Into<String>, sort: Sort) -> Self {
        self.columns.insert(name.into(), Some(sort));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_builder_keeps_order() {
        let index = Index::new()
            .column_sorted("foo", Sort::Asc)
            .column("bar");
        let cols: Vec<_> = index.columns.iter().collect();
        assert_eq!(cols.len(), 2);
        assert_eq!(cols[0], (&String::from("foo"), &Some(Sort::Asc)));
        assert_eq!(cols[1], (&String::from("bar"), &None));
        assert!(!index.unique);
        assert!(Index::unique().unique);
    }
}
