//! CREATE INDEX statements.

use super::{finish, QueryKind};
use crate::clause::{self, identifier};
use crate::error::{ClauseError, ClauseName, Result};
use crate::schema::Index;

/// A CREATE INDEX statement: `CREATE [UNIQUE ]INDEX name ON table (col [SORT], ...)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateIndex {
    table: String,
    name: String,
    index: Index,
}

table_builders!(CreateIndex);

impl CreateIndex {
    /// Creates an empty CREATE INDEX.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the index name set.
    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.name = name.into();
        next
    }

    /// Returns a copy with the index definition replaced.
    #[must_use]
    pub fn with_index(&self, index: Index) -> Self {
        let mut next = self.clone();
        next.index = index;
        next
    }

    /// Returns the index name (empty when unset).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the index definition.
    #[must_use]
    pub const fn index(&self) -> &Index {
        &self.index
    }

    fn fragments(&self) -> std::result::Result<String, ClauseError> {
        let keyword = if self.index.unique {
            "CREATE UNIQUE INDEX"
        } else {
            "CREATE INDEX"
        };
        let name = identifier(ClauseName::IndexName, &self.name)?;
        let table = clause::table(&self.table)?;
        let columns = clause::create_index_columns(&self.index)?;
        Ok(format!("{keyword} {name} ON {table} ({columns})"))
    }

    /// Compiles the statement.
    ///
    /// # Errors
    ///
    /// Fails when the name, the table or the index columns are missing.
    pub fn compile(&self) -> Result<String> {
        finish(self, QueryKind::CreateIndex, self.fragments())
    }
}
