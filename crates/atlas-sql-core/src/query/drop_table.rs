//! DROP TABLE statements.

use super::{finish, QueryKind};
use crate::clause;
use crate::error::{ClauseError, Result};

/// A DROP TABLE statement: `DROP TABLE [IF EXISTS] table [CASCADE]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DropTable {
    table: String,
    if_exists: bool,
    cascade: bool,
}

table_builders!(DropTable);

impl DropTable {
    /// Creates an empty DROP TABLE.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with IF EXISTS toggled.
    #[must_use]
    pub fn with_if_exists(&self, if_exists: bool) -> Self {
        let mut next = self.clone();
        next.if_exists = if_exists;
        next
    }

    /// Returns a copy with CASCADE toggled.
    #[must_use]
    pub fn with_cascade(&self, cascade: bool) -> Self {
        let mut next = self.clone();
        next.cascade = cascade;
        next
    }

    /// Returns whether IF EXISTS is set.
    #[must_use]
    pub const fn if_exists(&self) -> bool {
        self.if_exists
    }

    /// Returns whether CASCADE is set.
    #[must_use]
    pub const fn cascade(&self) -> bool {
        self.cascade
    }

    fn fragments(&self) -> std::result::Result<String, ClauseError> {
        let table = clause::table(&self.table)?;
        Ok(clause::assemble([
            String::from("DROP TABLE"),
            if self.if_exists {
                String::from("IF EXISTS")
            } else {
                String::new()
            },
            table,
            if self.cascade {
                String::from("CASCADE")
            } else {
                String::new()
            },
        ]))
    }

    /// Compiles the statement.
    ///
    /// # Errors
    ///
    /// Fails when the table name is missing.
    pub fn compile(&self) -> Result<String> {
        finish(self, QueryKind::DropTable, self.fragments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClauseName;

    #[test]
    fn test_drop_table() {
        let drop = DropTable::new().with_table("test");
        assert_eq!(drop.compile().unwrap(), "DROP TABLE `test`");
        assert_eq!(
            drop.with_if_exists(true).with_cascade(true).compile().unwrap(),
            "DROP TABLE IF EXISTS `test` CASCADE"
        );
        assert!(!drop.if_exists());
    }

    #[test]
    fn test_drop_table_requires_table() {
        let err = DropTable::new().with_cascade(true).compile().unwrap_err();
        assert_eq!(err.cause().clause(), Some(ClauseName::Table));
        assert_eq!(
            err.to_string(),
            "failed to compile DROP TABLE query: invalid table clause: a non-empty name is required"
        );
    }
}
