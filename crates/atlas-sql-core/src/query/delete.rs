//! DELETE statements.

use super::{finish, QueryKind};
use crate::clause::{self, OrderTerm};
use crate::error::{ClauseError, Result};
use crate::term::Expression;

/// A DELETE statement: `DELETE FROM table [WHERE] [ORDER BY] [LIMIT]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Delete {
    table: String,
    condition: Option<Expression>,
    order_by: Vec<OrderTerm>,
    limit: Option<u64>,
}

table_builders!(Delete);
where_builders!(Delete);
order_limit_builders!(Delete);

impl Delete {
    /// Creates an empty DELETE.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fragments(&self) -> std::result::Result<String, ClauseError> {
        Ok(clause::assemble([
            format!("DELETE FROM {}", clause::table(&self.table)?),
            clause::where_clause(self.condition.as_ref())?,
            clause::order_by(&self.order_by)?,
            clause::limit(self.limit),
        ]))
    }

    /// Compiles the statement.
    ///
    /// # Errors
    ///
    /// Fails when the table is missing or a clause does not render.
    pub fn compile(&self) -> Result<String> {
        finish(self, QueryKind::Delete, self.fragments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Sort;
    use crate::error::ClauseName;
    use crate::term::col;

    #[test]
    fn test_delete() {
        assert_eq!(
            Delete::new().with_table("logs").compile().unwrap(),
            "DELETE FROM `logs`"
        );
        let delete = Delete::new()
            .with_table("logs")
            .with_where(col("level").eq("debug"))
            .with_order_by("created", Sort::Asc)
            .with_limit(100);
        assert_eq!(
            delete.compile().unwrap(),
            "DELETE FROM `logs` WHERE (`level` = 'debug') ORDER BY `created` ASC LIMIT 100"
        );
    }

    #[test]
    fn test_delete_requires_table() {
        let err = Delete::new().with_table(" ").compile().unwrap_err();
        assert_eq!(err.cause().clause(), Some(ClauseName::Table));
    }
}
