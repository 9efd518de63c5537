//! UPDATE statements.

use super::{finish, QueryKind};
use crate::clause::{self, Assignments, OrderTerm};
use crate::error::{ClauseError, ClauseName, Result};
use crate::term::Expression;

/// An UPDATE statement: `UPDATE table SET ... [WHERE] [ORDER BY] [LIMIT]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Update {
    table: String,
    set: Assignments,
    condition: Option<Expression>,
    order_by: Vec<OrderTerm>,
    limit: Option<u64>,
}

table_builders!(Update);
where_builders!(Update);
order_limit_builders!(Update);

impl Update {
    /// Creates an empty UPDATE.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the SET assignments replaced.
    #[must_use]
    pub fn with_set<I, K, V>(&self, assignments: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Expression>,
    {
        let mut next = self.clone();
        next.set = assignments
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .collect();
        next
    }

    /// Returns a copy with one assignment added or replaced.
    #[must_use]
    pub fn with_assignment(
        &self,
        column: impl Into<String>,
        value: impl Into<Expression>,
    ) -> Self {
        let mut next = self.clone();
        next.set.insert(column.into(), value.into());
        next
    }

    /// Returns the SET assignments.
    #[must_use]
    pub const fn set(&self) -> &Assignments {
        &self.set
    }

    fn fragments(&self) -> std::result::Result<String, ClauseError> {
        let table = clause::table(&self.table)?;
        if self.set.is_empty() {
            return Err(ClauseError::invalid(
                ClauseName::Set,
                "at least one assignment is required",
            ));
        }
        Ok(clause::assemble([
            format!("UPDATE {table}"),
            clause::assignments(ClauseName::Set, "SET", &self.set)?,
            clause::where_clause(self.condition.as_ref())?,
            clause::order_by(&self.order_by)?,
            clause::limit(self.limit),
        ]))
    }

    /// Compiles the statement.
    ///
    /// # Errors
    ///
    /// Fails when the table or the SET assignments are missing, or when a
    /// clause does not render.
    pub fn compile(&self) -> Result<String> {
        finish(self, QueryKind::Update, self.fragments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Sort;
    use crate::term::col;

    #[test]
    fn test_update_set() {
        let update = Update::new()
            .with_table("table")
            .with_set([("foo", Expression::from(1)), ("bar", Expression::from("baz"))]);
        assert_eq!(
            update.compile().unwrap(),
            "UPDATE `table` SET `foo` = 1, `bar` = 'baz'"
        );
    }

    #[test]
    fn test_update_all_clauses() {
        let update = Update::new()
            .with_table("users")
            .with_assignment("score", col("score").plus(10))
            .with_where(col("id").in_list([1, 2, 3]))
            .with_order_by("id", Sort::Desc)
            .with_limit(3);
        assert_eq!(
            update.compile().unwrap(),
            "UPDATE `users` SET `score` = (`score` + 10) WHERE (`id` IN (1, 2, 3)) \
             ORDER BY `id` DESC LIMIT 3"
        );
    }

    #[test]
    fn test_update_requires_set() {
        let err = Update::new().with_table("t").compile().unwrap_err();
        assert_eq!(err.cause().clause(), Some(ClauseName::Set));
        let err = Update::new().with_assignment("a", 1).compile().unwrap_err();
        assert_eq!(err.cause().clause(), Some(ClauseName::Table));
    }

    #[test]
    fn test_assignment_replaces_existing_column() {
        let base = Update::new().with_table("t").with_assignment("a", 1);
        let changed = base.with_assignment("a", 2);
        assert_eq!(base.compile().unwrap(), "UPDATE `t` SET `a` = 1");
        assert_eq!(changed.compile().unwrap(), "UPDATE `t` SET `a` = 2");
    }
}
