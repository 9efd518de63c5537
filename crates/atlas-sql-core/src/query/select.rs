//! SELECT statements.

use super::{finish, QueryKind};
use crate::clause::{self, GroupTerm, Join, OrderTerm, SelectColumn, Source};
use crate::error::{ClauseError, Result};
use crate::term::Expression;

/// A SELECT statement.
///
/// Clauses compile in the order
/// `SELECT columns FROM source JOIN WHERE GROUP BY HAVING ORDER BY LIMIT OFFSET`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Select {
    columns: Vec<SelectColumn>,
    from: Option<Source>,
    joins: Vec<Join>,
    condition: Option<Expression>,
    group_by: Vec<GroupTerm>,
    having: Option<Expression>,
    order_by: Vec<OrderTerm>,
    limit: Option<u64>,
    offset: Option<u64>,
}

where_builders!(Select);
order_limit_builders!(Select);

impl Select {
    /// Creates an empty SELECT.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy reading from `source`, a table name or a sub-query.
    #[must_use]
    pub fn with_from(&self, source: impl Into<Source>) -> Self {
        let mut next = self.clone();
        next.from = Some(source.into());
        next
    }

    /// Returns a copy with the column list replaced.
    #[must_use]
    pub fn with_columns<I, C>(&self, columns: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<SelectColumn>,
    {
        let mut next = self.clone();
        next.columns = columns.into_iter().map(Into::into).collect();
        next
    }

    /// Returns a copy with one column appended.
    #[must_use]
    pub fn with_column(&self, column: impl Into<SelectColumn>) -> Self {
        let mut next = self.clone();
        next.columns.push(column.into());
        next
    }

    /// Returns a copy selecting `*`.
    #[must_use]
    pub fn without_columns(&self) -> Self {
        let mut next = self.clone();
        next.columns.clear();
        next
    }

    /// Returns a copy with a JOIN appended.
    #[must_use]
    pub fn with_join(&self, join: Join) -> Self {
        let mut next = self.clone();
        next.joins.push(join);
        next
    }

    /// Returns a copy without JOINs.
    #[must_use]
    pub fn without_joins(&self) -> Self {
        let mut next = self.clone();
        next.joins.clear();
        next
    }

    /// Returns a copy with a GROUP BY term appended.
    ///
    /// A plain column groups without direction; use [`GroupTerm::sorted`]
    /// for `ASC`/`DESC`.
    #[must_use]
    pub fn with_group_by(&self, term: impl Into<GroupTerm>) -> Self {
        let mut next = self.clone();
        next.group_by.push(term.into());
        next
    }

    /// Returns a copy without GROUP BY terms.
    #[must_use]
    pub fn without_group_by(&self) -> Self {
        let mut next = self.clone();
        next.group_by.clear();
        next
    }

    /// Returns a copy with the HAVING condition replaced.
    #[must_use]
    pub fn with_having(&self, condition: impl Into<Expression>) -> Self {
        let mut next = self.clone();
        next.having = Some(condition.into());
        next
    }

    /// Returns a copy without HAVING condition.
    #[must_use]
    pub fn without_having(&self) -> Self {
        let mut next = self.clone();
        next.having = None;
        next
    }

    /// Returns a copy with the OFFSET set.
    #[must_use]
    pub fn with_offset(&self, offset: u64) -> Self {
        let mut next = self.clone();
        next.offset = Some(offset);
        next
    }

    /// Returns a copy without OFFSET.
    #[must_use]
    pub fn without_offset(&self) -> Self {
        let mut next = self.clone();
        next.offset = None;
        next
    }

    /// Returns the selected columns; empty means `*`.
    #[must_use]
    pub fn columns(&self) -> &[SelectColumn] {
        &self.columns
    }

    /// Returns the FROM source.
    #[must_use]
    pub const fn from(&self) -> Option<&Source> {
        self.from.as_ref()
    }

    /// Returns the JOIN clauses.
    #[must_use]
    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    /// Returns the GROUP BY terms.
    #[must_use]
    pub fn group_by(&self) -> &[GroupTerm] {
        &self.group_by
    }

    /// Returns the HAVING condition.
    #[must_use]
    pub const fn having(&self) -> Option<&Expression> {
        self.having.as_ref()
    }

    /// Returns the OFFSET.
    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        self.offset
    }

    fn fragments(&self) -> std::result::Result<String, ClauseError> {
        Ok(clause::assemble([
            format!("SELECT {}", clause::select_columns(&self.columns)?),
            clause::from(self.from.as_ref())?,
            clause::joins(&self.joins)?,
            clause::where_clause(self.condition.as_ref())?,
            clause::group_by(&self.group_by)?,
            clause::having(self.having.as_ref())?,
            clause::order_by(&self.order_by)?,
            clause::limit(self.limit),
            clause::offset(self.offset),
        ]))
    }

    /// Compiles the statement.
    ///
    /// # Errors
    ///
    /// Fails when no source is set, or when a clause is invalid or does not
    /// render.
    pub fn compile(&self) -> Result<String> {
        finish(self, QueryKind::Select, self.fragments())
    }
}
