//! INSERT statements.

use super::{finish, QueryKind};
use crate::clause::{self, Assignments};
use crate::error::{ClauseError, ClauseName, Result};
use crate::term::Expression;

/// An INSERT statement.
///
/// `INSERT INTO table (columns) VALUES (...), (...) [ON DUPLICATE KEY UPDATE ...]`.
/// Table, columns and at least one record are required; every record must
/// have one value per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Insert {
    table: String,
    columns: Vec<String>,
    values: Vec<Vec<Expression>>,
    on_duplicate: Assignments,
}

table_builders!(Insert);

impl Insert {
    /// Creates an empty INSERT.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the column list replaced.
    #[must_use]
    pub fn with_columns<I, S>(&self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.clone();
        next.columns = columns.into_iter().map(Into::into).collect();
        next
    }

    /// Returns a copy with all records replaced.
    #[must_use]
    pub fn with_values<I, R, V>(&self, records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = V>,
        V: Into<Expression>,
    {
        let mut next = self.clone();
        next.values = records
            .into_iter()
            .map(|record| record.into_iter().map(Into::into).collect())
            .collect();
        next
    }

    /// Returns a copy with one record appended.
    #[must_use]
    pub fn with_row<R, V>(&self, record: R) -> Self
    where
        R: IntoIterator<Item = V>,
        V: Into<Expression>,
    {
        let mut next = self.clone();
        next.values.push(record.into_iter().map(Into::into).collect());
        next
    }

    /// Returns a copy with the ON DUPLICATE KEY UPDATE assignments replaced.
    #[must_use]
    pub fn with_on_duplicate<I, K, V>(&self, assignments: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Expression>,
    {
        let mut next = self.clone();
        next.on_duplicate = assignments
            .into_iter()
            .map(|(column, value)| (column.into(), value.into()))
            .collect();
        next
    }

    /// Returns a copy without ON DUPLICATE KEY UPDATE.
    #[must_use]
    pub fn without_on_duplicate(&self) -> Self {
        let mut next = self.clone();
        next.on_duplicate.clear();
        next
    }

    /// Returns the column list.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the records.
    #[must_use]
    pub fn values(&self) -> &[Vec<Expression>] {
        &self.values
    }

    /// Returns the ON DUPLICATE KEY UPDATE assignments.
    #[must_use]
    pub const fn on_duplicate(&self) -> &Assignments {
        &self.on_duplicate
    }

    fn fragments(&self) -> std::result::Result<String, ClauseError> {
        let table = clause::table(&self.table)?;
        if self.columns.is_empty() {
            return Err(ClauseError::invalid(
                ClauseName::Columns,
                "at least one column is required",
            ));
        }
        Ok(clause::assemble([
            format!("INSERT INTO {table} ({})", clause::columns(&self.columns)?),
            clause::values(self.columns.len(), &self.values)?,
            clause::assignments(
                ClauseName::OnDuplicateKey,
                "ON DUPLICATE KEY UPDATE",
                &self.on_duplicate,
            )?,
        ]))
    }

    /// Compiles the statement.
    ///
    /// # Errors
    ///
    /// Fails when the table, columns or records are missing, or when a record
    /// does not match the column count ([`ClauseError::RecordLength`]).
    pub fn compile(&self) -> Result<String> {
        finish(self, QueryKind::Insert, self.fragments())
    }
}
