//! Multi-statement batches.

use super::{finish, Query, QueryKind};
use crate::error::{ClauseError, ClauseName, CompileError, Result};

/// Statement separator of a compiled batch.
pub const SEPARATOR: &str = ";";

/// An ordered batch of queries compiled and executed together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    queries: Vec<Query>,
}

impl Compound {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with `query` appended.
    #[must_use]
    pub fn with_query(&self, query: impl Into<Query>) -> Self {
        let mut next = self.clone();
        next.queries.push(query.into());
        next
    }

    /// Returns the queries in order.
    #[must_use]
    pub fn queries(&self) -> &[Query] {
        &self.queries
    }

    fn members(&self) -> std::result::Result<Vec<String>, ClauseError> {
        if self.queries.is_empty() {
            return Err(ClauseError::invalid(
                ClauseName::Statements,
                "at least one statement is required",
            ));
        }
        let nested = |err: CompileError| ClauseError::Nested {
            clause: ClauseName::Statements,
            source: Box::new(err),
        };
        let mut statements = Vec::with_capacity(self.queries.len());
        for query in &self.queries {
            match query {
                Query::Compound(inner) => statements.extend(inner.statements().map_err(nested)?),
                other => statements.push(other.compile().map_err(nested)?),
            }
        }
        Ok(statements)
    }

    fn fragments(&self) -> std::result::Result<String, ClauseError> {
        Ok(self.members()?.join(SEPARATOR))
    }

    /// Compiles every statement separately, flattening nested batches.
    ///
    /// # Errors
    ///
    /// Same as [`compile`](Self::compile).
    pub fn statements(&self) -> Result<Vec<String>> {
        self.members()
            .map_err(|cause| CompileError::new(self.clone(), cause))
    }

    /// Compiles every statement and joins them with `;`.
    ///
    /// # Errors
    ///
    /// Fails when the batch is empty or any statement fails; the inner
    /// failure is kept as [`ClauseError::Nested`].
    pub fn compile(&self) -> Result<String> {
        finish(self, QueryKind::Compound, self.fragments())
    }
}

impl<Q: Into<Query>> FromIterator<Q> for Compound {
    fn from_iter<I: IntoIterator<Item = Q>>(iter: I) -> Self {
        Self {
            queries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{DropTable, Select};

    #[test]
    fn test_compound_joins_statements() {
        let batch = Compound::new()
            .with_query(DropTable::new().with_table("a"))
            .with_query(Select::new().with_from("b"));
        assert_eq!(batch.compile().unwrap(), "DROP TABLE `a`;SELECT * FROM `b`");
    }

    #[test]
    fn test_empty_compound() {
        let err = Compound::new().compile().unwrap_err();
        assert_eq!(err.cause().clause(), Some(ClauseName::Statements));
    }

    #[test]
    fn test_nested_failure() {
        let batch: Compound = vec![
            Query::from(DropTable::new().with_table("a")),
            Query::from(DropTable::new()),
        ]
        .into_iter()
        .collect();
        let err = batch.compile().unwrap_err();
        match err.cause() {
            ClauseError::Nested { source, .. } => {
                assert_eq!(source.kind(), QueryKind::DropTable);
            }
            other => panic!("unexpected cause: {other:?}"),
        }
    }

    #[test]
    fn test_statements_flatten_nested_batches() {
        let inner = Compound::new()
            .with_query(DropTable::new().with_table("b"))
            .with_query(DropTable::new().with_table("c"));
        let batch = Compound::new()
            .with_query(DropTable::new().with_table("a"))
            .with_query(inner);
        assert_eq!(
            batch.statements().unwrap(),
            vec!["DROP TABLE `a`", "DROP TABLE `b`", "DROP TABLE `c`"]
        );
        assert_eq!(
            batch.compile().unwrap(),
            "DROP TABLE `a`;DROP TABLE `b`;DROP TABLE `c`"
        );
        assert!(Compound::new().statements().is_err());
    }
}
