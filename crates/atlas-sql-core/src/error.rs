//! Error types for expression construction, query compilation and execution.

use std::fmt;

use crate::query::{Query, QueryKind};

/// Boxed error returned by raw SQL callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while constructing an expression from a raw value.
///
/// These surface at the point of construction and are never wrapped by
/// compilation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TermError {
    /// The value has no SQL term mapping.
    #[error("unsupported value for SQL term: {0}")]
    UnsupportedValue(String),

    /// An expression node is missing data or carries data of the wrong shape.
    #[error("malformed {node} expression: {reason}")]
    MalformedNode {
        /// The node kind (`binary`, `function`, ...).
        node: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// An operator name that is not part of the operator set.
    #[error("unknown operator '{0}'")]
    UnknownOperator(String),

    /// An unsigned integer that does not fit in an `i64`.
    #[error("integer {0} is out of range for a SQL number")]
    IntegerOutOfRange(u64),
}

/// Errors raised while rendering an expression.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A raw SQL callback failed.
    #[error("raw SQL callback failed: {0}")]
    Raw(#[source] BoxError),

    /// A float literal is NaN or infinite.
    #[error("number literal {0} is not finite")]
    NonFiniteNumber(f64),
}

/// The clause of a query that failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseName {
    /// The target table of INSERT, UPDATE, DELETE or DDL statements.
    Table,
    /// The FROM source of a SELECT.
    From,
    /// A column list.
    Columns,
    /// INSERT VALUES records.
    Values,
    /// WHERE condition.
    Where,
    /// GROUP BY terms.
    GroupBy,
    /// HAVING condition.
    Having,
    /// ORDER BY terms.
    OrderBy,
    /// JOIN clauses.
    Join,
    /// UPDATE SET assignments.
    Set,
    /// INSERT ON DUPLICATE KEY UPDATE assignments.
    OnDuplicateKey,
    /// CREATE TABLE schema.
    Schema,
    /// Table collation.
    Collate,
    /// Index name.
    IndexName,
    /// Index columns.
    IndexColumns,
    /// Members of a compound query.
    Statements,
}

impl ClauseName {
    /// Returns the clause name as it appears in SQL.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::From => "FROM",
            Self::Columns => "columns",
            Self::Values => "VALUES",
            Self::Where => "WHERE",
            Self::GroupBy => "GROUP BY",
            Self::Having => "HAVING",
            Self::OrderBy => "ORDER BY",
            Self::Join => "JOIN",
            Self::Set => "SET",
            Self::OnDuplicateKey => "ON DUPLICATE KEY UPDATE",
            Self::Schema => "schema",
            Self::Collate => "COLLATE",
            Self::IndexName => "index name",
            Self::IndexColumns => "index columns",
            Self::Statements => "statements",
        }
    }
}

impl fmt::Display for ClauseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a clause failed to compile.
#[derive(Debug, thiserror::Error)]
pub enum ClauseError {
    /// Required data is missing, empty or has the wrong shape.
    #[error("invalid {clause} clause: {reason}")]
    Invalid {
        /// The failing clause.
        clause: ClauseName,
        /// Human readable reason.
        reason: String,
    },

    /// An expression inside the clause failed to render.
    #[error("{clause} clause failed to render: {source}")]
    Render {
        /// The failing clause.
        clause: ClauseName,
        /// The render failure.
        source: RenderError,
    },

    /// A VALUES record does not match the column count.
    #[error("VALUES record {record} has {found} values, expected {expected}")]
    RecordLength {
        /// Zero-based index of the offending record.
        record: usize,
        /// Number of declared columns.
        expected: usize,
        /// Number of values in the record.
        found: usize,
    },

    /// A nested query (sub-query or compound member) failed to compile.
    #[error("nested query in {clause} failed: {source}")]
    Nested {
        /// The clause holding the nested query.
        clause: ClauseName,
        /// The nested failure.
        source: Box<CompileError>,
    },
}

impl ClauseError {
    /// Creates an [`ClauseError::Invalid`] error.
    #[must_use]
    pub fn invalid(clause: ClauseName, reason: impl Into<String>) -> Self {
        Self::Invalid {
            clause,
            reason: reason.into(),
        }
    }

    /// Returns the clause that failed, if the error names one.
    #[must_use]
    pub const fn clause(&self) -> Option<ClauseName> {
        match self {
            Self::Invalid { clause, .. }
            | Self::Render { clause, .. }
            | Self::Nested { clause, .. } => Some(*clause),
            Self::RecordLength { .. } => Some(ClauseName::Values),
        }
    }
}

/// A query failed to compile.
///
/// Carries the full query instance so callers can inspect or log it.
#[derive(Debug, thiserror::Error)]
#[error("failed to compile {} query: {}", .query.kind(), .cause)]
pub struct CompileError {
    query: Box<Query>,
    #[source]
    cause: ClauseError,
}

impl CompileError {
    /// Creates a new compile error for `query`.
    #[must_use]
    pub fn new(query: impl Into<Query>, cause: ClauseError) -> Self {
        Self {
            query: Box::new(query.into()),
            cause,
        }
    }

    /// Returns the query that failed.
    #[must_use]
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Returns the kind of the query that failed.
    #[must_use]
    pub fn kind(&self) -> QueryKind {
        self.query.kind()
    }

    /// Returns the underlying clause failure.
    #[must_use]
    pub const fn cause(&self) -> &ClauseError {
        &self.cause
    }

    /// Consumes the error and returns the failing query.
    #[must_use]
    pub fn into_query(self) -> Query {
        *self.query
    }
}

/// Errors on the data-only (JSON document) construction path.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The document is not valid JSON or does not match the document shape.
    #[error("invalid query document: {0}")]
    Json(#[from] serde_json::Error),

    /// A term inside the document could not be constructed.
    #[error("invalid term in query document: {0}")]
    Term(#[from] TermError),
}

/// A `??{name}??` marker could not be bound.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceholderError {
    /// No value was supplied for the named variable.
    #[error("no value bound for variable '{0}'")]
    Unbound(String),
}

/// Errors from executing a query through a database adapter.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError<E: std::error::Error + 'static> {
    /// The query did not compile.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Variables could not be bound.
    #[error(transparent)]
    Placeholder(#[from] PlaceholderError),

    /// The adapter reported a failure.
    #[error("database adapter error: {0}")]
    Adapter(#[source] E),
}

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::DropTable;

    #[test]
    fn test_clause_name_display() {
        assert_eq!(ClauseName::GroupBy.to_string(), "GROUP BY");
        assert_eq!(ClauseName::Table.to_string(), "table");
    }

    #[test]
    fn test_compile_error_message() {
        let err = CompileError::new(
            DropTable::new(),
            ClauseError::invalid(ClauseName::Table, "table name is required"),
        );
        assert_eq!(
            err.to_string(),
            "failed to compile DROP TABLE query: invalid table clause: table name is required"
        );
        assert_eq!(err.kind(), QueryKind::DropTable);
    }

    #[test]
    fn test_compile_error_source_chain() {
        let err = CompileError::new(
            DropTable::new(),
            ClauseError::invalid(ClauseName::Table, "empty"),
        );
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("invalid table clause: empty"));
    }

    #[test]
    fn test_record_length_names_values_clause() {
        let err = ClauseError::RecordLength {
            record: 2,
            expected: 3,
            found: 4,
        };
        assert_eq!(err.clause(), Some(ClauseName::Values));
        assert_eq!(err.to_string(), "VALUES record 2 has 4 values, expected 3");
    }
}
