//! Query objects.
//!
//! Every query kind is an immutable value. Builder methods take `&self` and
//! return a modified copy, so a base query can be shared and specialised
//! freely. [`compile`](Select::compile) assembles the clause fragments in the
//! fixed order of the statement kind and never returns partial SQL.

use std::fmt;

use tracing::debug;

use crate::error::{ClauseError, CompileError, Result};

/// Builders shared by statements with a WHERE clause.
macro_rules! where_builders {
    ($ty:ty) => {
        impl $ty {
            /// Returns a copy with the WHERE condition replaced.
            #[must_use]
            pub fn with_where(&self, condition: impl Into<$crate::term::Expression>) -> Self {
                let mut next = self.clone();
                next.condition = Some(condition.into());
                next
            }

            /// Returns a copy whose WHERE condition is the existing one AND `condition`.
            #[must_use]
            pub fn and_where(&self, condition: impl Into<$crate::term::Expression>) -> Self {
                let mut next = self.clone();
                next.condition = Some(match next.condition.take() {
                    Some(existing) => existing.and(condition),
                    None => condition.into(),
                });
                next
            }

            /// Returns a copy whose WHERE condition is the existing one OR `condition`.
            #[must_use]
            pub fn or_where(&self, condition: impl Into<$crate::term::Expression>) -> Self {
                let mut next = self.clone();
                next.condition = Some(match next.condition.take() {
                    Some(existing) => existing.or(condition),
                    None => condition.into(),
                });
                next
            }

            /// Returns a copy without WHERE condition.
            #[must_use]
            pub fn without_where(&self) -> Self {
                let mut next = self.clone();
                next.condition = None;
                next
            }

            /// Returns the WHERE condition.
            #[must_use]
            pub const fn condition(&self) -> Option<&$crate::term::Expression> {
                self.condition.as_ref()
            }
        }
    };
}

/// Builders shared by statements with ORDER BY and LIMIT clauses.
macro_rules! order_limit_builders {
    ($ty:ty) => {
        impl $ty {
            /// Returns a copy with an ORDER BY term appended.
            #[must_use]
            pub fn with_order_by(
                &self,
                column: impl Into<$crate::term::Column>,
                sort: $crate::clause::Sort,
            ) -> Self {
                let mut next = self.clone();
                next.order_by.push($crate::clause::OrderTerm::new(column, sort));
                next
            }

            /// Returns a copy without ORDER BY terms.
            #[must_use]
            pub fn without_order_by(&self) -> Self {
                let mut next = self.clone();
                next.order_by.clear();
                next
            }

            /// Returns a copy with the LIMIT set.
            #[must_use]
            pub fn with_limit(&self, limit: u64) -> Self {
                let mut next = self.clone();
                next.limit = Some(limit);
                next
            }

            /// Returns a copy without LIMIT.
            #[must_use]
            pub fn without_limit(&self) -> Self {
                let mut next = self.clone();
                next.limit = None;
                next
            }

            /// Returns the ORDER BY terms.
            #[must_use]
            pub fn order_by(&self) -> &[$crate::clause::OrderTerm] {
                &self.order_by
            }

            /// Returns the LIMIT.
            #[must_use]
            pub const fn limit(&self) -> Option<u64> {
                self.limit
            }
        }
    };
}

/// Builders for the target table of a statement.
macro_rules! table_builders {
    ($ty:ty) => {
        impl $ty {
            /// Returns a copy targeting `table`.
            #[must_use]
            pub fn with_table(&self, table: impl Into<String>) -> Self {
                let mut next = self.clone();
                next.table = table.into();
                next
            }

            /// Returns the target table name (empty when unset).
            #[must_use]
            pub fn table(&self) -> &str {
                &self.table
            }
        }
    };
}

mod compound;
mod create_index;
mod create_table;
mod delete;
mod drop_table;
mod insert;
mod select;
mod update;

pub use compound::Compound;
pub use create_index::CreateIndex;
pub use create_table::CreateTable;
pub use delete::Delete;
pub use drop_table::DropTable;
pub use insert::Insert;
pub use select::Select;
pub use update::Update;

/// The kind of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// SELECT.
    Select,
    /// INSERT.
    Insert,
    /// UPDATE.
    Update,
    /// DELETE.
    Delete,
    /// CREATE TABLE.
    CreateTable,
    /// CREATE INDEX.
    CreateIndex,
    /// DROP TABLE.
    DropTable,
    /// A batch of statements.
    Compound,
}

impl QueryKind {
    /// Returns the statement keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::CreateTable => "CREATE TABLE",
            Self::CreateIndex => "CREATE INDEX",
            Self::DropTable => "DROP TABLE",
            Self::Compound => "COMPOUND",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any query.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// SELECT.
    Select(Select),
    /// INSERT.
    Insert(Insert),
    /// UPDATE.
    Update(Update),
    /// DELETE.
    Delete(Delete),
    /// CREATE TABLE.
    CreateTable(CreateTable),
    /// CREATE INDEX.
    CreateIndex(CreateIndex),
    /// DROP TABLE.
    DropTable(DropTable),
    /// A batch of statements.
    Compound(Compound),
}

impl Query {
    /// Returns the kind of this query.
    #[must_use]
    pub const fn kind(&self) -> QueryKind {
        match self {
            Self::Select(_) => QueryKind::Select,
            Self::Insert(_) => QueryKind::Insert,
            Self::Update(_) => QueryKind::Update,
            Self::Delete(_) => QueryKind::Delete,
            Self::CreateTable(_) => QueryKind::CreateTable,
            Self::CreateIndex(_) => QueryKind::CreateIndex,
            Self::DropTable(_) => QueryKind::DropTable,
            Self::Compound(_) => QueryKind::Compound,
        }
    }

    /// Compiles the query to SQL.
    ///
    /// # Errors
    ///
    /// Returns a [`CompileError`] carrying the failing query.
    pub fn compile(&self) -> Result<String> {
        match self {
            Self::Select(q) => q.compile(),
            Self::Insert(q) => q.compile(),
            Self::Update(q) => q.compile(),
            Self::Delete(q) => q.compile(),
            Self::CreateTable(q) => q.compile(),
            Self::CreateIndex(q) => q.compile(),
            Self::DropTable(q) => q.compile(),
            Self::Compound(q) => q.compile(),
        }
    }
}

macro_rules! impl_from_query {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for Query {
                fn from(query: $variant) -> Self {
                    Self::$variant(query)
                }
            }
        )+
    };
}

impl_from_query!(
    Select,
    Insert,
    Update,
    Delete,
    CreateTable,
    CreateIndex,
    DropTable,
    Compound
);

/// Turns the outcome of fragment assembly into the result of `compile`.
fn finish<Q>(
    query: &Q,
    kind: QueryKind,
    built: std::result::Result<String, ClauseError>,
) -> Result<String>
where
    Q: Clone + Into<Query>,
{
    match built {
        Ok(sql) => {
            debug!(kind = %kind, sql = %sql, "compiled query");
            Ok(sql)
        }
        Err(cause) => Err(CompileError::new(query.clone(), cause)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(QueryKind::CreateTable.to_string(), "CREATE TABLE");
        assert_eq!(QueryKind::Compound.to_string(), "COMPOUND");
    }

    #[test]
    fn test_query_dispatch() {
        let query = Query::from(Select::new().with_from("test"));
        assert_eq!(query.kind(), QueryKind::Select);
        assert_eq!(query.compile().unwrap(), "SELECT * FROM `test`");

        let query = Query::from(DropTable::new().with_table("test"));
        assert_eq!(query.kind(), QueryKind::DropTable);
        assert_eq!(query.compile().unwrap(), "DROP TABLE `test`");
    }

    #[test]
    fn test_failure_carries_query() {
        let select = Select::new().with_columns(["a"]);
        let err = Query::from(select.clone()).compile().unwrap_err();
        assert_eq!(err.kind(), QueryKind::Select);
        assert_eq!(err.query(), &Query::Select(select));
    }
}
