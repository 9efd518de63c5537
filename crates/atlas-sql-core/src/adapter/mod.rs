//! Database adapter interface.
//!
//! The builder never talks to a database itself. Execution compiles a query,
//! binds its `??{name}??` variables in the adapter's placeholder style and
//! hands the SQL plus positional values to a [`DatabaseAdapter`].

mod execute;
mod value;

pub use value::{SqlValue, ToSqlValue};

use indexmap::IndexMap;

use crate::placeholder::PlaceholderStyle;

/// A result row: column name to value, in select order.
pub type Row = IndexMap<String, SqlValue>;

/// Variable values keyed by variable name.
pub type Params = IndexMap<String, SqlValue>;

/// A synchronous database connection.
///
/// Implementations receive SQL whose variables were already rewritten into
/// [`placeholder_style`](Self::placeholder_style), with `args` in marker order.
pub trait DatabaseAdapter {
    /// Error reported by the database.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Runs a query returning rows.
    ///
    /// # Errors
    ///
    /// Returns the database failure.
    fn query_results(&self, sql: &str, args: &[SqlValue]) -> Result<Vec<Row>, Self::Error>;

    /// Runs a statement and returns the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns the database failure.
    fn query_num_rows(&self, sql: &str, args: &[SqlValue]) -> Result<u64, Self::Error>;

    /// Runs a statement and reports whether it succeeded.
    ///
    /// # Errors
    ///
    /// Returns the database failure.
    fn query(&self, sql: &str, args: &[SqlValue]) -> Result<bool, Self::Error>;

    /// Returns the id generated by the last INSERT, if any.
    fn insert_id(&self) -> Option<i64>;

    /// Returns the last error message reported by the database, if any.
    fn last_error(&self) -> Option<String>;

    /// Placeholder syntax expected in SQL passed to this adapter.
    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Question
    }
}
