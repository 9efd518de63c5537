//! # atlas-sql-core
//!
//! An immutable SQL query builder that compiles expression trees and query
//! objects into deterministic SQL text.
//!
//! This crate provides:
//! - An algebraic expression model (literals, columns, unary/binary operators,
//!   BETWEEN, function calls, variables and raw fragments)
//! - Pure clause compilers (FROM, WHERE, GROUP BY, ORDER BY, JOIN, ...)
//! - Immutable query objects for SELECT, INSERT, UPDATE, DELETE,
//!   CREATE TABLE, CREATE INDEX, DROP TABLE and multi-statement batches
//! - A schema model rendering DDL column, key and index definitions
//! - A synchronous database adapter interface for execution
//! - JSON query documents, for building queries from data
//!
//! ## Building queries
//!
//! Every builder call returns a new value; the receiver is never modified.
//!
//! ```rust
//! use atlas_sql_core::{col, Select, Sort};
//!
//! let base = Select::new().with_from("users").with_columns(["id", "name"]);
//! let active = base.with_where(col("active").eq(true)).with_order_by("name", Sort::Asc);
//!
//! assert_eq!(base.compile().unwrap(), "SELECT `id`, `name` FROM `users`");
//! assert_eq!(
//!     active.compile().unwrap(),
//!     "SELECT `id`, `name` FROM `users` WHERE (`active` = TRUE) ORDER BY `name` ASC"
//! );
//! ```
//!
//! ## Failures
//!
//! Invalid queries never produce partial SQL. The returned [`CompileError`]
//! carries the offending query and the failing clause:
//!
//! ```rust
//! use atlas_sql_core::{Insert, ClauseError};
//!
//! let insert = Insert::new()
//!     .with_table("foo")
//!     .with_columns(["a", "b", "c"])
//!     .with_values([[1, 2, 3, 4]]);
//!
//! let err = insert.compile().unwrap_err();
//! assert!(matches!(err.cause(), ClauseError::RecordLength { record: 0, .. }));
//! ```

pub mod adapter;
pub mod clause;
pub mod dialect;
pub mod document;
pub mod error;
pub mod placeholder;
pub mod query;
pub mod schema;
pub mod term;

pub use adapter::{DatabaseAdapter, Params, Row, SqlValue, ToSqlValue};
pub use clause::{GroupTerm, Join, JoinKind, OrderTerm, SelectColumn, Sort, Source};
pub use document::{parse_batch, QueryDocument, TermDocument};
pub use error::{
    ClauseError, ClauseName, CompileError, DocumentError, ExecuteError, PlaceholderError,
    RenderError, TermError,
};
pub use placeholder::{BoundQuery, PlaceholderStyle};
pub use query::{
    Compound, CreateIndex, CreateTable, Delete, DropTable, Insert, Query, QueryKind, Select,
    Update,
};
pub use schema::{ColumnDefinition, ForeignKey, Index, Key, ReferentialAction, Schema, Table};
pub use term::{
    all, avg, col, count, func, list, lit, max, min, null, raw, sum, var, BinaryOperator, Column,
    Expression, FunctionCall, Literal, Number, RawSql, UnaryOperator,
};
