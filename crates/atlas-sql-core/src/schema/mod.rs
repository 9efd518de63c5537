//! Schema model.
//!
//! Value objects describing a table's columns, keys and indexes. They render
//! as DDL fragments consumed by CREATE TABLE and CREATE INDEX compilation.
//! None of them knows the table it belongs to.
//!
//! ```rust
//! use atlas_sql_core::schema::{integer, varchar, Key, Schema};
//! use atlas_sql_core::CreateTable;
//!
//! let schema = Schema::new()
//!     .column("id", integer().auto_increment())
//!     .column("name", varchar(255).nullable())
//!     .key("pk_users", Key::primary(["id"]));
//!
//! let sql = CreateTable::new().with_table("users").with_schema(schema).compile().unwrap();
//! assert_eq!(
//!     sql,
//!     "CREATE TABLE `users` (`id` INT NOT NULL AUTO_INCREMENT, \
//!      `name` VARCHAR(255) NULL, CONSTRAINT `pk_users` PRIMARY KEY (`id`))"
//! );
//! ```

mod column;
mod index;
mod key;
mod table;

pub use column::{
    bigint, blob, boolean, char, date, datetime, decimal, double, float, integer, smallint, text,
    timestamp, tinyint, varchar, ColumnDefinition,
};
pub use index::Index;
pub use key::{ForeignKey, Key, ReferentialAction};
pub use table::Table;

use indexmap::IndexMap;

/// The full description of a table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Schema {
    columns: IndexMap<String, ColumnDefinition>,
    keys: IndexMap<String, Key>,
    indexes: IndexMap<String, Index>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a column.
    #[must_use]
    pub fn column(mut self, name: impl Into<String>, definition: ColumnDefinition) -> Self {
        self.columns.insert(name.into(), definition);
        self
    }

    /// Adds or replaces a key.
    #[must_use]
    pub fn key(mut self, name: impl Into<String>, key: impl Into<Key>) -> Self {
        self.keys.insert(name.into(), key.into());
        self
    }

    /// Adds or replaces an index.
    #[must_use]
    pub fn index(mut self, name: impl Into<String>, index: Index) -> Self {
        self.indexes.insert(name.into(), index);
        self
    }

    /// Returns the columns in declaration order.
    #[must_use]
    pub const fn columns(&self) -> &IndexMap<String, ColumnDefinition> {
        &self.columns
    }

    /// Returns the keys in declaration order.
    #[must_use]
    pub const fn keys(&self) -> &IndexMap<String, Key> {
        &self.keys
    }

    /// Returns the indexes in declaration order.
    #[must_use]
    pub const fn indexes(&self) -> &IndexMap<String, Index> {
        &self.indexes
    }

    /// Returns true when the schema has neither columns nor keys.
    ///
    /// Indexes alone do not make a table definition.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.keys.is_empty()
    }
}
