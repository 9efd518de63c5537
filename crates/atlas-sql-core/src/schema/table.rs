//! Table handles.

use super::{Index, Schema};
use crate::query::{CreateIndex, CreateTable, Delete, DropTable, Insert, Select, Update};
use crate::term::{Column, Expression};

/// A named table used to start queries and reference its columns.
///
/// ```rust
/// use atlas_sql_core::Table;
///
/// let users = Table::new("users");
/// let sql = users
///     .select()
///     .with_where(users.column("id").eq(1))
///     .compile()
///     .unwrap();
/// assert_eq!(sql, "SELECT * FROM `users` WHERE (`users`.`id` = 1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    name: String,
}

impl Table {
    /// Creates a handle for the table `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the table name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a column of this table, qualified with the table name.
    #[must_use]
    pub fn column(&self, name: &str) -> Expression {
        Expression::Column(Column::qualified(self.name.as_str(), name))
    }

    /// Starts a SELECT from this table.
    #[must_use]
    pub fn select(&self) -> Select {
        Select::new().with_from(self.name.as_str())
    }

    /// Starts an INSERT into this table.
    #[must_use]
    pub fn insert(&self) -> Insert {
        Insert::new().with_table(self.name.as_str())
    }

    /// Starts an UPDATE of this table.
    #[must_use]
    pub fn update(&self) -> Update {
        Update::new().with_table(self.name.as_str())
    }

    /// Starts a DELETE from this table.
    #[must_use]
    pub fn delete(&self) -> Delete {
        Delete::new().with_table(self.name.as_str())
    }

    /// Starts a CREATE TABLE with `schema`.
    #[must_use]
    pub fn create(&self, schema: Schema) -> CreateTable {
        CreateTable::new()
            .with_table(self.name.as_str())
            .with_schema(schema)
    }

    /// Starts a CREATE INDEX on this table.
    #[must_use]
    pub fn create_index(&self, name: &str, index: Index) -> CreateIndex {
        CreateIndex::new()
            .with_table(self.name.as_str())
            .with_name(name)
            .with_index(index)
    }

    /// Starts a DROP TABLE of this table.
    #[must_use]
    pub fn drop(&self) -> DropTable {
        DropTable::new().with_table(self.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Sort;
    use crate::schema::integer;

    #[test]
    fn test_column_is_qualified() {
        let table = Table::new("users");
        assert_eq!(table.column("id").render().unwrap(), "`users`.`id`");
        assert_eq!(table.name(), "users");
    }

    #[test]
    fn test_starters_target_the_table() {
        let table = Table::new("t");
        assert_eq!(table.select().compile().unwrap(), "SELECT * FROM `t`");
        assert_eq!(table.delete().compile().unwrap(), "DELETE FROM `t`");
        assert_eq!(table.drop().compile().unwrap(), "DROP TABLE `t`");
        assert_eq!(
            table
                .update()
                .with_set([("a", 1)])
                .compile()
                .unwrap(),
            "UPDATE `t` SET `a` = 1"
        );
        assert_eq!(
            table
                .insert()
                .with_columns(["a"])
                .with_row([1])
                .compile()
                .unwrap(),
            "INSERT INTO `t` (`a`) VALUES (1)"
        );
        assert_eq!(
            table
                .create(Schema::new().column("id", integer()))
                .compile()
                .unwrap(),
            "CREATE TABLE `t` (`id` INT NOT NULL)"
        );
        assert_eq!(
            table
                .create_index("idx", Index::new().column_sorted("a", Sort::Desc))
                .compile()
                .unwrap(),
            "CREATE INDEX `idx` ON `t` (`a` DESC)"
        );
    }
}
