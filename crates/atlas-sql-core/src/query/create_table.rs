//! CREATE TABLE statements.

use super::{finish, Compound, CreateIndex, QueryKind};
use crate::clause;
use crate::error::{ClauseError, ClauseName, Result};
use crate::schema::Schema;

/// A CREATE TABLE statement:
/// `CREATE TABLE [IF NOT EXISTS] table (columns, keys) [COLLATE name]`.
///
/// Indexes of the schema are not part of the statement; see
/// [`with_indexes`](Self::with_indexes).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateTable {
    table: String,
    schema: Schema,
    if_not_exists: bool,
    collate: Option<String>,
}

table_builders!(CreateTable);

impl CreateTable {
    /// Creates an empty CREATE TABLE.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the schema replaced.
    #[must_use]
    pub fn with_schema(&self, schema: Schema) -> Self {
        let mut next = self.clone();
        next.schema = schema;
        next
    }

    /// Returns a copy with IF NOT EXISTS toggled.
    #[must_use]
    pub fn with_if_not_exists(&self, if_not_exists: bool) -> Self {
        let mut next = self.clone();
        next.if_not_exists = if_not_exists;
        next
    }

    /// Returns a copy with the table collation set.
    #[must_use]
    pub fn with_collate(&self, collate: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.collate = Some(collate.into());
        next
    }

    /// Returns a copy without collation.
    #[must_use]
    pub fn without_collate(&self) -> Self {
        let mut next = self.clone();
        next.collate = None;
        next
    }

    /// Returns the schema.
    #[must_use]
    pub const fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Returns whether IF NOT EXISTS is set.
    #[must_use]
    pub const fn if_not_exists(&self) -> bool {
        self.if_not_exists
    }

    /// Returns the collation.
    #[must_use]
    pub fn collate(&self) -> Option<&str> {
        self.collate.as_deref()
    }

    /// Returns this statement followed by one CREATE INDEX per schema index.
    #[must_use]
    pub fn with_indexes(&self) -> Compound {
        self.schema.indexes().iter().fold(
            Compound::new().with_query(self.clone()),
            |batch, (name, index)| {
                batch.with_query(
                    CreateIndex::new()
                        .with_table(self.table.as_str())
                        .with_name(name.as_str())
                        .with_index(index.clone()),
                )
            },
        )
    }

    fn fragments(&self) -> std::result::Result<String, ClauseError> {
        let table = clause::table(&self.table)?;
        if self.schema.is_empty() {
            return Err(ClauseError::invalid(
                ClauseName::Schema,
                "at least one column or key is required",
            ));
        }
        let definitions = clause::assemble_list([
            clause::column_definitions(&self.schema)?,
            clause::key_definitions(&self.schema)?,
        ]);
        let collate = match &self.collate {
            Some(name) if name.trim().is_empty() => {
                return Err(ClauseError::invalid(
                    ClauseName::Collate,
                    "collation name is empty",
                ));
            }
            Some(name) => format!("COLLATE {name}"),
            None => String::new(),
        };
        Ok(clause::assemble([
            String::from("CREATE TABLE"),
            if self.if_not_exists {
                String::from("IF NOT EXISTS")
            } else {
                String::new()
            },
            table,
            format!("({definitions})"),
            collate,
        ]))
    }

    /// Compiles the statement.
    ///
    /// # Errors
    ///
    /// Fails when the table name or the schema is missing, or when a column
    /// or key definition is invalid.
    pub fn compile(&self) -> Result<String> {
        finish(self, QueryKind::CreateTable, self.fragments())
    }
}
