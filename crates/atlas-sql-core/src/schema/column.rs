//! Column definitions for CREATE TABLE.

use crate::term::Expression;

/// A column definition.
///
/// Columns are `NOT NULL` unless marked [`nullable`](Self::nullable). A
/// default value takes precedence over the nullability flag when rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// SQL type, emitted verbatim (e.g. `INT(11)`, `VARCHAR(255)`).
    pub sql_type: String,
    /// Default value.
    pub default: Option<Expression>,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Whether the column auto-increments.
    pub auto_increment: bool,
}

impl ColumnDefinition {
    /// Creates a new column definition with the given SQL type.
    #[must_use]
    pub fn new(sql_type: impl Into<String>) -> Self {
        Self {
            sql_type: sql_type.into(),
            default: None,
            nullable: false,
            auto_increment: false,
        }
    }

    /// Marks the column as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Marks the column as NOT NULL (default).
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<Expression>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Marks the column as AUTO_INCREMENT.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }
}

/// Creates an INT column.
#[must_use]
pub fn integer() -> ColumnDefinition {
    ColumnDefinition::new("INT")
}

/// Creates a BIGINT column.
#[must_use]
pub fn bigint() -> ColumnDefinition {
    ColumnDefinition::new("BIGINT")
}

/// Creates a SMALLINT column.
#[must_use]
pub fn smallint() -> ColumnDefinition {
    ColumnDefinition::new("SMALLINT")
}

/// Creates a TINYINT column.
#[must_use]
pub fn tinyint() -> ColumnDefinition {
    ColumnDefinition::new("TINYINT")
}

/// Creates a VARCHAR column with a maximum length.
#[must_use]
pub fn varchar(len: u32) -> ColumnDefinition {
    ColumnDefinition::new(format!("VARCHAR({len})"))
}

/// Creates a CHAR column with a fixed length.
#[must_use]
pub fn char(len: u32) -> ColumnDefinition {
    ColumnDefinition::new(format!("CHAR({len})"))
}

/// Creates a TEXT column.
#[must_use]
pub fn text() -> ColumnDefinition {
    ColumnDefinition::new("TEXT")
}

/// Creates a BOOLEAN column.
#[must_use]
pub fn boolean() -> ColumnDefinition {
    ColumnDefinition::new("BOOLEAN")
}

/// Creates a FLOAT column.
#[must_use]
pub fn float() -> ColumnDefinition {
    ColumnDefinition::new("FLOAT")
}

/// Creates a DOUBLE column.
#[must_use]
pub fn double() -> ColumnDefinition {
    ColumnDefinition::new("DOUBLE")
}

/// Creates a DECIMAL column with precision and scale.
#[must_use]
pub fn decimal(precision: u16, scale: u16) -> ColumnDefinition {
    ColumnDefinition::new(format!("DECIMAL({precision}, {scale})"))
}

/// Creates a DATE column.
#[must_use]
pub fn date() -> ColumnDefinition {
    ColumnDefinition::new("DATE")
}

/// Creates a DATETIME column.
#[must_use]
pub fn datetime() -> ColumnDefinition {
    ColumnDefinition::new("DATETIME")
}

/// Creates a TIMESTAMP column.
#[must_use]
pub fn timestamp() -> ColumnDefinition {
    ColumnDefinition::new("TIMESTAMP")
}

/// Creates a BLOB column.
#[must_use]
pub fn blob() -> ColumnDefinition {
    ColumnDefinition::new("BLOB")
}
