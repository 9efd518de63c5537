//! Schema documents.

use indexmap::IndexMap;
use serde::Deserialize;

use super::TermDocument;
use crate::clause::Sort;
use crate::error::TermError;
use crate::schema::{ColumnDefinition, ForeignKey, Index, Key, ReferentialAction, Schema};
use crate::term::Expression;

/// A column definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnDocument {
    /// SQL type, emitted verbatim.
    #[serde(rename = "type")]
    pub sql_type: String,
    /// Default value; `null` means no default.
    #[serde(default)]
    pub default: Option<TermDocument>,
    /// Whether the column accepts NULL.
    #[serde(default)]
    pub nullable: bool,
    /// Whether the column auto-increments.
    #[serde(default)]
    pub auto_increment: bool,
}

/// A key, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KeyDocument {
    /// PRIMARY KEY.
    Primary {
        /// Key columns.
        columns: Vec<String>,
    },
    /// UNIQUE.
    Unique {
        /// Key columns.
        columns: Vec<String>,
    },
    /// FOREIGN KEY.
    Foreign {
        /// Referenced table.
        table: String,
        /// Local to referenced column mapping.
        columns: IndexMap<String, String>,
        /// ON UPDATE rule.
        #[serde(default)]
        on_update: ReferentialAction,
        /// ON DELETE rule.
        #[serde(default)]
        on_delete: ReferentialAction,
    },
}

/// An index: columns mapped to an optional direction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct IndexDocument {
    /// UNIQUE index.
    pub unique: bool,
    /// Column to direction, `null` for none.
    pub columns: IndexMap<String, Option<Sort>>,
}

/// A table schema.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SchemaDocument {
    /// Columns by name.
    pub columns: IndexMap<String, ColumnDocument>,
    /// Keys by constraint name.
    pub keys: IndexMap<String, KeyDocument>,
    /// Indexes by name.
    pub indexes: IndexMap<String, IndexDocument>,
}

impl TryFrom<ColumnDocument> for ColumnDefinition {
    type Error = TermError;

    fn try_from(doc: ColumnDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            sql_type: doc.sql_type,
            default: doc.default.map(Expression::try_from).transpose()?,
            nullable: doc.nullable,
            auto_increment: doc.auto_increment,
        })
    }
}

impl From<KeyDocument> for Key {
    fn from(doc: KeyDocument) -> Self {
        match doc {
            KeyDocument::Primary { columns } => Self::Primary(columns),
            KeyDocument::Unique { columns } => Self::Unique(columns),
            KeyDocument::Foreign {
                table,
                columns,
                on_update,
                on_delete,
            } => Self::Foreign(ForeignKey {
                table,
                columns,
                on_update,
                on_delete,
            }),
        }
    }
}

impl From<IndexDocument> for Index {
    fn from(doc: IndexDocument) -> Self {
        Self {
            unique: doc.unique,
            columns: doc.columns,
        }
    }
}

impl TryFrom<SchemaDocument> for Schema {
    type Error = TermError;

    fn try_from(doc: SchemaDocument) -> Result<Self, Self::Error> {
        let mut schema = Self::new();
        for (name, column) in doc.columns {
            schema = schema.column(name, ColumnDefinition::try_from(column)?);
        }
        for (name, key) in doc.keys {
            schema = schema.key(name, Key::from(key));
        }
        for (name, index) in doc.indexes {
            schema = schema.index(name, Index::from(index));
        }
        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_document() {
        let doc: SchemaDocument = serde_json::from_value(json!({
            "columns": {
                "id": {"type": "INT", "auto_increment": true},
                "owner_id": {"type": "INT"},
                "state": {"type": "VARCHAR(16)", "default": "new"},
                "note": {"type": "TEXT", "nullable": true, "default": null}
            },
            "keys": {
                "pk": {"type": "primary", "columns": ["id"]},
                "fk_owner": {
                    "type": "foreign",
                    "table": "users",
                    "columns": {"owner_id": "id"},
                    "on_delete": "CASCADE"
                }
            },
            "indexes": {
                "idx_state": {"columns": {"state": "DESC", "id": null}}
            }
        }))
        .unwrap();
        let schema = Schema::try_from(doc).unwrap();

        assert_eq!(schema.columns().len(), 4);
        assert!(schema.columns()["id"].auto_increment);
        assert_eq!(
            schema.columns()["state"].default,
            Some(Expression::from("new"))
        );
        assert!(schema.columns()["note"].default.is_none());
        match &schema.keys()["fk_owner"] {
            Key::Foreign(key) => {
                assert_eq!(key.on_delete, ReferentialAction::Cascade);
                assert_eq!(key.on_update, ReferentialAction::Restrict);
            }
            other => panic!("unexpected key: {other:?}"),
        }
        let index = &schema.indexes()["idx_state"];
        assert!(!index.unique);
        assert_eq!(index.columns["state"], Some(Sort::Desc));
        assert_eq!(index.columns["id"], None);
    }

    #[test]
    fn test_bad_default_fails() {
        let doc: ColumnDocument = serde_json::from_value(json!({
            "type": "INT",
            "default": {"not": "a node"}
        }))
        .unwrap();
        assert!(ColumnDefinition::try_from(doc).is_err());
    }
}
