//! DDL fragments: column and key definitions, index column lists.

use super::{identifier, render_in};
use crate::dialect::quote_identifier_list;
use crate::error::{ClauseError, ClauseName};
use crate::schema::{ColumnDefinition, Index, Key, ReferentialAction, Schema};

fn column_definition(name: &str, column: &ColumnDefinition) -> Result<String, ClauseError> {
    if column.sql_type.trim().is_empty() {
        return Err(ClauseError::invalid(
            ClauseName::Schema,
            format!("column '{name}' has no SQL type"),
        ));
    }
    let mut sql = format!(
        "{} {}",
        identifier(ClauseName::Schema, name)?,
        column.sql_type
    );

    match &column.default {
        Some(default) => {
            sql.push_str(" DEFAULT ");
            sql.push_str(&render_in(ClauseName::Schema, default)?);
        }
        None if column.nullable => sql.push_str(" NULL"),
        None => sql.push_str(" NOT NULL"),
    }

    if column.auto_increment {
        sql.push_str(" AUTO_INCREMENT");
    }

    Ok(sql)
}

fn key_columns(name: &str, columns: &[String]) -> Result<String, ClauseError> {
    if columns.is_empty() {
        return Err(ClauseError::invalid(
            ClauseName::Schema,
            format!("key '{name}' has no columns"),
        ));
    }
    for column in columns {
        identifier(ClauseName::Schema, column)?;
    }
    Ok(quote_identifier_list(columns))
}

fn key_definition(name: &str, key: &Key) -> Result<String, ClauseError> {
    let constraint = format!("CONSTRAINT {}", identifier(ClauseName::Schema, name)?);
    match key {
        Key::Primary(columns) => Ok(format!(
            "{constraint} PRIMARY KEY ({})",
            key_columns(name, columns)?
        )),
        Key::Unique(columns) => Ok(format!(
            "{constraint} UNIQUE ({})",
            key_columns(name, columns)?
        )),
        Key::Foreign(foreign) => {
            let (local, referenced): (Vec<String>, Vec<String>) = foreign
                .columns
                .iter()
                .map(|(l, r)| (l.clone(), r.clone()))
                .unzip();
            let mut sql = format!(
                "{constraint} FOREIGN KEY ({}) REFERENCES {} ({})",
                key_columns(name, &local)?,
                identifier(ClauseName::Schema, &foreign.table)?,
                key_columns(name, &referenced)?
            );
            if foreign.on_update != ReferentialAction::Restrict {
                sql.push_str(" ON UPDATE ");
                sql.push_str(foreign.on_update.as_sql());
            }
            if foreign.on_delete != ReferentialAction::Restrict {
                sql.push_str(" ON DELETE ");
                sql.push_str(foreign.on_delete.as_sql());
            }
            Ok(sql)
        }
    }
}

/// Compiles the column definitions of a schema, comma separated.
///
/// # Errors
///
/// Fails on empty names, missing SQL types or defaults that do not render.
pub fn column_definitions(schema: &Schema) -> Result<String, ClauseError> {
    let defs = schema
        .columns()
        .iter()
        .map(|(name, column)| column_definition(name, column))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(defs.join(", "))
}

/// Compiles the key definitions of a schema, comma separated.
///
/// The ON UPDATE / ON DELETE rules of a foreign key are omitted when they are
/// the default `RESTRICT`.
///
/// # Errors
///
/// Fails on empty names or keys without columns.
pub fn key_definitions(schema: &Schema) -> Result<String, ClauseError> {
    let defs = schema
        .keys()
        .iter()
        .map(|(name, key)| key_definition(name, key))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(defs.join(", "))
}

/// Compiles the column list of CREATE INDEX: `` `col` [SORT], ... ``.
///
/// # Errors
///
/// Fails when the index has no columns or a column name is empty.
pub fn create_index_columns(index: &Index) -> Result<String, ClauseError> {
    if index.columns.is_empty() {
        return Err(ClauseError::invalid(
            ClauseName::IndexColumns,
            "at least one column is required",
        ));
    }
    let cols = index
        .columns
        .iter()
        .map(|(name, sort)| {
            let column = identifier(ClauseName::IndexColumns, name)?;
            Ok(match sort {
                Some(sort) => format!("{column} {}", sort.as_str()),
                None => column,
            })
        })
        .collect::<Result<Vec<_>, ClauseError>>()?;
    Ok(cols.join(", "))
}
