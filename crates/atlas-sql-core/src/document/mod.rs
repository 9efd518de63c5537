//! Data-only query construction.
//!
//! A [`QueryDocument`] describes a query as plain JSON, tagged by `"query"`.
//! Converting it into a [`Query`] applies the term-creation rule to every
//! value: scalars and arrays become literals, objects must be expression
//! nodes, anything else fails construction with a [`TermError`].
//!
//! ```rust
//! use atlas_sql_core::Query;
//!
//! let query = Query::from_json(r#"{
//!     "query": "select",
//!     "from": "users",
//!     "columns": {"0": "id", "user_name": "name"},
//!     "where": {"type": "binary", "left": {"type": "column", "name": "id"}, "op": ">", "right": 10},
//!     "order": [{"column": "name", "sort": "DESC"}],
//!     "limit": 5
//! }"#).unwrap();
//!
//! assert_eq!(
//!     query.compile().unwrap(),
//!     "SELECT `id`, `name` AS `user_name` FROM `users` WHERE (`id` > 10) ORDER BY `name` DESC LIMIT 5"
//! );
//! ```

mod schema;
mod term;

pub use schema::{ColumnDocument, IndexDocument, KeyDocument, SchemaDocument};
pub use term::{NodeDocument, TermDocument};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::clause::{GroupTerm, Join, JoinKind, OrderTerm, SelectColumn, Sort, Source};
use crate::error::{DocumentError, TermError};
use crate::query::{
    Compound, CreateIndex, CreateTable, Delete, DropTable, Insert, Query, Select, Update,
};
use crate::schema::{Index, Schema};
use crate::term::{Column, Expression};

/// A query document, tagged by `"query"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum QueryDocument {
    /// SELECT.
    Select(SelectDocument),
    /// INSERT.
    Insert(InsertDocument),
    /// UPDATE.
    Update(UpdateDocument),
    /// DELETE.
    Delete(DeleteDocument),
    /// CREATE TABLE.
    CreateTable(CreateTableDocument),
    /// CREATE INDEX.
    CreateIndex(CreateIndexDocument),
    /// DROP TABLE.
    DropTable(DropTableDocument),
    /// A batch of statements.
    Compound {
        /// Members in order.
        queries: Vec<QueryDocument>,
    },
}

/// A FROM or JOIN source: a table name, an aliased table or a sub-query.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SourceDocument {
    /// `"users"`
    Name(String),
    /// `{"table": "users", "alias": "u"}`
    Table {
        /// Table name.
        table: String,
        /// Alias.
        #[serde(default)]
        alias: Option<String>,
    },
    /// `{"select": {...}, "alias": "sub"}`
    Subquery {
        /// The nested SELECT.
        select: Box<SelectDocument>,
        /// Alias.
        #[serde(default)]
        alias: Option<String>,
    },
}

/// A column list entry: a column name or an expression node.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColumnEntry {
    /// A column name, `*` included.
    Name(String),
    /// Any other expression.
    Term(TermDocument),
}

/// SELECT columns: a list, or a map of alias to entry where numeric keys
/// mean "no alias".
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColumnsDocument {
    /// Entries without aliases.
    List(Vec<ColumnEntry>),
    /// Alias to entry.
    Aliased(IndexMap<String, ColumnEntry>),
}

/// A JOIN.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JoinDocument {
    /// `INNER`, `LEFT`, `RIGHT`, `FULL` or `CROSS`.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Joined source.
    pub source: SourceDocument,
    /// ON condition.
    #[serde(default)]
    pub on: Option<TermDocument>,
}

// A missing key deserializes to `None` through `default`, an explicit
// `null` to `Some(None)`.
fn explicit_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A GROUP BY entry.
///
/// The sort defaults to ASC when left out; an explicit `null` groups by the
/// bare column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum GroupDocument {
    /// `"name"`, grouped ascending.
    Name(String),
    /// `{"column": "name", "sort": null}`
    Entry {
        /// Column name.
        column: String,
        /// Table qualifier.
        #[serde(default)]
        table: Option<String>,
        /// Direction.
        #[serde(default, deserialize_with = "explicit_option")]
        sort: Option<Option<Sort>>,
    },
}

/// An ORDER BY entry; the sort defaults to ASC.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OrderDocument {
    /// `"name"`
    Name(String),
    /// `{"column": "name", "sort": "DESC"}`
    Entry {
        /// Column name.
        column: String,
        /// Table qualifier.
        #[serde(default)]
        table: Option<String>,
        /// Direction.
        #[serde(default)]
        sort: Sort,
    },
}

/// SELECT document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SelectDocument {
    /// Selected columns; absent means `*`.
    pub columns: Option<ColumnsDocument>,
    /// FROM source.
    pub from: Option<SourceDocument>,
    /// JOINs.
    pub joins: Vec<JoinDocument>,
    /// WHERE condition.
    #[serde(rename = "where")]
    pub condition: Option<TermDocument>,
    /// GROUP BY entries.
    pub group: Vec<GroupDocument>,
    /// HAVING condition.
    pub having: Option<TermDocument>,
    /// ORDER BY entries.
    pub order: Vec<OrderDocument>,
    /// LIMIT.
    pub limit: Option<u64>,
    /// OFFSET.
    pub offset: Option<u64>,
}

/// INSERT document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct InsertDocument {
    /// Target table.
    pub table: String,
    /// Column list.
    pub columns: Vec<String>,
    /// Records.
    pub values: Vec<Vec<TermDocument>>,
    /// ON DUPLICATE KEY UPDATE assignments.
    pub on_duplicate: IndexMap<String, TermDocument>,
}

/// UPDATE document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct UpdateDocument {
    /// Target table.
    pub table: String,
    /// SET assignments.
    pub set: IndexMap<String, TermDocument>,
    /// WHERE condition.
    #[serde(rename = "where")]
    pub condition: Option<TermDocument>,
    /// ORDER BY entries.
    pub order: Vec<OrderDocument>,
    /// LIMIT.
    pub limit: Option<u64>,
}

/// DELETE document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DeleteDocument {
    /// Target table.
    pub table: String,
    /// WHERE condition.
    #[serde(rename = "where")]
    pub condition: Option<TermDocument>,
    /// ORDER BY entries.
    pub order: Vec<OrderDocument>,
    /// LIMIT.
    pub limit: Option<u64>,
}

/// CREATE TABLE document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CreateTableDocument {
    /// Table name.
    pub table: String,
    /// Schema.
    pub schema: SchemaDocument,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Collation.
    pub collate: Option<String>,
    /// Also create the schema indexes, as a batch.
    pub with_indexes: bool,
}

/// CREATE INDEX document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct CreateIndexDocument {
    /// Table name.
    pub table: String,
    /// Index name.
    pub name: String,
    /// Index definition.
    pub index: IndexDocument,
}

/// DROP TABLE document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct DropTableDocument {
    /// Table name.
    pub table: String,
    /// IF EXISTS.
    pub if_exists: bool,
    /// CASCADE.
    pub cascade: bool,
}

fn expression(term: TermDocument) -> Result<Expression, TermError> {
    Expression::try_from(term)
}

/// A WHERE or HAVING condition must be an expression node; bare JSON values
/// are rejected rather than emitted as the condition.
fn condition(
    node: &'static str,
    term: Option<TermDocument>,
) -> Result<Option<Expression>, TermError> {
    match term {
        None => Ok(None),
        Some(TermDocument::Value(value)) => Err(TermError::MalformedNode {
            node,
            reason: format!("expected an expression node, found {value}"),
        }),
        Some(node) => expression(node).map(Some),
    }
}

fn assignments(
    map: IndexMap<String, TermDocument>,
) -> Result<Vec<(String, Expression)>, TermError> {
    map.into_iter()
        .map(|(column, value)| Ok((column, expression(value)?)))
        .collect()
}

fn column(name: String, table: Option<String>) -> Column {
    match table {
        Some(table) => Column::qualified(table, name),
        None => Column::new(name),
    }
}

fn order_terms(order: Vec<OrderDocument>) -> Vec<OrderTerm> {
    order
        .into_iter()
        .map(|entry| match entry {
            OrderDocument::Name(name) => OrderTerm::new(name, Sort::Asc),
            OrderDocument::Entry {
                column: name,
                table,
                sort,
            } => OrderTerm::new(column(name, table), sort),
        })
        .collect()
}

fn group_term(entry: GroupDocument) -> GroupTerm {
    match entry {
        GroupDocument::Name(name) => GroupTerm::sorted(name, Sort::Asc),
        GroupDocument::Entry {
            column: name,
            table,
            sort: None,
        } => GroupTerm::sorted(column(name, table), Sort::Asc),
        GroupDocument::Entry {
            column: name,
            table,
            sort: Some(sort),
        } => GroupTerm {
            column: column(name, table),
            sort,
        },
    }
}

fn select_column(alias: Option<String>, entry: ColumnEntry) -> Result<SelectColumn, TermError> {
    let column = match entry {
        ColumnEntry::Name(name) => SelectColumn::from(name),
        ColumnEntry::Term(term) => SelectColumn::Expr(expression(term)?),
    };
    match (alias, column) {
        (None, column) => Ok(column),
        (Some(alias), SelectColumn::Name(name)) => Ok(SelectColumn::named_as(&name, alias)),
        (Some(alias), SelectColumn::Expr(expr)) => Ok(SelectColumn::aliased(expr, alias)),
        (Some(alias), _) => Err(TermError::MalformedNode {
            node: "columns",
            reason: format!("the wildcard cannot be aliased as '{alias}'"),
        }),
    }
}

fn columns(doc: ColumnsDocument) -> Result<Vec<SelectColumn>, TermError> {
    match doc {
        ColumnsDocument::List(entries) => entries
            .into_iter()
            .map(|entry| select_column(None, entry))
            .collect(),
        ColumnsDocument::Aliased(entries) => entries
            .into_iter()
            .map(|(alias, entry)| {
                let alias = if alias.parse::<u64>().is_ok() {
                    None
                } else {
                    Some(alias)
                };
                select_column(alias, entry)
            })
            .collect(),
    }
}

fn source(doc: SourceDocument) -> Result<Source, TermError> {
    Ok(match doc {
        SourceDocument::Name(name) => Source::table(name),
        SourceDocument::Table { table, alias } => Source::Table { name: table, alias },
        SourceDocument::Subquery { select, alias } => Source::Subquery {
            query: Box::new(Select::try_from(*select)?),
            alias,
        },
    })
}

fn join(doc: JoinDocument) -> Result<Join, TermError> {
    let kind = match doc.kind {
        Some(name) => JoinKind::parse(&name).ok_or_else(|| TermError::MalformedNode {
            node: "join",
            reason: format!("unknown join type '{name}'"),
        })?,
        None => JoinKind::default(),
    };
    let mut join = Join::new(kind, source(doc.source)?);
    if let Some(on) = doc.on {
        join = join.on(expression(on)?);
    }
    Ok(join)
}

impl TryFrom<SelectDocument> for Select {
    type Error = TermError;

    fn try_from(doc: SelectDocument) -> Result<Self, Self::Error> {
        let mut select = Self::new();
        if let Some(cols) = doc.columns {
            select = select.with_columns(columns(cols)?);
        }
        if let Some(from) = doc.from {
            select = select.with_from(source(from)?);
        }
        for entry in doc.joins {
            select = select.with_join(join(entry)?);
        }
        if let Some(condition) = condition("where", doc.condition)? {
            select = select.with_where(condition);
        }
        for entry in doc.group {
            select = select.with_group_by(group_term(entry));
        }
        if let Some(having) = condition("having", doc.having)? {
            select = select.with_having(having);
        }
        for term in order_terms(doc.order) {
            select = select.with_order_by(term.column, term.sort);
        }
        if let Some(limit) = doc.limit {
            select = select.with_limit(limit);
        }
        if let Some(offset) = doc.offset {
            select = select.with_offset(offset);
        }
        Ok(select)
    }
}

impl TryFrom<InsertDocument> for Insert {
    type Error = TermError;

    fn try_from(doc: InsertDocument) -> Result<Self, Self::Error> {
        let records = doc
            .values
            .into_iter()
            .map(|record| record.into_iter().map(expression).collect())
            .collect::<Result<Vec<Vec<_>>, _>>()?;
        Ok(Self::new()
            .with_table(doc.table)
            .with_columns(doc.columns)
            .with_values(records)
            .with_on_duplicate(assignments(doc.on_duplicate)?))
    }
}

impl TryFrom<UpdateDocument> for Update {
    type Error = TermError;

    fn try_from(doc: UpdateDocument) -> Result<Self, Self::Error> {
        let mut update = Self::new()
            .with_table(doc.table)
            .with_set(assignments(doc.set)?);
        if let Some(condition) = condition("where", doc.condition)? {
            update = update.with_where(condition);
        }
        for term in order_terms(doc.order) {
            update = update.with_order_by(term.column, term.sort);
        }
        if let Some(limit) = doc.limit {
            update = update.with_limit(limit);
        }
        Ok(update)
    }
}

impl TryFrom<DeleteDocument> for Delete {
    type Error = TermError;

    fn try_from(doc: DeleteDocument) -> Result<Self, Self::Error> {
        let mut delete = Self::new().with_table(doc.table);
        if let Some(condition) = condition("where", doc.condition)? {
            delete = delete.with_where(condition);
        }
        for term in order_terms(doc.order) {
            delete = delete.with_order_by(term.column, term.sort);
        }
        if let Some(limit) = doc.limit {
            delete = delete.with_limit(limit);
        }
        Ok(delete)
    }
}

impl TryFrom<CreateTableDocument> for CreateTable {
    type Error = TermError;

    fn try_from(doc: CreateTableDocument) -> Result<Self, Self::Error> {
        let mut create = Self::new()
            .with_table(doc.table)
            .with_schema(Schema::try_from(doc.schema)?)
            .with_if_not_exists(doc.if_not_exists);
        if let Some(collate) = doc.collate {
            create = create.with_collate(collate);
        }
        Ok(create)
    }
}

impl From<CreateIndexDocument> for CreateIndex {
    fn from(doc: CreateIndexDocument) -> Self {
        Self::new()
            .with_table(doc.table)
            .with_name(doc.name)
            .with_index(Index::from(doc.index))
    }
}

impl From<DropTableDocument> for DropTable {
    fn from(doc: DropTableDocument) -> Self {
        Self::new()
            .with_table(doc.table)
            .with_if_exists(doc.if_exists)
            .with_cascade(doc.cascade)
    }
}

impl TryFrom<QueryDocument> for Query {
    type Error = TermError;

    fn try_from(doc: QueryDocument) -> Result<Self, Self::Error> {
        Ok(match doc {
            QueryDocument::Select(doc) => Select::try_from(doc)?.into(),
            QueryDocument::Insert(doc) => Insert::try_from(doc)?.into(),
            QueryDocument::Update(doc) => Update::try_from(doc)?.into(),
            QueryDocument::Delete(doc) => Delete::try_from(doc)?.into(),
            QueryDocument::CreateTable(doc) => {
                let with_indexes = doc.with_indexes;
                let create = CreateTable::try_from(doc)?;
                if with_indexes {
                    create.with_indexes().into()
                } else {
                    create.into()
                }
            }
            QueryDocument::CreateIndex(doc) => CreateIndex::from(doc).into(),
            QueryDocument::DropTable(doc) => DropTable::from(doc).into(),
            QueryDocument::Compound { queries } => queries
                .into_iter()
                .map(Self::try_from)
                .collect::<Result<Compound, _>>()?
                .into(),
        })
    }
}

impl Query {
    /// Parses a JSON query document.
    ///
    /// # Errors
    ///
    /// Fails on invalid JSON, an unknown document shape or a term that
    /// cannot be constructed.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc: QueryDocument = serde_json::from_str(json)?;
        Ok(Self::try_from(doc)?)
    }
}

/// Parses one query document, or an array of them, into queries.
///
/// # Errors
///
/// Same as [`Query::from_json`].
pub fn parse_batch(json: &str) -> Result<Vec<Query>, DocumentError> {
    let docs = match serde_json::from_str::<Value>(json)? {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<QueryDocument>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    docs.into_iter()
        .map(|doc| Query::try_from(doc).map_err(DocumentError::from))
        .collect()
}
