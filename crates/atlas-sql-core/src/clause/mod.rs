//! Clause compilers.
//!
//! Each function compiles one clause of a query from explicit clause data and
//! returns the rendered fragment, or an empty string when the clause is
//! absent. Functions are pure; they validate their input and report a
//! [`ClauseError`] naming the clause on failure.
//!
//! Fragments are joined with [`assemble`], which drops empty fragments so an
//! absent clause never leaves a stray space behind.

mod ddl;
mod source;
mod terms;

pub use ddl::{column_definitions, create_index_columns, key_definitions};
pub use source::{Join, JoinKind, Source};
pub use terms::{GroupTerm, OrderTerm, SelectColumn, Sort};

use indexmap::IndexMap;

use crate::dialect::{quote_identifier, quote_identifier_list};
use crate::error::{ClauseError, ClauseName};
use crate::term::Expression;

/// Ordered column-to-value assignments (UPDATE SET, ON DUPLICATE KEY UPDATE).
pub type Assignments = IndexMap<String, Expression>;

/// Joins non-empty fragments with a single space.
#[must_use]
pub fn assemble<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fragments
        .into_iter()
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Joins non-empty fragments with a comma and a space.
#[must_use]
pub fn assemble_list<I>(fragments: I) -> String
where
    I: IntoIterator<Item = String>,
{
    fragments
        .into_iter()
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders an expression, attributing failures to `clause`.
pub(crate) fn render_in(clause: ClauseName, expr: &Expression) -> Result<String, ClauseError> {
    expr.render()
        .map_err(|source| ClauseError::Render { clause, source })
}

/// Validates an identifier and quotes it.
///
/// # Errors
///
/// Fails when `name` is empty after trimming.
pub fn identifier(clause: ClauseName, name: &str) -> Result<String, ClauseError> {
    if name.trim().is_empty() {
        return Err(ClauseError::invalid(clause, "a non-empty name is required"));
    }
    Ok(quote_identifier(name))
}

/// Compiles the target table of INSERT, UPDATE, DELETE and DDL statements.
///
/// # Errors
///
/// Fails when the table name is missing or empty.
pub fn table(name: &str) -> Result<String, ClauseError> {
    identifier(ClauseName::Table, name)
}

fn source_sql(clause: ClauseName, source: &Source) -> Result<String, ClauseError> {
    match source {
        Source::Table { name, alias } => {
            let mut sql = identifier(clause, name)?;
            if let Some(alias) = alias {
                sql.push_str(" AS ");
                sql.push_str(&identifier(clause, alias)?);
            }
            Ok(sql)
        }
        Source::Subquery { query, alias } => {
            let inner = query.compile().map_err(|err| ClauseError::Nested {
                clause,
                source: Box::new(err),
            })?;
            let mut sql = format!("({inner})");
            if let Some(alias) = alias {
                sql.push_str(" AS ");
                sql.push_str(alias);
            }
            Ok(sql)
        }
    }
}

/// Compiles the FROM clause.
///
/// # Errors
///
/// A source is required: `None`, an empty table name or a failing sub-query
/// are errors.
pub fn from(source: Option<&Source>) -> Result<String, ClauseError> {
    let source =
        source.ok_or_else(|| ClauseError::invalid(ClauseName::From, "a source is required"))?;
    Ok(format!("FROM {}", source_sql(ClauseName::From, source)?))
}

/// Compiles a plain column list such as the one of INSERT.
///
/// # Errors
///
/// Fails when a column name is empty.
pub fn columns(names: &[String]) -> Result<String, ClauseError> {
    for name in names {
        identifier(ClauseName::Columns, name)?;
    }
    Ok(quote_identifier_list(names))
}

/// Compiles the column list of a SELECT. An empty list selects `*`.
///
/// # Errors
///
/// Fails on empty names, empty aliases or render failures.
pub fn select_columns(columns: &[SelectColumn]) -> Result<String, ClauseError> {
    if columns.is_empty() {
        return Ok(String::from("*"));
    }
    let rendered = columns
        .iter()
        .map(|column| match column {
            SelectColumn::Wildcard => Ok(String::from("*")),
            SelectColumn::Name(name) => identifier(ClauseName::Columns, name),
            SelectColumn::Expr(expr) => render_in(ClauseName::Columns, expr),
            SelectColumn::Aliased { expr, alias } => Ok(format!(
                "{} AS {}",
                render_in(ClauseName::Columns, expr)?,
                identifier(ClauseName::Columns, alias)?
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rendered.join(", "))
}

fn condition(
    clause: ClauseName,
    keyword: &str,
    expr: Option<&Expression>,
) -> Result<String, ClauseError> {
    match expr {
        Some(expr) => Ok(format!("{keyword} {}", render_in(clause, expr)?)),
        None => Ok(String::new()),
    }
}

/// Compiles the WHERE clause.
///
/// # Errors
///
/// Fails when the condition does not render.
pub fn where_clause(expr: Option<&Expression>) -> Result<String, ClauseError> {
    condition(ClauseName::Where, "WHERE", expr)
}

/// Compiles the HAVING clause.
///
/// # Errors
///
/// Fails when the condition does not render.
pub fn having(expr: Option<&Expression>) -> Result<String, ClauseError> {
    condition(ClauseName::Having, "HAVING", expr)
}

/// Compiles the GROUP BY clause.
///
/// A term without sort renders as the bare column.
///
/// # Errors
///
/// Fails when a column name is empty.
pub fn group_by(terms: &[GroupTerm]) -> Result<String, ClauseError> {
    if terms.is_empty() {
        return Ok(String::new());
    }
    let rendered = terms
        .iter()
        .map(|term| {
            identifier(ClauseName::GroupBy, &term.column.name)?;
            Ok(match term.sort {
                Some(sort) => format!("{} {}", term.column.render(), sort.as_str()),
                None => term.column.render(),
            })
        })
        .collect::<Result<Vec<_>, ClauseError>>()?;
    Ok(format!("GROUP BY {}", rendered.join(", ")))
}

/// Compiles the ORDER BY clause. The direction is always rendered.
///
/// # Errors
///
/// Fails when a column name is empty.
pub fn order_by(terms: &[OrderTerm]) -> Result<String, ClauseError> {
    if terms.is_empty() {
        return Ok(String::new());
    }
    let rendered = terms
        .iter()
        .map(|term| {
            identifier(ClauseName::OrderBy, &term.column.name)?;
            Ok(format!("{} {}", term.column.render(), term.sort.as_str()))
        })
        .collect::<Result<Vec<_>, ClauseError>>()?;
    Ok(format!("ORDER BY {}", rendered.join(", ")))
}

/// Compiles the LIMIT clause.
#[must_use]
pub fn limit(count: Option<u64>) -> String {
    count.map_or_else(String::new, |n| format!("LIMIT {n}"))
}

/// Compiles the OFFSET clause.
#[must_use]
pub fn offset(count: Option<u64>) -> String {
    count.map_or_else(String::new, |n| format!("OFFSET {n}"))
}

/// Compiles JOIN clauses, space separated.
///
/// # Errors
///
/// Fails on an invalid source or a condition that does not render.
pub fn joins(joins: &[Join]) -> Result<String, ClauseError> {
    let rendered = joins
        .iter()
        .map(|join| {
            let mut sql = format!(
                "{} JOIN {}",
                join.kind.as_str(),
                source_sql(ClauseName::Join, &join.source)?
            );
            if let Some(condition) = &join.condition {
                sql.push_str(" ON ");
                sql.push_str(&render_in(ClauseName::Join, condition)?);
            }
            Ok(sql)
        })
        .collect::<Result<Vec<_>, ClauseError>>()?;
    Ok(rendered.join(" "))
}

/// Compiles an assignment list: `` PREFIX `col` = value, ... ``.
///
/// # Errors
///
/// Fails on an empty column name or a value that does not render.
pub fn assignments(
    clause: ClauseName,
    prefix: &str,
    values: &Assignments,
) -> Result<String, ClauseError> {
    if values.is_empty() {
        return Ok(String::new());
    }
    let rendered = values
        .iter()
        .map(|(column, value)| {
            Ok(format!(
                "{} = {}",
                identifier(clause, column)?,
                render_in(clause, value)?
            ))
        })
        .collect::<Result<Vec<_>, ClauseError>>()?;
    Ok(format!("{prefix} {}", rendered.join(", ")))
}

/// Compiles INSERT records: `VALUES (v1, ...), (v2, ...)`.
///
/// # Errors
///
/// Fails when there are no records, or with [`ClauseError::RecordLength`]
/// naming the first record whose length differs from `column_count`.
pub fn values(column_count: usize, records: &[Vec<Expression>]) -> Result<String, ClauseError> {
    if records.is_empty() {
        return Err(ClauseError::invalid(
            ClauseName::Values,
            "at least one record is required",
        ));
    }
    let rendered = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            if record.len() != column_count {
                return Err(ClauseError::RecordLength {
                    record: index,
                    expected: column_count,
                    found: record.len(),
                });
            }
            let items = record
                .iter()
                .map(|value| render_in(ClauseName::Values, value))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("({})", items.join(", ")))
        })
        .collect::<Result<Vec<_>, ClauseError>>()?;
    Ok(format!("VALUES {}", rendered.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Select;
    use crate::term::{col, count, raw, Column};

    #[test]
    fn test_assemble_skips_empty_fragments() {
        let sql = assemble([
            String::from("SELECT *"),
            String::new(),
            String::from("FROM `t`"),
            String::new(),
        ]);
        assert_eq!(sql, "SELECT * FROM `t`");
    }

    #[test]
    fn test_from_table() {
        assert_eq!(from(Some(&Source::table("test"))).unwrap(), "FROM `test`");
        assert_eq!(
            from(Some(&Source::table("test").alias("t"))).unwrap(),
            "FROM `test` AS `t`"
        );
    }

    #[test]
    fn test_from_requires_source() {
        assert!(matches!(
            from(None),
            Err(ClauseError::Invalid {
                clause: ClauseName::From,
                ..
            })
        ));
        assert!(from(Some(&Source::table("  "))).is_err());
    }

    #[test]
    fn test_from_subquery() {
        let inner = Select::new().with_from("users").with_columns(["id"]);
        assert_eq!(
            from(Some(&Source::subquery(inner.clone()))).unwrap(),
            "FROM (SELECT `id` FROM `users`)"
        );
        assert_eq!(
            from(Some(&Source::subquery(inner).alias("u"))).unwrap(),
            "FROM (SELECT `id` FROM `users`) AS u"
        );
    }

    #[test]
    fn test_from_failing_subquery_is_nested_error() {
        let err = from(Some(&Source::subquery(Select::new()))).unwrap_err();
        assert!(matches!(
            err,
            ClauseError::Nested {
                clause: ClauseName::From,
                ..
            }
        ));
    }

    #[test]
    fn test_columns() {
        let names = vec![String::from("a"), String::from("b")];
        assert_eq!(columns(&names).unwrap(), "`a`, `b`");
        assert_eq!(columns(&[]).unwrap(), "");
        assert!(columns(&[String::new()]).is_err());
    }

    #[test]
    fn test_select_columns() {
        assert_eq!(select_columns(&[]).unwrap(), "*");
        let cols = vec![
            SelectColumn::from("foo"),
            SelectColumn::Wildcard,
            SelectColumn::from(count(Column::wildcard())),
            SelectColumn::named_as("bar", "b"),
        ];
        assert_eq!(
            select_columns(&cols).unwrap(),
            "`foo`, *, COUNT(*), `bar` AS `b`"
        );
    }

    #[test]
    fn test_where_and_having() {
        assert_eq!(where_clause(None).unwrap(), "");
        assert_eq!(
            where_clause(Some(&col("a").eq(1))).unwrap(),
            "WHERE (`a` = 1)"
        );
        assert_eq!(having(None).unwrap(), "");
        assert_eq!(
            having(Some(&count(col("id")).gt(2))).unwrap(),
            "HAVING (COUNT(`id`) > 2)"
        );
    }

    #[test]
    fn test_where_render_failure_names_clause() {
        let failing = col("a").eq(raw(|| Err("nope".into())));
        assert!(matches!(
            where_clause(Some(&failing)),
            Err(ClauseError::Render {
                clause: ClauseName::Where,
                ..
            })
        ));
    }

    #[test]
    fn test_group_by_distinguishes_missing_sort() {
        assert_eq!(group_by(&[]).unwrap(), "");
        let terms = vec![
            GroupTerm::new("a"),
            GroupTerm::sorted("b", Sort::Asc),
            GroupTerm::sorted("c", Sort::Desc),
        ];
        assert_eq!(group_by(&terms).unwrap(), "GROUP BY `a`, `b` ASC, `c` DESC");
    }

    #[test]
    fn test_order_by_always_renders_direction() {
        assert_eq!(order_by(&[]).unwrap(), "");
        let terms = vec![OrderTerm::from("a"), OrderTerm::new("b", Sort::Desc)];
        assert_eq!(order_by(&terms).unwrap(), "ORDER BY `a` ASC, `b` DESC");
    }

    #[test]
    fn test_limit_offset() {
        assert_eq!(limit(None), "");
        assert_eq!(limit(Some(10)), "LIMIT 10");
        assert_eq!(offset(None), "");
        assert_eq!(offset(Some(0)), "OFFSET 0");
    }

    #[test]
    fn test_joins() {
        assert_eq!(joins(&[]).unwrap(), "");
        let list = vec![
            Join::new(JoinKind::Left, Source::table("orders").alias("o"))
                .on(
                    Expression::from(Column::qualified("o", "user_id"))
                        .eq(Column::qualified("u", "id")),
                ),
            Join::new(JoinKind::Cross, "regions"),
        ];
        assert_eq!(
            joins(&list).unwrap(),
            "LEFT JOIN `orders` AS `o` ON (`o`.`user_id` = `u`.`id`) CROSS JOIN `regions`"
        );
    }

    #[test]
    fn test_assignments() {
        let mut set = Assignments::new();
        assert_eq!(assignments(ClauseName::Set, "SET", &set).unwrap(), "");
        set.insert(String::from("foo"), Expression::from(1));
        set.insert(String::from("bar"), Expression::from("baz"));
        assert_eq!(
            assignments(ClauseName::Set, "SET", &set).unwrap(),
            "SET `foo` = 1, `bar` = 'baz'"
        );
    }

    #[test]
    fn test_values() {
        let records = vec![
            vec![Expression::from(1), Expression::from(2)],
            vec![Expression::from("a"), Expression::from(None::<i32>)],
        ];
        assert_eq!(values(2, &records).unwrap(), "VALUES (1, 2), ('a', NULL)");
    }

    #[test]
    fn test_values_length_mismatch_names_record() {
        let records = vec![
            vec![Expression::from(1), Expression::from(2)],
            vec![Expression::from(1)],
        ];
        assert!(matches!(
            values(2, &records),
            Err(ClauseError::RecordLength {
                record: 1,
                expected: 2,
                found: 1
            })
        ));
        assert!(values(2, &[]).is_err());
    }
}
