//! Queries built from JSON documents compile exactly like their typed
//! counterparts.

mod common;
use common::*;

use atlas_sql_core::{
    parse_batch, ClauseError, DocumentError, Expression, Insert, Query, QueryKind, TermError,
    Update,
};

fn document(json: &str) -> Query {
    Query::from_json(json).unwrap_or_else(|e| panic!("Failed to parse: {json}\nError: {e}"))
}

#[test]
fn reference_scenarios_from_documents() {
    let cases = [
        (r#"{"query": "select", "from": "test"}"#, "SELECT * FROM `test`"),
        (
            r#"{"query": "select", "from": "test", "columns": ["foo", "bar"]}"#,
            "SELECT `foo`, `bar` FROM `test`",
        ),
        (
            r#"{"query": "create_index", "table": "test", "name": "my_index",
                "index": {"unique": false, "columns": {"foo": "ASC", "bar": "DESC"}}}"#,
            "CREATE INDEX `my_index` ON `test` (`foo` ASC, `bar` DESC)",
        ),
        (
            r#"{"query": "insert", "table": "foo", "columns": ["a", "b", "c"], "values": [[1, 2, 3]]}"#,
            "INSERT INTO `foo` (`a`, `b`, `c`) VALUES (1, 2, 3)",
        ),
        (
            r#"{"query": "update", "table": "table", "set": {"foo": 1, "bar": "baz"}}"#,
            "UPDATE `table` SET `foo` = 1, `bar` = 'baz'",
        ),
        (
            r#"{"query": "drop_table", "table": "test", "if_exists": true, "cascade": true}"#,
            "DROP TABLE IF EXISTS `test` CASCADE",
        ),
    ];
    for (json, sql) in cases {
        assert_eq!(compile_ok(document(json)), sql, "document: {json}");
    }
}

#[test]
fn document_matches_typed_builder() {
    let from_json = document(
        r#"{"query": "update", "table": "table", "set": {"foo": 1, "bar": "baz"}}"#,
    );
    let typed = Update::new().with_table("table").with_set([
        ("foo", Expression::from(1)),
        ("bar", Expression::from("baz")),
    ]);
    assert_eq!(from_json, Query::from(typed));
}

#[test]
fn record_length_error_from_document() {
    let query = document(
        r#"{"query": "insert", "table": "foo", "columns": ["a", "b", "c"], "values": [[1, 2, 3, 4]]}"#,
    );
    let err = compile_err(query);
    assert_eq!(err.kind(), QueryKind::Insert);
    assert!(matches!(
        err.cause(),
        ClauseError::RecordLength { record: 0, .. }
    ));
    let Query::Insert(insert) = err.into_query() else {
        panic!("Expected the failing INSERT");
    };
    assert_eq!(insert.values().len(), 1);
    let typed = Insert::new()
        .with_table("foo")
        .with_columns(["a", "b", "c"])
        .with_values([[1, 2, 3, 4]]);
    assert_eq!(insert, typed);
}

#[test]
fn variables_and_raw_sql() {
    let query = document(
        r#"{"query": "insert", "table": "events", "columns": ["id", "at"],
            "values": [[{"type": "variable", "name": "id"}, {"type": "raw", "sql": "CURRENT_TIMESTAMP"}]],
            "on_duplicate": {"at": {"type": "raw", "sql": "VALUES(`at`)"}}}"#,
    );
    assert_eq!(
        compile_ok(query),
        "INSERT INTO `events` (`id`, `at`) VALUES (??{id}??, CURRENT_TIMESTAMP) \
         ON DUPLICATE KEY UPDATE `at` = VALUES(`at`)"
    );
}

#[test]
fn batch_of_documents() {
    let queries = parse_batch(
        r#"[
            {"query": "drop_table", "table": "a", "if_exists": true},
            {"query": "compound", "queries": [
                {"query": "delete", "table": "b"},
                {"query": "delete", "table": "c"}
            ]}
        ]"#,
    )
    .unwrap();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[1].kind(), QueryKind::Compound);
    assert_eq!(compile_ok(queries[1].clone()), "DELETE FROM `b`;DELETE FROM `c`");
}

#[test]
fn construction_errors_are_reported_before_compile() {
    assert!(matches!(
        Query::from_json(r#"{"query": "select", "from": "t", "where": {"x": 1}}"#),
        Err(DocumentError::Term(_))
    ));
    assert!(matches!(
        Query::from_json("not json"),
        Err(DocumentError::Json(_))
    ));
}

fn malformed_node(json: &str) -> &'static str {
    match Query::from_json(json) {
        Err(DocumentError::Term(TermError::MalformedNode { node, .. })) => node,
        other => panic!("Expected a malformed node for {json}, got {other:?}"),
    }
}

#[test]
fn conditions_must_be_expression_nodes() {
    assert_eq!(
        malformed_node(r#"{"query": "select", "from": "t", "where": 5}"#),
        "where"
    );
    assert_eq!(
        malformed_node(r#"{"query": "select", "from": "t", "where": [1, 2]}"#),
        "where"
    );
    assert_eq!(
        malformed_node(r#"{"query": "select", "from": "t", "having": "x"}"#),
        "having"
    );
    assert_eq!(
        malformed_node(r#"{"query": "update", "table": "t", "set": {"a": 1}, "where": true}"#),
        "where"
    );
    assert_eq!(
        malformed_node(r#"{"query": "delete", "table": "t", "where": 7}"#),
        "where"
    );

    let column = document(
        r#"{"query": "delete", "table": "t", "where": {"type": "column", "name": "done"}}"#,
    );
    assert_eq!(compile_ok(column), "DELETE FROM `t` WHERE `done`");
}

#[test]
fn aliased_wildcard_is_rejected() {
    assert_eq!(
        malformed_node(r#"{"query": "select", "from": "t", "columns": {"x": "*"}}"#),
        "columns"
    );
    let unaliased = document(r#"{"query": "select", "from": "t", "columns": {"0": "*", "n": "name"}}"#);
    assert_eq!(compile_ok(unaliased), "SELECT *, `name` AS `n` FROM `t`");
}
