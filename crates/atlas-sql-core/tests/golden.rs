//! Byte-exact compiled output for the reference scenarios. Any change here is
//! a breaking change for callers comparing SQL text.

mod common;
use common::*;

use atlas_sql_core::{
    ClauseError, CreateIndex, DropTable, Expression, Index, Insert, Query, QueryKind, Select,
    Sort, Update,
};

#[test]
fn select_star_from_table() {
    assert_eq!(
        compile_ok(Select::new().with_from("test")),
        "SELECT * FROM `test`"
    );
}

#[test]
fn select_columns_from_table() {
    assert_eq!(
        compile_ok(Select::new().with_from("test").with_columns(["foo", "bar"])),
        "SELECT `foo`, `bar` FROM `test`"
    );
}

#[test]
fn create_index_with_sorted_columns() {
    let index = Index::new()
        .column_sorted("foo", Sort::Asc)
        .column_sorted("bar", Sort::Desc);
    let query = CreateIndex::new()
        .with_table("test")
        .with_name("my_index")
        .with_index(index);
    assert_eq!(
        compile_ok(query),
        "CREATE INDEX `my_index` ON `test` (`foo` ASC, `bar` DESC)"
    );
}

#[test]
fn insert_single_record() {
    let query = Insert::new()
        .with_table("foo")
        .with_columns(["a", "b", "c"])
        .with_values([[1, 2, 3]]);
    assert_eq!(
        compile_ok(query),
        "INSERT INTO `foo` (`a`, `b`, `c`) VALUES (1, 2, 3)"
    );
}

#[test]
fn update_set_in_insertion_order() {
    let query = Update::new().with_table("table").with_set([
        ("foo", Expression::from(1)),
        ("bar", Expression::from("baz")),
    ]);
    assert_eq!(
        compile_ok(query),
        "UPDATE `table` SET `foo` = 1, `bar` = 'baz'"
    );
}

#[test]
fn drop_table_if_exists_cascade() {
    let query = DropTable::new()
        .with_table("test")
        .with_if_exists(true)
        .with_cascade(true);
    assert_eq!(compile_ok(query), "DROP TABLE IF EXISTS `test` CASCADE");
}

#[test]
fn insert_record_length_mismatch() {
    let query = Insert::new()
        .with_table("foo")
        .with_columns(["a", "b", "c"])
        .with_values([vec![1, 2, 3], vec![1, 2, 3, 4]]);
    let err = compile_err(query.clone());

    assert!(matches!(
        err.cause(),
        ClauseError::RecordLength {
            record: 1,
            expected: 3,
            found: 4
        }
    ));
    assert_eq!(err.kind(), QueryKind::Insert);
    assert_eq!(err.query(), &Query::from(query));
    assert!(err.to_string().contains("VALUES record 1 has 4 values, expected 3"));
}
