#![allow(dead_code)]

use std::cell::RefCell;

use atlas_sql_core::{CompileError, DatabaseAdapter, PlaceholderStyle, Query, Row, SqlValue};

pub fn compile_ok(query: impl Into<Query>) -> String {
    let query = query.into();
    query
        .compile()
        .unwrap_or_else(|e| panic!("Failed to compile: {query:?}\nError: {e}"))
}

pub fn compile_err(query: impl Into<Query>) -> CompileError {
    let query = query.into();
    query
        .compile()
        .expect_err(&format!("Expected compile error for: {query:?}"))
}

#[derive(Debug, thiserror::Error)]
#[error("mock failure: {0}")]
pub struct MockError(pub String);

/// One adapter call: method, SQL and positional arguments.
pub type Call = (&'static str, String, Vec<SqlValue>);

/// Records every call and answers from canned results.
#[derive(Default)]
pub struct MockAdapter {
    pub calls: RefCell<Vec<Call>>,
    pub rows: Vec<Row>,
    pub affected: u64,
    pub fail_on: Option<String>,
    pub reject_on: Option<String>,
    pub style: PlaceholderStyle,
    pub insert_id: Option<i64>,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self {
            style: PlaceholderStyle::Question,
            ..Self::default()
        }
    }

    pub fn sql(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.1.clone()).collect()
    }

    fn record(&self, method: &'static str, sql: &str, args: &[SqlValue]) -> Result<(), MockError> {
        self.calls
            .borrow_mut()
            .push((method, sql.to_string(), args.to_vec()));
        match &self.fail_on {
            Some(needle) if sql.contains(needle.as_str()) => Err(MockError(needle.clone())),
            _ => Ok(()),
        }
    }
}

impl DatabaseAdapter for MockAdapter {
    type Error = MockError;

    fn query_results(&self, sql: &str, args: &[SqlValue]) -> Result<Vec<Row>, MockError> {
        self.record("query_results", sql, args)?;
        Ok(self.rows.clone())
    }

    fn query_num_rows(&self, sql: &str, args: &[SqlValue]) -> Result<u64, MockError> {
        self.record("query_num_rows", sql, args)?;
        Ok(self.affected)
    }

    fn query(&self, sql: &str, args: &[SqlValue]) -> Result<bool, MockError> {
        self.record("query", sql, args)?;
        Ok(!matches!(&self.reject_on, Some(needle) if sql.contains(needle.as_str())))
    }

    fn insert_id(&self) -> Option<i64> {
        self.insert_id
    }

    fn last_error(&self) -> Option<String> {
        self.fail_on.clone()
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        self.style
    }
}
