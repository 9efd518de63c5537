//! Query execution through a [`DatabaseAdapter`].

use tracing::{debug, warn};

use super::{DatabaseAdapter, Params, Row};
use crate::error::{self, ExecuteError};
use crate::placeholder::{self, BoundQuery};
use crate::query::{
    Compound, CreateIndex, CreateTable, Delete, DropTable, Insert, Select, Update,
};

type ExecResult<T, A> = Result<T, ExecuteError<<A as DatabaseAdapter>::Error>>;

fn checked<T>(compiled: error::Result<T>) -> error::Result<T> {
    compiled.map_err(|err| {
        warn!(kind = %err.kind(), error = %err, "Query failed to compile");
        err
    })
}

/// Compiles, then binds variables in the adapter's placeholder style.
fn prepare<A: DatabaseAdapter>(
    adapter: &A,
    compiled: error::Result<String>,
    params: &Params,
) -> ExecResult<BoundQuery, A> {
    let sql = checked(compiled)?;
    let bound = placeholder::bind(&sql, params, adapter.placeholder_style())?;
    debug!(sql = %bound.sql, args = bound.values.len(), "Executing SQL");
    Ok(bound)
}

fn adapter_error<A: DatabaseAdapter>(adapter: &A, err: A::Error) -> ExecuteError<A::Error> {
    let last_error = adapter.last_error().unwrap_or_default();
    warn!(error = %err, last_error = %last_error, "Database adapter failed");
    ExecuteError::Adapter(err)
}

fn run<A: DatabaseAdapter>(
    adapter: &A,
    compiled: error::Result<String>,
    params: &Params,
) -> ExecResult<bool, A> {
    let bound = prepare(adapter, compiled, params)?;
    adapter
        .query(&bound.sql, &bound.values)
        .map_err(|err| adapter_error(adapter, err))
}

impl Select {
    /// Runs the query and returns all rows.
    ///
    /// # Errors
    ///
    /// Fails when the query does not compile, a variable is unbound or the
    /// adapter reports an error.
    pub fn fetch_all<A: DatabaseAdapter>(
        &self,
        adapter: &A,
        params: &Params,
    ) -> ExecResult<Vec<Row>, A> {
        let bound = prepare(adapter, self.compile(), params)?;
        adapter
            .query_results(&bound.sql, &bound.values)
            .map_err(|err| adapter_error(adapter, err))
    }

    /// Runs the query and returns the first row, if any.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_all`](Self::fetch_all).
    pub fn fetch_one<A: DatabaseAdapter>(
        &self,
        adapter: &A,
        params: &Params,
    ) -> ExecResult<Option<Row>, A> {
        Ok(self.fetch_all(adapter, params)?.into_iter().next())
    }
}

macro_rules! impl_execute_count {
    ($($ty:ty),+) => {
        $(
            impl $ty {
                /// Runs the statement and returns the number of affected rows.
                ///
                /// # Errors
                ///
                /// Fails when the statement does not compile, a variable is
                /// unbound or the adapter reports an error.
                pub fn execute<A: DatabaseAdapter>(
                    &self,
                    adapter: &A,
                    params: &Params,
                ) -> ExecResult<u64, A> {
                    let bound = prepare(adapter, self.compile(), params)?;
                    adapter
                        .query_num_rows(&bound.sql, &bound.values)
                        .map_err(|err| adapter_error(adapter, err))
                }
            }
        )+
    };
}

macro_rules! impl_execute_flag {
    ($($ty:ty),+) => {
        $(
            impl $ty {
                /// Runs the statement and reports whether it succeeded.
                ///
                /// # Errors
                ///
                /// Fails when the statement does not compile, a variable is
                /// unbound or the adapter reports an error.
                pub fn execute<A: DatabaseAdapter>(
                    &self,
                    adapter: &A,
                    params: &Params,
                ) -> ExecResult<bool, A> {
                    run(adapter, self.compile(), params)
                }
            }
        )+
    };
}

impl_execute_count!(Update, Delete);
impl_execute_flag!(Insert, CreateTable, CreateIndex, DropTable);

impl Insert {
    /// Runs the statement and returns the generated id on success.
    ///
    /// # Errors
    ///
    /// Same as [`execute`](Self::execute).
    pub fn execute_returning_id<A: DatabaseAdapter>(
        &self,
        adapter: &A,
        params: &Params,
    ) -> ExecResult<Option<i64>, A> {
        Ok(if self.execute(adapter, params)? {
            adapter.insert_id()
        } else {
            None
        })
    }
}

impl Compound {
    /// Runs the statements in order, stopping at the first one that does not
    /// succeed.
    ///
    /// The whole batch is compiled before anything runs, so an invalid member
    /// never leaves earlier statements applied.
    ///
    /// # Errors
    ///
    /// Fails when the batch does not compile, a variable is unbound or the
    /// adapter reports an error.
    pub fn execute<A: DatabaseAdapter>(
        &self,
        adapter: &A,
        params: &Params,
    ) -> ExecResult<bool, A> {
        let statements = checked(self.statements())?;
        let style = adapter.placeholder_style();
        let bound = statements
            .iter()
            .map(|sql| placeholder::bind(sql, params, style))
            .collect::<Result<Vec<_>, _>>()?;
        for (position, statement) in bound.iter().enumerate() {
            debug!(position, sql = %statement.sql, args = statement.values.len(), "Executing SQL");
            let succeeded = adapter
                .query(&statement.sql, &statement.values)
                .map_err(|err| adapter_error(adapter, err))?;
            if !succeeded {
                warn!(position, "Statement failed, stopping batch");
                return Ok(false);
            }
        }
        Ok(true)
    }
}
