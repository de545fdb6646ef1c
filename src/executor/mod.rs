//! Executor capabilities — the single-method database shapes a
//! [`QueryStore`](crate::QueryStore) dispatches into.
//!
//! Each trait models exactly one execution mode of a typical SQL client:
//! prepare a statement, run a query returning many rows, run a query
//! returning one row, or execute a statement returning an effect summary.
//! The async variants are the cancellable counterparts: dropping or racing
//! the returned future is how a caller withdraws the call.
//!
//! Associated types keep this crate driver-agnostic — a wrapper around any
//! SQL client can pick its own statement, row, and error types. Parameters
//! are forwarded as a slice of whatever type the executor declares; this
//! crate never inspects them.

use std::future::Future;

/// Prepares a statement from SQL text.
pub trait Preparer {
    /// The prepared statement handle.
    type Statement;
    /// The driver's error type.
    type Error;

    /// Prepare `sql` for later execution.
    fn prepare(&self, sql: &str) -> Result<Self::Statement, Self::Error>;
}

/// Cancellable variant of [`Preparer`].
pub trait AsyncPreparer {
    /// The prepared statement handle.
    type Statement;
    /// The driver's error type.
    type Error;

    /// Prepare `sql` for later execution.
    fn prepare(
        &self,
        sql: &str,
    ) -> impl Future<Output = Result<Self::Statement, Self::Error>> + Send;
}

/// Runs a query returning any number of rows.
pub trait Queryer {
    /// The bound-parameter type forwarded to the driver.
    type Param;
    /// The rows handle produced by the driver.
    type Rows;
    /// The driver's error type.
    type Error;

    /// Run `sql` with `params` and return the resulting rows.
    fn query(&self, sql: &str, params: &[Self::Param]) -> Result<Self::Rows, Self::Error>;
}

/// Cancellable variant of [`Queryer`].
pub trait AsyncQueryer {
    /// The bound-parameter type forwarded to the driver.
    type Param;
    /// The rows handle produced by the driver.
    type Rows;
    /// The driver's error type.
    type Error;

    /// Run `sql` with `params` and return the resulting rows.
    fn query(
        &self,
        sql: &str,
        params: &[Self::Param],
    ) -> impl Future<Output = Result<Self::Rows, Self::Error>> + Send;
}

/// Runs a query expected to yield at most one row.
///
/// There is no error channel here: drivers in this shape defer error
/// detection (including no-rows-found) to the row handle itself, so `Row`
/// is returned as-is and inspected by the caller.
pub trait RowQueryer {
    /// The bound-parameter type forwarded to the driver.
    type Param;
    /// The single-row handle produced by the driver.
    type Row;

    /// Run `sql` with `params` and return the row handle.
    fn query_row(&self, sql: &str, params: &[Self::Param]) -> Self::Row;
}

/// Cancellable variant of [`RowQueryer`].
pub trait AsyncRowQueryer {
    /// The bound-parameter type forwarded to the driver.
    type Param;
    /// The single-row handle produced by the driver.
    type Row;

    /// Run `sql` with `params` and return the row handle.
    fn query_row(&self, sql: &str, params: &[Self::Param])
    -> impl Future<Output = Self::Row> + Send;
}

/// Executes a statement, returning an effect summary rather than rows.
pub trait Execer {
    /// The bound-parameter type forwarded to the driver.
    type Param;
    /// The effect summary (rows affected, last insert id, ...).
    type Outcome;
    /// The driver's error type.
    type Error;

    /// Execute `sql` with `params`.
    fn exec(&self, sql: &str, params: &[Self::Param]) -> Result<Self::Outcome, Self::Error>;
}

/// Cancellable variant of [`Execer`].
pub trait AsyncExecer {
    /// The bound-parameter type forwarded to the driver.
    type Param;
    /// The effect summary (rows affected, last insert id, ...).
    type Outcome;
    /// The driver's error type.
    type Error;

    /// Execute `sql` with `params`.
    fn exec(
        &self,
        sql: &str,
        params: &[Self::Param],
    ) -> impl Future<Output = Result<Self::Outcome, Self::Error>> + Send;
}
