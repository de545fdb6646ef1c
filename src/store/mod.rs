//! The loaded query collection and its name-based dispatch layer.
//!
//! A [`QueryStore`] maps tag names to SQL text. It is built once by one of
//! the load entry points and never mutated afterwards, so lookups and
//! dispatch are plain `&self` reads and safe to share across threads.
//! Dispatch resolves a name and hands the SQL text, with the caller's
//! parameters, to one of the [`executor`](crate::executor) capabilities —
//! nothing is wrapped, retried, or interpreted on the way through.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, trace};

use crate::executor::{
    AsyncExecer, AsyncPreparer, AsyncQueryer, AsyncRowQueryer, Execer, Preparer, Queryer,
    RowQueryer,
};
use crate::scanner::Scanner;

/// Errors produced by a [`QueryStore`].
///
/// `E` is the executor's own error type; operations that never touch an
/// executor (such as [`QueryStore::raw`]) leave it at the default
/// [`Infallible`], so only [`Error::NotFound`] can occur there.
#[derive(Debug, Error)]
pub enum Error<E = Infallible> {
    /// The requested name has no entry in the store.
    #[error("query '{0}' could not be found")]
    NotFound(String),

    /// An error returned by the executor capability, passed through
    /// unchanged — display and source both defer to the driver.
    #[error(transparent)]
    Driver(E),
}

/// A read-only collection of named SQL statements.
///
/// Built by [`load`](QueryStore::load), [`load_str`](QueryStore::load_str),
/// or [`load_file`](QueryStore::load_file) from text in which each
/// statement is preceded by a `-- name: <tag>` comment line.
///
/// # Examples
///
/// ```
/// use sqlstash::QueryStore;
///
/// let store = QueryStore::load_str(
///     "-- name: all-products\n\
///      -- Finds all products\n\
///      SELECT * FROM products",
/// );
///
/// assert_eq!(
///     store.raw("all-products").unwrap(),
///     "-- Finds all products\nSELECT * FROM products",
/// );
/// assert!(store.raw("missing").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryStore {
    queries: HashMap<String, String>,
}

impl QueryStore {
    /// Loads a store from a readable character stream.
    ///
    /// # Errors
    ///
    /// Returns any [`io::Error`] raised while reading, unchanged.
    pub fn load(mut reader: impl Read) -> io::Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::load_str(&text))
    }

    /// Loads a store from an in-memory string. Cannot fail: lines that fit
    /// no tagged group are simply discarded.
    pub fn load_str(sql: &str) -> Self {
        let queries = Scanner::default().run(sql.lines());
        debug!(count = queries.len(), "query store loaded");
        Self { queries }
    }

    /// Loads a store from a file path.
    ///
    /// # Errors
    ///
    /// Returns the [`io::Error`] from opening or reading the file,
    /// unchanged.
    pub fn load_file(path: impl AsRef<Path>) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::load_str(&text))
    }

    /// Builds a store holding the union of the given stores' queries.
    ///
    /// Stores are applied in iteration order, so when two stores define the
    /// same name the later one wins. The inputs are left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use sqlstash::QueryStore;
    ///
    /// let a = QueryStore::load_str("-- name: q\nSELECT old");
    /// let b = QueryStore::load_str("-- name: q\nSELECT new");
    ///
    /// let merged = QueryStore::merge([&a, &b]);
    /// assert_eq!(merged.raw("q").unwrap(), "SELECT new");
    /// ```
    pub fn merge<'a>(stores: impl IntoIterator<Item = &'a QueryStore>) -> Self {
        let mut queries = HashMap::new();
        for store in stores {
            for (name, sql) in &store.queries {
                queries.insert(name.clone(), sql.clone());
            }
        }
        Self { queries }
    }

    /// Returns the literal SQL text stored under `name`, for callers who
    /// want to run it themselves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no query has that name.
    pub fn raw(&self, name: &str) -> Result<&str, Error> {
        self.lookup(name)
    }

    /// Returns the full name → SQL mapping as a read-only borrow.
    pub fn query_map(&self) -> &HashMap<String, String> {
        &self.queries
    }

    /// Resolves `name` and prepares the statement on `db`.
    ///
    /// On a missing name the executor is never invoked.
    pub fn prepare<P: Preparer>(
        &self,
        db: &P,
        name: &str,
    ) -> Result<P::Statement, Error<P::Error>> {
        let sql = self.lookup(name)?;
        db.prepare(sql).map_err(Error::Driver)
    }

    /// Cancellable variant of [`prepare`](Self::prepare): drop or race the
    /// returned future to withdraw the call.
    pub async fn prepare_async<P: AsyncPreparer>(
        &self,
        db: &P,
        name: &str,
    ) -> Result<P::Statement, Error<P::Error>> {
        let sql = self.lookup(name)?;
        db.prepare(sql).await.map_err(Error::Driver)
    }

    /// Resolves `name` and runs it on `db`, forwarding `params` untouched.
    ///
    /// On a missing name the executor is never invoked.
    pub fn query<Q: Queryer>(
        &self,
        db: &Q,
        name: &str,
        params: &[Q::Param],
    ) -> Result<Q::Rows, Error<Q::Error>> {
        let sql = self.lookup(name)?;
        db.query(sql, params).map_err(Error::Driver)
    }

    /// Cancellable variant of [`query`](Self::query).
    pub async fn query_async<Q: AsyncQueryer>(
        &self,
        db: &Q,
        name: &str,
        params: &[Q::Param],
    ) -> Result<Q::Rows, Error<Q::Error>> {
        let sql = self.lookup(name)?;
        db.query(sql, params).await.map_err(Error::Driver)
    }

    /// Resolves `name` and runs it on `db`, returning the driver's row
    /// handle untouched.
    ///
    /// Only the lookup can fail here; whether the row actually holds data
    /// (or a deferred driver error) is for the caller to inspect through
    /// the handle's own API.
    pub fn query_row<Q: RowQueryer>(
        &self,
        db: &Q,
        name: &str,
        params: &[Q::Param],
    ) -> Result<Q::Row, Error> {
        let sql = self.lookup(name)?;
        Ok(db.query_row(sql, params))
    }

    /// Cancellable variant of [`query_row`](Self::query_row).
    pub async fn query_row_async<Q: AsyncRowQueryer>(
        &self,
        db: &Q,
        name: &str,
        params: &[Q::Param],
    ) -> Result<Q::Row, Error> {
        let sql = self.lookup(name)?;
        Ok(db.query_row(sql, params).await)
    }

    /// Resolves `name` and executes it on `db`, forwarding `params`
    /// untouched.
    ///
    /// On a missing name the executor is never invoked.
    pub fn exec<X: Execer>(
        &self,
        db: &X,
        name: &str,
        params: &[X::Param],
    ) -> Result<X::Outcome, Error<X::Error>> {
        let sql = self.lookup(name)?;
        db.exec(sql, params).map_err(Error::Driver)
    }

    /// Cancellable variant of [`exec`](Self::exec).
    pub async fn exec_async<X: AsyncExecer>(
        &self,
        db: &X,
        name: &str,
        params: &[X::Param],
    ) -> Result<X::Outcome, Error<X::Error>> {
        let sql = self.lookup(name)?;
        db.exec(sql, params).await.map_err(Error::Driver)
    }

    fn lookup<E>(&self, name: &str) -> Result<&str, Error<E>> {
        match self.queries.get(name) {
            Some(sql) => {
                trace!(name, "query resolved");
                Ok(sql)
            }
            None => Err(Error::NotFound(name.to_owned())),
        }
    }
}
