//! # sqlstash
//!
//! Keep SQL where it belongs — in `.sql` files. `sqlstash` loads a text
//! file of statements annotated with `-- name:` tags and lets you run each
//! one by name against whatever database handle you already use.
//!
//! ```sql
//! -- name: all-products
//! -- Finds all products
//! SELECT * from products
//!
//! -- name: save-product
//! INSERT INTO products (?, ?, ?)
//! ```
//!
//! The crate never talks to a database itself: each dispatch operation
//! hands the resolved SQL text (and your parameters) to a small
//! [`executor`] capability trait that your connection type implements.
//!
//! ## Quick Start
//!
//! ```rust
//! use sqlstash::{QueryStore, executor::Execer};
//!
//! struct Conn; // stand-in for your database handle
//!
//! impl Execer for Conn {
//!     type Param = i64;
//!     type Outcome = u64;
//!     type Error = std::io::Error;
//!
//!     fn exec(&self, sql: &str, params: &[i64]) -> Result<u64, std::io::Error> {
//!         println!("executing {sql} with {params:?}");
//!         Ok(1)
//!     }
//! }
//!
//! let store = QueryStore::load_str(
//!     "-- name: bump\nUPDATE counters SET n = n + ? WHERE id = ?",
//! );
//!
//! let affected = store.exec(&Conn, "bump", &[1, 42])?;
//! assert_eq!(affected, 1);
//! # Ok::<(), sqlstash::Error<std::io::Error>>(())
//! ```

mod scanner;

pub mod executor;
pub mod store;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use executor::{
    AsyncExecer, AsyncPreparer, AsyncQueryer, AsyncRowQueryer, Execer, Preparer, Queryer,
    RowQueryer,
};
pub use store::{Error, QueryStore};
