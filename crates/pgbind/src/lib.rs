//! # pgbind
//!
//! Composable SQL clauses and dialect-aware parameter binding for
//! PostgreSQL.
//!
//! ## Features
//!
//! - **Self-contained clauses**: every clause value renders its SQL fragment
//!   and tracks the named arguments it references, so argument maps compose
//!   by union at any nesting depth
//! - **Template builders**: per-table `SELECT`/`INSERT`/`UPDATE`/`DELETE`
//!   templates with `{name}` placeholders, built from clause values
//! - **Dialect binding**: one render step turns a template + argument map
//!   into driver-ready SQL - `$1..$N` with per-name deduplication, or `?`
//!   per occurrence
//! - **Safe defaults**: DELETE requires a non-empty filter, UPDATE requires
//!   SET values, unknown columns and unresolved placeholders are rejected
//! - **Explicit execution**: the optional [`Session`] layer borrows a
//!   `tokio-postgres` client or transaction; no ambient connection state
//!
//! ## Building and rendering
//!
//! ```ignore
//! use pgbind::{ArgMap, Dialect, Limit, OnConflict, TableBuilder, Where};
//!
//! let builder = TableBuilder::new("search_keys", ["id", "key", "date_created"])
//!     .pkeys(["id"]);
//!
//! // SELECT ... WHERE (id = {id}) LIMIT {__LIMIT__};
//! let template = builder.select(
//!     Some(Where::new().bind("id", 699_i64)),
//!     None,
//!     Some(Limit::new(1)),
//! );
//!
//! // SELECT ... WHERE (id = $1) LIMIT $2;  + [699, 1]
//! let query = template.render(Dialect::Indexed)?;
//! client.query(&query.sql, &query.params_ref()).await?;
//! ```

pub mod builder;
pub mod clause;
pub mod client;
pub mod error;
pub mod relation;
pub mod render;
pub mod row;
pub mod session;
pub mod value;

pub use builder::{Attribute, OnConflict, QueryTemplate, TableBuilder};
pub use clause::{
    And, Clause, Cond, CondItem, FromTable, GroupBy, LIMIT_ARG, Limit, Or, OrderBy, Select, Where,
};
pub use client::GenericClient;
pub use error::{QueryError, QueryResult};
pub use render::{Dialect, SqlQuery, render};
pub use relation::Relation;
pub use row::{FromRow, RowExt};
pub use session::Session;
pub use value::{ArgMap, SqlArg, SqlValue, Verbatim};
