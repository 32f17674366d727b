//! Row mapping traits.

use crate::error::QueryResult;
use tokio_postgres::Row;

/// Trait for converting database rows to Rust structs.
///
/// # Example
/// ```ignore
/// use pgbind::{FromRow, QueryResult, RowExt};
/// use tokio_postgres::Row;
///
/// struct SearchKey {
///     id: i64,
///     key: String,
/// }
///
/// impl FromRow for SearchKey {
///     fn from_row(row: &Row) -> QueryResult<Self> {
///         Ok(Self {
///             id: row.try_get_column("id")?,
///             key: row.try_get_column("key")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> QueryResult<Self>;
}

/// Extension trait for Row to provide typed access
pub trait RowExt {
    /// Try to get a column value, returning [`crate::QueryError::Decode`] on failure
    fn try_get_column<T>(&self, column: &str) -> QueryResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>;
}

impl RowExt for Row {
    fn try_get_column<T>(&self, column: &str) -> QueryResult<T>
    where
        T: for<'a> tokio_postgres::types::FromSql<'a>,
    {
        self.try_get(column)
            .map_err(|e| crate::error::QueryError::decode(column, e.to_string()))
    }
}
