//! Typed CRUD operations over a caller-supplied client.
//!
//! [`Session`] wires the layers together: it builds a template from a
//! [`Relation`]'s metadata, renders it with the indexed dialect
//! (`tokio-postgres` convention), executes it on the borrowed client, and
//! hydrates rows through [`FromRow`]. It owns no connection and no pool.
//!
//! # Example
//! ```ignore
//! use pgbind::{ArgMap, OnConflict, Session, Where};
//!
//! let session = Session::new(&client);
//!
//! let created: Option<SearchKey> = session
//!     .create(ArgMap::new().with("key", "rust"), OnConflict::Error)
//!     .await?;
//!
//! let found: Vec<SearchKey> = session
//!     .get(Some(Where::new().bind("key", "rust")), None, None)
//!     .await?;
//! ```

use crate::builder::{OnConflict, TableBuilder};
use crate::clause::{Limit, OrderBy, Where};
use crate::client::GenericClient;
use crate::error::QueryResult;
use crate::relation::Relation;
use crate::render::{Dialect, SqlQuery};
use crate::row::FromRow;
use crate::value::ArgMap;
use tracing::debug;

/// Executes built queries against a caller-supplied client.
pub struct Session<'a, C> {
    client: &'a C,
}

impl<'a, C: GenericClient> Session<'a, C> {
    /// Wrap a client or transaction.
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Insert a new row and return the stored model.
    ///
    /// Returns `None` when a `DO NOTHING` conflict clause suppressed the
    /// insert.
    pub async fn create<R>(&self, values: ArgMap, on_conflict: OnConflict) -> QueryResult<Option<R>>
    where
        R: Relation + FromRow,
    {
        let query = TableBuilder::for_relation::<R>()
            .insert(values, on_conflict)?
            .render(Dialect::Indexed)?;
        self.log("create", &query);
        let row = self.client.query_opt(&query.sql, &query.params_ref()).await?;
        row.as_ref().map(R::from_row).transpose()
    }

    /// Fetch all rows matching the filter.
    pub async fn get<R>(
        &self,
        filter: Option<Where>,
        order_by: Option<OrderBy>,
        limit: Option<Limit>,
    ) -> QueryResult<Vec<R>>
    where
        R: Relation + FromRow,
    {
        let query = TableBuilder::for_relation::<R>()
            .select(filter, order_by, limit)
            .render(Dialect::Indexed)?;
        self.log("get", &query);
        let rows = self.client.query(&query.sql, &query.params_ref()).await?;
        rows.iter().map(R::from_row).collect()
    }

    /// Fetch a single row matching the filter, or `None`.
    pub async fn get_one<R>(&self, filter: Option<Where>) -> QueryResult<Option<R>>
    where
        R: Relation + FromRow,
    {
        let query = TableBuilder::for_relation::<R>()
            .select(filter, None, Some(Limit::new(1)))
            .render(Dialect::Indexed)?;
        self.log("get_one", &query);
        let row = self.client.query_opt(&query.sql, &query.params_ref()).await?;
        row.as_ref().map(R::from_row).transpose()
    }

    /// Update matching rows and return the updated models.
    pub async fn update<R>(&self, filter: Option<Where>, set: ArgMap) -> QueryResult<Vec<R>>
    where
        R: Relation + FromRow,
    {
        let query = TableBuilder::for_relation::<R>()
            .update(filter, set)?
            .render(Dialect::Indexed)?;
        self.log("update", &query);
        let rows = self.client.query(&query.sql, &query.params_ref()).await?;
        rows.iter().map(R::from_row).collect()
    }

    /// Delete matching rows and return the affected count.
    ///
    /// The filter must be non-empty; see [`TableBuilder::delete`].
    pub async fn delete<R>(&self, filter: Where) -> QueryResult<u64>
    where
        R: Relation,
    {
        let query = TableBuilder::for_relation::<R>()
            .delete(filter)?
            .render(Dialect::Indexed)?;
        self.log("delete", &query);
        self.client.execute(&query.sql, &query.params_ref()).await
    }

    fn log(&self, op: &str, query: &SqlQuery) {
        debug!(sql = %query.sql, params = query.values.len(), "{op}");
    }
}
