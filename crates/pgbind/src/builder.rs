//! Table-scoped query template builders.
//!
//! A [`TableBuilder`] knows one table's name, attributes, and primary keys,
//! and assembles `{name}`-templated CRUD statements from clause values. The
//! returned [`QueryTemplate`] pairs the unresolved SQL text with the raw
//! argument map collected from the embedded clauses.
//!
//! # Example
//! ```ignore
//! use pgbind::{Dialect, Limit, TableBuilder, Where};
//!
//! let builder = TableBuilder::new("search_keys", ["id", "key", "date_created"]);
//! let template = builder.select(
//!     Some(Where::new().bind("id", 699_i64)),
//!     None,
//!     Some(Limit::new(1)),
//! );
//! let query = template.render(Dialect::Indexed)?;
//! ```

use crate::clause::{Limit, OrderBy, Where};
use crate::error::{QueryError, QueryResult};
use crate::render::{Dialect, SqlQuery, render};
use crate::value::ArgMap;

/// A table column as the builder sees it: the insert/update name plus an
/// optional expression used in select lists in place of the bare name.
#[derive(Debug, Clone)]
pub struct Attribute {
    name: String,
    select_as: Option<String>,
}

impl Attribute {
    /// A plain column.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            select_as: None,
        }
    }

    /// A column selected through an expression (e.g. `"length(key) AS key_len"`).
    pub fn selected_as(name: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            select_as: Some(expr.into()),
        }
    }

    /// The column name used for insert/update targets.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The expression used in select lists.
    pub fn select_expr(&self) -> &str {
        self.select_as.as_deref().unwrap_or(&self.name)
    }
}

impl From<&str> for Attribute {
    fn from(name: &str) -> Self {
        Attribute::new(name)
    }
}

impl From<String> for Attribute {
    fn from(name: String) -> Self {
        Attribute::new(name)
    }
}

/// An unrendered SQL template paired with its raw named arguments.
#[derive(Debug, Clone)]
pub struct QueryTemplate {
    /// SQL text with `{name}` placeholders.
    pub sql: String,
    /// Raw argument map the placeholders resolve against.
    pub args: ArgMap,
}

impl QueryTemplate {
    /// Bind the template's placeholders for the given dialect.
    pub fn render(&self, dialect: Dialect) -> QueryResult<SqlQuery> {
        render(&self.sql, &self.args, dialect)
    }
}

/// Conflict handling for [`TableBuilder::insert`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnConflict {
    /// No conflict clause; let the database raise.
    #[default]
    Error,
    /// `ON CONFLICT (<pkeys>) DO NOTHING`
    DoNothing,
    /// `ON CONFLICT (<pkeys>) DO UPDATE SET col = EXCLUDED.col` for every
    /// inserted non-key column.
    DoUpdate,
}

/// Builds `{name}`-templated CRUD statements for one table.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    table: String,
    attrs: Vec<Attribute>,
    pkeys: Vec<String>,
    select_list: String,
}

impl TableBuilder {
    /// Create a builder for `table` over the given attributes.
    pub fn new(
        table: impl Into<String>,
        attrs: impl IntoIterator<Item = impl Into<Attribute>>,
    ) -> Self {
        let attrs: Vec<Attribute> = attrs.into_iter().map(Into::into).collect();
        let select_list = attrs
            .iter()
            .map(Attribute::select_expr)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            table: table.into(),
            attrs,
            pkeys: Vec::new(),
            select_list,
        }
    }

    /// Declare the primary-key columns (required for conflict clauses).
    pub fn pkeys(mut self, pkeys: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.pkeys = pkeys.into_iter().map(Into::into).collect();
        self
    }

    /// The table this builder targets.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Build `SELECT <attrs> FROM <table> <where> <order_by> <limit>;`.
    ///
    /// Omitted clauses are no-ops; the raw arguments are the union of the
    /// three clauses' collected arguments.
    pub fn select(
        &self,
        filter: Option<Where>,
        order_by: Option<OrderBy>,
        limit: Option<Limit>,
    ) -> QueryTemplate {
        let filter = filter.unwrap_or_default();
        let order_by = order_by.unwrap_or_default();
        let limit = limit.unwrap_or_default();

        let mut args = filter.args();
        args.merge(order_by.args());
        args.merge(limit.args());

        let sql = statement([
            format!("SELECT {}", self.select_list),
            format!("FROM {}", self.table),
            filter.render(),
            order_by.render(),
            limit.render(),
        ]);
        QueryTemplate { sql, args }
    }

    /// Build `UPDATE <table> SET ... <where> RETURNING (<attrs>);`.
    ///
    /// Requires at least one set value; every set key must name a known
    /// attribute. Set keys win over where-clause arguments on collision,
    /// since they are the designated bind targets for the SET list.
    pub fn update(&self, filter: Option<Where>, set: ArgMap) -> QueryResult<QueryTemplate> {
        if set.is_empty() {
            return Err(QueryError::invalid(format!(
                "UPDATE {} requires at least one SET value",
                self.table
            )));
        }
        self.check_known_columns(&set)?;

        let filter = filter.unwrap_or_default();
        let set_list = set
            .names()
            .map(|key| format!("{key} = {{{key}}}"))
            .collect::<Vec<_>>()
            .join(", ");

        let mut args = filter.args();
        args.merge(set);

        let sql = statement([
            format!("UPDATE {}", self.table),
            format!("SET {set_list}"),
            filter.render(),
            format!("RETURNING ({})", self.select_list),
        ]);
        Ok(QueryTemplate { sql, args })
    }

    /// Build `INSERT INTO <table> (...) VALUES (...) [conflict] RETURNING (<attrs>);`.
    ///
    /// Requires at least one value; every key must name a known attribute.
    /// Conflict clauses require declared primary keys.
    pub fn insert(&self, values: ArgMap, on_conflict: OnConflict) -> QueryResult<QueryTemplate> {
        if values.is_empty() {
            return Err(QueryError::invalid(format!(
                "INSERT INTO {} requires at least one value",
                self.table
            )));
        }
        self.check_known_columns(&values)?;

        let columns = values.names().collect::<Vec<_>>().join(", ");
        let placeholders = values
            .names()
            .map(|key| format!("{{{key}}}"))
            .collect::<Vec<_>>()
            .join(", ");

        let conflict = match on_conflict {
            OnConflict::Error => String::new(),
            OnConflict::DoNothing => {
                format!("ON CONFLICT ({}) DO NOTHING", self.pkey_list()?)
            }
            OnConflict::DoUpdate => {
                let set = values
                    .names()
                    .filter(|key| !self.pkeys.iter().any(|pk| pk == key))
                    .map(|key| format!("{key} = EXCLUDED.{key}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                if set.is_empty() {
                    return Err(QueryError::invalid(format!(
                        "INSERT INTO {} has no non-key column to update on conflict",
                        self.table
                    )));
                }
                format!("ON CONFLICT ({}) DO UPDATE SET {set}", self.pkey_list()?)
            }
        };

        let sql = statement([
            format!("INSERT INTO {} ({columns})", self.table),
            format!("VALUES ({placeholders})"),
            conflict,
            format!("RETURNING ({})", self.select_list),
        ]);
        Ok(QueryTemplate { sql, args: values })
    }

    /// Build `DELETE FROM <table> <where>;`.
    ///
    /// The filter must be non-empty: an empty `Where` renders to nothing,
    /// which would delete the whole table.
    pub fn delete(&self, filter: Where) -> QueryResult<QueryTemplate> {
        if filter.is_empty() {
            return Err(QueryError::invalid(format!(
                "DELETE FROM {} requires a non-empty WHERE filter",
                self.table
            )));
        }
        let sql = statement([format!("DELETE FROM {}", self.table), filter.render()]);
        Ok(QueryTemplate {
            sql,
            args: filter.args(),
        })
    }

    fn check_known_columns(&self, values: &ArgMap) -> QueryResult<()> {
        for name in values.names() {
            if !self.attrs.iter().any(|attr| attr.name() == name) {
                return Err(QueryError::invalid(format!(
                    "unknown column '{name}' for table {}",
                    self.table
                )));
            }
        }
        Ok(())
    }

    fn pkey_list(&self) -> QueryResult<String> {
        if self.pkeys.is_empty() {
            return Err(QueryError::invalid(format!(
                "conflict clause on {} requires declared primary keys",
                self.table
            )));
        }
        Ok(self.pkeys.join(", "))
    }
}

/// Join the non-empty fragments with single spaces and terminate.
fn statement(fragments: impl IntoIterator<Item = String>) -> String {
    let mut sql = fragments
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    sql.push(';');
    sql
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> TableBuilder {
        TableBuilder::new("search_keys", ["id", "key", "date_created"]).pkeys(["id"])
    }

    // ==================== select ====================

    #[test]
    fn select_with_no_clauses() {
        let t = builder().select(None, None, None);
        assert_eq!(t.sql, "SELECT id, key, date_created FROM search_keys;");
        assert!(t.args.is_empty());
    }

    #[test]
    fn select_with_where_order_limit() {
        let t = builder().select(
            Some(Where::new().bind("id", 699_i64)),
            Some(OrderBy::new().expr("date_created DESC")),
            Some(Limit::new(1)),
        );
        assert_eq!(
            t.sql,
            "SELECT id, key, date_created FROM search_keys WHERE (id = {id}) \
             ORDER BY date_created DESC LIMIT {__LIMIT__};"
        );
        assert_eq!(t.args.names().collect::<Vec<_>>(), vec!["id", "__LIMIT__"]);
    }

    #[test]
    fn select_uses_selected_as_expressions() {
        let b = TableBuilder::new(
            "search_keys",
            [
                Attribute::new("id"),
                Attribute::selected_as("key", "upper(key) AS key"),
            ],
        );
        let t = b.select(None, None, None);
        assert_eq!(t.sql, "SELECT id, upper(key) AS key FROM search_keys;");
    }

    // ==================== update ====================

    #[test]
    fn update_sets_and_filters() {
        let t = builder()
            .update(
                Some(Where::new().bind("id", 1_i64)),
                ArgMap::new().with("key", "updated-key-text"),
            )
            .unwrap();
        assert_eq!(
            t.sql,
            "UPDATE search_keys SET key = {key} WHERE (id = {id}) \
             RETURNING (id, key, date_created);"
        );
        assert_eq!(t.args.names().collect::<Vec<_>>(), vec!["id", "key"]);
    }

    #[test]
    fn update_requires_a_set_value() {
        let err = builder().update(None, ArgMap::new()).unwrap_err();
        assert!(matches!(err, QueryError::Invalid(_)));
    }

    #[test]
    fn update_rejects_unknown_column() {
        let err = builder()
            .update(None, ArgMap::new().with("nope", 1_i64))
            .unwrap_err();
        assert!(matches!(err, QueryError::Invalid(_)));
    }

    #[test]
    fn update_set_value_wins_on_name_collision() {
        let t = builder()
            .update(
                Some(Where::new().bind("key", "old")),
                ArgMap::new().with("key", "new"),
            )
            .unwrap();
        assert_eq!(format!("{:?}", t.args.get("key").unwrap()), r#"Value("new")"#);
    }

    // ==================== insert ====================

    #[test]
    fn insert_plain() {
        let b = TableBuilder::new("t", ["id", "key"]);
        let t = b
            .insert(ArgMap::new().with("key", "v"), OnConflict::Error)
            .unwrap();
        assert_eq!(t.sql, "INSERT INTO t (key) VALUES ({key}) RETURNING (id, key);");
        assert_eq!(t.args.names().collect::<Vec<_>>(), vec!["key"]);
    }

    #[test]
    fn insert_do_nothing_on_conflict() {
        let t = builder()
            .insert(
                ArgMap::new().with("id", 7_i64).with("key", "v"),
                OnConflict::DoNothing,
            )
            .unwrap();
        assert_eq!(
            t.sql,
            "INSERT INTO search_keys (id, key) VALUES ({id}, {key}) \
             ON CONFLICT (id) DO NOTHING RETURNING (id, key, date_created);"
        );
    }

    #[test]
    fn insert_do_update_excludes_pkeys_from_set() {
        let t = builder()
            .insert(
                ArgMap::new().with("id", 7_i64).with("key", "v"),
                OnConflict::DoUpdate,
            )
            .unwrap();
        assert_eq!(
            t.sql,
            "INSERT INTO search_keys (id, key) VALUES ({id}, {key}) \
             ON CONFLICT (id) DO UPDATE SET key = EXCLUDED.key \
             RETURNING (id, key, date_created);"
        );
    }

    #[test]
    fn insert_conflict_clause_requires_pkeys() {
        let b = TableBuilder::new("t", ["id", "key"]);
        let err = b
            .insert(ArgMap::new().with("key", "v"), OnConflict::DoNothing)
            .unwrap_err();
        assert!(matches!(err, QueryError::Invalid(_)));
    }

    #[test]
    fn insert_do_update_requires_a_non_key_column() {
        let err = builder()
            .insert(ArgMap::new().with("id", 7_i64), OnConflict::DoUpdate)
            .unwrap_err();
        assert!(matches!(err, QueryError::Invalid(_)));
    }

    #[test]
    fn insert_requires_a_value() {
        let err = builder().insert(ArgMap::new(), OnConflict::Error).unwrap_err();
        assert!(matches!(err, QueryError::Invalid(_)));
    }

    // ==================== delete ====================

    #[test]
    fn delete_with_filter() {
        let t = builder().delete(Where::new().bind("id", 1_i64)).unwrap();
        assert_eq!(t.sql, "DELETE FROM search_keys WHERE (id = {id});");
        assert_eq!(t.args.names().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn delete_rejects_empty_filter() {
        let err = builder().delete(Where::new()).unwrap_err();
        assert!(matches!(err, QueryError::Invalid(_)));
    }
}
