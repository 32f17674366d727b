//! Dialect-aware argument renderer.
//!
//! [`render`] resolves the `{name}` placeholders of a template against an
//! [`ArgMap`], producing the final SQL string plus the bound values in the
//! positional order the driver expects. Verbatim arguments are inlined and
//! never bound; unresolved placeholders and stray braces are rejected.
//!
//! # Example
//! ```ignore
//! use pgbind::{render, ArgMap, Dialect};
//!
//! let args = ArgMap::new().with("id", 699_i64);
//! let q = render("SELECT id FROM t WHERE id = {id}", &args, Dialect::Indexed)?;
//! assert_eq!(q.sql, "SELECT id FROM t WHERE id = $1");
//! ```

use crate::error::{QueryError, QueryResult};
use crate::value::{ArgMap, SqlArg, SqlValue};
use tokio_postgres::types::ToSql;

/// Parameter-binding convention of the target driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// One `?` marker per placeholder occurrence, values in occurrence
    /// order, no deduplication. A name referenced three times binds three
    /// values.
    Sequential,
    /// `$1..$N` markers; every occurrence of a name shares one marker and
    /// one bound value. Deduplication by name is mandatory.
    Indexed,
}

/// A fully rendered query: final SQL and bound values in positional order.
#[derive(Debug, Clone)]
pub struct SqlQuery {
    /// SQL text with all placeholders resolved.
    pub sql: String,
    /// Bound values, ordered for the driver's positional-execute call.
    pub values: Vec<SqlValue>,
}

impl SqlQuery {
    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.values
            .iter()
            .map(|v| v.as_ref() as &(dyn ToSql + Sync))
            .collect()
    }
}

/// Resolve every `{name}` placeholder in `template` against `args`.
///
/// Fails with [`QueryError::MissingArgument`] when a placeholder has no
/// entry, and with [`QueryError::MalformedTemplate`] when braces survive
/// substitution. A failed render never yields a partially substituted
/// string.
pub fn render(template: &str, args: &ArgMap, dialect: Dialect) -> QueryResult<SqlQuery> {
    let mut sql = String::with_capacity(template.len());
    let mut values: Vec<SqlValue> = Vec::new();
    // Indexed dialect only: name -> already-assigned marker.
    let mut markers: Vec<(&str, String)> = Vec::new();

    let mut rest = template;
    while let Some(open) = rest.find('{') {
        sql.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            return Err(QueryError::MalformedTemplate(template.to_string()));
        };
        let name = &after[..close];

        let Some(arg) = args.get(name) else {
            return Err(QueryError::MissingArgument {
                name: name.to_string(),
                template: template.to_string(),
                known: args.names().collect::<Vec<_>>().join(", "),
            });
        };

        match arg {
            SqlArg::Verbatim(v) => sql.push_str(v.as_sql()),
            SqlArg::Value(value) => match dialect {
                Dialect::Sequential => {
                    values.push(value.clone());
                    sql.push('?');
                }
                Dialect::Indexed => {
                    if let Some((_, marker)) = markers.iter().find(|(n, _)| *n == name) {
                        sql.push_str(marker);
                    } else {
                        values.push(value.clone());
                        let marker = format!("${}", values.len());
                        sql.push_str(&marker);
                        markers.push((name, marker));
                    }
                }
            },
        }

        rest = &after[close + 1..];
    }
    sql.push_str(rest);

    // Post-condition: nothing brace-like survives. Catches stray or nested
    // braces that slipped past the placeholder scan.
    if sql.contains('{') || sql.contains('}') {
        return Err(QueryError::MalformedTemplate(sql));
    }

    Ok(SqlQuery { sql, values })
}
