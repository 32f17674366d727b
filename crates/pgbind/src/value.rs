//! Argument values and the named-argument map.
//!
//! Templates reference values by `{name}` placeholders. An [`ArgMap`] carries
//! those values from clause construction to rendering, keeping insertion
//! order so union of composed maps stays deterministic.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A dynamically typed bindable SQL value.
pub type SqlValue = Arc<dyn ToSql + Sync + Send>;

/// Raw SQL expressions that may be inlined into a template instead of bound.
///
/// The set is closed on purpose; anything outside it is an ordinary bindable
/// argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbatim {
    /// `NOW()`
    Now,
    /// `CURRENT_TIMESTAMP`
    CurrentTimestamp,
}

impl Verbatim {
    /// The exact SQL text substituted into the template.
    pub fn as_sql(self) -> &'static str {
        match self {
            Verbatim::Now => "NOW()",
            Verbatim::CurrentTimestamp => "CURRENT_TIMESTAMP",
        }
    }
}

/// A named argument: bound as a driver parameter, or inlined verbatim.
#[derive(Debug, Clone)]
pub enum SqlArg {
    /// Bound as a positional parameter in the rendered query.
    Value(SqlValue),
    /// Inlined into the SQL text; never enters the bound-value list.
    Verbatim(Verbatim),
}

impl SqlArg {
    /// Wrap a bindable value.
    pub fn value<T>(value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        SqlArg::Value(Arc::new(value))
    }

    /// Whether this argument is inlined rather than bound.
    pub fn is_verbatim(&self) -> bool {
        matches!(self, SqlArg::Verbatim(_))
    }
}

impl From<Verbatim> for SqlArg {
    fn from(v: Verbatim) -> Self {
        SqlArg::Verbatim(v)
    }
}

/// Insertion-ordered map from placeholder name to argument value.
///
/// Union via [`ArgMap::merge`] is last-write-wins: an existing key keeps its
/// original position and takes the new value. Reusing a name across sibling
/// clauses therefore silently overwrites - namespace your keys when
/// composing.
#[derive(Debug, Clone, Default)]
pub struct ArgMap {
    entries: Vec<(String, SqlArg)>,
}

impl ArgMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bindable value.
    pub fn insert<T>(&mut self, name: impl Into<String>, value: T)
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.insert_arg(name, SqlArg::value(value));
    }

    /// Insert a pre-built argument (bindable or verbatim).
    pub fn insert_arg(&mut self, name: impl Into<String>, arg: SqlArg) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = arg,
            None => self.entries.push((name, arg)),
        }
    }

    /// Chainable [`ArgMap::insert`].
    pub fn with<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.insert(name, value);
        self
    }

    /// Chainable [`ArgMap::insert_arg`].
    pub fn with_arg(mut self, name: impl Into<String>, arg: impl Into<SqlArg>) -> Self {
        self.insert_arg(name, arg.into());
        self
    }

    /// Look up an argument by placeholder name.
    pub fn get(&self, name: &str) -> Option<&SqlArg> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, arg)| arg)
    }

    /// Whether `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no arguments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge `other` into self; `other`'s values win on collision.
    pub fn merge(&mut self, other: ArgMap) {
        for (name, arg) in other.entries {
            self.insert_arg(name, arg);
        }
    }

    /// Placeholder names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlArg)> {
        self.entries.iter().map(|(n, a)| (n.as_str(), a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order() {
        let args = ArgMap::new().with("b", 2_i64).with("a", 1_i64);
        assert_eq!(args.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn insert_same_name_overwrites_in_place() {
        let args = ArgMap::new()
            .with("a", 1_i64)
            .with("b", 2_i64)
            .with("a", 3_i64);
        assert_eq!(args.len(), 2);
        assert_eq!(args.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn merge_is_last_write_wins() {
        let mut left = ArgMap::new().with("a", 1_i64).with("b", 2_i64);
        let right = ArgMap::new().with("b", 20_i64).with("c", 3_i64);
        left.merge(right);
        assert_eq!(left.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(format!("{:?}", left.get("b").unwrap()), "Value(20)");
    }

    #[test]
    fn verbatim_sql_text() {
        assert_eq!(Verbatim::Now.as_sql(), "NOW()");
        assert_eq!(Verbatim::CurrentTimestamp.as_sql(), "CURRENT_TIMESTAMP");
    }

    #[test]
    fn verbatim_args_are_flagged() {
        let args = ArgMap::new()
            .with("key", "v")
            .with_arg("created", Verbatim::Now);
        assert!(!args.get("key").unwrap().is_verbatim());
        assert!(args.get("created").unwrap().is_verbatim());
    }
}
