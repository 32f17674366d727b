//! Entity metadata provider.
//!
//! A [`Relation`] describes a table shape (name, attributes, primary keys)
//! for a typed model. The builders consume this interface and never inspect
//! model internals directly.

use crate::builder::{Attribute, TableBuilder};

/// Table metadata for a typed model.
///
/// # Example
/// ```ignore
/// use pgbind::{Attribute, Relation};
///
/// struct SearchKey {
///     id: i64,
///     key: String,
/// }
///
/// impl Relation for SearchKey {
///     fn table_name() -> &'static str {
///         "search_keys"
///     }
///
///     fn attributes() -> Vec<Attribute> {
///         vec!["id".into(), "key".into()]
///     }
///
///     fn primary_keys() -> Vec<&'static str> {
///         vec!["id"]
///     }
/// }
/// ```
pub trait Relation {
    /// The table name.
    fn table_name() -> &'static str;

    /// The ordered attribute list.
    fn attributes() -> Vec<Attribute>;

    /// The primary-key columns; defaults to none.
    fn primary_keys() -> Vec<&'static str> {
        Vec::new()
    }
}

impl TableBuilder {
    /// Builder preconfigured from a [`Relation`]'s metadata.
    pub fn for_relation<R: Relation>() -> Self {
        TableBuilder::new(R::table_name(), R::attributes()).pkeys(R::primary_keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SearchKey;

    impl Relation for SearchKey {
        fn table_name() -> &'static str {
            "search_keys"
        }

        fn attributes() -> Vec<Attribute> {
            vec!["id".into(), "key".into()]
        }

        fn primary_keys() -> Vec<&'static str> {
            vec!["id"]
        }
    }

    #[test]
    fn builder_from_relation_metadata() {
        let builder = TableBuilder::for_relation::<SearchKey>();
        assert_eq!(builder.table(), "search_keys");
        let t = builder.select(None, None, None);
        assert_eq!(t.sql, "SELECT id, key FROM search_keys;");
    }
}
