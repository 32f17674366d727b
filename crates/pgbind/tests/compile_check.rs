//! Compile-only tests for core API patterns.
//!
//! These tests verify that key API surfaces compile correctly. The session
//! checks do NOT execute against a database — they only check types and
//! signatures.

#![allow(dead_code)]

use pgbind::{
    ArgMap, Attribute, Cond, Dialect, FromRow, GenericClient, Limit, OnConflict, Or, OrderBy,
    QueryResult, Relation, RowExt, Session, TableBuilder, Verbatim, Where,
};
use tokio_postgres::Row;

// ── Model definition ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct CompileUser {
    id: i64,
    name: String,
    email: Option<String>,
}

impl Relation for CompileUser {
    fn table_name() -> &'static str {
        "compile_users"
    }

    fn attributes() -> Vec<Attribute> {
        vec!["id".into(), "name".into(), "email".into()]
    }

    fn primary_keys() -> Vec<&'static str> {
        vec!["id"]
    }
}

impl FromRow for CompileUser {
    fn from_row(row: &Row) -> QueryResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            name: row.try_get_column("name")?,
            email: row.try_get_column("email")?,
        })
    }
}

// ── Compile checks ──────────────────────────────────────────────────────────

#[test]
fn compile_clause_composition() {
    let filter = Where::new().clause(
        Or::new()
            .clause(Cond::new().bind("name", "alice"))
            .clause(Cond::new().bind("email", "alice@example.com")),
    );
    let _ = filter.render();
    let _ = filter.args();
}

#[test]
fn compile_builder_operations() {
    let _ = || -> QueryResult<()> {
        let builder = TableBuilder::for_relation::<CompileUser>();
        let _ = builder.select(None, Some(OrderBy::new().expr("id")), Some(Limit::new(10)));
        let _ = builder.insert(
            ArgMap::new()
                .with("name", "alice")
                .with_arg("email", Verbatim::Now),
            OnConflict::DoUpdate,
        )?;
        let _ = builder.update(
            Some(Where::new().bind("id", 1_i64)),
            ArgMap::new().with("name", "bob"),
        )?;
        let _ = builder.delete(Where::new().bind("id", 1_i64))?;
        Ok(())
    };
}

#[test]
fn compile_template_renders_both_dialects() {
    let _ = || -> QueryResult<()> {
        let template =
            TableBuilder::for_relation::<CompileUser>().select(None, None, Some(Limit::new(1)));
        let _ = template.render(Dialect::Indexed)?;
        let _ = template.render(Dialect::Sequential)?;
        Ok(())
    };
}

// Session works against both a client and a transaction; never executed.
async fn session_crud(client: &tokio_postgres::Client) -> QueryResult<()> {
    let session = Session::new(client);

    let _created: Option<CompileUser> = session
        .create(ArgMap::new().with("name", "alice"), OnConflict::Error)
        .await?;

    let _all: Vec<CompileUser> = session
        .get(
            Some(Where::new().bind("name", "alice")),
            Some(OrderBy::new().expr("id")),
            Some(Limit::new(10)),
        )
        .await?;

    let _one: Option<CompileUser> = session.get_one(Some(Where::new().bind("id", 1_i64))).await?;

    let _updated: Vec<CompileUser> = session
        .update(
            Some(Where::new().bind("id", 1_i64)),
            ArgMap::new().with("name", "bob"),
        )
        .await?;

    let _deleted: u64 = session
        .delete::<CompileUser>(Where::new().bind("id", 1_i64))
        .await?;

    Ok(())
}

async fn session_in_transaction(tx: &tokio_postgres::Transaction<'_>) -> QueryResult<()> {
    let session = Session::new(tx);
    let _one: Option<CompileUser> = session.get_one(Some(Where::new().bind("id", 1_i64))).await?;
    Ok(())
}

async fn generic_client_binds_params(client: &impl GenericClient) -> QueryResult<u64> {
    client
        .execute("DELETE FROM compile_users WHERE id = $1", &[&1_i64])
        .await
}
