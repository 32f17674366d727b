//! Build and render CRUD templates without touching a database.
//!
//! Run with: `cargo run --example builder`

use pgbind::{
    ArgMap, Dialect, Limit, OnConflict, OrderBy, QueryResult, TableBuilder, Verbatim, Where,
};

fn main() -> QueryResult<()> {
    let builder = TableBuilder::new("search_keys", ["id", "key", "date_created"]).pkeys(["id"]);

    let select = builder.select(
        Some(Where::new().bind("id", 699_i64)),
        Some(OrderBy::new().expr("date_created DESC")),
        Some(Limit::new(1)),
    );
    println!("template: {}", select.sql);
    for dialect in [Dialect::Indexed, Dialect::Sequential] {
        let query = select.render(dialect)?;
        println!("{dialect:?}: {} with {} values", query.sql, query.values.len());
    }

    let insert = builder.insert(
        ArgMap::new()
            .with("key", "rust")
            .with_arg("date_created", Verbatim::Now),
        OnConflict::DoUpdate,
    )?;
    println!("template: {}", insert.sql);
    let query = insert.render(Dialect::Indexed)?;
    println!("Indexed: {} with {} values", query.sql, query.values.len());

    let update = builder.update(
        Some(Where::new().bind("id", 699_i64)),
        ArgMap::new().with("key", "updated-key-text"),
    )?;
    println!("template: {}", update.sql);

    let delete = builder.delete(Where::new().bind("id", 699_i64))?;
    println!("template: {}", delete.sql);

    Ok(())
}
