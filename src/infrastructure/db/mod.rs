use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};

pub type PgPool = Pool<Postgres>;

pub async fn connect_pool(database_url: &str, statement_timeout_ms: u64) -> anyhow::Result<PgPool> {
    // Every session gets a server-side statement timeout; no query may hang
    // a request indefinitely.
    let options = PgConnectOptions::from_str(database_url)?
        .options([("statement_timeout", statement_timeout_ms.to_string())]);
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn migrate(pool: &PgPool) -> anyhow::Result<()> {
    // Uses compile-time embedded migrations under ./migrations
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

pub mod repositories;
