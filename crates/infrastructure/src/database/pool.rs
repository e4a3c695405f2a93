use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Open the store connection pool and probe it with a trivial query (§4.6 boot order step 2).
pub async fn connect(postgres_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(postgres_url)
        .await
        .context("failed to connect to Postgres")?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("failed to probe Postgres connection")?;

    Ok(pool)
}
