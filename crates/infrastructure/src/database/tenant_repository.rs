use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{IngestError, Result, Tenant, TenantRepository};
use sqlx::PgPool;

/// Postgres-backed [`TenantRepository`]. Raw `sqlx::query`/`query_as` — not the
/// compile-time-checked `sqlx::query!` macro — so this crate builds without a live
/// `DATABASE_URL`/`.sqlx` offline cache available.
pub struct PostgresTenantRepository {
    pool: PgPool,
}

impl PostgresTenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TenantRow {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
}

impl From<TenantRow> for Tenant {
    fn from(row: TenantRow) -> Self {
        Tenant {
            id: row.id,
            name: row.name,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl TenantRepository for PostgresTenantRepository {
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>> {
        let row: Option<TenantRow> =
            sqlx::query_as(r#"SELECT id, name, created_at FROM tenants WHERE id = $1"#)
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        Ok(row.map(Tenant::from))
    }

    async fn find_or_create(&self, id: &str) -> Result<Tenant> {
        let name = Tenant::default_name(id);
        let row: TenantRow = sqlx::query_as(
            r#"
            INSERT INTO tenants (id, name, created_at)
            VALUES ($1, $2, now())
            ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
            RETURNING id, name, created_at
            "#,
        )
        .bind(id)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        Ok(row.into())
    }
}
