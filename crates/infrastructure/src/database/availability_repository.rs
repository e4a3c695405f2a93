use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{AvailabilityLog, AvailabilityRepository, IngestError, NormalizedAvailable, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres-backed [`AvailabilityRepository`]. Append-only: every call inserts a new row.
pub struct PostgresAvailabilityRepository {
    pool: PgPool,
}

impl PostgresAvailabilityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AvailabilityRow {
    id: String,
    tenant_id: String,
    available: bool,
    timestamp: DateTime<Utc>,
    raw_payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl From<AvailabilityRow> for AvailabilityLog {
    fn from(row: AvailabilityRow) -> Self {
        AvailabilityLog {
            id: row.id,
            tenant_id: row.tenant_id,
            available: row.available,
            timestamp: row.timestamp,
            raw_payload: row.raw_payload,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl AvailabilityRepository for PostgresAvailabilityRepository {
    async fn insert(
        &self,
        tenant_id: &str,
        normalized: &NormalizedAvailable,
    ) -> Result<AvailabilityLog> {
        let id = Uuid::new_v4().to_string();
        let timestamp = DateTime::from_timestamp(normalized.timestamp.trunc() as i64, 0)
            .unwrap_or_else(Utc::now);

        let row: AvailabilityRow = sqlx::query_as(
            r#"
            INSERT INTO availability_logs (id, tenant_id, available, timestamp, raw_payload, created_at)
            VALUES ($1, $2, $3, $4, $5, now())
            RETURNING id, tenant_id, available, timestamp, raw_payload, created_at
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(normalized.available)
        .bind(timestamp)
        .bind(&normalized.raw)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        Ok(row.into())
    }
}
