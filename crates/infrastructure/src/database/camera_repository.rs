use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Camera, CameraRepository, IngestError, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres-backed [`CameraRepository`]. Surrogate ids are minted here (the store's
/// responsibility per the spec), via `uuid::Uuid::new_v4`.
pub struct PostgresCameraRepository {
    pool: PgPool,
}

impl PostgresCameraRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CameraRow {
    id: String,
    tenant_id: String,
    key: String,
    label: String,
    created_at: DateTime<Utc>,
}

impl From<CameraRow> for Camera {
    fn from(row: CameraRow) -> Self {
        Camera {
            id: row.id,
            tenant_id: row.tenant_id,
            key: row.key,
            label: row.label,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CameraRepository for PostgresCameraRepository {
    async fn find_by_tenant_and_key(&self, tenant_id: &str, key: &str) -> Result<Option<Camera>> {
        let row: Option<CameraRow> = sqlx::query_as(
            r#"SELECT id, tenant_id, key, label, created_at FROM cameras
               WHERE tenant_id = $1 AND key = $2"#,
        )
        .bind(tenant_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        Ok(row.map(Camera::from))
    }

    async fn find_or_create(&self, tenant_id: &str, key: &str) -> Result<Camera> {
        let id = Uuid::new_v4().to_string();
        let row: CameraRow = sqlx::query_as(
            r#"
            INSERT INTO cameras (id, tenant_id, key, label, created_at)
            VALUES ($1, $2, $3, $3, now())
            ON CONFLICT (tenant_id, key) DO UPDATE SET key = EXCLUDED.key
            RETURNING id, tenant_id, key, label, created_at
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Camera>> {
        let row: Option<CameraRow> = sqlx::query_as(
            r#"SELECT id, tenant_id, key, label, created_at FROM cameras WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        Ok(row.map(Camera::from))
    }
}
