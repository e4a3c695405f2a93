use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{IngestError, NormalizedReview, Result, Review, ReviewRepository, Severity};
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres-backed [`ReviewRepository`].
///
/// `upsert` into `(tenant_id, review_id)`; `timestamp` follows the same
/// never-clobber-with-null rule as events (§4.5 `handleReview` step 2).
pub struct PostgresReviewRepository {
    pool: PgPool,
}

impl PostgresReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: String,
    tenant_id: String,
    camera_id: String,
    review_id: String,
    camera_name: String,
    severity: String,
    retracted: bool,
    timestamp: Option<DateTime<Utc>>,
    raw_payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReviewRow> for Review {
    type Error = IngestError;

    fn try_from(row: ReviewRow) -> Result<Self> {
        let severity = Severity::parse(&row.severity).ok_or_else(|| {
            IngestError::HandlerError(format!("unknown severity in store: {}", row.severity))
        })?;
        Ok(Review {
            id: row.id,
            tenant_id: row.tenant_id,
            camera_id: row.camera_id,
            review_id: row.review_id,
            camera_name: row.camera_name,
            severity,
            retracted: row.retracted,
            timestamp: row.timestamp,
            raw_payload: row.raw_payload,
            created_at: row.created_at,
        })
    }
}

fn to_timestamp(seconds: Option<f64>) -> Option<DateTime<Utc>> {
    seconds.and_then(|s| DateTime::from_timestamp(s.trunc() as i64, 0))
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn upsert(
        &self,
        tenant_id: &str,
        camera_id: &str,
        normalized: &NormalizedReview,
    ) -> Result<Review> {
        let id = Uuid::new_v4().to_string();
        let timestamp = to_timestamp(normalized.timestamp);

        let row: ReviewRow = sqlx::query_as(
            r#"
            INSERT INTO reviews (
                id, tenant_id, camera_id, review_id, camera_name, severity,
                retracted, timestamp, raw_payload, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now())
            ON CONFLICT (tenant_id, review_id) DO UPDATE SET
                camera_id = EXCLUDED.camera_id,
                camera_name = EXCLUDED.camera_name,
                severity = EXCLUDED.severity,
                retracted = EXCLUDED.retracted,
                timestamp = COALESCE(EXCLUDED.timestamp, reviews.timestamp),
                raw_payload = EXCLUDED.raw_payload
            RETURNING id, tenant_id, camera_id, review_id, camera_name, severity,
                      retracted, timestamp, raw_payload, created_at
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(camera_id)
        .bind(&normalized.review_id)
        .bind(&normalized.camera)
        .bind(normalized.severity.as_str())
        .bind(normalized.retracted)
        .bind(timestamp)
        .bind(&normalized.raw)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        row.try_into()
    }
}
