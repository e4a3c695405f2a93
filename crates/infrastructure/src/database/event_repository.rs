use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{Event, EventRepository, EventType, IngestError, NormalizedEvent, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Postgres-backed [`EventRepository`].
///
/// `upsert` re-reads the camera row inside its own transaction to guard against the race
/// where a camera's tenant changes between resolution and persistence (§4.5 step 3), then
/// performs a single `ON CONFLICT (tenant_id, frigate_event_id) DO UPDATE`. `start_time`/`end_time`
/// use `COALESCE(EXCLUDED.x, events.x)` so a null on the incoming message never clobbers a
/// previously recorded timestamp (§8.2 property 7).
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    tenant_id: String,
    camera_id: String,
    frigate_event_id: String,
    event_type: String,
    label: String,
    has_snapshot: bool,
    has_clip: bool,
    start_time: Option<f64>,
    end_time: Option<f64>,
    raw_payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<EventRow> for Event {
    type Error = IngestError;

    fn try_from(row: EventRow) -> Result<Self> {
        let event_type = EventType::parse(&row.event_type).ok_or_else(|| {
            IngestError::HandlerError(format!("unknown event_type in store: {}", row.event_type))
        })?;
        Ok(Event {
            id: row.id,
            tenant_id: row.tenant_id,
            camera_id: row.camera_id,
            frigate_event_id: row.frigate_event_id,
            event_type,
            label: row.label,
            has_snapshot: row.has_snapshot,
            has_clip: row.has_clip,
            start_time: row.start_time,
            end_time: row.end_time,
            raw_payload: row.raw_payload,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepository {
    async fn upsert(
        &self,
        tenant_id: &str,
        camera_id: &str,
        normalized: &NormalizedEvent,
    ) -> Result<Event> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        let camera_tenant: Option<String> =
            sqlx::query_scalar(r#"SELECT tenant_id FROM cameras WHERE id = $1"#)
                .bind(camera_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        match camera_tenant {
            Some(actual) if actual == tenant_id => {}
            Some(_) => {
                let _ = tx.rollback().await;
                return Err(IngestError::CameraTenantMismatch {
                    camera_id: camera_id.to_string(),
                    tenant_id: tenant_id.to_string(),
                });
            }
            None => {
                let _ = tx.rollback().await;
                return Err(IngestError::CameraResolutionFailed(format!(
                    "camera {camera_id} vanished before persistence"
                )));
            }
        }

        let id = Uuid::new_v4().to_string();
        let row: EventRow = sqlx::query_as(
            r#"
            INSERT INTO events (
                id, tenant_id, camera_id, frigate_event_id, event_type, label,
                has_snapshot, has_clip, start_time, end_time, raw_payload, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now())
            ON CONFLICT (tenant_id, frigate_event_id) DO UPDATE SET
                camera_id = EXCLUDED.camera_id,
                event_type = EXCLUDED.event_type,
                label = EXCLUDED.label,
                has_snapshot = EXCLUDED.has_snapshot,
                has_clip = EXCLUDED.has_clip,
                start_time = COALESCE(EXCLUDED.start_time, events.start_time),
                end_time = COALESCE(EXCLUDED.end_time, events.end_time),
                raw_payload = EXCLUDED.raw_payload
            RETURNING id, tenant_id, camera_id, frigate_event_id, event_type, label,
                      has_snapshot, has_clip, start_time, end_time, raw_payload, created_at
            "#,
        )
        .bind(id)
        .bind(tenant_id)
        .bind(camera_id)
        .bind(&normalized.event_id)
        .bind(normalized.event_type.as_str())
        .bind(&normalized.label)
        .bind(normalized.has_snapshot)
        .bind(normalized.has_clip)
        .bind(normalized.start_time)
        .bind(normalized.end_time)
        .bind(&normalized.raw)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| IngestError::StoreUnreachable(e.to_string()))?;

        row.try_into()
    }
}
