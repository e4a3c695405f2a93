//! Integration test wiring the bus, worker pool and handlers together against
//! fake in-memory repositories (no database required).

use application::{run_worker_pool, EventBus, InFlightTracker, Resolver};
use async_trait::async_trait;
use domain::error::Result;
use domain::{Camera, CameraRepository, Event, EventRepository, EventType, NormalizedEvent, Tenant, TenantRepository};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct FakeTenants {
    rows: Mutex<Vec<Tenant>>,
}

#[async_trait]
impl TenantRepository for FakeTenants {
    async fn find_by_id(&self, id: &str) -> Result<Option<Tenant>> {
        Ok(self.rows.lock().unwrap().iter().find(|t| t.id == id).cloned())
    }

    async fn find_or_create(&self, id: &str) -> Result<Tenant> {
        if let Some(t) = self.find_by_id(id).await? {
            return Ok(t);
        }
        let tenant = Tenant {
            id: id.to_string(),
            name: Tenant::default_name(id),
            created_at: chrono::Utc::now(),
        };
        self.rows.lock().unwrap().push(tenant.clone());
        Ok(tenant)
    }
}

#[derive(Default)]
struct FakeCameras {
    rows: Mutex<Vec<Camera>>,
}

#[async_trait]
impl CameraRepository for FakeCameras {
    async fn find_by_tenant_and_key(&self, tenant_id: &str, key: &str) -> Result<Option<Camera>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.tenant_id == tenant_id && c.key == key)
            .cloned())
    }

    async fn find_or_create(&self, tenant_id: &str, key: &str) -> Result<Camera> {
        if let Some(c) = self.find_by_tenant_and_key(tenant_id, key).await? {
            return Ok(c);
        }
        let camera = Camera {
            id: format!("{tenant_id}:{key}"),
            tenant_id: tenant_id.to_string(),
            key: key.to_string(),
            label: key.to_string(),
            created_at: chrono::Utc::now(),
        };
        self.rows.lock().unwrap().push(camera.clone());
        Ok(camera)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Camera>> {
        Ok(self.rows.lock().unwrap().iter().find(|c| c.id == id).cloned())
    }
}

#[derive(Default)]
struct FakeEvents {
    rows: Mutex<Vec<Event>>,
}

#[async_trait]
impl EventRepository for FakeEvents {
    async fn upsert(
        &self,
        tenant_id: &str,
        camera_id: &str,
        normalized: &NormalizedEvent,
    ) -> Result<Event> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows
            .iter_mut()
            .find(|e| e.tenant_id == tenant_id && e.frigate_event_id == normalized.event_id)
        {
            existing.event_type = normalized.event_type;
            existing.label = normalized.label.clone();
            existing.has_snapshot = normalized.has_snapshot;
            existing.has_clip = normalized.has_clip;
            if normalized.start_time.is_some() {
                existing.start_time = normalized.start_time;
            }
            if normalized.end_time.is_some() {
                existing.end_time = normalized.end_time;
            }
            existing.raw_payload = normalized.raw.clone();
            return Ok(existing.clone());
        }
        let row = Event {
            id: format!("{tenant_id}:{}", normalized.event_id),
            tenant_id: tenant_id.to_string(),
            camera_id: camera_id.to_string(),
            frigate_event_id: normalized.event_id.clone(),
            event_type: normalized.event_type,
            label: normalized.label.clone(),
            has_snapshot: normalized.has_snapshot,
            has_clip: normalized.has_clip,
            start_time: normalized.start_time,
            end_time: normalized.end_time,
            raw_payload: normalized.raw.clone(),
            created_at: chrono::Utc::now(),
        };
        rows.push(row.clone());
        Ok(row)
    }
}

fn new_event(event_id: &str, event_type: EventType, start: Option<f64>, end: Option<f64>) -> NormalizedEvent {
    NormalizedEvent {
        frigate_id: "default".into(),
        event_id: event_id.into(),
        camera: "front_door".into(),
        event_type,
        label: "person".into(),
        has_snapshot: true,
        has_clip: false,
        start_time: start,
        end_time: end,
        raw: json!({"type": event_type.as_str()}),
    }
}

#[tokio::test]
async fn new_then_end_event_collapses_to_one_row() {
    let tenants: Arc<dyn TenantRepository> = Arc::new(FakeTenants::default());
    let cameras: Arc<dyn CameraRepository> = Arc::new(FakeCameras::default());
    let fake_events = Arc::new(FakeEvents::default());
    let events: Arc<dyn EventRepository> = fake_events.clone();
    let resolver = Arc::new(Resolver::new(tenants, cameras));

    let (bus, receivers) = EventBus::new(8);
    let in_flight = InFlightTracker::default();

    let pool_resolver = resolver.clone();
    let pool_events = events.clone();
    let pool_in_flight = in_flight.clone();
    let pool = tokio::spawn(run_worker_pool(
        receivers.event_rx,
        1,
        pool_in_flight,
        move |normalized| {
            let resolver = pool_resolver.clone();
            let events = pool_events.clone();
            async move {
                application::handle_event(resolver.as_ref(), &events, normalized)
                    .await
                    .unwrap();
            }
        },
    ));

    bus.publish_event(new_event("e1", EventType::New, Some(1_700_000_000.0), None))
        .await;
    bus.publish_event(new_event("e1", EventType::End, Some(1_700_000_000.0), Some(1_700_000_010.0)))
        .await;

    drop(bus);
    pool.await.unwrap();

    assert!(in_flight.wait_drain(Duration::from_secs(1)).await);

    let camera = resolver.resolve_camera("default", "front_door").await.unwrap();
    let rows = fake_events.rows.lock().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].camera_id, camera.id);
    assert_eq!(rows[0].event_type, EventType::End);
    assert_eq!(rows[0].start_time, Some(1_700_000_000.0));
    assert_eq!(rows[0].end_time, Some(1_700_000_010.0));
}
