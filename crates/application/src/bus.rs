//! In-process pub/sub wiring the MQTT subscriber (producer) to the persistence handlers
//! (consumers) — §4.4.
//!
//! The minimum design calls for synchronous, unbuffered delivery; this system takes up the
//! bounded-queue option the spec allows, backed by `tokio::sync::mpsc`. A full channel
//! blocks the producer rather than dropping the newest message, and the orchestrator can
//! read [`EventBus::depths`] to log queue depth on an interval.

use domain::{NormalizedAvailable, NormalizedEvent, NormalizedReview};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tracing::warn;

/// Default per-kind channel capacity (`INGEST_BUS_CAPACITY`).
pub const DEFAULT_BUS_CAPACITY: usize = 256;

/// Default worker-pool width per kind (`INGEST_WORKER_CONCURRENCY`).
pub const DEFAULT_WORKER_CONCURRENCY: usize = 16;

/// Producer-side handle: the MQTT subscriber publishes normalized records here.
#[derive(Clone)]
pub struct EventBus {
    event_tx: mpsc::Sender<NormalizedEvent>,
    review_tx: mpsc::Sender<NormalizedReview>,
    available_tx: mpsc::Sender<NormalizedAvailable>,
}

/// Consumer-side handle: the orchestrator drains these into worker pools at boot.
pub struct BusReceivers {
    pub event_rx: mpsc::Receiver<NormalizedEvent>,
    pub review_rx: mpsc::Receiver<NormalizedReview>,
    pub available_rx: mpsc::Receiver<NormalizedAvailable>,
}

impl EventBus {
    pub fn new(capacity: usize) -> (Self, BusReceivers) {
        let (event_tx, event_rx) = mpsc::channel(capacity);
        let (review_tx, review_rx) = mpsc::channel(capacity);
        let (available_tx, available_rx) = mpsc::channel(capacity);
        (
            Self {
                event_tx,
                review_tx,
                available_tx,
            },
            BusReceivers {
                event_rx,
                review_rx,
                available_rx,
            },
        )
    }

    /// Publish a normalized event. Blocks the caller (the MQTT read loop) while the queue
    /// is full rather than dropping it; only fails if every worker has exited.
    pub async fn publish_event(&self, event: NormalizedEvent) {
        if self.event_tx.send(event).await.is_err() {
            warn!("event bus has no listener; message dropped");
        }
    }

    pub async fn publish_review(&self, review: NormalizedReview) {
        if self.review_tx.send(review).await.is_err() {
            warn!("review bus has no listener; message dropped");
        }
    }

    pub async fn publish_available(&self, available: NormalizedAvailable) {
        if self.available_tx.send(available).await.is_err() {
            warn!("availability bus has no listener; message dropped");
        }
    }

    /// Current queue depth for each kind, for the log-observable metric the spec requires
    /// of any bounded-queue implementation.
    pub fn depths(&self) -> (usize, usize, usize) {
        (
            DEFAULT_BUS_CAPACITY - self.event_tx.capacity(),
            DEFAULT_BUS_CAPACITY - self.review_tx.capacity(),
            DEFAULT_BUS_CAPACITY - self.available_tx.capacity(),
        )
    }
}

/// Tracks outstanding handler invocations so shutdown can drain them (§4.6 step 3).
#[derive(Clone, Default)]
pub struct InFlightTracker(Arc<AtomicUsize>);

pub struct InFlightGuard(Arc<AtomicUsize>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl InFlightTracker {
    pub fn enter(&self) -> InFlightGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        InFlightGuard(self.0.clone())
    }

    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Poll until no handlers are in flight or `deadline` elapses. Returns `true` if the
    /// drain completed cleanly, `false` if the deadline was hit first.
    pub async fn wait_drain(&self, deadline: Duration) -> bool {
        let start = tokio::time::Instant::now();
        while self.count() > 0 {
            if start.elapsed() >= deadline {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        true
    }
}

/// Run a bounded pool of `concurrency` tasks draining `rx`, each invocation wrapped by the
/// in-flight tracker. Returns once the channel is closed and drained (producer side hung up).
pub async fn run_worker_pool<T, F, Fut>(
    rx: mpsc::Receiver<T>,
    concurrency: usize,
    in_flight: InFlightTracker,
    handler: F,
) where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + Clone + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let rx = Arc::new(Mutex::new(rx));
    let mut tasks = JoinSet::new();
    for _ in 0..concurrency.max(1) {
        let rx = rx.clone();
        let handler = handler.clone();
        let in_flight = in_flight.clone();
        tasks.spawn(async move {
            loop {
                let item = {
                    let mut guard = rx.lock().await;
                    guard.recv().await
                };
                match item {
                    Some(value) => {
                        let _permit = in_flight.enter();
                        handler(value).await;
                    }
                    None => break,
                }
            }
        });
    }
    while tasks.join_next().await.is_some() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize as StdAtomicUsize;

    #[tokio::test]
    async fn publish_and_drain_preserves_order() {
        let (bus, mut receivers) = EventBus::new(8);
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let worker = tokio::spawn(async move {
            while let Some(ev) = receivers.event_rx.recv().await {
                seen_clone.lock().unwrap().push(ev.event_id);
            }
        });

        for i in 0..5 {
            let raw = json!({"type": "new", "before": {}, "after": {}});
            bus.publish_event(domain::NormalizedEvent {
                frigate_id: "default".into(),
                event_id: i.to_string(),
                camera: "door".into(),
                event_type: domain::EventType::New,
                label: "unknown".into(),
                has_snapshot: false,
                has_clip: false,
                start_time: None,
                end_time: None,
                raw,
            })
            .await;
        }
        drop(bus);
        worker.await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec!["0", "1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn in_flight_tracker_counts_and_drains() {
        let tracker = InFlightTracker::default();
        assert_eq!(tracker.count(), 0);
        let guard = tracker.enter();
        assert_eq!(tracker.count(), 1);
        drop(guard);
        assert!(tracker.wait_drain(Duration::from_millis(100)).await);
    }

    #[tokio::test]
    async fn worker_pool_processes_all_items() {
        let (tx, rx) = mpsc::channel::<u32>(16);
        let processed = Arc::new(StdAtomicUsize::new(0));
        let processed_clone = processed.clone();
        let tracker = InFlightTracker::default();

        let pool = tokio::spawn(run_worker_pool(rx, 4, tracker, move |_: u32| {
            let processed = processed_clone.clone();
            async move {
                processed.fetch_add(1, Ordering::SeqCst);
            }
        }));

        for i in 0..20 {
            tx.send(i).await.unwrap();
        }
        drop(tx);
        pool.await.unwrap();
        assert_eq!(processed.load(Ordering::SeqCst), 20);
    }
}
