use anyhow::{anyhow, Context, Result};
use application::EventBus;
use chrono::Utc;
use domain::topic::{AVAILABLE_FILTER, EVENTS_FILTER, REVIEWS_FILTER};
use domain::Normalized;
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tracing::{error, info, warn};

/// Connects to the broker, subscribes to the three Frigate topic filters, normalizes every
/// inbound payload and publishes it onto the bus (C7, §4.1).
///
/// Adapted from the reference workspace's `MqttClient`: an `AsyncClient` paired with a
/// background task driving the event loop, re-subscribing on every reconnect.
pub struct MqttSubscriber {
    client: AsyncClient,
    connected: Arc<AtomicBool>,
}

impl MqttSubscriber {
    /// Connect and spawn the background read loop. Returns only after the client has been
    /// constructed; subscription acknowledgements are awaited by [`MqttSubscriber::subscribe_all`].
    pub async fn connect(
        broker_url: &str,
        client_id: &str,
        username: Option<&str>,
        password: Option<&str>,
        bus: EventBus,
    ) -> Result<Self> {
        let url = url::Url::parse(broker_url)
            .with_context(|| format!("MQTT_BROKER_URL is not a valid URL: {broker_url}"))?;
        let host = url
            .host_str()
            .ok_or_else(|| anyhow!("MQTT_BROKER_URL has no host: {broker_url}"))?;
        let port = url
            .port()
            .unwrap_or(if url.scheme() == "mqtts" { 8883 } else { 1883 });

        let mut mqttoptions = MqttOptions::new(client_id, host, port);
        mqttoptions.set_keep_alive(Duration::from_secs(60));
        if let (Some(user), Some(pass)) = (username, password) {
            if !user.is_empty() {
                mqttoptions.set_credentials(user, pass);
            }
        }

        let (client, mut eventloop) = AsyncClient::new(mqttoptions, 100);
        let connected = Arc::new(AtomicBool::new(false));
        let connected_clone = connected.clone();
        let client_clone = client.clone();

        task::spawn(async move {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Packet::Publish(publish))) => {
                        handle_publish(&bus, &publish.topic, &publish.payload).await;
                    }
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        info!("MQTT connected");
                        connected_clone.store(true, Ordering::Relaxed);
                        if let Err(e) = resubscribe(&client_clone).await {
                            error!("failed to re-subscribe after reconnect: {e}");
                        }
                    }
                    Ok(Event::Outgoing(rumqttc::Outgoing::Disconnect)) => {
                        connected_clone.store(false, Ordering::Relaxed);
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!("MQTT connection error: {e}");
                        connected_clone.store(false, Ordering::Relaxed);
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });

        Ok(Self { client, connected })
    }

    /// Subscribe to the three Frigate topic filters. Fails if any subscribe call is rejected.
    pub async fn subscribe_all(&self) -> Result<()> {
        resubscribe(&self.client).await
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    /// Unsubscribe and disconnect. Safe to call once; the client is dropped afterwards.
    pub async fn stop(&self) -> Result<()> {
        for filter in [EVENTS_FILTER, REVIEWS_FILTER, AVAILABLE_FILTER] {
            let _ = self.client.unsubscribe(filter).await;
        }
        self.client
            .disconnect()
            .await
            .map_err(|e| anyhow!("failed to disconnect MQTT client: {e}"))
    }
}

async fn resubscribe(client: &AsyncClient) -> Result<()> {
    for filter in [EVENTS_FILTER, REVIEWS_FILTER, AVAILABLE_FILTER] {
        client
            .subscribe(filter, QoS::AtLeastOnce)
            .await
            .map_err(|e| anyhow!("failed to subscribe to topic {filter}: {e}"))?;
    }
    Ok(())
}

/// Decode, normalize and publish a single inbound message (§4.1 steps 1-3).
///
/// A malformed payload is logged and dropped; it never kills the subscriber.
async fn handle_publish(bus: &EventBus, topic: &str, payload: &[u8]) {
    let decoded = match serde_json::from_slice::<serde_json::Value>(payload) {
        Ok(v) => v,
        Err(_) => {
            let text = String::from_utf8_lossy(payload);
            if topic.contains("available") {
                serde_json::Value::String(text.to_string())
            } else {
                warn!(topic = %topic, "dropping malformed (non-JSON) MQTT payload");
                return;
            }
        }
    };

    match domain::normalize(&decoded, topic, Utc::now()) {
        Some(Normalized::Event(event)) => bus.publish_event(event).await,
        Some(Normalized::Review(review)) => bus.publish_review(review).await,
        Some(Normalized::Available(available)) => bus.publish_available(available).await,
        None => {
            warn!(topic = %topic, "dropping payload that failed normalization");
        }
    }
}
