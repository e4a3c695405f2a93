use anyhow::{Context, Result};
use application::{run_worker_pool, EventBus, InFlightTracker, Resolver};
use domain::{AvailabilityRepository, CameraRepository, EventRepository, ReviewRepository, TenantRepository};
use infrastructure::config::RunMode;
use infrastructure::{
    connect, IngestorConfig, MqttSubscriber, PostgresAvailabilityRepository,
    PostgresCameraRepository, PostgresEventRepository, PostgresReviewRepository,
    PostgresTenantRepository,
};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Boot order, shutdown sequence and exit codes follow §4.6.
async fn run() -> Result<()> {
    dotenvy::dotenv().ok();

    // 1. Load and validate config.
    let config = IngestorConfig::load().context("invalid configuration")?;

    init_tracing(&config);
    info!(pid = std::process::id(), "ingestor starting");

    // 2. Open the store connection pool; probe with a trivial query.
    let pool = connect(&config.postgres_url)
        .await
        .context("failed to connect to Postgres")?;
    info!("connected to Postgres");

    // 3. Run pending schema migrations.
    let migration_conn = sea_orm::Database::connect(&config.postgres_url)
        .await
        .context("failed to open migration connection")?;
    Migrator::up(&migration_conn, None)
        .await
        .context("failed to run database migrations")?;
    info!("migrations applied");

    // Repository wiring.
    let tenants: Arc<dyn TenantRepository> = Arc::new(PostgresTenantRepository::new(pool.clone()));
    let cameras: Arc<dyn CameraRepository> = Arc::new(PostgresCameraRepository::new(pool.clone()));
    let events: Arc<dyn EventRepository> = Arc::new(PostgresEventRepository::new(pool.clone()));
    let reviews: Arc<dyn ReviewRepository> = Arc::new(PostgresReviewRepository::new(pool.clone()));
    let availability: Arc<dyn AvailabilityRepository> =
        Arc::new(PostgresAvailabilityRepository::new(pool.clone()));
    let resolver = Arc::new(Resolver::new(tenants, cameras));

    // 4. Start the MQTT subscriber; abort on connection or subscription failure.
    let (bus, receivers) = EventBus::new(config.ingest_bus_capacity);
    let subscriber = MqttSubscriber::connect(
        &config.mqtt_broker_url,
        &config.client_id(),
        config.mqtt_username.as_deref(),
        config.mqtt_password.as_deref(),
        bus,
    )
    .await
    .context("failed to connect to MQTT broker")?;
    subscriber
        .subscribe_all()
        .await
        .context("failed to subscribe to Frigate topic filters")?;
    info!("MQTT subscriber connected and subscribed");

    // 5. Register the three bus listeners, each wired to its persistence handler.
    let in_flight = InFlightTracker::default();

    let event_resolver = resolver.clone();
    let event_pool = events.clone();
    let event_in_flight = in_flight.clone();
    let event_worker = tokio::spawn(run_worker_pool(
        receivers.event_rx,
        config.ingest_worker_concurrency,
        event_in_flight,
        move |normalized| {
            let resolver = event_resolver.clone();
            let events = event_pool.clone();
            async move {
                let _ = application::handle_event(resolver.as_ref(), &events, normalized).await;
            }
        },
    ));

    let review_resolver = resolver.clone();
    let review_pool = reviews.clone();
    let review_in_flight = in_flight.clone();
    let review_worker = tokio::spawn(run_worker_pool(
        receivers.review_rx,
        config.ingest_worker_concurrency,
        review_in_flight,
        move |normalized| {
            let resolver = review_resolver.clone();
            let reviews = review_pool.clone();
            async move {
                let _ = application::handle_review(resolver.as_ref(), &reviews, normalized).await;
            }
        },
    ));

    let availability_resolver = resolver.clone();
    let availability_pool = availability.clone();
    let availability_in_flight = in_flight.clone();
    let availability_worker = tokio::spawn(run_worker_pool(
        receivers.available_rx,
        config.ingest_worker_concurrency,
        availability_in_flight,
        move |normalized| {
            let resolver = availability_resolver.clone();
            let availability = availability_pool.clone();
            async move {
                let _ =
                    application::handle_availability(resolver.as_ref(), &availability, normalized)
                        .await;
            }
        },
    ));

    info!("ingestion pipeline running");

    // 6. Install signal handlers, 7. block until shutdown is requested.
    wait_for_shutdown_signal().await;

    // Shutdown sequence (§4.6).
    info!("shutdown requested, stopping MQTT subscriber");
    if let Err(e) = subscriber.stop().await {
        warn!(error = %e, "error stopping MQTT subscriber");
    }

    if !in_flight.wait_drain(Duration::from_secs(30)).await {
        warn!("drain deadline elapsed with handlers still in flight");
    }

    event_worker.abort();
    review_worker.abort();
    availability_worker.abort();

    pool.close().await;
    info!("good bye");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => s,
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn init_tracing(config: &IngestorConfig) {
    let filter = tracing_subscriber::EnvFilter::new(format!(
        "{},ingestor=debug,application=debug,infrastructure=debug",
        config.log_level
    ));

    let registry = tracing_subscriber::registry().with(filter);
    match config.run_mode() {
        RunMode::Production => {
            registry.with(tracing_subscriber::fmt::layer().json()).init();
        }
        RunMode::Development | RunMode::Test => {
            registry.with(tracing_subscriber::fmt::layer()).init();
        }
    }
}

fn main() {
    let rt = tokio::runtime::Runtime::new().expect("failed to build tokio runtime");
    if let Err(e) = rt.block_on(run()) {
        error!("fatal error: {e:?}");
        std::process::exit(1);
    }
}
