use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Validated process environment for the ingestor binary (§6.1).
///
/// Loaded with the `config` crate's `Environment` source only — this daemon takes no config
/// files, unlike the reference workspace's edge agent.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestorConfig {
    pub mqtt_broker_url: String,
    #[serde(default)]
    pub mqtt_username: Option<String>,
    #[serde(default)]
    pub mqtt_password: Option<String>,
    #[serde(default)]
    pub mqtt_client_id: Option<String>,

    pub postgres_url: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_node_env")]
    pub node_env: String,

    #[serde(default = "default_worker_concurrency")]
    pub ingest_worker_concurrency: usize,
    #[serde(default = "default_bus_capacity")]
    pub ingest_bus_capacity: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_node_env() -> String {
    "development".to_string()
}

/// Mirrors `application::DEFAULT_WORKER_CONCURRENCY`; kept as a literal here so this crate
/// does not need to depend on `application` just for a default value.
fn default_worker_concurrency() -> usize {
    16
}

/// Mirrors `application::DEFAULT_BUS_CAPACITY`.
fn default_bus_capacity() -> usize {
    256
}

/// Whether the process is running in production, as modeled by `RunMode` in the spec's
/// ambient-stack notes (§10.1) — consulted only to pick the tracing output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Development,
    Production,
    Test,
}

impl IngestorConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("log_level", "info")?
            .set_default("node_env", "development")?
            .set_default("ingest_worker_concurrency", default_worker_concurrency() as i64)?
            .set_default("ingest_bus_capacity", default_bus_capacity() as i64)?
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        s.try_deserialize()
    }

    pub fn run_mode(&self) -> RunMode {
        match self.node_env.as_str() {
            "production" => RunMode::Production,
            "test" => RunMode::Test,
            _ => RunMode::Development,
        }
    }

    pub fn client_id(&self) -> String {
        self.mqtt_client_id
            .clone()
            .unwrap_or_else(|| format!("ingestor-{}", std::process::id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_mode_defaults_to_development() {
        let cfg = IngestorConfig {
            mqtt_broker_url: "mqtt://localhost:1883".into(),
            mqtt_username: None,
            mqtt_password: None,
            mqtt_client_id: None,
            postgres_url: "postgres://localhost/ingest".into(),
            log_level: default_log_level(),
            node_env: default_node_env(),
            ingest_worker_concurrency: default_worker_concurrency(),
            ingest_bus_capacity: default_bus_capacity(),
        };
        assert_eq!(cfg.run_mode(), RunMode::Development);
        assert!(cfg.client_id().starts_with("ingestor-"));
    }

    #[test]
    fn run_mode_recognizes_production() {
        let mut cfg_production = IngestorConfig {
            mqtt_broker_url: "mqtt://localhost:1883".into(),
            mqtt_username: None,
            mqtt_password: None,
            mqtt_client_id: Some("fixed-id".into()),
            postgres_url: "postgres://localhost/ingest".into(),
            log_level: "warn".into(),
            node_env: "production".into(),
            ingest_worker_concurrency: 4,
            ingest_bus_capacity: 64,
        };
        assert_eq!(cfg_production.run_mode(), RunMode::Production);
        assert_eq!(cfg_production.client_id(), "fixed-id");
        cfg_production.node_env = "test".into();
        assert_eq!(cfg_production.run_mode(), RunMode::Test);
    }
}
