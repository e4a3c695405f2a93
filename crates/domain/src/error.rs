use thiserror::Error;

/// Domain-level error taxonomy for the ingestion pipeline.
///
/// Boot-time kinds (`StoreUnreachable`, `BrokerUnreachable`, `ConfigInvalid`) are fatal;
/// per-message kinds are caught by the handler that produced them, logged, and dropped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IngestError {
    #[error("invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("store unreachable: {0}")]
    StoreUnreachable(String),

    #[error("broker unreachable: {0}")]
    BrokerUnreachable(String),

    #[error("payload malformed: {0}")]
    PayloadMalformed(String),

    #[error("payload invalid: {0}")]
    PayloadInvalid(String),

    #[error("tenant resolution failed: {0}")]
    TenantResolutionFailed(String),

    #[error("camera resolution failed: {0}")]
    CameraResolutionFailed(String),

    #[error("camera/tenant mismatch: camera {camera_id} does not belong to tenant {tenant_id}")]
    CameraTenantMismatch {
        camera_id: String,
        tenant_id: String,
    },

    #[error("handler error: {0}")]
    HandlerError(String),
}

impl IngestError {
    /// The stable string tag used in log lines and test assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigInvalid(_) => "config_invalid",
            Self::StoreUnreachable(_) => "store_unreachable",
            Self::BrokerUnreachable(_) => "broker_unreachable",
            Self::PayloadMalformed(_) => "payload_malformed",
            Self::PayloadInvalid(_) => "payload_invalid",
            Self::TenantResolutionFailed(_) => "tenant_resolution_failed",
            Self::CameraResolutionFailed(_) => "camera_resolution_failed",
            Self::CameraTenantMismatch { .. } => "camera_tenant_mismatch",
            Self::HandlerError(_) => "handler_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
