use crate::analysis::RegisterError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Failures an embedding service can hit while configuring or driving the engine.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("analysis error: {0}")]
    Analysis(#[from] RegisterError),
}

impl AppError {
    /// Whether the failure reflects incomplete case data rather than a service fault.
    pub fn requires_manual_review(&self) -> bool {
        matches!(self, AppError::Analysis(RegisterError::NoReferenceEntryFound))
    }
}
