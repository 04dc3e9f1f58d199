use thiserror::Error;

/// Defects in the coefficient table or task catalog.
/// These are configuration bugs, never user errors, and are surfaced as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("no coefficient configured for field `{field}`")]
    MissingCoefficient { field: &'static str },
    #[error("coefficient for field `{field}` must be finite and >= 0, got {value}")]
    InvalidCoefficient { field: &'static str, value: f64 },
    #[error("eco-task {id} has invalid co2 reduction {value}")]
    InvalidTaskReduction { id: u32, value: f64 },
    #[error("eco-task id {id} appears more than once in the catalog")]
    DuplicateTask { id: u32 },
    #[error("progress target must be finite and > 0, got {value}")]
    InvalidTarget { value: f64 },
}

/// Failures while reading an engine configuration from disk.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigurationError),
}
