//! Errors raised while building a simulation from configuration
//!
//! The per-frame path is infallible; only configuration can be rejected.

/// Reasons a [`SimulationConfig`](crate::config::SimulationConfig) is rejected
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be finite and positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("fabric must have at least one division per axis")]
    ZeroDivisions,

    #[error("bounds floor ({floor}) must be below ceiling ({ceiling})")]
    InvertedBounds { floor: f64, ceiling: f64 },

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
