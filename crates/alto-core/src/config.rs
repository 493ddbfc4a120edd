use serde::{Deserialize, Serialize};

/// Operational limits for the ALTO query surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Upper bound on the src x dst cross product of a single endpoint cost
    /// query, counted after addresses are deduplicated into PIDs.
    pub max_endpoint_pairs: usize,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_endpoint_pairs: 4096,
            log_level: "info".into(),
        }
    }
}
