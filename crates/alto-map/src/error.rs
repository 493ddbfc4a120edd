use alto_core::{EndpointAddr, Prefix};

/// Errors raised by the network map layer.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// No registered prefix covers the address. Only possible when the map
    /// carries no default route for the address family.
    #[error("no PID covers address {addr}")]
    NotFound { addr: EndpointAddr },

    /// Two different PIDs claim the exact same prefix. Detected when the
    /// resolver is built, never at query time.
    #[error("ambiguous mapping: prefix {prefix} assigned to both {existing} and {conflicting}")]
    AmbiguousMapping {
        prefix: Prefix,
        existing: String,
        conflicting: String,
    },
}
