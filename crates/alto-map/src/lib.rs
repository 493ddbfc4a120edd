//! ALTO Map — the network map and its address resolver.
//!
//! This crate provides:
//! - [`NetworkMap`] — the versioned PID-to-prefix mapping of the ALTO map
//!   service, in the `map-vtag`/`map` wire shape.
//! - [`PrefixResolver`] — an immutable longest-prefix-match structure built
//!   once per map, with one binary trie per address family. Equal-length
//!   prefix collisions across PIDs are rejected at build time.

pub mod error;
pub mod network_map;
pub mod resolver;

// Re-exports for convenience.
pub use error::MapError;
pub use network_map::{NetworkMap, PrefixSet};
pub use resolver::PrefixResolver;
