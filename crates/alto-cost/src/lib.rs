//! ALTO Cost — cost tables and capability negotiation.
//!
//! This crate provides:
//! - [`CostMap`] — a versioned cost table for one (mode, metric) pair, in
//!   the `cost-type`/`map-vtag`/`map` wire shape.
//! - [`CostMapStore`] — the set of cost maps of one snapshot, with point
//!   lookup and constraint-filtered bulk queries stamped with the exact
//!   version tag consulted.
//! - [`match_cost_capabilities`] — the pure matcher validating a requested
//!   cost type and constraint usage against a resource's advertised
//!   capability set.

pub mod capability;
pub mod cost_map;
pub mod error;
pub mod store;

// Re-exports for convenience.
pub use capability::match_cost_capabilities;
pub use cost_map::CostMap;
pub use error::CostError;
pub use store::{CostMapStore, CostQueryResult};
