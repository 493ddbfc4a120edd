//! ALTO Core — shared vocabulary for the ALTO (RFC 7285) service.
//!
//! This crate provides:
//! - [`CostType`], [`CostMode`], [`CostValue`] and the [`CostTypeCatalog`] —
//!   the cost-type vocabulary advertised in the directory meta.
//! - [`Constraint`] — post-lookup filter predicates on cost values.
//! - [`EndpointAddr`] and [`Prefix`] — typed endpoint addresses and CIDR
//!   prefixes for the two supported address families.
//! - [`Resource`] and [`Capabilities`] — information resources and their
//!   advertised capability sets.
//! - [`VersionTag`] — opaque map version tags (`map-vtag`).
//! - [`ServiceConfig`] — operational limits for the query surface.

pub mod addr;
pub mod config;
pub mod constraint;
pub mod cost;
pub mod error;
pub mod media;
pub mod resource;
pub mod vtag;

// Re-exports for convenience.
pub use addr::{AddressFamily, EndpointAddr, Prefix};
pub use config::ServiceConfig;
pub use constraint::{Constraint, ConstraintOp};
pub use cost::{CostMode, CostType, CostTypeCatalog, CostValue};
pub use error::CoreError;
pub use resource::{Capabilities, CostCapabilities, PropertyCapabilities, Resource};
pub use vtag::VersionTag;
