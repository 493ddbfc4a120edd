//! ALTO Service — snapshot assembly, publication, and the query facade.
//!
//! This crate provides:
//! - [`Snapshot`] and [`SnapshotBuilder`] — one immutable, fully validated
//!   bundle of directory, network map, prefix resolver, and cost tables.
//! - [`SharedSnapshot`] — the single atomic publication point; readers
//!   capture a handle at request start and never block on a rebuild.
//! - [`MapSource`] and [`CatalogSource`] — the collaborator seams that
//!   supply raw map and catalog data, plus [`InMemorySource`] for tests and
//!   embedding.
//! - [`AltoService`] — the operations a transport layer calls: directory,
//!   network map, cost map, endpoint cost, and endpoint property lookups.

pub mod endpoint;
pub mod error;
pub mod service;
pub mod snapshot;
pub mod source;

// Re-exports for convenience.
pub use endpoint::{EndpointCostResult, EndpointPropertyResult, PROPERTY_PID};
pub use error::ServiceError;
pub use service::{AltoService, NetworkMapResponse, VtagMeta};
pub use snapshot::{SharedSnapshot, Snapshot, SnapshotBuilder};
pub use source::{CatalogSource, InMemorySource, MapSource};
