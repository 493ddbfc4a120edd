//! ALTO Directory — the information resource directory (IRD).
//!
//! This crate provides:
//! - [`Directory`] — the immutable advertised list of resources plus the
//!   cost-type catalog, in the `meta`/`resources` wire shape.
//! - [`DirectoryBuilder`] — assembles and validates a directory: every
//!   advertised cost-type name must exist in the catalog and every declared
//!   media type must be a recognized resource media type.

pub mod builder;
pub mod directory;
pub mod error;

// Re-exports for convenience.
pub use builder::DirectoryBuilder;
pub use directory::{Directory, DirectoryMeta};
pub use error::DirectoryError;
