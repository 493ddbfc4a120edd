use alto_core::{media, CostType, CostTypeCatalog, Resource};

use crate::directory::{Directory, DirectoryMeta};
use crate::error::DirectoryError;

/// Assembles a [`Directory`] from a cost-type catalog and a resource list,
/// validating both at build time.
///
/// Building never mutates a published directory; the caller swaps the new
/// snapshot in atomically, so a failed build leaves the old one live.
#[derive(Debug, Default)]
pub struct DirectoryBuilder {
    catalog: CostTypeCatalog,
    resources: Vec<Resource>,
}

impl DirectoryBuilder {
    /// Start with an empty catalog and no resources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing catalog.
    pub fn with_catalog(catalog: CostTypeCatalog) -> Self {
        Self {
            catalog,
            resources: Vec::new(),
        }
    }

    /// Register a cost type under a unique name.
    pub fn cost_type(
        mut self,
        name: impl Into<String>,
        cost_type: CostType,
    ) -> Result<Self, DirectoryError> {
        self.catalog.register(name, cost_type)?;
        Ok(self)
    }

    /// Append a resource. Validation happens in [`build`](Self::build).
    pub fn resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Validate and produce the immutable directory.
    pub fn build(self) -> Result<Directory, DirectoryError> {
        for resource in &self.resources {
            if !media::is_resource_media_type(&resource.media_type) {
                return Err(DirectoryError::UnrecognizedMediaType {
                    media_type: resource.media_type.clone(),
                    uri: resource.uri.clone(),
                });
            }
            if let Some(caps) = resource.cost_capabilities() {
                for name in &caps.cost_type_names {
                    if self.catalog.get(name).is_none() {
                        return Err(DirectoryError::UnknownCostType {
                            name: name.clone(),
                            uri: resource.uri.clone(),
                        });
                    }
                }
            }
        }
        Ok(Directory::new(
            DirectoryMeta {
                cost_types: self.catalog,
            },
            self.resources,
        ))
    }
}
