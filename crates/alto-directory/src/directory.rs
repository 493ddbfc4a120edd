use serde::{Deserialize, Serialize};

use alto_core::{CostTypeCatalog, Resource};

/// Definitions shared by the directory's resources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectoryMeta {
    /// The cost-type catalog: unique name to (mode, metric) definition.
    #[serde(rename = "cost-types", default)]
    pub cost_types: CostTypeCatalog,
}

/// The information resource directory: the read path clients query first.
///
/// Immutable once built. Resources keep their registration order — the
/// order carries no semantics but makes serialized output deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Directory {
    meta: DirectoryMeta,
    resources: Vec<Resource>,
}

impl Directory {
    pub(crate) fn new(meta: DirectoryMeta, resources: Vec<Resource>) -> Self {
        Self { meta, resources }
    }

    /// The cost-type catalog advertised in `meta.cost-types`.
    pub fn cost_types(&self) -> &CostTypeCatalog {
        &self.meta.cost_types
    }

    /// The advertised resources, in registration order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Find a resource by its URI.
    pub fn find_resource(&self, uri: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.uri == uri)
    }
}
