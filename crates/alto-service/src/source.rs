use alto_core::{CostTypeCatalog, Resource};
use alto_cost::CostMap;
use alto_map::NetworkMap;

use crate::error::ServiceError;

/// Collaborator interface supplying raw map data during snapshot
/// construction. The format behind it is unspecified — files, a database, a
/// provisioning API — as long as it yields structured maps. Never invoked
/// on the query path.
pub trait MapSource: Send + Sync {
    /// The current PID-to-prefix mapping.
    fn network_map(&self) -> Result<NetworkMap, ServiceError>;

    /// All cost tables to load, one per (mode, metric).
    fn cost_maps(&self) -> Result<Vec<CostMap>, ServiceError>;
}

/// Collaborator interface supplying the cost-type catalog and the resource
/// list the directory advertises.
pub trait CatalogSource: Send + Sync {
    /// The cost-type definitions, keyed by unique name.
    fn cost_types(&self) -> Result<CostTypeCatalog, ServiceError>;

    /// The resources to advertise, in directory order.
    fn resources(&self) -> Result<Vec<Resource>, ServiceError>;
}

/// A source that serves data held in memory. Used in tests and by embedders
/// that assemble their maps programmatically.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    pub cost_types: CostTypeCatalog,
    pub resources: Vec<Resource>,
    pub network_map: Option<NetworkMap>,
    pub cost_maps: Vec<CostMap>,
}

impl MapSource for InMemorySource {
    fn network_map(&self) -> Result<NetworkMap, ServiceError> {
        self.network_map.clone().ok_or(ServiceError::MissingNetworkMap)
    }

    fn cost_maps(&self) -> Result<Vec<CostMap>, ServiceError> {
        Ok(self.cost_maps.clone())
    }
}

impl CatalogSource for InMemorySource {
    fn cost_types(&self) -> Result<CostTypeCatalog, ServiceError> {
        Ok(self.cost_types.clone())
    }

    fn resources(&self) -> Result<Vec<Resource>, ServiceError> {
        Ok(self.resources.clone())
    }
}
