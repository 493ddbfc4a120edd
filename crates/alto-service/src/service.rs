use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use alto_core::{Constraint, EndpointAddr, Resource, ServiceConfig, VersionTag};
use alto_cost::{match_cost_capabilities, CostQueryResult};
use alto_directory::{Directory, DirectoryBuilder};
use alto_map::NetworkMap;

use crate::endpoint::{self, EndpointCostResult, EndpointPropertyResult};
use crate::error::ServiceError;
use crate::snapshot::{SharedSnapshot, Snapshot, SnapshotBuilder};
use crate::source::{CatalogSource, MapSource};

/// The `meta` object of a map response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VtagMeta {
    #[serde(rename = "map-vtag")]
    pub map_vtag: VersionTag,
}

/// A network map response: version tag in `meta`, the map as `data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkMapResponse {
    pub meta: VtagMeta,
    pub data: NetworkMap,
}

/// The query surface a transport layer calls into.
///
/// Holds the current snapshot behind one atomic pointer. Every operation
/// captures a snapshot handle once and answers entirely from it, so a
/// response can never mix data from two snapshot versions.
pub struct AltoService {
    config: ServiceConfig,
    current: SharedSnapshot,
}

impl AltoService {
    /// Serve an already built snapshot.
    pub fn new(config: ServiceConfig, initial: Snapshot) -> Self {
        Self {
            config,
            current: SharedSnapshot::new(initial),
        }
    }

    /// Build the initial snapshot from collaborator sources and serve it.
    pub fn load(
        config: ServiceConfig,
        catalog: &dyn CatalogSource,
        maps: &dyn MapSource,
    ) -> Result<Self, ServiceError> {
        let snapshot = build_snapshot(catalog, maps)?;
        Ok(Self::new(config, snapshot))
    }

    /// Rebuild from the sources and publish atomically. On failure the
    /// previously published snapshot stays live and keeps serving.
    pub fn reload(
        &self,
        catalog: &dyn CatalogSource,
        maps: &dyn MapSource,
    ) -> Result<(), ServiceError> {
        let snapshot = build_snapshot(catalog, maps)?;
        self.current.replace(snapshot);
        Ok(())
    }

    /// The currently published snapshot. Transport code that needs several
    /// reads to assemble one response should take this once and reuse it.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.snapshot()
    }

    /// The information resource directory.
    pub fn directory(&self) -> Directory {
        self.snapshot().directory().clone()
    }

    /// The network map, optionally restricted to the named PIDs and
    /// optionally pinned to an expected version tag.
    ///
    /// Only the live snapshot is retained, so a stale `vtag` fails with
    /// [`ServiceError::VersionMismatch`] rather than serving mixed data.
    pub fn network_map(
        &self,
        vtag: Option<&str>,
        pids: Option<&[String]>,
    ) -> Result<NetworkMapResponse, ServiceError> {
        let snapshot = self.snapshot();
        let live = snapshot.network_map().vtag();
        if let Some(requested) = vtag {
            if requested != live.as_str() {
                return Err(ServiceError::VersionMismatch {
                    requested: requested.to_string(),
                    live: live.to_string(),
                });
            }
        }
        let data = match pids {
            Some(pids) => snapshot.network_map().filtered(pids),
            None => snapshot.network_map().clone(),
        };
        Ok(NetworkMapResponse {
            meta: VtagMeta {
                map_vtag: data.vtag().clone(),
            },
            data,
        })
    }

    /// A (possibly filtered) cost map served by the resource at `uri`.
    ///
    /// The capability matcher validates the requested cost type and
    /// constraint usage before the store is consulted.
    pub fn cost_map(
        &self,
        uri: &str,
        cost_type_name: &str,
        constraints: &[Constraint],
        srcs: Option<&[String]>,
        dsts: Option<&[String]>,
    ) -> Result<CostQueryResult, ServiceError> {
        let snapshot = self.snapshot();
        let resource = find_resource(&snapshot, uri)?;
        let cost_type = match_cost_capabilities(
            resource,
            snapshot.directory().cost_types(),
            cost_type_name,
            !constraints.is_empty(),
        )?;
        debug!(uri, cost_type = %cost_type, "cost map query");
        let result = snapshot.costs().query(
            cost_type.mode,
            &cost_type.metric,
            srcs,
            dsts,
            constraints,
        )?;
        Ok(result)
    }

    /// Path costs between arbitrary endpoint addresses, served by the
    /// endpoint cost resource at `uri`.
    pub fn endpoint_cost(
        &self,
        uri: &str,
        cost_type_name: &str,
        constraints: &[Constraint],
        srcs: &[EndpointAddr],
        dsts: &[EndpointAddr],
    ) -> Result<EndpointCostResult, ServiceError> {
        let snapshot = self.snapshot();
        let resource = find_resource(&snapshot, uri)?;
        endpoint::endpoint_cost(
            &snapshot,
            resource,
            cost_type_name,
            constraints,
            srcs,
            dsts,
            self.config.max_endpoint_pairs,
        )
    }

    /// Property lookup for arbitrary endpoint addresses, served by the
    /// endpoint property resource at `uri`.
    pub fn endpoint_property(
        &self,
        uri: &str,
        property: &str,
        endpoints: &[EndpointAddr],
    ) -> Result<EndpointPropertyResult, ServiceError> {
        let snapshot = self.snapshot();
        let resource = find_resource(&snapshot, uri)?;
        endpoint::endpoint_property(&snapshot, resource, property, endpoints)
    }
}

fn find_resource<'a>(snapshot: &'a Snapshot, uri: &str) -> Result<&'a Resource, ServiceError> {
    snapshot
        .directory()
        .find_resource(uri)
        .ok_or_else(|| ServiceError::NoSuchResource(uri.to_string()))
}

/// Build a snapshot from collaborator sources: catalog and resources into a
/// validated directory, then the maps into the snapshot proper.
pub fn build_snapshot(
    catalog: &dyn CatalogSource,
    maps: &dyn MapSource,
) -> Result<Snapshot, ServiceError> {
    let mut builder = DirectoryBuilder::with_catalog(catalog.cost_types()?);
    for resource in catalog.resources()? {
        builder = builder.resource(resource);
    }
    let directory = builder.build()?;

    let mut snapshot = SnapshotBuilder::new(directory, maps.network_map()?);
    for cost_map in maps.cost_maps()? {
        snapshot = snapshot.cost_map(cost_map);
    }
    snapshot.build()
}
