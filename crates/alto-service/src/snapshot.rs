use std::sync::Arc;

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use tracing::info;

use alto_cost::{CostMap, CostMapStore};
use alto_directory::Directory;
use alto_map::{NetworkMap, PrefixResolver};

use crate::error::ServiceError;

/// One immutable, fully validated bundle of service state.
///
/// Every query runs against exactly one snapshot, so its responses can only
/// ever carry the version tags of that snapshot. Snapshots are replaced
/// whole; nothing in a published snapshot is mutated.
#[derive(Debug)]
pub struct Snapshot {
    directory: Directory,
    network_map: NetworkMap,
    resolver: PrefixResolver,
    costs: CostMapStore,
    built_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn network_map(&self) -> &NetworkMap {
        &self.network_map
    }

    pub fn resolver(&self) -> &PrefixResolver {
        &self.resolver
    }

    pub fn costs(&self) -> &CostMapStore {
        &self.costs
    }

    /// When this snapshot was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }
}

/// Builds a [`Snapshot`], running all load-time validation off the hot
/// path. A build failure is fatal to the new snapshot only: the caller
/// keeps serving the previously published one.
#[derive(Debug)]
pub struct SnapshotBuilder {
    directory: Directory,
    network_map: NetworkMap,
    cost_maps: Vec<CostMap>,
}

impl SnapshotBuilder {
    pub fn new(directory: Directory, network_map: NetworkMap) -> Self {
        Self {
            directory,
            network_map,
            cost_maps: Vec::new(),
        }
    }

    /// Add a cost table to the snapshot.
    pub fn cost_map(mut self, map: CostMap) -> Self {
        self.cost_maps.push(map);
        self
    }

    /// Validate everything and produce the snapshot.
    ///
    /// Fails when the network map has ambiguous prefixes, when two cost
    /// maps share a (mode, metric) key, or when a cost map's cost type is
    /// not registered in the directory catalog.
    pub fn build(self) -> Result<Snapshot, ServiceError> {
        let resolver = PrefixResolver::build(&self.network_map)?;

        let mut costs = CostMapStore::new();
        for map in self.cost_maps {
            let ct = map.cost_type();
            if self.directory.cost_types().find(ct.mode, &ct.metric).is_none() {
                return Err(ServiceError::UncataloguedCostMap {
                    cost_type: ct.clone(),
                });
            }
            costs.add(map)?;
        }

        let snapshot = Snapshot {
            directory: self.directory,
            network_map: self.network_map,
            resolver,
            costs,
            built_at: Utc::now(),
        };
        info!(
            map_vtag = %snapshot.network_map.vtag(),
            pids = snapshot.network_map.len(),
            cost_maps = snapshot.costs.len(),
            resources = snapshot.directory.resources().len(),
            "built snapshot"
        );
        Ok(snapshot)
    }
}

/// The single publication point for the current snapshot.
///
/// Readers take a cheap `Arc` handle per request and keep using it for the
/// whole request, even if a replacement is published mid-flight; writers
/// swap the pointer atomically. No locks on either path.
#[derive(Clone)]
pub struct SharedSnapshot {
    inner: Arc<ArcSwap<Snapshot>>,
}

impl SharedSnapshot {
    /// Publish an initial snapshot.
    pub fn new(initial: Snapshot) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(initial)),
        }
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.inner.load_full()
    }

    /// Atomically publish a replacement, returning the previous snapshot.
    /// In-flight readers holding the previous handle are unaffected.
    pub fn replace(&self, next: Snapshot) -> Arc<Snapshot> {
        let previous = self.inner.swap(Arc::new(next));
        let current = self.inner.load();
        info!(
            previous_vtag = %previous.network_map.vtag(),
            current_vtag = %current.network_map.vtag(),
            "published snapshot"
        );
        previous
    }
}
