use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use alto_core::{Constraint, CostMode, CostType, CostValue, VersionTag};

use crate::cost_map::CostMap;
use crate::error::CostError;

/// The filtered outcome of a bulk cost query.
///
/// `vtag` is the version tag of the exact table every returned entry was
/// read from; because a store is immutable once built, one query can never
/// mix entries from two table versions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostQueryResult {
    #[serde(rename = "cost-type")]
    pub cost_type: CostType,
    #[serde(rename = "map-vtag")]
    pub vtag: VersionTag,
    #[serde(rename = "map")]
    pub costs: BTreeMap<String, BTreeMap<String, CostValue>>,
}

impl CostQueryResult {
    /// Total number of (src, dst) entries that survived filtering.
    pub fn len(&self) -> usize {
        self.costs.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if no entry survived filtering.
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// The cost for one pair, if present.
    pub fn get(&self, src: &str, dst: &str) -> Option<CostValue> {
        self.costs.get(src).and_then(|dsts| dsts.get(dst)).copied()
    }
}

/// The cost tables of one snapshot, keyed by (cost-mode, cost-metric).
///
/// Built once during snapshot construction and immutable afterwards; map
/// updates replace the whole store at the snapshot layer.
#[derive(Debug, Default)]
pub struct CostMapStore {
    maps: HashMap<(CostMode, String), CostMap>,
}

impl CostMapStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cost map. Fails when a map for the same (mode, metric) is
    /// already present.
    pub fn add(&mut self, map: CostMap) -> Result<(), CostError> {
        let ct = map.cost_type();
        let key = (ct.mode, ct.metric.clone());
        if self.maps.contains_key(&key) {
            return Err(CostError::DuplicateCostMap {
                mode: ct.mode,
                metric: ct.metric.clone(),
            });
        }
        debug!(cost_type = %ct, vtag = %map.vtag(), entries = map.len(), "loaded cost map");
        self.maps.insert(key, map);
        Ok(())
    }

    /// The cost map for a (mode, metric) pair, if loaded.
    pub fn find(&self, mode: CostMode, metric: &str) -> Option<&CostMap> {
        self.maps.get(&(mode, metric.to_string()))
    }

    /// Point lookup of one (src, dst) cost.
    pub fn get(
        &self,
        mode: CostMode,
        metric: &str,
        src: &str,
        dst: &str,
    ) -> Result<CostValue, CostError> {
        let map = self.find(mode, metric).ok_or_else(|| CostError::NoSuchCostType {
            mode,
            metric: metric.to_string(),
        })?;
        map.get(src, dst).ok_or_else(|| CostError::NoSuchPair {
            src: src.to_string(),
            dst: dst.to_string(),
        })
    }

    /// Bulk query over the cross product of `srcs` x `dsts`.
    ///
    /// `None` for either set means "all PIDs in the table" (an omitted
    /// filter on the wire is a wildcard). Pairs absent from the table are
    /// skipped rather than failing the batch; the query fails wholesale
    /// only when the (mode, metric) pair has no table at all. Constraints
    /// are conjunctive.
    pub fn query(
        &self,
        mode: CostMode,
        metric: &str,
        srcs: Option<&[String]>,
        dsts: Option<&[String]>,
        constraints: &[Constraint],
    ) -> Result<CostQueryResult, CostError> {
        let map = self.find(mode, metric).ok_or_else(|| CostError::NoSuchCostType {
            mode,
            metric: metric.to_string(),
        })?;

        let sources: Vec<&str> = match srcs {
            Some(srcs) => srcs.iter().map(String::as_str).collect(),
            None => map.sources().collect(),
        };

        let mut costs: BTreeMap<String, BTreeMap<String, CostValue>> = BTreeMap::new();
        for src in sources {
            let Some(dst_costs) = map.destination_costs(src) else {
                continue;
            };
            let row: BTreeMap<String, CostValue> = dst_costs
                .iter()
                .filter(|(dst, _)| dsts.map_or(true, |d| d.iter().any(|x| x == *dst)))
                .filter(|(_, value)| constraints.iter().all(|c| c.matches(value)))
                .map(|(dst, value)| (dst.clone(), *value))
                .collect();
            if !row.is_empty() {
                costs.insert(src.to_string(), row);
            }
        }

        Ok(CostQueryResult {
            cost_type: map.cost_type().clone(),
            vtag: map.vtag().clone(),
            costs,
        })
    }

    /// Iterate over all loaded cost maps.
    pub fn iter(&self) -> impl Iterator<Item = &CostMap> {
        self.maps.values()
    }

    /// Number of loaded cost maps.
    pub fn len(&self) -> usize {
        self.maps.len()
    }

    /// Returns `true` if no cost map is loaded.
    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
