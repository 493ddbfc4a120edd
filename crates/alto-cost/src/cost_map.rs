use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use alto_core::{CoreError, CostType, CostValue, VersionTag};

/// A versioned table of path costs between source and destination PIDs for
/// one (cost-mode, cost-metric) pair.
///
/// Values are validated against the map's cost mode on insertion, so a
/// loaded map only ever holds finite numerical values or positive ordinal
/// ranks. PIDs are kept sorted for deterministic serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCostMap")]
pub struct CostMap {
    #[serde(rename = "cost-type")]
    cost_type: CostType,
    #[serde(rename = "map-vtag")]
    vtag: VersionTag,
    map: BTreeMap<String, BTreeMap<String, CostValue>>,
}

/// Wire form before per-mode value validation.
#[derive(Debug, Deserialize)]
struct RawCostMap {
    #[serde(rename = "cost-type")]
    cost_type: CostType,
    #[serde(rename = "map-vtag")]
    vtag: VersionTag,
    #[serde(default)]
    map: BTreeMap<String, BTreeMap<String, f64>>,
}

impl TryFrom<RawCostMap> for CostMap {
    type Error = CoreError;

    fn try_from(raw: RawCostMap) -> Result<Self, Self::Error> {
        let mut cm = CostMap::new(raw.cost_type, raw.vtag);
        for (src, dsts) in raw.map {
            for (dst, value) in dsts {
                cm.insert(src.clone(), dst, value)?;
            }
        }
        Ok(cm)
    }
}

impl CostMap {
    /// Create an empty cost map for the given cost type.
    pub fn new(cost_type: CostType, vtag: VersionTag) -> Self {
        Self {
            cost_type,
            vtag,
            map: BTreeMap::new(),
        }
    }

    /// The cost type this table carries values for.
    pub fn cost_type(&self) -> &CostType {
        &self.cost_type
    }

    /// The version tag of this table.
    pub fn vtag(&self) -> &VersionTag {
        &self.vtag
    }

    /// Insert a cost entry, validating the raw number against the map's
    /// cost mode. An existing entry for the pair is replaced.
    pub fn insert(
        &mut self,
        src: impl Into<String>,
        dst: impl Into<String>,
        raw: f64,
    ) -> Result<(), CoreError> {
        let value = CostValue::from_number(self.cost_type.mode, raw)?;
        self.map
            .entry(src.into())
            .or_default()
            .insert(dst.into(), value);
        Ok(())
    }

    /// The cost from `src` to `dst`, if the table has the pair.
    pub fn get(&self, src: &str, dst: &str) -> Option<CostValue> {
        self.map.get(src).and_then(|dsts| dsts.get(dst)).copied()
    }

    /// All source PIDs, in sorted order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// The destination costs of one source PID.
    pub fn destination_costs(&self, src: &str) -> Option<&BTreeMap<String, CostValue>> {
        self.map.get(src)
    }

    /// Number of (src, dst) entries in the table.
    pub fn len(&self) -> usize {
        self.map.values().map(BTreeMap::len).sum()
    }

    /// Returns `true` if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
