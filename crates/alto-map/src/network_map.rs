use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use alto_core::{AddressFamily, Prefix, VersionTag};

/// The prefixes a single PID groups, split by address family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrefixSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ipv4: Vec<Prefix>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ipv6: Vec<Prefix>,
}

impl PrefixSet {
    /// Iterate over all prefixes of both families.
    pub fn iter(&self) -> impl Iterator<Item = &Prefix> {
        self.ipv4.iter().chain(self.ipv6.iter())
    }

    fn push(&mut self, prefix: Prefix) {
        let list = match prefix.family() {
            AddressFamily::Ipv4 => &mut self.ipv4,
            AddressFamily::Ipv6 => &mut self.ipv6,
        };
        if !list.contains(&prefix) {
            list.push(prefix);
        }
    }
}

/// A versioned mapping from provider-defined identifiers (PIDs) to the IP
/// prefixes they group.
///
/// PIDs are kept sorted so serialization is deterministic. The map itself is
/// a value type; published snapshots of it are never mutated in place — map
/// updates build a whole new map and swap it in at the snapshot layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMap {
    #[serde(rename = "map-vtag")]
    vtag: VersionTag,
    map: BTreeMap<String, PrefixSet>,
}

impl NetworkMap {
    /// Create an empty map stamped with the given version tag.
    pub fn new(vtag: VersionTag) -> Self {
        Self {
            vtag,
            map: BTreeMap::new(),
        }
    }

    /// The version tag of this map.
    pub fn vtag(&self) -> &VersionTag {
        &self.vtag
    }

    /// Add a prefix to a PID, creating the PID on first use. Re-adding an
    /// identical prefix to the same PID is a no-op; the same prefix under
    /// two PIDs is caught when the resolver is built.
    pub fn insert(&mut self, pid: impl Into<String>, prefix: Prefix) {
        self.map.entry(pid.into()).or_default().push(prefix);
    }

    /// Returns `true` if the map defines the given PID.
    pub fn contains_pid(&self, pid: &str) -> bool {
        self.map.contains_key(pid)
    }

    /// The prefixes grouped under a PID.
    pub fn prefixes(&self, pid: &str) -> Option<&PrefixSet> {
        self.map.get(pid)
    }

    /// All PID names, in sorted order.
    pub fn pids(&self) -> impl Iterator<Item = &str> {
        self.map.keys().map(String::as_str)
    }

    /// Iterate over (PID, prefix set) entries in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrefixSet)> {
        self.map.iter().map(|(pid, set)| (pid.as_str(), set))
    }

    /// A copy of this map restricted to the named PIDs. Unknown names are
    /// skipped; the version tag is carried over unchanged because the data
    /// still reflects the same underlying map state.
    pub fn filtered(&self, pids: &[String]) -> NetworkMap {
        let map = self
            .map
            .iter()
            .filter(|(pid, _)| pids.contains(pid))
            .map(|(pid, set)| (pid.clone(), set.clone()))
            .collect();
        NetworkMap {
            vtag: self.vtag.clone(),
            map,
        }
    }

    /// Number of PIDs in the map.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the map has no PIDs.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
