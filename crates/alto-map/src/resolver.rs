use std::collections::HashMap;

use tracing::debug;

use alto_core::{AddressFamily, EndpointAddr, Prefix};

use crate::error::MapError;
use crate::network_map::NetworkMap;

/// A node in the arena trie. Children are indices into the node vector;
/// `pid` is set when a registered prefix terminates at this node.
#[derive(Debug, Clone, Copy, Default)]
struct Node {
    children: [Option<u32>; 2],
    pid: Option<u32>,
}

/// A binary trie over left-aligned address bits for one address family.
#[derive(Debug, Default)]
struct PrefixTrie {
    nodes: Vec<Node>,
}

impl PrefixTrie {
    fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
        }
    }

    /// Insert a prefix; returns the previously registered PID index when the
    /// exact prefix is already taken.
    fn insert(&mut self, bits: u128, len: u8, pid: u32) -> Result<(), u32> {
        let mut node = 0usize;
        for depth in 0..len {
            let bit = ((bits >> (127 - depth as u32)) & 1) as usize;
            node = match self.nodes[node].children[bit] {
                Some(child) => child as usize,
                None => {
                    self.nodes.push(Node::default());
                    let child = (self.nodes.len() - 1) as u32;
                    self.nodes[node].children[bit] = Some(child);
                    child as usize
                }
            };
        }
        match self.nodes[node].pid {
            Some(existing) if existing != pid => Err(existing),
            _ => {
                self.nodes[node].pid = Some(pid);
                Ok(())
            }
        }
    }

    /// Walk the address bits, returning the PID of the deepest prefix seen.
    fn lookup(&self, bits: u128, max_len: u8) -> Option<u32> {
        let mut node = 0usize;
        let mut best = self.nodes[0].pid;
        for depth in 0..max_len {
            let bit = ((bits >> (127 - depth as u32)) & 1) as usize;
            match self.nodes[node].children[bit] {
                Some(child) => {
                    node = child as usize;
                    if let Some(pid) = self.nodes[node].pid {
                        best = Some(pid);
                    }
                }
                None => break,
            }
        }
        best
    }
}

/// Longest-prefix-match resolver from endpoint addresses to PIDs.
///
/// Built once from a [`NetworkMap`] and immutable afterwards; map updates
/// build a fresh resolver off the hot path and swap it in at the snapshot
/// layer, so lookups never contend with a rebuild.
#[derive(Debug)]
pub struct PrefixResolver {
    pids: Vec<String>,
    v4: PrefixTrie,
    v6: PrefixTrie,
}

impl PrefixResolver {
    /// Build a resolver for the given map.
    ///
    /// Fails with [`MapError::AmbiguousMapping`] when two PIDs claim the
    /// exact same prefix; overlapping prefixes of different lengths are
    /// legitimate and resolved by longest match.
    pub fn build(map: &NetworkMap) -> Result<Self, MapError> {
        let mut pids: Vec<String> = Vec::new();
        let mut by_name: HashMap<&str, u32> = HashMap::new();
        let mut v4 = PrefixTrie::new();
        let mut v6 = PrefixTrie::new();
        let mut prefix_count = 0usize;

        for (pid, set) in map.iter() {
            let idx = *by_name.entry(pid).or_insert_with(|| {
                pids.push(pid.to_string());
                (pids.len() - 1) as u32
            });
            for prefix in set.iter() {
                let trie = match prefix.family() {
                    AddressFamily::Ipv4 => &mut v4,
                    AddressFamily::Ipv6 => &mut v6,
                };
                if let Err(existing) = trie.insert(prefix.bits(), prefix.len(), idx) {
                    return Err(MapError::AmbiguousMapping {
                        prefix: *prefix,
                        existing: pids[existing as usize].clone(),
                        conflicting: pid.to_string(),
                    });
                }
                prefix_count += 1;
            }
        }

        debug!(
            vtag = %map.vtag(),
            pids = pids.len(),
            prefixes = prefix_count,
            "built prefix resolver"
        );
        Ok(Self { pids, v4, v6 })
    }

    /// Resolve an address to the PID of its longest matching prefix.
    pub fn resolve(&self, addr: &EndpointAddr) -> Result<&str, MapError> {
        let trie = match addr.family() {
            AddressFamily::Ipv4 => &self.v4,
            AddressFamily::Ipv6 => &self.v6,
        };
        trie.lookup(addr.bits(), addr.family().bit_len())
            .map(|idx| self.pids[idx as usize].as_str())
            .ok_or(MapError::NotFound { addr: *addr })
    }

    /// Resolve a whole prefix: the PID that would serve any address inside
    /// it. Exact registered prefixes return their own PID.
    pub fn resolve_prefix(&self, prefix: &Prefix) -> Result<&str, MapError> {
        let trie = match prefix.family() {
            AddressFamily::Ipv4 => &self.v4,
            AddressFamily::Ipv6 => &self.v6,
        };
        trie.lookup(prefix.bits(), prefix.len())
            .map(|idx| self.pids[idx as usize].as_str())
            .ok_or(MapError::NotFound {
                addr: EndpointAddr::new(prefix.addr()),
            })
    }
}
