use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::warn;

use alto_core::{Constraint, CostType, EndpointAddr, Resource, VersionTag};
use alto_cost::match_cost_capabilities;

use crate::error::ServiceError;
use crate::snapshot::Snapshot;

/// The one endpoint property this core can compute: the PID grouping the
/// endpoint's address.
pub const PROPERTY_PID: &str = "pid";

/// Result of an endpoint cost query.
///
/// `costs` is keyed by typed address strings (`"ipv4:192.0.2.1"`).
/// Addresses that did not resolve to any PID are collected in `unresolved`
/// instead of failing the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointCostResult {
    #[serde(rename = "cost-type")]
    pub cost_type: CostType,
    #[serde(rename = "map-vtag")]
    pub vtag: VersionTag,
    #[serde(rename = "map")]
    pub costs: BTreeMap<String, BTreeMap<String, alto_core::CostValue>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<EndpointAddr>,
}

/// Result of an endpoint property query, keyed like [`EndpointCostResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EndpointPropertyResult {
    #[serde(rename = "map-vtag")]
    pub vtag: VersionTag,
    #[serde(rename = "map")]
    pub properties: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<EndpointAddr>,
}

/// Resolve a list of addresses, deduplicating by PID.
///
/// Returns the per-address PID assignment, the deduplicated PID set, and
/// the addresses nothing in the map covers.
fn resolve_all<'a>(
    snapshot: &'a Snapshot,
    addrs: &[EndpointAddr],
    unresolved: &mut Vec<EndpointAddr>,
) -> (HashMap<EndpointAddr, &'a str>, Vec<String>) {
    let mut assignment = HashMap::new();
    let mut pids: Vec<String> = Vec::new();
    for addr in addrs {
        if assignment.contains_key(addr) {
            continue;
        }
        match snapshot.resolver().resolve(addr) {
            Ok(pid) => {
                if !pids.iter().any(|p| p == pid) {
                    pids.push(pid.to_string());
                }
                assignment.insert(*addr, pid);
            }
            Err(_) => {
                if !unresolved.contains(addr) {
                    unresolved.push(*addr);
                }
            }
        }
    }
    (assignment, pids)
}

/// Answer an endpoint cost query against one snapshot.
///
/// Addresses are resolved to PIDs and deduplicated before the store is
/// queried once at PID granularity; the PID-level answer is then expanded
/// back onto every original address pair, so two addresses in one PID share
/// one cost value. Unresolvable addresses are reported per-address, not as
/// a batch failure.
pub fn endpoint_cost(
    snapshot: &Snapshot,
    resource: &Resource,
    cost_type_name: &str,
    constraints: &[Constraint],
    srcs: &[EndpointAddr],
    dsts: &[EndpointAddr],
    max_pairs: usize,
) -> Result<EndpointCostResult, ServiceError> {
    let cost_type = match_cost_capabilities(
        resource,
        snapshot.directory().cost_types(),
        cost_type_name,
        !constraints.is_empty(),
    )?;

    let mut unresolved = Vec::new();
    let (src_pids, src_set) = resolve_all(snapshot, srcs, &mut unresolved);
    let (dst_pids, dst_set) = resolve_all(snapshot, dsts, &mut unresolved);
    if !unresolved.is_empty() {
        warn!(
            resource = %resource.uri,
            count = unresolved.len(),
            "endpoint addresses did not resolve to any PID"
        );
    }

    let pairs = src_set.len() * dst_set.len();
    if pairs > max_pairs {
        return Err(ServiceError::TooManyEndpoints {
            pairs,
            limit: max_pairs,
        });
    }

    let result = snapshot.costs().query(
        cost_type.mode,
        &cost_type.metric,
        Some(&src_set),
        Some(&dst_set),
        constraints,
    )?;

    let mut costs: BTreeMap<String, BTreeMap<String, alto_core::CostValue>> = BTreeMap::new();
    for src in srcs {
        let Some(src_pid) = src_pids.get(src) else {
            continue;
        };
        for dst in dsts {
            let Some(dst_pid) = dst_pids.get(dst) else {
                continue;
            };
            if let Some(value) = result.get(src_pid, dst_pid) {
                costs
                    .entry(src.to_string())
                    .or_default()
                    .insert(dst.to_string(), value);
            }
        }
    }

    Ok(EndpointCostResult {
        cost_type: result.cost_type,
        vtag: result.vtag,
        costs,
        unresolved,
    })
}

/// Answer an endpoint property query against one snapshot.
///
/// The requested property must be advertised in the resource's `prop-types`
/// and computable by this core (only [`PROPERTY_PID`] is). The result is
/// stamped with the network map's version tag, since that map is what the
/// property values reflect.
pub fn endpoint_property(
    snapshot: &Snapshot,
    resource: &Resource,
    property: &str,
    endpoints: &[EndpointAddr],
) -> Result<EndpointPropertyResult, ServiceError> {
    let advertised = resource
        .property_capabilities()
        .map(|caps| caps.prop_types.iter().any(|p| p == property))
        .unwrap_or(false);
    if !advertised || property != PROPERTY_PID {
        return Err(ServiceError::UnsupportedPropertyType {
            property: property.to_string(),
            uri: resource.uri.clone(),
        });
    }

    let mut unresolved = Vec::new();
    let (assignment, _) = resolve_all(snapshot, endpoints, &mut unresolved);
    if !unresolved.is_empty() {
        warn!(
            resource = %resource.uri,
            count = unresolved.len(),
            "endpoint addresses did not resolve to any PID"
        );
    }

    let mut properties: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for addr in endpoints {
        if let Some(pid) = assignment.get(addr) {
            properties
                .entry(addr.to_string())
                .or_default()
                .insert(PROPERTY_PID.to_string(), pid.to_string());
        }
    }

    Ok(EndpointPropertyResult {
        vtag: snapshot.network_map().vtag().clone(),
        properties,
        unresolved,
    })
}
