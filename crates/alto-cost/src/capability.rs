use alto_core::{CostType, CostTypeCatalog, Resource};

use crate::error::CostError;

/// Validate a client's requested cost type and constraint usage against a
/// resource's advertised capability set.
///
/// On success returns the resolved [`CostType`] so the caller can select
/// the matching cost table. Pure function of its inputs: the checks run
/// against the directory snapshot the resource came from, with no side
/// effects.
///
/// Failure modes:
/// - [`CostError::UnsupportedCostType`] — the name is absent from the
///   resource's `cost-type-names`, or the resource advertises no cost
///   capabilities at all.
/// - [`CostError::ConstraintsUnsupported`] — constraints were requested but
///   the resource does not set `cost-constraints`.
/// - [`CostError::UnknownCostType`] — the advertised name is missing from
///   the catalog. The directory builder rejects this at build time, so
///   hitting it here means the resource and catalog are from different
///   snapshots.
pub fn match_cost_capabilities(
    resource: &Resource,
    catalog: &CostTypeCatalog,
    cost_type_name: &str,
    wants_constraints: bool,
) -> Result<CostType, CostError> {
    let caps = resource
        .cost_capabilities()
        .ok_or_else(|| CostError::UnsupportedCostType {
            name: cost_type_name.to_string(),
            uri: resource.uri.clone(),
        })?;

    if !caps.cost_type_names.iter().any(|n| n == cost_type_name) {
        return Err(CostError::UnsupportedCostType {
            name: cost_type_name.to_string(),
            uri: resource.uri.clone(),
        });
    }

    if wants_constraints && !caps.cost_constraints {
        return Err(CostError::ConstraintsUnsupported {
            uri: resource.uri.clone(),
        });
    }

    catalog
        .get(cost_type_name)
        .cloned()
        .ok_or_else(|| CostError::UnknownCostType {
            name: cost_type_name.to_string(),
        })
}
