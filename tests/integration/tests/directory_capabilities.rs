//! Integration test: the directory read path and capability negotiation.
//!
//! Builds the reference directory (four cost types, network map, cost map,
//! endpoint property, and endpoint cost resources) and exercises the
//! capability matcher against it, including the IRD wire shape.

use alto_core::{media, CostMode, CostType, Resource};
use alto_cost::{match_cost_capabilities, CostError};
use alto_directory::{Directory, DirectoryBuilder, DirectoryError};

/// The reference directory: cost types num-routing, num-hop, ord-routing,
/// ord-hop; resources mirroring a typical deployment.
fn reference_directory() -> Directory {
    DirectoryBuilder::new()
        .cost_type(
            "num-routing",
            CostType::new(CostMode::Numerical, "routingcost").with_description("My default"),
        )
        .unwrap()
        .cost_type("num-hop", CostType::new(CostMode::Numerical, "hopcount"))
        .unwrap()
        .cost_type("ord-routing", CostType::new(CostMode::Ordinal, "routingcost"))
        .unwrap()
        .cost_type("ord-hop", CostType::new(CostMode::Ordinal, "hopcount"))
        .unwrap()
        .resource(Resource::new(
            "http://alto.example.com/networkmap",
            media::NETWORK_MAP,
        ))
        .resource(
            Resource::new(
                "http://alto.example.com/costmap/num/routingcost",
                media::COST_MAP,
            )
            .with_cost_capabilities(vec!["num-routing".into()], false),
        )
        .resource(
            Resource::new(
                "http://alto.example.com/costmap/num/hopcount",
                media::COST_MAP,
            )
            .with_cost_capabilities(vec!["num-hop".into()], false),
        )
        .resource(
            Resource::new(
                "http://alto.example.com/endpointprop/lookup",
                media::ENDPOINT_PROP,
            )
            .with_accepts(media::ENDPOINT_PROP_PARAMS)
            .with_property_capabilities(vec!["pid".into()]),
        )
        .resource(
            Resource::new(
                "http://alto.example.com/endpointcost/lookup",
                media::ENDPOINT_COST,
            )
            .with_accepts(media::ENDPOINT_COST_PARAMS)
            .with_cost_capabilities(
                vec![
                    "num-routing".into(),
                    "num-hop".into(),
                    "ord-routing".into(),
                    "ord-hop".into(),
                ],
                true,
            ),
        )
        .build()
        .expect("reference directory should build")
}

// =========================================================================
// Directory construction and wire shape
// =========================================================================

#[test]
fn test_reference_directory_wire_shape() {
    let directory = reference_directory();
    let json = serde_json::to_value(&directory).unwrap();

    assert_eq!(
        json["meta"]["cost-types"]["num-routing"],
        serde_json::json!({
            "cost-mode": "numerical",
            "cost-metric": "routingcost",
            "description": "My default"
        })
    );
    assert_eq!(
        json["meta"]["cost-types"]["ord-hop"],
        serde_json::json!({ "cost-mode": "ordinal", "cost-metric": "hopcount" })
    );

    let resources = json["resources"].as_array().unwrap();
    assert_eq!(resources.len(), 5);
    // Registration order is preserved.
    assert_eq!(resources[0]["uri"], "http://alto.example.com/networkmap");
    assert_eq!(
        resources[4]["capabilities"],
        serde_json::json!({
            "cost-constraints": true,
            "cost-type-names": ["num-routing", "num-hop", "ord-routing", "ord-hop"]
        })
    );
}

#[test]
fn test_directory_rejects_unknown_cost_type_reference() {
    let err = DirectoryBuilder::new()
        .cost_type("num-routing", CostType::new(CostMode::Numerical, "routingcost"))
        .unwrap()
        .resource(
            Resource::new("http://alto.example.com/costmap/x", media::COST_MAP)
                .with_cost_capabilities(vec!["num-routing".into(), "ord-hop".into()], false),
        )
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        DirectoryError::UnknownCostType { name, .. } if name == "ord-hop"
    ));
}

#[test]
fn test_directory_rejects_unrecognized_media_type() {
    let err = DirectoryBuilder::new()
        .resource(Resource::new("http://alto.example.com/feed", "text/html"))
        .build()
        .unwrap_err();
    assert!(matches!(err, DirectoryError::UnrecognizedMediaType { .. }));
}

// =========================================================================
// Capability matching against the directory snapshot
// =========================================================================

#[test]
fn test_requesting_unadvertised_cost_type_fails() {
    let directory = reference_directory();
    // This resource advertises only ["num-routing"]; "ord-hop" exists in
    // the catalog but is not served here.
    let resource = directory
        .find_resource("http://alto.example.com/costmap/num/routingcost")
        .unwrap();

    let err = match_cost_capabilities(resource, directory.cost_types(), "ord-hop", false)
        .unwrap_err();
    assert!(matches!(
        err,
        CostError::UnsupportedCostType { name, .. } if name == "ord-hop"
    ));
}

#[test]
fn test_endpoint_cost_resource_serves_all_four_types() {
    let directory = reference_directory();
    let resource = directory
        .find_resource("http://alto.example.com/endpointcost/lookup")
        .unwrap();

    for name in ["num-routing", "num-hop", "ord-routing", "ord-hop"] {
        let ct = match_cost_capabilities(resource, directory.cost_types(), name, true)
            .unwrap_or_else(|e| panic!("{name} should match: {e}"));
        assert!(!ct.metric.is_empty());
    }
}

#[test]
fn test_constraints_rejected_where_not_advertised() {
    let directory = reference_directory();
    let resource = directory
        .find_resource("http://alto.example.com/costmap/num/routingcost")
        .unwrap();

    assert!(match_cost_capabilities(resource, directory.cost_types(), "num-routing", false).is_ok());
    let err = match_cost_capabilities(resource, directory.cost_types(), "num-routing", true)
        .unwrap_err();
    assert!(matches!(err, CostError::ConstraintsUnsupported { .. }));
}
