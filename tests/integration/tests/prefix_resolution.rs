//! Integration test: network map loading and longest-prefix resolution.
//!
//! Uses the reference network map (pid1 = 192.0.2.0/24 + 198.51.100.0/25,
//! pid2 = 198.51.100.128/25, pid3 = default routes) loaded from its wire
//! form, as a client of the map service would receive it.

use alto_core::{EndpointAddr, VersionTag};
use alto_map::{MapError, NetworkMap, PrefixResolver};

fn addr(s: &str) -> EndpointAddr {
    s.parse().unwrap()
}

/// The reference map, parsed from the wire shape.
fn reference_map() -> NetworkMap {
    serde_json::from_value(serde_json::json!({
        "map-vtag": "1266506139",
        "map": {
            "pid1": { "ipv4": ["192.0.2.0/24", "198.51.100.0/25"] },
            "pid2": { "ipv4": ["198.51.100.128/25"] },
            "pid3": { "ipv4": ["0.0.0.0/0"], "ipv6": ["::/0"] }
        }
    }))
    .expect("reference map should parse")
}

// =========================================================================
// Resolution against the reference map
// =========================================================================

#[test]
fn test_addresses_resolve_to_their_declared_pid() {
    let map = reference_map();
    assert_eq!(map.vtag(), &VersionTag::new("1266506139"));
    let resolver = PrefixResolver::build(&map).unwrap();

    assert_eq!(resolver.resolve(&addr("192.0.2.5")).unwrap(), "pid1");
    assert_eq!(resolver.resolve(&addr("198.51.100.1")).unwrap(), "pid1");
    assert_eq!(resolver.resolve(&addr("198.51.100.200")).unwrap(), "pid2");
}

#[test]
fn test_uncovered_addresses_fall_to_the_default_route() {
    let resolver = PrefixResolver::build(&reference_map()).unwrap();
    assert_eq!(resolver.resolve(&addr("203.0.113.1")).unwrap(), "pid3");
    assert_eq!(resolver.resolve(&addr("ipv6:2001:db8::1")).unwrap(), "pid3");
}

#[test]
fn test_overlap_is_resolved_by_longest_match_not_order() {
    // 198.51.100.0/24 under "wide" overlaps both /25 halves; the /25s win
    // for their halves whichever order the map lists the PIDs in.
    let mut map = reference_map();
    map.insert("wide", "198.51.100.0/24".parse().unwrap());
    let resolver = PrefixResolver::build(&map).unwrap();

    assert_eq!(resolver.resolve(&addr("198.51.100.1")).unwrap(), "pid1");
    assert_eq!(resolver.resolve(&addr("198.51.100.200")).unwrap(), "pid2");
}

#[test]
fn test_without_default_route_resolution_fails_typed() {
    let map: NetworkMap = serde_json::from_value(serde_json::json!({
        "map-vtag": "v1",
        "map": { "pid1": { "ipv4": ["192.0.2.0/24"] } }
    }))
    .unwrap();
    let resolver = PrefixResolver::build(&map).unwrap();

    let err = resolver.resolve(&addr("203.0.113.1")).unwrap_err();
    assert!(matches!(err, MapError::NotFound { .. }));
}

// =========================================================================
// Load-time ambiguity detection
// =========================================================================

#[test]
fn test_equal_length_overlap_is_a_load_error() {
    let map: NetworkMap = serde_json::from_value(serde_json::json!({
        "map-vtag": "v1",
        "map": {
            "pid1": { "ipv4": ["198.51.100.128/25"] },
            "pid2": { "ipv4": ["198.51.100.128/25"] }
        }
    }))
    .unwrap();

    let err = PrefixResolver::build(&map).unwrap_err();
    assert!(matches!(err, MapError::AmbiguousMapping { .. }));
}

#[test]
fn test_dual_default_routes_in_one_family_are_ambiguous() {
    let map: NetworkMap = serde_json::from_value(serde_json::json!({
        "map-vtag": "v1",
        "map": {
            "pid1": { "ipv4": ["0.0.0.0/0"] },
            "pid2": { "ipv4": ["0.0.0.0/0"] }
        }
    }))
    .unwrap();
    assert!(PrefixResolver::build(&map).is_err());
}

#[test]
fn test_different_length_overlap_across_pids_is_fine() {
    let map: NetworkMap = serde_json::from_value(serde_json::json!({
        "map-vtag": "v1",
        "map": {
            "pid1": { "ipv4": ["10.0.0.0/8"] },
            "pid2": { "ipv4": ["10.0.0.0/16"] }
        }
    }))
    .unwrap();
    let resolver = PrefixResolver::build(&map).unwrap();
    assert_eq!(resolver.resolve(&addr("10.0.1.1")).unwrap(), "pid2");
    assert_eq!(resolver.resolve(&addr("10.1.1.1")).unwrap(), "pid1");
}

// =========================================================================
// Wire round trip
// =========================================================================

#[test]
fn test_network_map_round_trips_through_wire_form() {
    let map = reference_map();
    let json = serde_json::to_value(&map).unwrap();
    assert_eq!(json["map-vtag"], "1266506139");
    assert_eq!(json["map"]["pid3"]["ipv6"], serde_json::json!(["::/0"]));

    let reparsed: NetworkMap = serde_json::from_value(json).unwrap();
    assert_eq!(reparsed, map);
}
