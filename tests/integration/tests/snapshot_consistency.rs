//! Integration test: atomic snapshot publication under concurrent readers.
//!
//! A writer thread flips the service between two generations while reader
//! threads run queries. Every individual response must be internally
//! consistent: whatever generation a reader lands on, all the data in that
//! response comes from that generation alone.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use alto_core::{
    media, CostMode, CostType, CostTypeCatalog, CostValue, EndpointAddr, Resource, ServiceConfig,
    VersionTag,
};
use alto_cost::CostMap;
use alto_map::NetworkMap;
use alto_service::{AltoService, InMemorySource};

const COST_MAP_URI: &str = "http://alto.example.com/costmap/num/routingcost";

fn addr(s: &str) -> EndpointAddr {
    s.parse().unwrap()
}

/// One generation of service state. The PID owning 192.0.2.0/24 and the
/// pid->default cost differ per generation, so a mixed read is detectable.
fn generation(tag: &str, owner: &str, cost: f64) -> InMemorySource {
    alto_integration_tests::init_tracing();
    let mut cost_types = CostTypeCatalog::new();
    cost_types
        .register("num-routing", CostType::new(CostMode::Numerical, "routingcost"))
        .unwrap();

    let mut nm = NetworkMap::new(VersionTag::new(tag));
    nm.insert(owner, "192.0.2.0/24".parse().unwrap());
    nm.insert("default", "0.0.0.0/0".parse().unwrap());

    let mut cm = CostMap::new(
        CostType::new(CostMode::Numerical, "routingcost"),
        VersionTag::new(tag),
    );
    cm.insert(owner, "default", cost).unwrap();

    InMemorySource {
        cost_types,
        resources: vec![
            Resource::new("http://alto.example.com/networkmap", media::NETWORK_MAP),
            Resource::new(COST_MAP_URI, media::COST_MAP)
                .with_cost_capabilities(vec!["num-routing".into()], false),
        ],
        network_map: Some(nm),
        cost_maps: vec![cm],
    }
}

#[test]
fn test_readers_never_observe_a_mixed_generation() {
    let gen_a = generation("gen-a", "pid-a", 1.0);
    let gen_b = generation("gen-b", "pid-b", 2.0);

    let service = Arc::new(AltoService::load(ServiceConfig::default(), &gen_a, &gen_a).unwrap());
    let stop = Arc::new(AtomicBool::new(false));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let probe = addr("192.0.2.5");
                while !stop.load(Ordering::Relaxed) {
                    // One handle, several reads: resolution, map content,
                    // and cost data must all agree with the handle's vtag.
                    let snapshot = service.snapshot();
                    let vtag = snapshot.network_map().vtag().as_str().to_string();
                    let pid = snapshot.resolver().resolve(&probe).unwrap().to_string();
                    let cost = snapshot
                        .costs()
                        .get(CostMode::Numerical, "routingcost", &pid, "default")
                        .unwrap();
                    match vtag.as_str() {
                        "gen-a" => {
                            assert_eq!(pid, "pid-a");
                            assert_eq!(cost, CostValue::Numerical(1.0));
                            assert!(snapshot.network_map().contains_pid("pid-a"));
                        }
                        "gen-b" => {
                            assert_eq!(pid, "pid-b");
                            assert_eq!(cost, CostValue::Numerical(2.0));
                            assert!(snapshot.network_map().contains_pid("pid-b"));
                        }
                        other => panic!("unexpected vtag {other}"),
                    }
                }
            })
        })
        .collect();

    for _ in 0..200 {
        service.reload(&gen_b, &gen_b).unwrap();
        service.reload(&gen_a, &gen_a).unwrap();
    }

    stop.store(true, Ordering::Relaxed);
    for reader in readers {
        reader.join().unwrap();
    }
}

#[test]
fn test_responses_carry_a_single_vtag_during_swaps() {
    let gen_a = generation("gen-a", "pid-a", 1.0);
    let gen_b = generation("gen-b", "pid-b", 2.0);

    let service = Arc::new(AltoService::load(ServiceConfig::default(), &gen_a, &gen_a).unwrap());
    let stop = Arc::new(AtomicBool::new(false));

    let reader = {
        let service = Arc::clone(&service);
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                let response = service.network_map(None, None).unwrap();
                // meta and data agree, and the map body matches the tag.
                assert_eq!(&response.meta.map_vtag, response.data.vtag());
                let expected_pid = match response.meta.map_vtag.as_str() {
                    "gen-a" => "pid-a",
                    "gen-b" => "pid-b",
                    other => panic!("unexpected vtag {other}"),
                };
                assert!(response.data.contains_pid(expected_pid));

                let costs = service
                    .cost_map(COST_MAP_URI, "num-routing", &[], None, None)
                    .unwrap();
                let expected_cost = match costs.vtag.as_str() {
                    "gen-a" => CostValue::Numerical(1.0),
                    "gen-b" => CostValue::Numerical(2.0),
                    other => panic!("unexpected vtag {other}"),
                };
                let owner = match costs.vtag.as_str() {
                    "gen-a" => "pid-a",
                    _ => "pid-b",
                };
                assert_eq!(costs.get(owner, "default"), Some(expected_cost));
            }
        })
    };

    for _ in 0..200 {
        service.reload(&gen_b, &gen_b).unwrap();
        service.reload(&gen_a, &gen_a).unwrap();
    }

    stop.store(true, Ordering::Relaxed);
    reader.join().unwrap();
}

#[test]
fn test_handles_taken_before_a_swap_keep_serving_the_old_generation() {
    let gen_a = generation("gen-a", "pid-a", 1.0);
    let gen_b = generation("gen-b", "pid-b", 2.0);

    let service = AltoService::load(ServiceConfig::default(), &gen_a, &gen_a).unwrap();
    let old = service.snapshot();

    service.reload(&gen_b, &gen_b).unwrap();

    assert_eq!(old.network_map().vtag(), &VersionTag::new("gen-a"));
    assert_eq!(old.resolver().resolve(&addr("192.0.2.5")).unwrap(), "pid-a");
    assert_eq!(
        service.snapshot().network_map().vtag(),
        &VersionTag::new("gen-b")
    );
}
