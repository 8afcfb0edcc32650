#![cfg(test)]
use std::sync::Arc;

use netviz_common::config::{LayoutConfig, ScanConfig};
use netviz_common::geometry::Point;
use netviz_core::discovery::DiscoveryService;
use netviz_core::layout::{self, GraphLayout};

use crate::utils::*;

#[tokio::test]
async fn scanned_subnet_lays_out_as_a_complete_graph() {
    let lan = FakeLan::default().answering(
        "192.168.0.0/24",
        vec![
            device("192.168.0.1"),
            device("192.168.0.7"),
            device("192.168.0.33"),
            device("192.168.0.40"),
            device("192.168.0.200"),
        ],
    );
    let service = DiscoveryService::new(
        Arc::new(ChangingSource::new(vec![subnet("192.168.0.32/24", "enp9s0")])),
        Arc::new(lan),
        ScanConfig::default(),
    );
    service.scan_all().unwrap().collect().await;

    let registry = service.registry().snapshot();
    let entry = registry.get(&"192.168.0.0/24".parse().unwrap()).unwrap();
    let cfg = LayoutConfig::default();
    let graph = GraphLayout::build(entry.devices(), &cfg).unwrap();

    assert_eq!(graph.nodes.len(), 5);
    assert_eq!(graph.edges.len(), 5 * 4);
    assert_eq!(graph.nodes[4].center, Point::new(300.0, 300.0));

    let positions = layout::layout(entry.devices(), &cfg);
    for edge in &graph.edges {
        let from = positions[&edge.from];
        let to = positions[&edge.to];
        let start_gap = (edge.start.x - from.x).hypot(edge.start.y - from.y);
        let end_gap = (edge.end.x - to.x).hypot(edge.end.y - to.y);
        assert!((start_gap - cfg.node_radius).abs() < 1e-9);
        assert!((end_gap - cfg.node_radius).abs() < 1e-9);
    }
    for pair in graph.edges.chunks(2) {
        assert_eq!(pair[0].reversed(), pair[1]);
    }
}

#[test]
fn layout_is_deterministic() {
    let devices = vec![device("10.0.0.1"), device("10.0.0.2"), device("10.0.0.3")];
    let cfg = LayoutConfig {
        columns: 2,
        cell_size: 150.0,
        origin: Point::new(50.0, 60.0),
        ..LayoutConfig::default()
    };
    let first = GraphLayout::build(&devices, &cfg).unwrap();
    let second = GraphLayout::build(&devices, &cfg).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.nodes[2].center, Point::new(50.0, 210.0));
}

#[test]
fn single_device_has_no_edges() {
    let graph = GraphLayout::build(&[device("10.0.0.1")], &LayoutConfig::default()).unwrap();
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.edges.is_empty());
}
