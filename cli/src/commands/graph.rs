use anyhow::{Context, anyhow};
use pnet::ipnetwork::Ipv4Network;
use tracing::warn;

use netviz_common::config::Config;
use netviz_core::discovery::DiscoveryRegistry;
use netviz_core::layout::GraphLayout;

use crate::nprint;
use crate::terminal::{format, print};

/// Prints the node positions, captions and directed edges of one subnet.
pub fn render(network: &Ipv4Network, registry: &DiscoveryRegistry, cfg: &Config) -> anyhow::Result<()> {
    let entry = registry
        .get(network)
        .ok_or_else(|| anyhow!("{network} is not part of the last scan"))?;
    let graph = GraphLayout::build(entry.devices(), &cfg.layout)
        .with_context(|| format!("laying out {network}"))?;

    print::header(&format!("graph of {network}"), cfg.quiet);
    if graph.is_empty() {
        warn!("{network} has no devices to draw");
        return Ok(());
    }

    for (idx, node) in graph.nodes.iter().enumerate() {
        print::tree_head(idx, &node.device.ip.to_string());
        print::as_tree_one_level(format::node_details(node));
    }

    nprint!();
    print::header(&format!("{} edges", graph.edges.len()), cfg.quiet);
    for edge in &graph.edges {
        print::print(&format::edge_line(edge));
    }

    nprint!();
    print::print_status(format::scroll_region_line(graph.scroll_region()));
    Ok(())
}
