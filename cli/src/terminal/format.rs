use colored::*;
use pnet::ipnetwork::Ipv4Network;

use netviz_common::geometry::{EdgeSegment, Point};
use netviz_common::network::subnet::Subnet;
use netviz_core::layout::Node;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn network_value(network: &Ipv4Network) -> ColoredString {
    let address: ColoredString = network.network().to_string().color(colors::IPV4_ADDR);
    let prefix: ColoredString = network.prefix().to_string().color(colors::IPV4_PREFIX);
    format!("{address}/{prefix}").color(colors::SEPARATOR)
}

pub fn subnet_details(subnet: &Subnet) -> Vec<Detail> {
    let link = subnet.link();
    let mut details: Vec<Detail> = vec![
        ("Network".to_string(), network_value(&subnet.network())),
        ("IPv4".to_string(), link.addr.to_string().color(colors::IPV4_ADDR)),
    ];
    if let Some(mac) = link.mac {
        details.push(("MAC".to_string(), mac.to_string().color(colors::MAC_ADDR)));
    }
    details
}

pub fn node_details(node: &Node) -> Vec<Detail> {
    vec![
        ("MAC".to_string(), node.device.mac.to_string().color(colors::MAC_ADDR)),
        ("Center".to_string(), node.center.to_string().normal()),
        ("Label".to_string(), node.label_anchor.to_string().normal()),
    ]
}

/// The list entry a scanned subnet gets on the home view.
pub fn subnet_entry(subnet: &Subnet, devices: usize) -> String {
    format!(
        "Network: {}, Devices: {}",
        subnet.to_string().color(colors::PRIMARY),
        devices.to_string().color(colors::ACCENT).bold()
    )
}

pub fn edge_line(edge: &EdgeSegment) -> String {
    format!(
        "{} {} {}  {} {} {}",
        edge.from.to_string().color(colors::IPV4_ADDR),
        "->".color(colors::EDGE),
        edge.to.to_string().color(colors::IPV4_ADDR),
        edge.start,
        "→".color(colors::EDGE),
        edge.end
    )
}

pub fn scroll_region_line(region: Option<(Point, Point)>) -> String {
    match region {
        Some((min, max)) => format!("Scroll region: {min} to {max}"),
        None => "Scroll region: empty".to_string(),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
