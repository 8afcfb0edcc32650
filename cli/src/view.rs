//! Which screen is on display.
//!
//! Every session starts on [`View::Home`], the scan list. Navigating to a
//! graph resolves the requested subnet against the current registry snapshot,
//! so a view never points at a subnet that the last scan did not produce.

use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use pnet::ipnetwork::Ipv4Network;

use netviz_common::network::subnet;
use netviz_core::discovery::{DiscoveryRegistry, SubnetEntry};

/// How the user names a subnet: by CIDR, or by its position in the scan list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubnetSelector {
    Network(Ipv4Network),
    Index(usize),
}

impl SubnetSelector {
    pub fn resolve<'a>(&self, registry: &'a DiscoveryRegistry) -> Option<&'a SubnetEntry> {
        match self {
            SubnetSelector::Network(network) => registry.get(network),
            SubnetSelector::Index(index) => registry.entries().get(*index),
        }
    }
}

impl FromStr for SubnetSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.contains('/') {
            let network: Ipv4Network = s
                .parse()
                .map_err(|e| format!("'{s}' is not an IPv4 network: {e}"))?;
            return Ok(SubnetSelector::Network(subnet::normalize(network)));
        }
        s.parse::<usize>()
            .map(SubnetSelector::Index)
            .map_err(|_| format!("'{s}' is neither a CIDR network nor a list index"))
    }
}

impl fmt::Display for SubnetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubnetSelector::Network(network) => write!(f, "{network}"),
            SubnetSelector::Index(index) => write!(f, "#{index}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Home,
    About,
    SubnetGraph(Ipv4Network),
}

pub enum Nav {
    About,
    /// `None` picks the first subnet that has any devices.
    Graph(Option<SubnetSelector>),
}

impl View {
    pub fn navigate(self, nav: Nav, registry: &DiscoveryRegistry) -> anyhow::Result<View> {
        match nav {
            Nav::About => Ok(View::About),
            Nav::Graph(Some(selector)) => match selector.resolve(registry) {
                Some(entry) => Ok(View::SubnetGraph(entry.subnet().network())),
                None => bail!("no scanned subnet matches {selector}"),
            },
            Nav::Graph(None) => match registry.entries().iter().find(|e| !e.devices().is_empty()) {
                Some(entry) => Ok(View::SubnetGraph(entry.subnet().network())),
                None => bail!("no scanned subnet has any devices to draw"),
            },
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use netviz_common::network::device::Device;
    use netviz_common::network::subnet::{LocalLink, Subnet};
    use pnet::util::MacAddr;
    use std::net::Ipv4Addr;

    fn entry(addr: [u8; 4], hosts: &[u8]) -> SubnetEntry {
        let link = LocalLink {
            interface: "eth0".to_string(),
            index: 2,
            addr: Ipv4Addr::from(addr),
            mac: None,
        };
        let subnet = Subnet::new(24, link).unwrap();
        let devices = hosts
            .iter()
            .map(|h| {
                Device::new(
                    Ipv4Addr::new(addr[0], addr[1], addr[2], *h),
                    MacAddr::new(2, 0, 0, 0, 0, *h),
                )
            })
            .collect();
        SubnetEntry::new(subnet, devices)
    }

    fn registry() -> DiscoveryRegistry {
        let mut registry = DiscoveryRegistry::new();
        registry.insert(entry([10, 0, 0, 5], &[]));
        registry.insert(entry([192, 168, 1, 10], &[1, 2]));
        registry
    }

    #[test]
    fn selector_parses_cidr_and_index() {
        assert_eq!(
            "192.168.1.77/24".parse::<SubnetSelector>(),
            Ok(SubnetSelector::Network("192.168.1.0/24".parse().unwrap()))
        );
        assert_eq!("2".parse::<SubnetSelector>(), Ok(SubnetSelector::Index(2)));
        assert!("eth0".parse::<SubnetSelector>().is_err());
        assert!("300.1.1.1/24".parse::<SubnetSelector>().is_err());
    }

    #[test]
    fn session_starts_home() {
        assert_eq!(View::default(), View::Home);
    }

    #[test]
    fn default_graph_picks_first_subnet_with_devices() {
        let view = View::Home.navigate(Nav::Graph(None), &registry()).unwrap();
        assert_eq!(view, View::SubnetGraph("192.168.1.0/24".parse().unwrap()));
    }

    #[test]
    fn graph_by_index_allows_empty_subnet() {
        let view = View::Home
            .navigate(Nav::Graph(Some(SubnetSelector::Index(0))), &registry())
            .unwrap();
        assert_eq!(view, View::SubnetGraph("10.0.0.0/24".parse().unwrap()));
    }

    #[test]
    fn unknown_subnet_is_an_error() {
        let selector = SubnetSelector::Network("172.16.0.0/12".parse().unwrap());
        let err = View::Home
            .navigate(Nav::Graph(Some(selector)), &registry())
            .unwrap_err();
        assert!(err.to_string().contains("172.16.0.0/12"));

        let err = View::Home
            .navigate(Nav::Graph(Some(SubnetSelector::Index(9))), &registry())
            .unwrap_err();
        assert!(err.to_string().contains("#9"));
    }

    #[test]
    fn nothing_to_draw_on_empty_registry() {
        let err = View::Home
            .navigate(Nav::Graph(None), &DiscoveryRegistry::new())
            .unwrap_err();
        assert!(err.to_string().contains("no scanned subnet"));
    }

    #[test]
    fn about_is_always_reachable() {
        let graph = View::SubnetGraph("10.0.0.0/24".parse().unwrap());
        let empty = DiscoveryRegistry::new();
        assert_eq!(graph.navigate(Nav::About, &empty).unwrap(), View::About);
        assert_eq!(View::Home.navigate(Nav::About, &empty).unwrap(), View::About);
    }
}
