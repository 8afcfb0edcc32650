use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

use crate::network::subnet::LocalLink;

pub trait NetworkInterfaceExtension {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network>;
    fn get_ipv4_range(&self) -> Option<Ipv4Network>;
    fn local_link(&self, net: &Ipv4Network) -> LocalLink;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|ip| {
                if let IpNetwork::V4(ipv4) = ip {
                    Some(*ipv4)
                } else {
                    None
                }
            })
            .collect()
    }

    fn get_ipv4_range(&self) -> Option<Ipv4Network> {
        // Simple heuristic: pick the first non-loopback IPv4
        self.get_ipv4_nets()
            .into_iter()
            .find(|net| !net.ip().is_loopback())
    }

    fn local_link(&self, net: &Ipv4Network) -> LocalLink {
        LocalLink {
            interface: self.name.clone(),
            index: self.index,
            addr: net.ip(),
            mac: self.mac.filter(|mac| *mac != pnet::util::MacAddr::zero()),
        }
    }
}

/// Rebuilds enough of a `NetworkInterface` to open a datalink channel on it.
pub fn to_interface(link: &LocalLink, net: &Ipv4Network) -> NetworkInterface {
    NetworkInterface {
        name: link.interface.clone(),
        description: String::new(),
        index: link.index,
        mac: link.mac,
        ips: vec![IpNetwork::V4(*net)],
        flags: 0,
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
