use std::fmt;
use std::hash::{Hash, Hasher};
use std::net::Ipv4Addr;

use pnet::ipnetwork::{IpNetworkError, Ipv4Network};
use pnet::util::MacAddr;

use crate::network::range::{self, Ipv4Range};

/// The local end of a subnet: which interface we reach it through and the
/// addresses we speak with on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalLink {
    pub interface: String,
    pub index: u32,
    pub addr: Ipv4Addr,
    pub mac: Option<MacAddr>,
}

/// A directly attached IPv4 subnet.
///
/// Two subnets are equal when their normalized network addresses are equal,
/// regardless of which interface they were found on.
#[derive(Debug, Clone)]
pub struct Subnet {
    network: Ipv4Network,
    link: LocalLink,
}

impl Subnet {
    /// Builds the subnet containing `link.addr` with the given prefix.
    pub fn new(prefix: u8, link: LocalLink) -> Result<Self, IpNetworkError> {
        let containing = Ipv4Network::new(link.addr, prefix)?;
        let network = Ipv4Network::new(containing.network(), prefix)?;
        Ok(Self { network, link })
    }

    pub fn network(&self) -> Ipv4Network {
        self.network
    }

    pub fn link(&self) -> &LocalLink {
        &self.link
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.network.contains(ip)
    }

    /// Every address a host in this subnet could hold.
    pub fn hosts(&self) -> Ipv4Range {
        range::host_range(&self.network)
    }
}

impl PartialEq for Subnet {
    fn eq(&self, other: &Self) -> bool {
        self.network == other.network
    }
}

impl Eq for Subnet {}

impl Hash for Subnet {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.network.hash(state);
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.network)
    }
}

/// Brings a user supplied network into the same normalized form `Subnet` uses.
pub fn normalize(network: Ipv4Network) -> Ipv4Network {
    Ipv4Network::new(network.network(), network.prefix()).unwrap_or(network)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
