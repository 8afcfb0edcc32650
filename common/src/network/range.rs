use std::net::Ipv4Addr;

use pnet::ipnetwork::Ipv4Network;

/// An inclusive run of IPv4 addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Range {
    pub start_addr: Ipv4Addr,
    pub end_addr: Ipv4Addr,
}

impl Ipv4Range {
    pub fn new(start_addr: Ipv4Addr, end_addr: Ipv4Addr) -> Self {
        Self {
            start_addr,
            end_addr,
        }
    }

    pub fn to_iter(&self) -> impl Iterator<Item = Ipv4Addr> + use<> {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        (start..=end).map(Ipv4Addr::from)
    }

    pub fn len(&self) -> u64 {
        let start: u32 = self.start_addr.into();
        let end: u32 = self.end_addr.into();
        if end < start {
            return 0;
        }
        u64::from(end - start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.start_addr <= ip && ip <= self.end_addr
    }
}

/// Addresses a host inside `network` can hold.
///
/// Network and broadcast addresses are dropped except on /31 and /32, where
/// every address is usable.
pub fn host_range(network: &Ipv4Network) -> Ipv4Range {
    let start: u32 = network.network().into();
    let end: u32 = network.broadcast().into();
    if network.prefix() >= 31 {
        return Ipv4Range::new(start.into(), end.into());
    }
    Ipv4Range::new((start + 1).into(), (end - 1).into())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
