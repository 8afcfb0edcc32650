use std::fmt;
use std::net::Ipv4Addr;

use pnet::util::MacAddr;

/// A host that answered an ARP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Device {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl Device {
    pub fn new(ip: Ipv4Addr, mac: MacAddr) -> Self {
        Self { ip, mac }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}      {}", self.ip, self.mac)
    }
}
