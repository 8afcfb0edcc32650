#![cfg(test)]
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;
use std::sync::mpsc;
use std::time::Duration;

use netviz_common::error::DiscoveryError;
use netviz_common::network::device::Device;
use netviz_common::network::subnet::{LocalLink, Subnet};
use netviz_core::scanner::Prober;
use netviz_core::subnets::{self, SubnetSource};
use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};
use pnet::util::MacAddr;

pub const IFF_UP: u32 = 1;
pub const IFF_BROADCAST: u32 = 1 << 1;
pub const IFF_LOOPBACK: u32 = 1 << 3;

pub fn iface(name: &str, index: u32, ips: &[&str], flags: u32) -> NetworkInterface {
    NetworkInterface {
        name: name.to_string(),
        description: String::new(),
        index,
        mac: Some(MacAddr::new(0x52, 0x54, 0x00, 0x00, 0x00, index as u8)),
        ips: ips.iter().map(|ip| ip.parse::<IpNetwork>().unwrap()).collect(),
        flags,
    }
}

pub fn subnet(cidr_with_host: &str, interface: &str) -> Subnet {
    let net: Ipv4Network = cidr_with_host.parse().unwrap();
    let link = LocalLink {
        interface: interface.to_string(),
        index: 2,
        addr: net.ip(),
        mac: Some(MacAddr::new(0x52, 0x54, 0x00, 0x00, 0x00, 0x02)),
    };
    Subnet::new(net.prefix(), link).unwrap()
}

pub fn device(ip: &str) -> Device {
    let ip: Ipv4Addr = ip.parse().unwrap();
    let [_, _, c, d] = ip.octets();
    Device::new(ip, MacAddr::new(0x02, 0, 0, 0, c, d))
}

/// A fixed interface table run through the real enumerator.
pub struct InterfaceTable(pub Vec<NetworkInterface>);

impl SubnetSource for InterfaceTable {
    fn subnets(&self) -> Vec<Subnet> {
        subnets::subnets_from_interfaces(&self.0)
    }
}

/// Subnets that can change between two scans.
pub struct ChangingSource(pub Mutex<Vec<Subnet>>);

impl ChangingSource {
    pub fn new(subnets: Vec<Subnet>) -> Self {
        Self(Mutex::new(subnets))
    }

    pub fn replace(&self, subnets: Vec<Subnet>) {
        *self.0.lock().unwrap() = subnets;
    }
}

impl SubnetSource for ChangingSource {
    fn subnets(&self) -> Vec<Subnet> {
        self.0.lock().unwrap().clone()
    }
}

/// A simulated network: what answers on which subnet, and which subnets
/// cannot be probed at all.
#[derive(Default)]
pub struct FakeLan {
    answers: HashMap<Ipv4Network, Vec<Device>>,
    broken: Vec<Ipv4Network>,
}

impl FakeLan {
    pub fn answering(mut self, network: &str, devices: Vec<Device>) -> Self {
        self.answers.insert(network.parse().unwrap(), devices);
        self
    }

    pub fn broken(mut self, network: &str) -> Self {
        self.broken.push(network.parse().unwrap());
        self
    }
}

impl Prober for FakeLan {
    fn probe(&self, subnet: &Subnet, _: Duration) -> Result<Vec<Device>, DiscoveryError> {
        if self.broken.contains(&subnet.network()) {
            return Err(DiscoveryError::ChannelOpen {
                interface: subnet.link().interface.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "Operation not permitted",
                ),
            });
        }
        Ok(self.answers.get(&subnet.network()).cloned().unwrap_or_default())
    }
}

/// Holds every probe until the test releases it.
pub struct GatedProber {
    gate: Mutex<mpsc::Receiver<()>>,
}

impl GatedProber {
    pub fn new() -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (Self { gate: Mutex::new(rx) }, tx)
    }
}

impl Prober for GatedProber {
    fn probe(&self, _: &Subnet, _: Duration) -> Result<Vec<Device>, DiscoveryError> {
        let _ = self.gate.lock().unwrap().recv();
        Ok(Vec::new())
    }
}
