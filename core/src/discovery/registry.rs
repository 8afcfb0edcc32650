use std::sync::{Arc, PoisonError, RwLock};

use pnet::ipnetwork::Ipv4Network;

use netviz_common::network::device::Device;
use netviz_common::network::subnet::{self, Subnet};

/// One subnet and the devices that answered on it, in reply order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetEntry {
    subnet: Subnet,
    devices: Vec<Device>,
}

impl SubnetEntry {
    /// Devices whose address falls outside `subnet` are dropped.
    pub fn new(subnet: Subnet, devices: Vec<Device>) -> Self {
        let devices = devices
            .into_iter()
            .filter(|d| subnet.contains(d.ip))
            .collect();
        Self { subnet, devices }
    }

    pub fn subnet(&self) -> &Subnet {
        &self.subnet
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }
}

/// The result of one scan run, keyed by subnet and kept in scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryRegistry {
    entries: Vec<SubnetEntry>,
}

impl DiscoveryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entry`, replacing any entry for the same network in place.
    pub fn insert(&mut self, entry: SubnetEntry) {
        match self.entries.iter_mut().find(|e| e.subnet == entry.subnet) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, network: &Ipv4Network) -> Option<&SubnetEntry> {
        let network = subnet::normalize(*network);
        self.entries.iter().find(|e| e.subnet.network() == network)
    }

    pub fn entries(&self) -> &[SubnetEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn device_count(&self) -> usize {
        self.entries.iter().map(|e| e.devices.len()).sum()
    }
}

/// Shared access to the latest published registry.
///
/// Readers get an immutable snapshot; the scan worker swaps in a new one after
/// every subnet, so a snapshot is always a complete state.
#[derive(Debug, Clone, Default)]
pub struct RegistryHandle {
    current: Arc<RwLock<Arc<DiscoveryRegistry>>>,
}

impl RegistryHandle {
    pub fn snapshot(&self) -> Arc<DiscoveryRegistry> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn publish(&self, registry: DiscoveryRegistry) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(registry);
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
