//! Subnet enumeration.
//!
//! Reads the OS interface table and turns every IPv4-bearing, non-loopback
//! interface into a [`Subnet`]. Nothing is sent on the wire.

use pnet::datalink::{self, NetworkInterface};
use tracing::{debug, warn};

use netviz_common::error::DiscoveryError;
use netviz_common::network::interface::NetworkInterfaceExtension;
use netviz_common::network::subnet::Subnet;

/// Where a scan gets its subnets from.
pub trait SubnetSource: Send + Sync {
    fn subnets(&self) -> Vec<Subnet>;
}

/// The interfaces the operating system reports.
pub struct SystemInterfaces;

impl SubnetSource for SystemInterfaces {
    fn subnets(&self) -> Vec<Subnet> {
        discover_subnets()
    }
}

pub fn discover_subnets() -> Vec<Subnet> {
    let interfaces: Vec<NetworkInterface> = datalink::interfaces();
    debug!("Identified {} network interface(s)", interfaces.len());
    subnets_from_interfaces(&interfaces)
}

/// One subnet per IPv4-bearing interface, in the order the OS lists them.
///
/// Interfaces whose metadata cannot be turned into a subnet are logged and
/// skipped.
pub fn subnets_from_interfaces(interfaces: &[NetworkInterface]) -> Vec<Subnet> {
    interfaces
        .iter()
        .filter_map(|interface| match subnet_for_interface(interface) {
            Ok(subnet) => subnet,
            Err(e) => {
                warn!("Skipping interface {}: {e}", interface.name);
                None
            }
        })
        .collect()
}

fn subnet_for_interface(interface: &NetworkInterface) -> Result<Option<Subnet>, DiscoveryError> {
    if interface.is_loopback() {
        return Ok(None);
    }
    let Some(net) = interface.get_ipv4_range() else {
        return Ok(None);
    };

    if net.ip().is_unspecified() {
        return Err(DiscoveryError::InterfaceMetadata {
            interface: interface.name.clone(),
            reason: "unassigned IPv4 address".to_string(),
        });
    }

    let subnet = Subnet::new(net.prefix(), interface.local_link(&net)).map_err(|e| {
        DiscoveryError::InterfaceMetadata {
            interface: interface.name.clone(),
            reason: e.to_string(),
        }
    })?;

    debug!("{} is attached to {subnet}", interface.name);
    Ok(Some(subnet))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
