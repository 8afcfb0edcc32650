//! The central **abstraction** for subnet probing.
//!
//! A [`Prober`] takes one subnet and a listening window and returns whatever
//! answered inside it. The only implementation shipped here is the
//! [`ArpProber`], which sweeps the subnet with broadcast ARP requests.
//!
//! Probing is best effort: a host that stays silent for the whole window is
//! simply absent from the result, and nothing is retried.

use std::time::Duration;

use netviz_common::error::DiscoveryError;
use netviz_common::network::device::Device;
use netviz_common::network::subnet::Subnet;

pub mod arp;
mod channel;
mod local;

pub use local::ArpProber;

pub trait Prober: Send + Sync {
    /// Probes `subnet` and returns the responding devices in arrival order.
    ///
    /// Must return within `timeout` plus the receiver's read timeout.
    fn probe(&self, subnet: &Subnet, timeout: Duration) -> Result<Vec<Device>, DiscoveryError>;
}
