use std::io;
use std::net::Ipv4Addr;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The OS refused a raw link-layer channel, usually for lack of privileges.
    #[error("opening datalink channel on {interface}")]
    ChannelOpen {
        interface: String,
        #[source]
        source: io::Error,
    },

    #[error("non-ethernet channel for {0}")]
    NonEthernetChannel(String),

    /// ARP needs a source MAC; tunnels and some virtual links have none.
    #[error("interface {0} has no hardware address")]
    NoHardwareAddress(String),

    #[error("failed to build ARP request for {target}: {reason}")]
    FrameBuild { target: Ipv4Addr, reason: String },

    #[error("sending ARP request for {target} on {interface}")]
    Transmit {
        interface: String,
        target: Ipv4Addr,
        #[source]
        source: io::Error,
    },

    #[error("unreadable metadata on {interface}: {reason}")]
    InterfaceMetadata { interface: String, reason: String },

    #[error("a scan is already in progress")]
    ScanInProgress,

    #[error("failed to start the scan worker")]
    Worker(#[source] io::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// Both devices were placed on the same point, so no direction exists.
    #[error("{a} and {b} occupy the same position")]
    DegenerateGeometry { a: Ipv4Addr, b: Ipv4Addr },

    #[error("no position computed for {0}")]
    MissingPosition(Ipv4Addr),
}
