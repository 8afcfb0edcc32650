//! # netviz core
//!
//! The discovery engine and the graph layout engine.
//!
//! * **[`subnets`]**: finds the IPv4 subnets this machine is attached to.
//! * **[`scanner`]**: probes one subnet with ARP and collects the replies.
//! * **[`discovery`]**: runs a full scan on a background worker and keeps the registry.
//! * **[`layout`]**: turns a device list into grid positions and edge segments.

pub mod discovery;
pub mod layout;
pub mod scanner;
pub mod subnets;
