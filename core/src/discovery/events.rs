use std::fmt;
use std::time::Duration;

use netviz_common::network::device::Device;
use netviz_common::network::subnet::Subnet;

const BANNER: &str = "*****************************";

/// Progress reported by a running scan, in the order it happens.
///
/// The `Display` form of each event is the progress line shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    Started {
        subnets: Vec<Subnet>,
    },
    SubnetStarted {
        subnet: Subnet,
    },
    ProbeCompleted {
        subnet: Subnet,
        replies: usize,
    },
    DeviceFound {
        subnet: Subnet,
        device: Device,
        count: usize,
    },
    SubnetFinished {
        subnet: Subnet,
        devices: usize,
    },
    SubnetFailed {
        subnet: Subnet,
        reason: String,
    },
    Completed {
        elapsed: Duration,
        subnets: usize,
        devices: usize,
    },
}

impl ScanEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanEvent::Completed { .. })
    }
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanEvent::Started { subnets } if subnets.is_empty() => write!(f, "No subnets found."),
            ScanEvent::Started { subnets } => write!(f, "Found {} subnet(s)", subnets.len()),
            ScanEvent::SubnetStarted { subnet } => write!(f, "Scanning network: {subnet}"),
            ScanEvent::ProbeCompleted { .. } => write!(f, "[*] IP Address      MAC Address"),
            ScanEvent::DeviceFound { device, .. } => write!(f, "{device}"),
            ScanEvent::SubnetFinished { subnet, devices } => {
                write!(f, "Network: {subnet}, Devices: {devices}")
            }
            ScanEvent::SubnetFailed { subnet, reason } => {
                write!(f, "Scanning {subnet} failed: {reason}")
            }
            ScanEvent::Completed { elapsed, .. } => write!(
                f,
                "{BANNER}\nDone Scanning The Network!\nScanning Time: {:.2} seconds\n{BANNER}",
                elapsed.as_secs_f64()
            ),
        }
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
