use std::time::Duration;

use crate::geometry::Point;

/// Settings for a single discovery run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// How long a subnet probe listens for ARP replies.
    pub probe_timeout: Duration,

    /// Read timeout of the link-layer receiver.
    ///
    /// Bounds how far a probe can overshoot `probe_timeout`.
    pub read_timeout: Duration,

    /// Keep every reply, even when the same (IP, MAC) pair answers twice.
    pub keep_duplicates: bool,

    /// Upper bound on ARP requests sent into one subnet.
    pub max_hosts: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            probe_timeout: Duration::from_secs(1),
            read_timeout: Duration::from_millis(50),
            keep_duplicates: false,
            max_hosts: 65_536,
        }
    }
}

/// Grid and node geometry used when a subnet is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Nodes per row.
    pub columns: usize,
    /// Distance between two neighbouring grid cells.
    pub cell_size: f64,
    /// Center of the first cell.
    pub origin: Point,
    /// Radius of a drawn node; edges stop at its boundary.
    pub node_radius: f64,
    /// Vertical distance between a node center and its label.
    pub label_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            cell_size: 200.0,
            origin: Point::new(100.0, 100.0),
            node_radius: 33.0,
            label_offset: 45.0,
        }
    }
}

pub struct Config {
    pub scan: ScanConfig,
    pub layout: LayoutConfig,
    /// 0 prints everything, 1 drops headers, 2 drops per-host output.
    pub quiet: u8,
}
