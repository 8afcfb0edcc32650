//! Graph layout for one subnet.
//!
//! Devices are placed on a fixed-width grid in list order, and every pair of
//! devices is connected by two directed segments that stop at the node
//! boundaries. Everything here is pure: the same device list always yields
//! the same geometry.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use tracing::warn;

use netviz_common::config::LayoutConfig;
use netviz_common::error::LayoutError;
use netviz_common::geometry::{EdgeSegment, Point};
use netviz_common::network::device::Device;

/// Extra room the scroll region gets past the right and bottom edges.
pub const SCROLL_MARGIN: f64 = 30.0;

/// Center of the grid cell at `index`.
pub fn grid_position(index: usize, cfg: &LayoutConfig) -> Point {
    let columns = cfg.columns.max(1);
    Point::new(
        cfg.origin.x + (index % columns) as f64 * cfg.cell_size,
        cfg.origin.y + (index / columns) as f64 * cfg.cell_size,
    )
}

/// Maps every device address to its grid position.
///
/// When an address appears twice, the later slot wins.
pub fn layout(devices: &[Device], cfg: &LayoutConfig) -> HashMap<Ipv4Addr, Point> {
    devices
        .iter()
        .enumerate()
        .map(|(i, device)| (device.ip, grid_position(i, cfg)))
        .collect()
}

/// The segment from `a` to `b`, with both ends pulled in by `radius`.
pub fn trim(
    a: (Ipv4Addr, Point),
    b: (Ipv4Addr, Point),
    radius: f64,
) -> Result<EdgeSegment, LayoutError> {
    let (from, p1) = a;
    let (to, p2) = b;
    let angle = p1
        .angle_to(&p2)
        .ok_or(LayoutError::DegenerateGeometry { a: from, b: to })?;

    Ok(EdgeSegment {
        from,
        to,
        start: p1.offset(angle, radius),
        end: p2.offset(angle, -radius),
    })
}

/// Two opposite segments for every pair `i < j` of `devices`.
///
/// Pairs sharing a position are skipped with a warning.
pub fn edges(
    devices: &[Device],
    positions: &HashMap<Ipv4Addr, Point>,
    radius: f64,
) -> Result<Vec<EdgeSegment>, LayoutError> {
    let located = devices
        .iter()
        .map(|d| {
            positions
                .get(&d.ip)
                .map(|p| (d.ip, *p))
                .ok_or(LayoutError::MissingPosition(d.ip))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut segments = Vec::with_capacity(located.len().saturating_sub(1) * located.len());
    for (i, a) in located.iter().enumerate() {
        for b in &located[i + 1..] {
            match trim(*a, *b, radius) {
                Ok(segment) => {
                    segments.push(segment);
                    segments.push(segment.reversed());
                }
                Err(e) => warn!("Skipping edge: {e}"),
            }
        }
    }
    Ok(segments)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub device: Device,
    pub center: Point,
    /// Where the IP/MAC caption is drawn, below the node.
    pub label_anchor: Point,
}

/// Everything needed to draw one subnet.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayout {
    pub nodes: Vec<Node>,
    pub edges: Vec<EdgeSegment>,
    node_radius: f64,
}

impl GraphLayout {
    pub fn build(devices: &[Device], cfg: &LayoutConfig) -> Result<Self, LayoutError> {
        let positions = layout(devices, cfg);
        let edges = edges(devices, &positions, cfg.node_radius)?;
        let nodes = devices
            .iter()
            .enumerate()
            .map(|(i, device)| {
                let center = grid_position(i, cfg);
                Node {
                    device: *device,
                    center,
                    label_anchor: Point::new(center.x, center.y + cfg.label_offset),
                }
            })
            .collect();

        Ok(Self {
            nodes,
            edges,
            node_radius: cfg.node_radius,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bounding box of every drawn node and caption, grown by
    /// [`SCROLL_MARGIN`] to the right and bottom. `None` when nothing is drawn.
    pub fn scroll_region(&self) -> Option<(Point, Point)> {
        let r = self.node_radius;
        self.nodes
            .iter()
            .map(|n| {
                let min = Point::new(n.center.x - r, n.center.y - r);
                let max = Point::new(n.center.x + r, (n.center.y + r).max(n.label_anchor.y));
                (min, max)
            })
            .reduce(|(min_a, max_a), (min_b, max_b)| {
                (
                    Point::new(min_a.x.min(min_b.x), min_a.y.min(min_b.y)),
                    Point::new(max_a.x.max(max_b.x), max_a.y.max(max_b.y)),
                )
            })
            .map(|(min, max)| (min, Point::new(max.x + SCROLL_MARGIN, max.y + SCROLL_MARGIN)))
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
