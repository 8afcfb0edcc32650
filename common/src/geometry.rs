use std::fmt;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Direction from `self` to `other` in radians, `None` if both coincide.
    pub fn angle_to(&self, other: &Point) -> Option<f64> {
        let (dx, dy) = (other.x - self.x, other.y - self.y);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(dy.atan2(dx))
    }

    /// Moves `distance` units along `angle`.
    pub fn offset(&self, angle: f64, distance: f64) -> Point {
        Point::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// One directed line of the connection graph.
///
/// `start` sits on the boundary of the `from` node, `end` on the boundary of
/// the `to` node; the arrow head belongs at `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSegment {
    pub from: Ipv4Addr,
    pub to: Ipv4Addr,
    pub start: Point,
    pub end: Point,
}

impl EdgeSegment {
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
            start: self.end,
            end: self.start,
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
