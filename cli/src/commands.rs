pub mod about;
pub mod graph;
pub mod scan;
pub mod subnets;

use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use netviz_common::config::{Config, LayoutConfig, ScanConfig};
use netviz_common::geometry::Point;

use crate::view::SubnetSelector;

#[derive(Parser)]
#[command(name = "netviz")]
#[command(version, about = "Discovers hosts on the attached IPv4 subnets and lays them out as a graph.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Seconds to listen for ARP replies on each subnet
    #[arg(short, long, global = true, default_value = "1", value_parser = parse_timeout)]
    pub timeout: Duration,

    /// Keep every ARP reply, even repeated ones
    #[arg(long, global = true)]
    pub keep_duplicates: bool,

    /// Nodes per row in the graph
    #[arg(long, global = true, default_value_t = 3)]
    pub columns: usize,

    /// Radius of a node; edges stop at its boundary
    #[arg(long, global = true, default_value_t = 33.0)]
    pub radius: f64,

    /// Distance between neighbouring grid cells
    #[arg(long, global = true, default_value_t = 200.0)]
    pub cell_size: f64,

    #[arg(long, global = true, default_value_t = 100.0)]
    pub origin_x: f64,

    #[arg(long, global = true, default_value_t = 100.0)]
    pub origin_y: f64,

    /// Print less (-q drops headers, -qq drops per-host lines)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Print debug logs (-vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the IPv4 subnets this machine is attached to
    #[command(alias = "l")]
    Subnets,
    /// Sweep every attached subnet with ARP
    #[command(alias = "s")]
    Scan,
    /// Sweep, then lay out one subnet as a graph (by CIDR or list index)
    #[command(alias = "g")]
    Graph { subnet: Option<SubnetSelector> },
    /// Show information about netviz
    #[command(alias = "a")]
    About,
}

impl Commands {
    /// Whether the command puts raw frames on the wire.
    pub fn sends_frames(&self) -> bool {
        matches!(self, Commands::Scan | Commands::Graph { .. })
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            scan: ScanConfig {
                probe_timeout: self.timeout,
                keep_duplicates: self.keep_duplicates,
                ..ScanConfig::default()
            },
            layout: LayoutConfig {
                columns: self.columns,
                cell_size: self.cell_size,
                origin: Point::new(self.origin_x, self.origin_y),
                node_radius: self.radius,
                ..LayoutConfig::default()
            },
            quiet: self.quiet,
        }
    }
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid timeout '{s}': {e}"))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
