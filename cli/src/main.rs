mod commands;
mod terminal;
mod view;

use commands::{CommandLine, Commands, about, graph, scan, subnets};
use netviz_common::config::Config;
use netviz_core::discovery::{DiscoveryRegistry, DiscoveryService};
use terminal::{logging, print};
use tracing::warn;
use view::{Nav, View};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init_logging(commands.verbose);

    let cfg: Config = commands.config();
    if commands.command.sends_frames() && !is_root::is_root() {
        warn!("Not running as root, sending raw ARP frames will most likely fail");
    }

    let result = run(commands.command, &cfg).await;
    print::end_of_program();
    result
}

async fn run(command: Commands, cfg: &Config) -> anyhow::Result<()> {
    let registry = match command {
        Commands::Subnets => {
            subnets::list(cfg);
            return Ok(());
        }
        Commands::About => {
            let empty = DiscoveryRegistry::new();
            let view = View::default().navigate(Nav::About, &empty)?;
            return render(view, &empty, cfg);
        }
        Commands::Scan | Commands::Graph { .. } => {
            let service = DiscoveryService::system(cfg.scan.clone());
            scan::scan(&service, cfg).await?
        }
    };

    let home = View::default();
    render(home, &registry, cfg)?;

    if let Commands::Graph { subnet } = command {
        let view = home.navigate(Nav::Graph(subnet), &registry)?;
        render(view, &registry, cfg)?;
    }
    Ok(())
}

fn render(view: View, registry: &DiscoveryRegistry, cfg: &Config) -> anyhow::Result<()> {
    match view {
        View::Home => {
            scan::render_home(registry, cfg);
            Ok(())
        }
        View::About => {
            about::about(cfg.quiet);
            Ok(())
        }
        View::SubnetGraph(network) => graph::render(&network, registry, cfg),
    }
}
