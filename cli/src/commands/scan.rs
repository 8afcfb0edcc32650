use std::sync::Arc;

use tracing::{Instrument, Span, warn};

use netviz_common::config::Config;
use netviz_core::discovery::{DiscoveryRegistry, DiscoveryService, ScanEvent};

use crate::nprint;
use crate::terminal::{format, print, spinner};

/// Runs one scan, streaming progress lines under a spinner, and returns the
/// registry it produced.
pub async fn scan(service: &DiscoveryService, cfg: &Config) -> anyhow::Result<Arc<DiscoveryRegistry>> {
    let span = spinner::scan_span();
    let mut handle = service.scan_all()?;

    let completed: Option<ScanEvent> = async {
        let mut completed = None;
        while let Some(event) = handle.next_event().await {
            report(&Span::current(), &event, cfg);
            if event.is_terminal() {
                completed = Some(event);
            }
        }
        completed
    }
    .instrument(span)
    .await;

    match completed {
        Some(summary) => print_summary(&summary, cfg),
        None => warn!("Scan worker stopped before finishing"),
    }
    Ok(service.registry().snapshot())
}

fn report(span: &Span, event: &ScanEvent, cfg: &Config) {
    match event {
        ScanEvent::Started { subnets } if subnets.is_empty() => warn!("{event}"),
        ScanEvent::SubnetStarted { subnet } => {
            spinner::report_subnet(span, &subnet.to_string());
            if cfg.quiet == 0 {
                print::print(&event.to_string());
            }
        }
        ScanEvent::ProbeCompleted { .. } => {
            if cfg.quiet == 0 {
                print::print(&event.to_string());
            }
        }
        ScanEvent::DeviceFound { count, .. } => {
            spinner::report_discovery_progress(span, *count);
            if cfg.quiet < 2 {
                print::print(&event.to_string());
            }
        }
        // failures are logged by the worker
        _ => {}
    }
}

fn print_summary(summary: &ScanEvent, cfg: &Config) {
    nprint!();
    match cfg.quiet {
        0 => summary.to_string().lines().for_each(print::centerln),
        _ => {
            if let ScanEvent::Completed { elapsed, devices, .. } = summary {
                print::print_status(format!(
                    "Done: {devices} device(s) in {:.2} seconds",
                    elapsed.as_secs_f64()
                ));
            }
        }
    }
}

/// The home view: one entry per scanned subnet, numbered for `graph`.
pub fn render_home(registry: &DiscoveryRegistry, cfg: &Config) {
    if registry.is_empty() {
        print::header("no subnets found", cfg.quiet);
        print::no_results();
        return;
    }

    print::header("scanned subnets", cfg.quiet);
    for (idx, entry) in registry.entries().iter().enumerate() {
        print::print_status(format!(
            "[{idx}] {}",
            format::subnet_entry(entry.subnet(), entry.devices().len())
        ));
    }
}
