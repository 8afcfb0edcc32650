use colored::*;
use indicatif::ProgressStyle;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICKS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

fn style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(TICKS)
}

/// A span that shows a spinner for as long as it is alive.
pub fn scan_span() -> Span {
    let span = info_span!("netviz_scan", indicatif.pb_show = true);
    span.pb_set_style(&style());
    span.pb_set_message("Enumerating subnets...");
    span
}

pub fn report_subnet(span: &Span, subnet: &str) {
    let msg = format!("Scanning {}", subnet.color(colors::PRIMARY).bold());
    span.pb_set_message(&msg);
}

pub fn report_discovery_progress(span: &Span, count: usize) {
    let msg = format!(
        "Identified {} so far...",
        format!("{count} hosts").green().bold()
    )
    .color(colors::TEXT_DEFAULT)
    .to_string();
    span.pb_set_message(&msg);
}
