use colored::*;

use crate::terminal::{colors, print};

pub fn about(q_level: u8) {
    print::header("about the tool", q_level);
    print::print_status(format!(
        "{} {}",
        env!("CARGO_PKG_NAME").color(colors::PRIMARY).bold(),
        env!("CARGO_PKG_VERSION").color(colors::ACCENT)
    ));
    print::print_status(env!("CARGO_PKG_DESCRIPTION"));
}
