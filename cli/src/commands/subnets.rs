use netviz_common::config::Config;
use netviz_common::network::subnet::Subnet;
use netviz_core::subnets;

use crate::nprint;
use crate::terminal::{format, print};

pub fn list(cfg: &Config) {
    let found: Vec<Subnet> = subnets::discover_subnets();
    if found.is_empty() {
        print::header("no subnets found", cfg.quiet);
        print::no_results();
        return;
    }

    print::header("attached subnets", cfg.quiet);
    for (idx, subnet) in found.iter().enumerate() {
        print::tree_head(idx, &subnet.link().interface);
        print::as_tree_one_level(format::subnet_details(subnet));
        if idx + 1 != found.len() {
            nprint!();
        }
    }
}
