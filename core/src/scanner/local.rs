//! A **local area network (LAN)** prober.
//!
//! Sweeps a directly attached subnet with broadcast ARP requests and records
//! every reply that arrives before the deadline.
//!
//! This prober requires **root privileges** to construct and intercept raw
//! Layer 2 packets via the operating system's network sockets.

use std::collections::HashSet;
use std::io;
use std::time::{Duration, Instant};

use pnet::datalink::{self, DataLinkReceiver, DataLinkSender, MacAddr, NetworkInterface};
use tracing::{debug, trace, warn};

use netviz_common::config::ScanConfig;
use netviz_common::error::DiscoveryError;
use netviz_common::network::device::Device;
use netviz_common::network::interface;
use netviz_common::network::subnet::Subnet;

use super::{Prober, arp, channel};

type ChannelOpener =
    dyn Fn(&NetworkInterface, datalink::Config) -> io::Result<datalink::Channel> + Send + Sync;

pub struct ArpProber {
    cfg: ScanConfig,
    opener: Box<ChannelOpener>,
}

impl Prober for ArpProber {
    fn probe(&self, subnet: &Subnet, timeout: Duration) -> Result<Vec<Device>, DiscoveryError> {
        let deadline = Instant::now() + timeout;
        let link = subnet.link();
        let src_mac: MacAddr = link
            .mac
            .ok_or_else(|| DiscoveryError::NoHardwareAddress(link.interface.clone()))?;

        let intf: NetworkInterface = interface::to_interface(link, &subnet.network());
        let (mut tx, rx) = channel::open_eth_channel(
            &intf,
            channel::get_config(self.cfg.read_timeout),
            |i, cfg| (self.opener)(i, cfg),
        )?;

        let sent = self.send_requests(tx.as_mut(), subnet, src_mac, deadline)?;
        debug!("Sent {sent} ARP requests into {subnet}");

        Ok(self.listen_for_replies(rx, deadline, subnet, src_mac))
    }
}

impl ArpProber {
    pub fn new(cfg: ScanConfig) -> Self {
        Self::with_opener(cfg, datalink::channel)
    }

    /// Uses `opener` instead of the OS datalink layer to get a channel.
    pub fn with_opener<F>(cfg: ScanConfig, opener: F) -> Self
    where
        F: Fn(&NetworkInterface, datalink::Config) -> io::Result<datalink::Channel>
            + Send
            + Sync
            + 'static,
    {
        Self {
            cfg,
            opener: Box::new(opener),
        }
    }

    fn send_requests(
        &self,
        tx: &mut dyn DataLinkSender,
        subnet: &Subnet,
        src_mac: MacAddr,
        deadline: Instant,
    ) -> Result<usize, DiscoveryError> {
        let link = subnet.link();
        let hosts = subnet.hosts();
        if hosts.len() > self.cfg.max_hosts as u64 {
            warn!(
                "{subnet} holds {} addresses, only the first {} are probed",
                hosts.len(),
                self.cfg.max_hosts
            );
        }

        let mut sent: usize = 0;
        for target in hosts
            .to_iter()
            .take(self.cfg.max_hosts)
            .filter(|ip| *ip != link.addr)
        {
            if Instant::now() >= deadline {
                warn!("Probe window on {subnet} closed after {sent} ARP requests, stopping sweep");
                break;
            }

            let frame = arp::create_request(src_mac, link.addr, target).map_err(|e| {
                DiscoveryError::FrameBuild {
                    target,
                    reason: e.to_string(),
                }
            })?;

            let result = tx
                .send_to(&frame, None)
                .unwrap_or_else(|| Err(io::Error::other("no buffer space for frame")));
            result.map_err(|source| DiscoveryError::Transmit {
                interface: link.interface.clone(),
                target,
                source,
            })?;
            sent += 1;
        }
        Ok(sent)
    }

    fn listen_for_replies(
        &self,
        mut rx: Box<dyn DataLinkReceiver>,
        deadline: Instant,
        subnet: &Subnet,
        own_mac: MacAddr,
    ) -> Vec<Device> {
        let mut devices: Vec<Device> = Vec::new();
        let mut seen: HashSet<Device> = HashSet::new();

        while deadline > Instant::now() {
            let frame = match rx.next() {
                Ok(frame) => frame,
                Err(e) if channel::is_idle(&e) => continue,
                Err(e) => {
                    debug!("Receiver on {} closed early: {e}", subnet.link().interface);
                    break;
                }
            };

            let device = match arp::parse_reply(frame) {
                Ok(Some(device)) => device,
                Ok(None) => continue,
                Err(e) => {
                    trace!("Discarding frame: {e}");
                    continue;
                }
            };

            if device.mac == own_mac || !subnet.contains(device.ip) {
                trace!("Ignoring reply from {device}");
                continue;
            }
            if !self.cfg.keep_duplicates && !seen.insert(device) {
                continue;
            }

            debug!("{} is at {}", device.ip, device.mac);
            devices.push(device);
        }

        devices
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
