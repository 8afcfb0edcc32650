use std::io;
use std::time::Duration;

use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use tracing::debug;

use netviz_common::error::DiscoveryError;

pub(crate) type EthernetHandle = (Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>);

/// Opens a raw Ethernet channel through `channel_opener`.
///
/// The opener is `datalink::channel` in production and a dummy channel in
/// tests.
pub(crate) fn open_eth_channel<F>(
    intf: &NetworkInterface,
    cfg: Config,
    channel_opener: F,
) -> Result<EthernetHandle, DiscoveryError>
where
    F: FnOnce(&NetworkInterface, Config) -> io::Result<datalink::Channel>,
{
    let ch: Channel = channel_opener(intf, cfg).map_err(|source| DiscoveryError::ChannelOpen {
        interface: intf.name.clone(),
        source,
    })?;
    match ch {
        Channel::Ethernet(tx, rx) => {
            debug!("Datalink channel on {} established", intf.name);
            Ok((tx, rx))
        }
        _ => Err(DiscoveryError::NonEthernetChannel(intf.name.clone())),
    }
}

pub(crate) fn get_config(read_timeout: Duration) -> Config {
    Config {
        read_timeout: Some(read_timeout),
        ..Default::default()
    }
}

/// Receive errors that only mean "nothing arrived yet".
pub(crate) fn is_idle(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
