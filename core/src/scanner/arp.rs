use std::net::Ipv4Addr;

use anyhow::{Context, ensure};
use pnet::datalink::MacAddr;
use pnet::packet::Packet;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, ArpPacket, MutableArpPacket};
use pnet::packet::ethernet::{EtherType, EtherTypes, EthernetPacket, MutableEthernetPacket};

use netviz_common::network::device::Device;

pub const MIN_ETH_FRAME_NO_FCS: usize = 60;
pub const ARP_LEN: usize = 28;
pub const ETH_HDR_LEN: usize = 14;

/// Builds a broadcast Ethernet frame carrying an ARP who-has for `target_addr`.
pub fn create_request(
    src_mac: MacAddr,
    src_addr: Ipv4Addr,
    target_addr: Ipv4Addr,
) -> anyhow::Result<Vec<u8>> {
    let mut buffer = [0u8; MIN_ETH_FRAME_NO_FCS];
    make_header(&mut buffer, src_mac, MacAddr::broadcast(), EtherTypes::Arp)?;
    let mut arp_packet = MutableArpPacket::new(&mut buffer[ETH_HDR_LEN..ETH_HDR_LEN + ARP_LEN])
        .context("failed to create mutable ARP packet")?;
    arp_packet.set_hardware_type(ArpHardwareTypes::Ethernet);
    arp_packet.set_protocol_type(EtherTypes::Ipv4);
    arp_packet.set_hw_addr_len(6);
    arp_packet.set_proto_addr_len(4);
    arp_packet.set_operation(ArpOperations::Request);
    arp_packet.set_sender_hw_addr(src_mac);
    arp_packet.set_target_hw_addr(MacAddr::zero());
    arp_packet.set_sender_proto_addr(src_addr);
    arp_packet.set_target_proto_addr(target_addr);
    Ok(Vec::from(buffer))
}

fn make_header(
    buffer: &mut [u8],
    src_mac: MacAddr,
    dst_mac: MacAddr,
    et: EtherType,
) -> anyhow::Result<()> {
    let mut eth = MutableEthernetPacket::new(&mut buffer[..])
        .context("failed to create mutable Ethernet packet")?;

    eth.set_source(src_mac);
    eth.set_destination(dst_mac);
    eth.set_ethertype(et);

    Ok(())
}

/// Extracts the sender of an ARP reply.
///
/// Returns `Ok(None)` for well-formed ARP traffic that is not a reply and an
/// error for anything that is not ARP over Ethernet/IPv4.
pub fn parse_reply(frame: &[u8]) -> anyhow::Result<Option<Device>> {
    let eth = EthernetPacket::new(frame).context("truncated or invalid Ethernet frame")?;
    let ethertype = eth.get_ethertype();
    ensure!(
        ethertype == EtherTypes::Arp,
        "unsupported ethertype: 0x{:04x}",
        ethertype.0
    );

    let arp_packet = ArpPacket::new(eth.payload()).context(format!(
        "truncated or invalid ARP packet (payload len {})",
        eth.payload().len()
    ))?;
    ensure!(
        arp_packet.get_protocol_type() == EtherTypes::Ipv4
            && arp_packet.get_hw_addr_len() == 6
            && arp_packet.get_proto_addr_len() == 4,
        "ARP packet does not map IPv4 to Ethernet"
    );

    if arp_packet.get_operation() != ArpOperations::Reply {
        return Ok(None);
    }

    Ok(Some(Device::new(
        arp_packet.get_sender_proto_addr(),
        arp_packet.get_sender_hw_addr(),
    )))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
