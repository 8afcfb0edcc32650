#![cfg(test)]
use std::io;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use netviz_common::config::ScanConfig;
use netviz_common::error::DiscoveryError;
use netviz_core::discovery::{DiscoveryService, ScanEvent};
use netviz_core::scanner::ArpProber;
use pnet::datalink::dummy;
use pnet::packet::arp::{ArpHardwareTypes, ArpOperations, MutableArpPacket};
use pnet::packet::ethernet::{EtherTypes, MutableEthernetPacket};
use pnet::util::MacAddr;

use crate::utils::*;

fn service(source: impl netviz_core::subnets::SubnetSource + 'static, lan: FakeLan) -> DiscoveryService {
    DiscoveryService::new(Arc::new(source), Arc::new(lan), ScanConfig::default())
}

#[tokio::test]
async fn scan_reports_every_attached_subnet() {
    let table = InterfaceTable(vec![
        iface("lo", 1, &["127.0.0.1/8"], IFF_UP | IFF_LOOPBACK),
        iface("enp9s0", 2, &["192.168.0.32/24"], IFF_UP | IFF_BROADCAST),
        iface("docker0", 3, &["172.17.0.1/16"], IFF_UP | IFF_BROADCAST),
    ]);
    let lan = FakeLan::default().answering(
        "192.168.0.0/24",
        vec![device("192.168.0.1"), device("192.168.0.77"), device("10.9.9.9")],
    );
    let service = service(table, lan);

    let events = service.scan_all().unwrap().collect().await;

    let finished: Vec<String> = events
        .iter()
        .filter(|e| matches!(e, ScanEvent::SubnetFinished { .. }))
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        finished,
        vec![
            "Network: 192.168.0.0/24, Devices: 2",
            "Network: 172.17.0.0/16, Devices: 0",
        ]
    );

    let registry = service.registry().snapshot();
    assert_eq!(registry.len(), 2);
    for entry in registry.entries() {
        assert!(entry.devices().iter().all(|d| entry.subnet().contains(d.ip)));
    }
    let lan = registry.get(&"192.168.0.0/24".parse().unwrap()).unwrap();
    assert_eq!(lan.devices(), &[device("192.168.0.1"), device("192.168.0.77")]);
}

#[tokio::test]
async fn device_counts_run_per_subnet() {
    let source = ChangingSource::new(vec![subnet("10.0.0.5/24", "eth0"), subnet("10.0.1.5/24", "eth1")]);
    let lan = FakeLan::default()
        .answering("10.0.0.0/24", vec![device("10.0.0.1"), device("10.0.0.2")])
        .answering("10.0.1.0/24", vec![device("10.0.1.1")]);
    let service = service(source, lan);

    let counts: Vec<usize> = service
        .scan_all()
        .unwrap()
        .collect()
        .await
        .into_iter()
        .filter_map(|e| match e {
            ScanEvent::DeviceFound { count, .. } => Some(count),
            _ => None,
        })
        .collect();
    assert_eq!(counts, vec![1, 2, 1]);
}

#[tokio::test]
async fn failed_subnet_does_not_stop_the_scan() {
    let source = ChangingSource::new(vec![subnet("10.0.0.5/24", "tun0"), subnet("10.0.1.5/24", "eth1")]);
    let lan = FakeLan::default()
        .broken("10.0.0.0/24")
        .answering("10.0.1.0/24", vec![device("10.0.1.1")]);
    let service = service(source, lan);

    let events = service.scan_all().unwrap().collect().await;

    assert!(events.iter().any(|e| matches!(
        e,
        ScanEvent::SubnetFailed { subnet, reason }
            if subnet.to_string() == "10.0.0.0/24" && reason.contains("tun0")
    )));
    assert!(matches!(
        events.last(),
        Some(ScanEvent::Completed { subnets: 1, devices: 1, .. })
    ));
    let registry = service.registry().snapshot();
    assert!(registry.get(&"10.0.0.0/24".parse().unwrap()).is_none());
}

#[tokio::test]
async fn rescan_replaces_the_registry() {
    let source = Arc::new(ChangingSource::new(vec![subnet("10.0.0.5/24", "eth0")]));
    let lan = FakeLan::default()
        .answering("10.0.0.0/24", vec![device("10.0.0.1")])
        .answering("192.168.5.0/24", vec![device("192.168.5.9")]);
    let service = DiscoveryService::new(source.clone(), Arc::new(lan), ScanConfig::default());

    service.scan_all().unwrap().collect().await;
    let first = service.registry().snapshot();
    assert_eq!(first.len(), 1);

    source.replace(vec![subnet("192.168.5.20/24", "wlan0")]);
    service.scan_all().unwrap().collect().await;
    let second = service.registry().snapshot();

    assert_eq!(second.len(), 1);
    assert!(second.get(&"10.0.0.0/24".parse().unwrap()).is_none());
    assert_eq!(second.device_count(), 1);
    // earlier snapshots stay intact
    assert!(first.get(&"10.0.0.0/24".parse().unwrap()).is_some());
}

#[tokio::test]
async fn registry_is_reset_when_a_scan_starts() {
    let (gated, release) = GatedProber::new();
    let service = DiscoveryService::new(
        Arc::new(ChangingSource::new(vec![subnet("10.0.0.5/24", "eth0")])),
        Arc::new(gated),
        ScanConfig::default(),
    );
    release.send(()).unwrap();
    service.scan_all().unwrap().collect().await;
    assert_eq!(service.registry().snapshot().len(), 1);

    let mut handle = service.scan_all().unwrap();
    // SubnetStarted is emitted after the reset and before the probe blocks
    while let Some(event) = handle.next_event().await {
        if matches!(event, ScanEvent::SubnetStarted { .. }) {
            break;
        }
    }
    assert!(service.registry().snapshot().is_empty());
    release.send(()).unwrap();
    handle.collect().await;
    assert_eq!(service.registry().snapshot().len(), 1);
}

#[tokio::test]
async fn overlapping_scan_is_rejected() {
    let (gated, release) = GatedProber::new();
    let service = DiscoveryService::new(
        Arc::new(ChangingSource::new(vec![subnet("10.0.0.5/24", "eth0")])),
        Arc::new(gated),
        ScanConfig::default(),
    );

    let handle = service.scan_all().unwrap();
    assert!(matches!(service.scan_all(), Err(DiscoveryError::ScanInProgress)));

    release.send(()).unwrap();
    handle.collect().await;
    release.send(()).unwrap();
    assert!(service.scan_all().is_ok());
}

#[tokio::test]
async fn no_subnets_reports_nothing_found() {
    let table = InterfaceTable(vec![iface("lo", 1, &["127.0.0.1/8"], IFF_UP | IFF_LOOPBACK)]);
    let service = service(table, FakeLan::default());
    let events = service.scan_all().unwrap().collect().await;
    assert_eq!(events[0].to_string(), "No subnets found.");
    assert_eq!(events.len(), 2);
}

fn arp_reply(sender_mac: MacAddr, sender_ip: &str) -> Box<[u8]> {
    let mut buffer = vec![0u8; 42];
    {
        let mut eth = MutableEthernetPacket::new(&mut buffer).unwrap();
        eth.set_destination(MacAddr::new(0x52, 0x54, 0x00, 0x00, 0x00, 0x02));
        eth.set_source(sender_mac);
        eth.set_ethertype(EtherTypes::Arp);
    }
    {
        let mut arp = MutableArpPacket::new(&mut buffer[14..]).unwrap();
        arp.set_hardware_type(ArpHardwareTypes::Ethernet);
        arp.set_protocol_type(EtherTypes::Ipv4);
        arp.set_hw_addr_len(6);
        arp.set_proto_addr_len(4);
        arp.set_operation(ArpOperations::Reply);
        arp.set_sender_hw_addr(sender_mac);
        arp.set_sender_proto_addr(sender_ip.parse().unwrap());
        arp.set_target_hw_addr(MacAddr::new(0x52, 0x54, 0x00, 0x00, 0x00, 0x02));
        arp.set_target_proto_addr("192.168.7.20".parse().unwrap());
    }
    buffer.into_boxed_slice()
}

#[tokio::test]
async fn arp_prober_feeds_the_registry() {
    let mut channel_cfg = dummy::Config::default();
    let inject = channel_cfg.inject_handle().unwrap();
    let _sent = channel_cfg.read_handle().unwrap();
    let slot = Mutex::new(Some(channel_cfg));

    let cfg = ScanConfig {
        probe_timeout: Duration::from_secs(2),
        max_hosts: 8,
        ..ScanConfig::default()
    };
    let prober = ArpProber::with_opener(cfg.clone(), move |intf, _| {
        let channel_cfg = slot
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| io::Error::other("channel opened twice"))?;
        dummy::channel(intf, channel_cfg)
    });
    let service = DiscoveryService::new(
        Arc::new(ChangingSource::new(vec![subnet("192.168.7.20/24", "eth0")])),
        Arc::new(prober),
        cfg,
    );

    let gateway = MacAddr::new(0x00, 0x11, 0x22, 0x33, 0x44, 0x55);
    let feeder = thread::spawn(move || {
        inject.send(Ok(arp_reply(gateway, "192.168.7.1"))).unwrap();
        inject.send(Ok(arp_reply(gateway, "192.168.7.1"))).unwrap();
        inject
            .send(Err(io::Error::new(io::ErrorKind::BrokenPipe, "link down")))
            .unwrap();
    });

    let events = service.scan_all().unwrap().collect().await;
    feeder.join().unwrap();

    assert!(events.iter().any(|e| e.to_string() == "192.168.7.1      00:11:22:33:44:55"));
    let registry = service.registry().snapshot();
    assert_eq!(registry.device_count(), 1);
}
