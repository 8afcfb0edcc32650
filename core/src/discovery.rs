//! # Network Discovery Service
//!
//! Implements the "scan every attached subnet" use case.
//!
//! A scan runs on one background worker thread:
//! 1. the registry is reset so stale subnets never survive a rescan.
//! 2. the [`SubnetSource`] lists the attached subnets.
//! 3. each subnet is handed to the [`Prober`] in turn, and the registry
//!    snapshot is republished after every subnet.
//!
//! Progress is streamed to the caller as [`ScanEvent`]s.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info_span, trace};

use netviz_common::config::ScanConfig;
use netviz_common::error::DiscoveryError;

use crate::scanner::{ArpProber, Prober};
use crate::subnets::{SubnetSource, SystemInterfaces};

mod events;
mod registry;

pub use events::ScanEvent;
pub use registry::{DiscoveryRegistry, RegistryHandle, SubnetEntry};

pub struct DiscoveryService {
    source: Arc<dyn SubnetSource>,
    prober: Arc<dyn Prober>,
    cfg: ScanConfig,
    registry: RegistryHandle,
    scanning: Arc<AtomicBool>,
}

impl DiscoveryService {
    pub fn new(source: Arc<dyn SubnetSource>, prober: Arc<dyn Prober>, cfg: ScanConfig) -> Self {
        Self {
            source,
            prober,
            cfg,
            registry: RegistryHandle::default(),
            scanning: Arc::new(AtomicBool::new(false)),
        }
    }

    /// A service backed by the OS interface table and raw ARP probing.
    pub fn system(cfg: ScanConfig) -> Self {
        let prober = ArpProber::new(cfg.clone());
        Self::new(Arc::new(SystemInterfaces), Arc::new(prober), cfg)
    }

    pub fn registry(&self) -> RegistryHandle {
        self.registry.clone()
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::Acquire)
    }

    /// Starts a scan of every attached subnet on a background thread.
    ///
    /// Fails with [`DiscoveryError::ScanInProgress`] while another scan from
    /// this service is still running.
    pub fn scan_all(&self) -> Result<ScanHandle, DiscoveryError> {
        if self
            .scanning
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DiscoveryError::ScanInProgress);
        }
        let guard = ScanGuard(Arc::clone(&self.scanning));

        let (tx, rx) = mpsc::unbounded_channel();
        let job = ScanJob {
            source: Arc::clone(&self.source),
            prober: Arc::clone(&self.prober),
            cfg: self.cfg.clone(),
            registry: self.registry.clone(),
            events: tx,
        };

        thread::Builder::new()
            .name("netviz-scan".to_string())
            .spawn(move || {
                job.run();
                // The flag clears before the event channel closes.
                drop(guard);
                drop(job);
            })
            .map_err(DiscoveryError::Worker)?;

        Ok(ScanHandle { events: rx })
    }
}

/// The consumer side of a running scan.
///
/// The event stream ends after [`ScanEvent::Completed`], once the worker has
/// released the service for the next scan.
pub struct ScanHandle {
    events: UnboundedReceiver<ScanEvent>,
}

impl ScanHandle {
    pub async fn next_event(&mut self) -> Option<ScanEvent> {
        self.events.recv().await
    }

    /// Must not be called from inside an async context.
    pub fn blocking_next(&mut self) -> Option<ScanEvent> {
        self.events.blocking_recv()
    }

    /// Drains the stream until the worker finishes.
    pub async fn collect(mut self) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.events.recv().await {
            events.push(event);
        }
        events
    }
}

struct ScanGuard(Arc<AtomicBool>);

impl Drop for ScanGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct ScanJob {
    source: Arc<dyn SubnetSource>,
    prober: Arc<dyn Prober>,
    cfg: ScanConfig,
    registry: RegistryHandle,
    events: UnboundedSender<ScanEvent>,
}

impl ScanJob {
    fn run(&self) {
        let span = info_span!("scan");
        let _enter = span.enter();
        let start = Instant::now();

        self.registry.publish(DiscoveryRegistry::new());
        let subnets = self.source.subnets();
        if subnets.is_empty() {
            debug!("No subnets found");
        }
        self.emit(ScanEvent::Started {
            subnets: subnets.clone(),
        });

        let mut registry = DiscoveryRegistry::new();
        for subnet in subnets {
            debug!("Scanning network: {subnet}");
            self.emit(ScanEvent::SubnetStarted {
                subnet: subnet.clone(),
            });

            let devices = match self.prober.probe(&subnet, self.cfg.probe_timeout) {
                Ok(devices) => devices,
                Err(e) => {
                    error!("Scanning {subnet} failed: {e}");
                    self.emit(ScanEvent::SubnetFailed {
                        subnet,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let entry = SubnetEntry::new(subnet.clone(), devices);
            let found = entry.devices().len();
            self.emit(ScanEvent::ProbeCompleted {
                subnet: subnet.clone(),
                replies: found,
            });
            for (i, device) in entry.devices().iter().enumerate() {
                self.emit(ScanEvent::DeviceFound {
                    subnet: subnet.clone(),
                    device: *device,
                    count: i + 1,
                });
            }

            registry.insert(entry);
            self.registry.publish(registry.clone());
            debug!("Published registry with {} subnet(s)", registry.len());
            self.emit(ScanEvent::SubnetFinished {
                subnet,
                devices: found,
            });
        }

        let elapsed = start.elapsed();
        debug!(
            "Scan finished in {:.2}s: {} device(s) across {} subnet(s)",
            elapsed.as_secs_f64(),
            registry.device_count(),
            registry.len()
        );
        self.emit(ScanEvent::Completed {
            elapsed,
            subnets: registry.len(),
            devices: registry.device_count(),
        });
    }

    fn emit(&self, event: ScanEvent) {
        if self.events.send(event).is_err() {
            trace!("Scan events dropped, consumer went away");
        }
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
