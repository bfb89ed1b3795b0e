//! In-memory [`DeviceControl`] used by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::net::IpAddr;
use std::sync::Mutex;

use avdash_domain::dispatch::TransportOutcome;
use tokio::time::Instant;

use crate::ports::DeviceControl;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Reboot,
    Probe,
}

/// Records every call and answers from a per-address script.
///
/// Addresses without a scripted answer respond with HTTP 200.
#[derive(Default)]
pub struct RecordingControl {
    calls: Mutex<Vec<(CallKind, IpAddr, Instant)>>,
    answers: Mutex<HashMap<IpAddr, TransportOutcome>>,
}

impl RecordingControl {
    pub fn answer(&self, ip: IpAddr, outcome: TransportOutcome) {
        self.answers.lock().unwrap().insert(ip, outcome);
    }

    pub fn calls(&self) -> Vec<(CallKind, IpAddr, Instant)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn targets(&self, kind: CallKind) -> Vec<IpAddr> {
        self.calls()
            .into_iter()
            .filter(|(k, _, _)| *k == kind)
            .map(|(_, ip, _)| ip)
            .collect()
    }

    fn record(&self, kind: CallKind, ip: IpAddr) -> TransportOutcome {
        self.calls.lock().unwrap().push((kind, ip, Instant::now()));
        self.answers
            .lock()
            .unwrap()
            .get(&ip)
            .cloned()
            .unwrap_or(TransportOutcome::Responded { status: 200 })
    }
}

impl DeviceControl for RecordingControl {
    fn send_reboot(&self, ip: IpAddr) -> impl Future<Output = TransportOutcome> + Send {
        let outcome = self.record(CallKind::Reboot, ip);
        async { outcome }
    }

    fn probe(&self, ip: IpAddr) -> impl Future<Output = TransportOutcome> + Send {
        let outcome = self.record(CallKind::Probe, ip);
        async { outcome }
    }
}

pub fn ip(raw: &str) -> IpAddr {
    raw.parse().unwrap()
}
