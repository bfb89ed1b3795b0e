//! Command dispatcher: reboots and status probes against the device fleet.
//!
//! All fleet-wide operations walk the configured addresses sequentially, in
//! roster order. Reboots only fail on a malformed target address; transport
//! errors are logged and otherwise absorbed.

use std::net::IpAddr;

use avdash_domain::device::parse_address;
use avdash_domain::dispatch::{BulkRebootReport, RebootOutcome, StatusReport, TransportOutcome};

use crate::ports::DeviceControl;
use crate::throttle::Throttle;

/// Application service issuing device commands.
pub struct Dispatcher<C> {
    control: C,
    addresses: Vec<IpAddr>,
    throttle: Throttle,
}

impl<C: DeviceControl + Send + Sync> Dispatcher<C> {
    /// Create a dispatcher over `addresses`, pausing `throttle` between bulk
    /// reboots.
    pub fn new(control: C, addresses: Vec<IpAddr>, throttle: Throttle) -> Self {
        Self {
            control,
            addresses,
            throttle,
        }
    }

    /// Fleet addresses in dispatch order.
    #[must_use]
    pub fn addresses(&self) -> &[IpAddr] {
        &self.addresses
    }

    /// Reboot the device at `raw`, which is validated first.
    ///
    /// A malformed address is rejected without any network call. Any other
    /// outcome, including timeouts and refused connections, is a success.
    #[tracing::instrument(skip(self))]
    pub async fn reboot_device(&self, raw: &str) -> RebootOutcome {
        match parse_address(raw) {
            Ok(ip) => self.reboot_ip(ip).await,
            Err(error) => {
                tracing::warn!(%error, "rejected reboot target");
                RebootOutcome::Rejected {
                    input: raw.to_string(),
                    error,
                }
            }
        }
    }

    /// Reboot every fleet device in order, throttled.
    #[tracing::instrument(skip(self), fields(count = self.addresses.len()))]
    pub async fn reboot_all(&self) -> BulkRebootReport {
        let outcomes = self
            .throttle
            .run(&self.addresses, |ip| self.reboot_ip(*ip))
            .await;
        let report = BulkRebootReport { outcomes };
        tracing::info!(
            success = report.success_count(),
            failed = report.failed_count(),
            "bulk reboot finished"
        );
        report
    }

    /// Probe every fleet device in order and classify it.
    #[tracing::instrument(skip(self), fields(count = self.addresses.len()))]
    pub async fn check_status(&self) -> StatusReport {
        let mut report = StatusReport::default();
        for &ip in &self.addresses {
            let transport = self.control.probe(ip).await;
            let status = transport.classify();
            tracing::debug!(%ip, %status, ?transport, "probed device");
            report.push(ip, status);
        }
        tracing::debug!(online = report.online_count(), "status check finished");
        report
    }

    async fn reboot_ip(&self, ip: IpAddr) -> RebootOutcome {
        let transport = self.control.send_reboot(ip).await;
        match &transport {
            TransportOutcome::Responded { status } => {
                tracing::debug!(%ip, status, "reboot command answered");
            }
            TransportOutcome::Failed { reason } => {
                tracing::warn!(%ip, %reason, "reboot command got no answer, reporting success");
            }
        }
        RebootOutcome::Sent { ip, transport }
    }
}
