//! Device control port: the outbound HTTP calls made to AV devices.
//!
//! Implementations never fail: whatever happens on the wire is reported as a
//! [`TransportOutcome`] so the dispatcher can apply its own success policy.

use std::future::Future;
use std::net::IpAddr;

use avdash_domain::dispatch::TransportOutcome;

/// Talks to a single device's control API.
pub trait DeviceControl {
    /// Ask the device at `ip` to reboot. Exactly one outbound request.
    fn send_reboot(&self, ip: IpAddr) -> impl Future<Output = TransportOutcome> + Send;

    /// Check whether anything answers HTTP at `ip`. Exactly one outbound request.
    fn probe(&self, ip: IpAddr) -> impl Future<Output = TransportOutcome> + Send;
}

impl<T: DeviceControl + Send + Sync> DeviceControl for std::sync::Arc<T> {
    fn send_reboot(&self, ip: IpAddr) -> impl Future<Output = TransportOutcome> + Send {
        (**self).send_reboot(ip)
    }

    fn probe(&self, ip: IpAddr) -> impl Future<Output = TransportOutcome> + Send {
        (**self).probe(ip)
    }
}
