//! Dispatch outcomes: what a reboot or status probe produced.
//!
//! Just Add Power units answer control requests with error-like status codes
//! while still executing them, so a reboot only fails when the target address
//! is rejected locally. The real transport result is kept on the outcome for
//! logging, but never changes the reported success.

use std::net::IpAddr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::device::DeviceStatus;
use crate::error::ValidationError;

/// What happened on the wire for a single outbound device call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportOutcome {
    /// The device answered with an HTTP status code.
    Responded { status: u16 },
    /// No HTTP response: timeout, refused connection, reset, …
    Failed { reason: String },
}

impl TransportOutcome {
    /// Probe classification: any answer with a non-zero status is `online`.
    #[must_use]
    pub fn classify(&self) -> DeviceStatus {
        match self {
            Self::Responded { status } if *status > 0 => DeviceStatus::Online,
            _ => DeviceStatus::Offline,
        }
    }
}

/// Result of asking one device to reboot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebootOutcome {
    /// The command went out. Counted as success whatever the transport says.
    Sent {
        ip: IpAddr,
        transport: TransportOutcome,
    },
    /// The target was rejected before any network call.
    Rejected {
        input: String,
        error: ValidationError,
    },
}

impl RebootOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }

    /// The target as the caller gave it.
    #[must_use]
    pub fn target(&self) -> String {
        match self {
            Self::Sent { ip, .. } => ip.to_string(),
            Self::Rejected { input, .. } => input.clone(),
        }
    }

    /// Error text for the caller; empty on success.
    #[must_use]
    pub fn error_message(&self) -> String {
        match self {
            Self::Sent { .. } => String::new(),
            Self::Rejected { error, .. } => error.to_string(),
        }
    }
}

/// A device that could not be rebooted during a bulk run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RebootFailure {
    pub ip: String,
    pub error: String,
}

/// Aggregate of a reboot-all run, in dispatch order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkRebootReport {
    pub outcomes: Vec<RebootOutcome>,
}

impl BulkRebootReport {
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    #[must_use]
    pub fn failures(&self) -> Vec<RebootFailure> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| RebootFailure {
                ip: o.target(),
                error: o.error_message(),
            })
            .collect()
    }
}

/// One classification per probed address, in probe order.
///
/// Serializes as a JSON object keyed by address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    entries: Vec<(IpAddr, DeviceStatus)>,
}

impl StatusReport {
    pub fn push(&mut self, ip: IpAddr, status: DeviceStatus) {
        self.entries.push((ip, status));
    }

    #[must_use]
    pub fn get(&self, ip: IpAddr) -> Option<DeviceStatus> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == ip)
            .map(|(_, status)| *status)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(IpAddr, DeviceStatus)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn online_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, status)| *status == DeviceStatus::Online)
            .count()
    }
}

impl FromIterator<(IpAddr, DeviceStatus)> for StatusReport {
    fn from_iter<T: IntoIterator<Item = (IpAddr, DeviceStatus)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Serialize for StatusReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (ip, status) in &self.entries {
            map.serialize_entry(&ip.to_string(), status)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(raw: &str) -> IpAddr {
        raw.parse().unwrap()
    }

    #[test]
    fn should_classify_any_status_code_as_online() {
        for status in [200, 301, 404, 500] {
            assert_eq!(
                TransportOutcome::Responded { status }.classify(),
                DeviceStatus::Online
            );
        }
    }

    #[test]
    fn should_classify_zero_status_as_offline() {
        assert_eq!(
            TransportOutcome::Responded { status: 0 }.classify(),
            DeviceStatus::Offline
        );
    }

    #[test]
    fn should_classify_transport_failure_as_offline() {
        let outcome = TransportOutcome::Failed {
            reason: "connection refused".to_string(),
        };
        assert_eq!(outcome.classify(), DeviceStatus::Offline);
    }

    #[test]
    fn should_treat_failed_transport_as_successful_reboot() {
        let outcome = RebootOutcome::Sent {
            ip: ip("192.168.8.25"),
            transport: TransportOutcome::Failed {
                reason: "timed out".to_string(),
            },
        };
        assert!(outcome.is_success());
        assert_eq!(outcome.error_message(), "");
    }

    #[test]
    fn should_count_rejections_as_failures() {
        let report = BulkRebootReport {
            outcomes: vec![
                RebootOutcome::Sent {
                    ip: ip("192.168.8.25"),
                    transport: TransportOutcome::Responded { status: 500 },
                },
                RebootOutcome::Rejected {
                    input: "192.168.8.999".to_string(),
                    error: ValidationError::InvalidAddress("192.168.8.999".to_string()),
                },
            ],
        };
        assert_eq!(report.success_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(
            report.failures(),
            vec![RebootFailure {
                ip: "192.168.8.999".to_string(),
                error: "Invalid IP address".to_string(),
            }]
        );
    }

    #[test]
    fn should_serialize_status_report_as_ordered_object() {
        let report: StatusReport = [
            (ip("192.168.8.25"), DeviceStatus::Online),
            (ip("192.168.8.10"), DeviceStatus::Offline),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"192.168.8.25":"online","192.168.8.10":"offline"}"#
        );
        assert_eq!(report.online_count(), 1);
    }

    #[test]
    fn should_look_up_status_by_address() {
        let mut report = StatusReport::default();
        report.push(ip("192.168.8.25"), DeviceStatus::Offline);
        assert_eq!(report.get(ip("192.168.8.25")), Some(DeviceStatus::Offline));
        assert_eq!(report.get(ip("192.168.8.26")), None);
    }
}
