//! Roster: the authoritative device list with its views and search.
//!
//! The roster is built once from configuration, mutated only by status
//! merges, and never persisted.

use std::collections::HashSet;
use std::net::IpAddr;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::device::{Device, DeviceKind, DeviceStatus, Location};
use crate::dispatch::StatusReport;
use crate::error::{AvDashError, ValidationError};

/// Base subset selected by the active tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    All,
    Transmitters,
    Receivers,
    Location(Location),
}

impl View {
    /// Tab key used in URLs.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Transmitters => "tx",
            Self::Receivers => "rx",
            Self::Location(location) => location.as_str(),
        }
    }

    /// Parse a tab key, falling back to [`View::All`] for anything unknown.
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key {
            "tx" => Self::Transmitters,
            "rx" => Self::Receivers,
            other => Location::from_str(other).map_or(Self::All, Self::Location),
        }
    }

    #[must_use]
    pub fn includes(self, device: &Device) -> bool {
        match self {
            Self::All => true,
            Self::Transmitters => device.kind == DeviceKind::Tx,
            Self::Receivers => device.kind == DeviceKind::Rx,
            Self::Location(location) => device.location == location,
        }
    }
}

/// Tab selection plus free-text search, combined as a conjunction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterQuery {
    pub view: View,
    search: String,
}

impl RosterQuery {
    #[must_use]
    pub fn new(view: View, search: &str) -> Self {
        Self {
            view,
            search: search.to_lowercase(),
        }
    }

    /// Lower-cased search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn matches(&self, device: &Device) -> bool {
        self.view.includes(device) && (self.search.is_empty() || device.matches_search(&self.search))
    }
}

/// Headline counters shown above the device grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterSummary {
    pub total: usize,
    pub transmitters: usize,
    pub receivers: usize,
    pub online: usize,
}

/// Ordered, address-keyed device list.
#[derive(Debug, Clone)]
pub struct Roster {
    devices: Vec<Device>,
    last_checked: Option<DateTime<Utc>>,
}

impl Roster {
    /// Build a roster, enforcing non-emptiness, valid entries and unique
    /// addresses.
    ///
    /// # Errors
    ///
    /// Returns [`AvDashError::Validation`] on the first violated invariant.
    pub fn new(devices: Vec<Device>) -> Result<Self, AvDashError> {
        if devices.is_empty() {
            return Err(ValidationError::EmptyRoster.into());
        }
        let mut seen = HashSet::with_capacity(devices.len());
        for device in &devices {
            device.validate()?;
            if !seen.insert(device.ip) {
                return Err(ValidationError::DuplicateAddress(device.ip).into());
            }
        }
        Ok(Self {
            devices,
            last_checked: None,
        })
    }

    #[must_use]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Addresses in roster order, which is also the dispatch order.
    #[must_use]
    pub fn addresses(&self) -> Vec<IpAddr> {
        self.devices.iter().map(|d| d.ip).collect()
    }

    #[must_use]
    pub fn get(&self, ip: IpAddr) -> Option<&Device> {
        self.devices.iter().find(|d| d.ip == ip)
    }

    #[must_use]
    pub fn last_checked(&self) -> Option<DateTime<Utc>> {
        self.last_checked
    }

    /// Devices matching `query`, in roster order.
    #[must_use]
    pub fn filter(&self, query: &RosterQuery) -> Vec<&Device> {
        self.devices.iter().filter(|d| query.matches(d)).collect()
    }

    #[must_use]
    pub fn summary(&self) -> RosterSummary {
        let transmitters = self
            .devices
            .iter()
            .filter(|d| d.kind == DeviceKind::Tx)
            .count();
        RosterSummary {
            total: self.devices.len(),
            transmitters,
            receivers: self.devices.len() - transmitters,
            online: self
                .devices
                .iter()
                .filter(|d| d.status == DeviceStatus::Online)
                .count(),
        }
    }

    /// Merge a status report by address and stamp the check time.
    ///
    /// Addresses the roster does not know are ignored. Returns how many
    /// devices changed status.
    pub fn apply_statuses(&mut self, report: &StatusReport, checked_at: DateTime<Utc>) -> usize {
        let mut changed = 0;
        for device in &mut self.devices {
            match report.get(device.ip) {
                Some(status) if status != device.status => {
                    device.status = status;
                    changed += 1;
                }
                _ => {}
            }
        }
        self.last_checked = Some(checked_at);
        changed
    }
}
