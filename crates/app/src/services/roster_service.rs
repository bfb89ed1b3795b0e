//! Roster service: the operator's view of the fleet.
//!
//! Holds the in-memory [`Roster`], merges status checks into it, and tracks
//! which reboot controls are busy. A control is busy while its reboot is in
//! flight and for a short hold after it finishes.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use avdash_domain::device::Device;
use avdash_domain::dispatch::StatusReport;
use avdash_domain::error::{AvDashError, NotFoundError};
use avdash_domain::roster::{Roster, RosterQuery, RosterSummary};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::ports::DeviceControl;
use crate::services::dispatcher::Dispatcher;

/// A filtered slice of the roster, ready to render.
#[derive(Debug, Clone)]
pub struct RosterView {
    pub devices: Vec<Device>,
    pub summary: RosterSummary,
    pub last_checked: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy)]
enum Busy {
    InFlight,
    Until(Instant),
}

impl Busy {
    fn is_active(self, now: Instant) -> bool {
        match self {
            Self::InFlight => true,
            Self::Until(deadline) => deadline > now,
        }
    }
}

#[derive(Debug, Default)]
struct BusyMarks {
    devices: HashMap<IpAddr, Busy>,
    bulk: Option<Busy>,
}

/// Application service owning the roster.
pub struct RosterService<C> {
    roster: RwLock<Roster>,
    dispatcher: Arc<Dispatcher<C>>,
    busy: Mutex<BusyMarks>,
}

impl<C: DeviceControl + Send + Sync> RosterService<C> {
    /// Create a service over `roster`, refreshing statuses through `dispatcher`.
    pub fn new(roster: Roster, dispatcher: Arc<Dispatcher<C>>) -> Self {
        Self {
            roster: RwLock::new(roster),
            dispatcher,
            busy: Mutex::new(BusyMarks::default()),
        }
    }

    /// Devices matching `query` plus fleet-wide counters.
    pub async fn view(&self, query: &RosterQuery) -> RosterView {
        let roster = self.roster.read().await;
        RosterView {
            devices: roster.filter(query).into_iter().cloned().collect(),
            summary: roster.summary(),
            last_checked: roster.last_checked(),
        }
    }

    pub async fn summary(&self) -> (RosterSummary, Option<DateTime<Utc>>) {
        let roster = self.roster.read().await;
        (roster.summary(), roster.last_checked())
    }

    /// Look up a device by address.
    ///
    /// # Errors
    ///
    /// Returns [`AvDashError::NotFound`] when `ip` is not in the roster.
    pub async fn device(&self, ip: IpAddr) -> Result<Device, AvDashError> {
        self.roster.read().await.get(ip).cloned().ok_or_else(|| {
            NotFoundError {
                entity: "Device",
                id: ip.to_string(),
            }
            .into()
        })
    }

    /// Run a status check now and merge it into the roster.
    ///
    /// The roster lock is not held while probing; concurrent refreshes are
    /// allowed and the last one to finish wins.
    #[tracing::instrument(skip(self))]
    pub async fn refresh(&self) -> StatusReport {
        let report = self.dispatcher.check_status().await;
        let changed = self
            .roster
            .write()
            .await
            .apply_statuses(&report, Utc::now());
        tracing::info!(
            online = report.online_count(),
            probed = report.len(),
            changed,
            "device statuses refreshed"
        );
        report
    }

    /// Claim the reboot control of `ip` for a run about to start.
    ///
    /// Returns `false` when the control is already busy; the caller must not
    /// dispatch in that case.
    pub fn begin_device_reboot(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut busy = self.marks();
        if busy.devices.get(&ip).is_some_and(|mark| mark.is_active(now)) {
            return false;
        }
        busy.devices.insert(ip, Busy::InFlight);
        true
    }

    /// Release the reboot control of `ip` once `hold` has elapsed from now.
    pub fn finish_device_reboot(&self, ip: IpAddr, hold: Duration) {
        self.marks()
            .devices
            .insert(ip, Busy::Until(Instant::now() + hold));
    }

    /// Claim the reboot-all control for a run about to start.
    ///
    /// Returns `false` when a bulk run is in flight or still on hold.
    pub fn begin_bulk_reboot(&self) -> bool {
        let now = Instant::now();
        let mut busy = self.marks();
        if busy.bulk.is_some_and(|mark| mark.is_active(now)) {
            return false;
        }
        busy.bulk = Some(Busy::InFlight);
        true
    }

    /// Release the reboot-all control once `hold` has elapsed from now.
    pub fn finish_bulk_reboot(&self, hold: Duration) {
        self.marks().bulk = Some(Busy::Until(Instant::now() + hold));
    }

    #[must_use]
    pub fn is_device_busy(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut busy = self.marks();
        busy.devices.retain(|_, mark| mark.is_active(now));
        busy.devices.contains_key(&ip)
    }

    #[must_use]
    pub fn is_bulk_busy(&self) -> bool {
        let now = Instant::now();
        self.marks().bulk.is_some_and(|mark| mark.is_active(now))
    }

    // The marks stay consistent across a panic: every update is one insert.
    fn marks(&self) -> MutexGuard<'_, BusyMarks> {
        self.busy.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("busy marks lock poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}
