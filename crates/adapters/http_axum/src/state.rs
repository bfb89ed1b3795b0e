//! Shared application state for axum handlers.

use std::sync::Arc;
use std::time::Duration;

use avdash_app::ports::DeviceControl;
use avdash_app::services::dispatcher::Dispatcher;
use avdash_app::services::roster_service::RosterService;

/// Dashboard behaviour knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Seconds between automatic page reloads.
    pub refresh_seconds: u64,
    /// How long a single-device reboot control stays disabled.
    pub device_busy: Duration,
    /// How long the reboot-all control stays disabled.
    pub bulk_busy: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            refresh_seconds: 120,
            device_busy: Duration::from_secs(2),
            bulk_busy: Duration::from_secs(3),
        }
    }
}

/// Application state shared across all axum handlers.
///
/// Generic over the device control adapter to avoid dynamic dispatch.
/// `Clone` is implemented manually so the adapter itself does not need to be
/// `Clone`: only the `Arc` wrappers are cloned.
pub struct AppState<C> {
    /// Reboot and status-check use-cases.
    pub dispatcher: Arc<Dispatcher<C>>,
    /// In-memory roster with merged statuses.
    pub roster_service: Arc<RosterService<C>>,
    /// Dashboard timings.
    pub settings: DashboardSettings,
}

impl<C> Clone for AppState<C> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            roster_service: Arc::clone(&self.roster_service),
            settings: self.settings,
        }
    }
}

impl<C> AppState<C>
where
    C: DeviceControl + Send + Sync + 'static,
{
    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// The roster service is usually shared with the background status
    /// poller before the HTTP state is built.
    pub fn new(
        dispatcher: Arc<Dispatcher<C>>,
        roster_service: Arc<RosterService<C>>,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            dispatcher,
            roster_service,
            settings,
        }
    }
}
