//! # avdashd
//!
//! Composition root that wires the device adapter and the HTTP adapter
//! together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Build the roster from the configured devices or the built-in fleet
//! - Construct the device adapter and inject it into the application
//!   services via the [`DeviceControl`] port
//! - Start the background status poller
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

pub mod config;

use std::sync::Arc;

use avdash_adapter_http_axum::state::{AppState, DashboardSettings};
use avdash_app::ports::DeviceControl;
use avdash_app::services::dispatcher::Dispatcher;
use avdash_app::services::roster_service::RosterService;
use avdash_app::throttle::Throttle;
use avdash_domain::roster::Roster;

/// Wire the application services around `control`.
///
/// Returns the HTTP state; its roster service is shared with whoever
/// spawns the status poller.
pub fn wire<C>(
    control: C,
    roster: Roster,
    throttle: Throttle,
    settings: DashboardSettings,
) -> AppState<C>
where
    C: DeviceControl + Send + Sync + 'static,
{
    let dispatcher = Arc::new(Dispatcher::new(control, roster.addresses(), throttle));
    let roster_service = Arc::new(RosterService::new(roster, Arc::clone(&dispatcher)));
    AppState::new(dispatcher, roster_service, settings)
}
