//! # avdash-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **port trait** device adapters must implement:
//!   - `DeviceControl`: send a reboot, probe reachability
//! - Define the use-cases:
//!   - `Dispatcher`: reboot one, reboot all (throttled), check status
//!   - `RosterService`: hold the roster, merge status checks, track busy controls
//!   - `status_poller`: periodic background status refresh
//! - Provide `Throttle`, the explicit rate limit between bulk device calls
//!
//! ## Dependency rule
//! Depends on `avdash-domain` only (plus `tokio` for locks and timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod status_poller;
pub mod throttle;

#[cfg(test)]
mod test_support;
