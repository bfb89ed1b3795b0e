//! # avdash-domain
//!
//! Pure domain model for the avdash AV control panel.
//!
//! ## Responsibilities
//! - Foundational types: error conventions
//! - Define **Devices** (Just Add Power transmitters and receivers on the LAN)
//! - Define the **Roster** (the authoritative device list, its views and search)
//! - Define **dispatch outcomes** (reboot results, status classifications)
//! - Ship the built-in **fleet** used when no device list is configured
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod device;
pub mod dispatch;
pub mod fleet;
pub mod roster;
