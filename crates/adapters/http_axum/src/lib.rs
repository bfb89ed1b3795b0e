//! # avdash-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **action endpoint** (`POST /`, form-encoded `action=…`) that
//!   reboots one device, reboots all devices, or checks every device's status
//! - Serve a small **JSON read API** (`/api/devices`, `/api/summary`)
//! - Serve a **server-side-rendered HTML dashboard** that works with
//!   **zero JavaScript**: tabs and search are links and GET forms, reboots
//!   go through confirmation pages, `<meta http-equiv="refresh">` keeps the
//!   status badges current
//! - Map application results into HTTP responses (JSON or HTML)
//!
//! ## Dependency rule
//! Depends on `avdash-app` (for the port trait and services) and
//! `avdash-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod api;
pub mod dashboard;
pub mod error;
pub mod params;
pub mod router;
pub mod state;

#[cfg(test)]
mod test_support;
