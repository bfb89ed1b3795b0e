//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`AvDashError`]
//! via `#[from]` when crossing a port boundary.

use std::net::IpAddr;

/// Base error type shared by the domain and application layers.
#[derive(Debug, thiserror::Error)]
pub enum AvDashError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A looked-up item does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The given text is not a well-formed IP address.
    #[error("Invalid IP address")]
    InvalidAddress(String),

    /// A device was declared without a display name.
    #[error("device name must not be empty")]
    EmptyName,

    /// Two roster entries share the same address.
    #[error("duplicate device address {0}")]
    DuplicateAddress(IpAddr),

    /// The roster contains no device at all.
    #[error("device roster must not be empty")]
    EmptyRoster,
}

/// A lookup by key found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of item looked up (e.g. `"Device"`).
    pub entity: &'static str,
    /// Key used for the lookup.
    pub id: String,
}
