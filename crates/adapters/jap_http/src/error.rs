//! Device adapter error types.

/// Errors raised while setting up the device HTTP adapter.
///
/// Per-request failures are not errors: they are reported as
/// `TransportOutcome::Failed`.
#[derive(Debug, thiserror::Error)]
pub enum JapError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build device HTTP client")]
    ClientBuild(#[source] reqwest::Error),
}
