//! Server-side rendered HTML dashboard (no JavaScript).
//!
//! The landing page itself (`GET /`) is mounted by the top-level router
//! because it shares its path with the action endpoint.

pub mod home;
#[allow(clippy::missing_errors_doc)]
pub mod reboot;
pub mod refresh;

use axum::Router;
use axum::routing::{get, post};

use avdash_app::ports::DeviceControl;

use crate::state::AppState;

/// Build the dashboard sub-router for confirmation pages and form targets.
pub fn routes<C>() -> Router<AppState<C>>
where
    C: DeviceControl + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/devices/{ip}/reboot",
            get(reboot::confirm_device::<C>).post(reboot::reboot_device::<C>),
        )
        .route(
            "/reboot-all",
            get(reboot::confirm_all::<C>).post(reboot::reboot_all::<C>),
        )
        .route("/refresh", post(refresh::refresh::<C>))
}
