//! JSON handler modules.

pub mod actions;
#[allow(clippy::missing_errors_doc)]
pub mod devices;

use axum::Router;
use axum::routing::get;

use avdash_app::ports::DeviceControl;

use crate::state::AppState;

/// Build the `/api` sub-router.
///
/// The action endpoint itself lives at `/` and is mounted by the top-level
/// router next to the dashboard page.
pub fn routes<C>() -> Router<AppState<C>>
where
    C: DeviceControl + Send + Sync + 'static,
{
    Router::new()
        .route("/devices", get(devices::list::<C>))
        .route("/devices/{ip}", get(devices::get::<C>))
        .route("/summary", get(devices::summary::<C>))
}
