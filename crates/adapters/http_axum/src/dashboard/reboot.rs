//! Reboot confirmation pages and their form targets.
//!
//! Confirming a reboot fires the command in the background and redirects
//! straight back to the dashboard (PRG), so the page never waits on the
//! throttled bulk run.

use std::sync::Arc;

use askama::Template;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};

use avdash_app::ports::DeviceControl;
use avdash_domain::device::parse_address;

use crate::error::ApiError;
use crate::state::AppState;

/// Single device confirmation page.
#[derive(Template)]
#[template(path = "confirm_reboot.html")]
pub struct ConfirmRebootTemplate {
    name: String,
    ip: String,
    busy: bool,
}

impl IntoResponse for ConfirmRebootTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Bulk confirmation page.
#[derive(Template)]
#[template(path = "confirm_reboot_all.html")]
pub struct ConfirmRebootAllTemplate {
    device_count: usize,
    busy: bool,
}

impl IntoResponse for ConfirmRebootAllTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Possible responses after a reboot form submission.
pub enum RebootResponse {
    /// Redirect back to the dashboard with a notice.
    Redirect(Redirect),
}

impl IntoResponse for RebootResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Redirect(redirect) => redirect.into_response(),
        }
    }
}

/// `GET /devices/{ip}/reboot`: ask before rebooting one device.
pub async fn confirm_device<C>(
    State(state): State<AppState<C>>,
    Path(ip): Path<String>,
) -> Result<ConfirmRebootTemplate, ApiError>
where
    C: DeviceControl + Send + Sync + 'static,
{
    let ip = parse_address(&ip)?;
    let device = state.roster_service.device(ip).await?;

    Ok(ConfirmRebootTemplate {
        name: device.name,
        ip: ip.to_string(),
        busy: state.roster_service.is_device_busy(ip),
    })
}

/// `POST /devices/{ip}/reboot`: fire the reboot and redirect.
///
/// The control stays busy until the reboot finishes plus the configured
/// hold; a submission while it is busy is dropped.
pub async fn reboot_device<C>(
    State(state): State<AppState<C>>,
    Path(ip): Path<String>,
) -> Result<RebootResponse, ApiError>
where
    C: DeviceControl + Send + Sync + 'static,
{
    let ip = parse_address(&ip)?;
    state.roster_service.device(ip).await?;

    if state.roster_service.begin_device_reboot(ip) {
        let dispatcher = Arc::clone(&state.dispatcher);
        let roster_service = Arc::clone(&state.roster_service);
        let hold = state.settings.device_busy;
        tokio::spawn(async move {
            dispatcher.reboot_device(&ip.to_string()).await;
            roster_service.finish_device_reboot(ip, hold);
        });
    } else {
        tracing::debug!(%ip, "reboot already in flight");
    }

    Ok(RebootResponse::Redirect(Redirect::to(&format!(
        "/?notice=device_reboot&ip={ip}"
    ))))
}

/// `GET /reboot-all`: ask before rebooting every device.
pub async fn confirm_all<C>(State(state): State<AppState<C>>) -> ConfirmRebootAllTemplate
where
    C: DeviceControl + Send + Sync + 'static,
{
    ConfirmRebootAllTemplate {
        device_count: state.dispatcher.addresses().len(),
        busy: state.roster_service.is_bulk_busy(),
    }
}

/// `POST /reboot-all`: fire the bulk reboot and redirect.
///
/// Only one bulk run is dispatched at a time.
pub async fn reboot_all<C>(State(state): State<AppState<C>>) -> RebootResponse
where
    C: DeviceControl + Send + Sync + 'static,
{
    if state.roster_service.begin_bulk_reboot() {
        let dispatcher = Arc::clone(&state.dispatcher);
        let roster_service = Arc::clone(&state.roster_service);
        let hold = state.settings.bulk_busy;
        tokio::spawn(async move {
            dispatcher.reboot_all().await;
            roster_service.finish_bulk_reboot(hold);
        });
    } else {
        tracing::debug!("bulk reboot already in flight");
    }

    RebootResponse::Redirect(Redirect::to("/?notice=bulk_reboot"))
}
