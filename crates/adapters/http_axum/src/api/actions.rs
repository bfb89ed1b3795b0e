//! The action endpoint: `POST /` with a form-encoded `action` field.
//!
//! | action | fields | body |
//! |--------|--------|------|
//! | `reboot_device` | `device_ip` | `{success, message}` |
//! | `reboot_all` | none | `{success, message, details: {success, failed, failures}}` |
//! | `check_status` | none | `{success, statuses: {ip: "online" \| "offline"}}` |
//! | anything else | none | `{success: false, message: "Invalid action"}` |
//!
//! Every answer is `200 OK`; failures are only signalled through `success`.

use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use avdash_app::ports::DeviceControl;
use avdash_domain::dispatch::{RebootFailure, StatusReport};

use crate::state::AppState;

/// Form fields accepted by the action endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ActionForm {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub device_ip: String,
}

/// `{success, message}`
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub success: bool,
    pub message: String,
}

/// Per-run counters of a bulk reboot.
#[derive(Debug, Serialize)]
pub struct BulkDetails {
    pub success: usize,
    pub failed: usize,
    pub failures: Vec<RebootFailure>,
}

/// `{success, message, details}`
#[derive(Debug, Serialize)]
pub struct BulkBody {
    pub success: bool,
    pub message: String,
    pub details: BulkDetails,
}

/// `{success, statuses}`
#[derive(Debug, Serialize)]
pub struct StatusBody {
    pub success: bool,
    pub statuses: StatusReport,
}

/// Possible responses from the action endpoint.
pub enum ActionResponse {
    RebootDevice(Json<MessageBody>),
    RebootAll(Json<BulkBody>),
    CheckStatus(Json<StatusBody>),
    Invalid(Json<MessageBody>),
}

impl IntoResponse for ActionResponse {
    fn into_response(self) -> Response {
        match self {
            Self::RebootDevice(json) | Self::Invalid(json) => json.into_response(),
            Self::RebootAll(json) => json.into_response(),
            Self::CheckStatus(json) => json.into_response(),
        }
    }
}

/// `POST /`
pub async fn dispatch<C>(
    State(state): State<AppState<C>>,
    form: Result<Form<ActionForm>, FormRejection>,
) -> ActionResponse
where
    C: DeviceControl + Send + Sync + 'static,
{
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable action form");
            ActionForm::default()
        }
    };

    match form.action.as_str() {
        "reboot_device" => {
            let outcome = state.dispatcher.reboot_device(&form.device_ip).await;
            let message = if outcome.is_success() {
                format!("Reboot command sent to {}", form.device_ip)
            } else {
                outcome.error_message()
            };
            ActionResponse::RebootDevice(Json(MessageBody {
                success: outcome.is_success(),
                message,
            }))
        }
        "reboot_all" => {
            let report = state.dispatcher.reboot_all().await;
            ActionResponse::RebootAll(Json(BulkBody {
                success: true,
                message: format!("Reboot completed: {} successful", report.success_count()),
                details: BulkDetails {
                    success: report.success_count(),
                    failed: report.failed_count(),
                    failures: report.failures(),
                },
            }))
        }
        "check_status" => {
            let statuses = state.roster_service.refresh().await;
            ActionResponse::CheckStatus(Json(StatusBody {
                success: true,
                statuses,
            }))
        }
        other => {
            tracing::debug!(action = other, "unknown action");
            ActionResponse::Invalid(Json(MessageBody {
                success: false,
                message: "Invalid action".to_string(),
            }))
        }
    }
}
