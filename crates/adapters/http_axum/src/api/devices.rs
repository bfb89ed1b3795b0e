//! JSON read handlers for the roster.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use avdash_app::ports::DeviceControl;
use avdash_domain::device::{Device, parse_address};
use avdash_domain::roster::RosterSummary;

use crate::error::ApiError;
use crate::params::RosterParams;
use crate::state::AppState;

/// Counters plus the time of the last status check.
#[derive(Debug, Serialize)]
pub struct SummaryBody {
    #[serde(flatten)]
    pub summary: RosterSummary,
    pub last_checked: Option<DateTime<Utc>>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/devices?tab=…&q=…`
pub async fn list<C>(
    State(state): State<AppState<C>>,
    Query(params): Query<RosterParams>,
) -> ListResponse
where
    C: DeviceControl + Send + Sync + 'static,
{
    let view = state.roster_service.view(&params.to_query()).await;
    ListResponse::Ok(Json(view.devices))
}

/// `GET /api/devices/{ip}`
pub async fn get<C>(
    State(state): State<AppState<C>>,
    Path(ip): Path<String>,
) -> Result<GetResponse, ApiError>
where
    C: DeviceControl + Send + Sync + 'static,
{
    let ip = parse_address(&ip)?;
    let device = state.roster_service.device(ip).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `GET /api/summary`
pub async fn summary<C>(State(state): State<AppState<C>>) -> Json<SummaryBody>
where
    C: DeviceControl + Send + Sync + 'static,
{
    let (summary, last_checked) = state.roster_service.summary().await;
    Json(SummaryBody {
        summary,
        last_checked,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::router::build;
    use crate::test_support::{StubControl, body_json, test_state};

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let response = build(test_state(Arc::new(StubControl::default())))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    #[tokio::test]
    async fn should_list_whole_roster_by_default() {
        let (status, body) = get_json("/api/devices").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 28);
    }

    #[tokio::test]
    async fn should_filter_by_tab_and_search() {
        let (_, body) = get_json("/api/devices?tab=neoverse&q=verse%203").await;
        let devices = body.as_array().unwrap();
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0]["name"], json!("NeoVerse 3"));
        assert_eq!(devices[0]["type"], json!("rx"));
        assert_eq!(devices[0]["status"], json!("online"));
    }

    #[tokio::test]
    async fn should_return_device_by_address() {
        let (status, body) = get_json("/api/devices/192.168.8.80").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], json!("Wireless Mic TX"));
        assert_eq!(body["id"], json!("TX8"));
    }

    #[tokio::test]
    async fn should_return_404_for_unknown_device() {
        let (status, _) = get_json("/api/devices/10.1.2.3").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_return_400_for_malformed_address() {
        let (status, body) = get_json("/api/devices/not-an-ip").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("Invalid IP address"));
    }

    #[tokio::test]
    async fn should_summarize_roster() {
        let (_, body) = get_json("/api/summary").await;
        assert_eq!(body["total"], json!(28));
        assert_eq!(body["transmitters"], json!(9));
        assert_eq!(body["receivers"], json!(19));
        assert_eq!(body["online"], json!(28));
        assert_eq!(body["last_checked"], json!(null));
    }
}
