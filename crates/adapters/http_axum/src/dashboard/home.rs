//! Dashboard home page: summary, tabs, search and device cards.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use avdash_app::ports::DeviceControl;
use avdash_domain::device::{Device, DeviceKind, Location, parse_address};
use avdash_domain::roster::{RosterSummary, View};

use crate::params::RosterParams;
use crate::state::AppState;

/// One-shot banner shown after a redirect (`?notice=…&ip=…`).
#[derive(Debug, Default, Deserialize)]
pub struct NoticeParams {
    #[serde(default)]
    pub notice: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
}

/// A tab in the navigation bar.
pub struct Tab {
    key: &'static str,
    label: &'static str,
    active: bool,
}

/// A device as shown on a card.
pub struct DeviceCard {
    name: String,
    model: String,
    device_id: String,
    ip: String,
    badge: &'static str,
    kind: String,
    status: String,
    web_ui_url: String,
    busy: bool,
}

/// A titled or untitled grid of cards.
pub struct Section {
    title: Option<&'static str>,
    cards: Vec<DeviceCard>,
}

/// Home page template.
#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    refresh_seconds: u64,
    tab: &'static str,
    search: String,
    tabs: Vec<Tab>,
    summary: RosterSummary,
    last_checked: Option<String>,
    notice: Option<String>,
    sections: Vec<Section>,
    empty_message: Option<String>,
    bulk_busy: bool,
}

impl IntoResponse for HomeTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

fn tab_label(view: View) -> &'static str {
    match view {
        View::All => "All Devices",
        View::Transmitters => "Transmitters",
        View::Receivers => "Receivers",
        View::Location(Location::Bowling) => "Bowling",
        View::Location(Location::Neoverse) => "NeoVerse",
        View::Location(Location::Attic) => "Attic",
        View::Location(Location::Other) => "Other",
    }
}

fn tabs(active: View) -> Vec<Tab> {
    [View::All, View::Transmitters, View::Receivers]
        .into_iter()
        .chain(Location::ALL.into_iter().map(View::Location))
        .map(|view| Tab {
            key: view.key(),
            label: tab_label(view),
            active: view == active,
        })
        .collect()
}

/// `GET /`: the device dashboard.
pub async fn index<C>(
    State(state): State<AppState<C>>,
    Query(params): Query<RosterParams>,
    Query(notice): Query<NoticeParams>,
) -> HomeTemplate
where
    C: DeviceControl + Send + Sync + 'static,
{
    let service = &state.roster_service;
    let view = params.view();
    let roster_view = service.view(&params.to_query()).await;

    let card = |device: &Device| DeviceCard {
        name: device.name.clone(),
        model: device.model.clone(),
        device_id: device.device_id.clone(),
        ip: device.ip.to_string(),
        badge: device.kind.badge(),
        kind: device.kind.to_string(),
        status: device.status.to_string(),
        web_ui_url: device.web_ui_url(),
        busy: service.is_device_busy(device.ip),
    };

    let sections = if view == View::All {
        [
            ("Transmitters", DeviceKind::Tx),
            ("Receivers", DeviceKind::Rx),
        ]
        .into_iter()
        .map(|(title, kind)| Section {
            title: Some(title),
            cards: roster_view
                .devices
                .iter()
                .filter(|device| device.kind == kind)
                .map(&card)
                .collect(),
        })
        .collect()
    } else {
        vec![Section {
            title: None,
            cards: roster_view.devices.iter().map(&card).collect(),
        }]
    };

    let empty_message = roster_view.devices.is_empty().then(|| {
        if params.search().is_empty() {
            "No devices found".to_string()
        } else {
            format!("No devices match \"{}\"", params.search())
        }
    });

    let bulk_busy = service.is_bulk_busy();
    let any_busy = bulk_busy || sections.iter().flat_map(|s| &s.cards).any(|c| c.busy);
    // Reload as soon as a busy hold can have expired.
    let refresh_seconds = if any_busy {
        state
            .settings
            .device_busy
            .max(state.settings.bulk_busy)
            .as_secs()
            .max(1)
    } else {
        state.settings.refresh_seconds
    };

    let notice = notice_text(&state, &notice).await;

    HomeTemplate {
        refresh_seconds,
        tab: view.key(),
        search: params.search().to_string(),
        tabs: tabs(view),
        summary: roster_view.summary,
        last_checked: roster_view
            .last_checked
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string()),
        notice,
        sections,
        empty_message,
        bulk_busy,
    }
}

async fn notice_text<C>(state: &AppState<C>, params: &NoticeParams) -> Option<String>
where
    C: DeviceControl + Send + Sync + 'static,
{
    match params.notice.as_deref()? {
        "device_reboot" => {
            let ip = parse_address(params.ip.as_deref()?).ok()?;
            let device = state.roster_service.device(ip).await.ok()?;
            Some(format!("{} reboot command sent", device.name))
        }
        "bulk_reboot" => Some("All devices reboot commands sent".to_string()),
        "refreshed" => Some("Device status refreshed".to_string()),
        _ => None,
    }
}
