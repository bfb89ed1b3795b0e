//! Shared fixtures for the router tests.

use std::collections::HashSet;
use std::future::Future;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use avdash_app::ports::DeviceControl;
use avdash_app::services::dispatcher::Dispatcher;
use avdash_app::services::roster_service::RosterService;
use avdash_app::throttle::Throttle;
use avdash_domain::dispatch::TransportOutcome;
use avdash_domain::fleet;
use avdash_domain::roster::Roster;
use axum::response::Response;
use http_body_util::BodyExt;

use crate::state::{AppState, DashboardSettings};

/// Device control double: records reboots, answers probes from a set of
/// offline addresses.
#[derive(Default)]
pub struct StubControl {
    unreachable: bool,
    reboots: Mutex<Vec<IpAddr>>,
    offline: Mutex<HashSet<IpAddr>>,
}

impl StubControl {
    /// Every call fails at the transport level.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn set_offline(&self, ip: IpAddr) {
        self.offline.lock().unwrap().insert(ip);
    }

    pub fn reboots(&self) -> Vec<IpAddr> {
        self.reboots.lock().unwrap().clone()
    }

    fn answer(&self, ip: IpAddr) -> TransportOutcome {
        if self.unreachable || self.offline.lock().unwrap().contains(&ip) {
            TransportOutcome::Failed {
                reason: "connection refused".to_string(),
            }
        } else {
            TransportOutcome::Responded { status: 200 }
        }
    }
}

impl DeviceControl for StubControl {
    fn send_reboot(&self, ip: IpAddr) -> impl Future<Output = TransportOutcome> + Send {
        self.reboots.lock().unwrap().push(ip);
        let outcome = self.answer(ip);
        async { outcome }
    }

    fn probe(&self, ip: IpAddr) -> impl Future<Output = TransportOutcome> + Send {
        let outcome = self.answer(ip);
        async { outcome }
    }
}

/// State over the built-in fleet with the default throttle.
pub fn test_state(control: Arc<StubControl>) -> AppState<Arc<StubControl>> {
    let roster = Roster::new(fleet::builtin()).unwrap();
    let dispatcher = Arc::new(Dispatcher::new(
        control,
        roster.addresses(),
        Throttle::default(),
    ));
    let roster_service = Arc::new(RosterService::new(roster, Arc::clone(&dispatcher)));
    AppState::new(dispatcher, roster_service, DashboardSettings::default())
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
