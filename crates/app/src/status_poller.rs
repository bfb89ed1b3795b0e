//! Periodic background status refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::ports::DeviceControl;
use crate::services::roster_service::RosterService;

/// Spawn a task that refreshes the roster immediately and then every `every`.
///
/// The task runs until aborted through the returned handle.
pub fn spawn<C>(service: Arc<RosterService<C>>, every: Duration) -> JoinHandle<()>
where
    C: DeviceControl + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            service.refresh().await;
        }
    })
}

#[cfg(test)]
mod tests {
    use avdash_domain::fleet;
    use avdash_domain::roster::Roster;

    use super::*;
    use crate::services::dispatcher::Dispatcher;
    use crate::test_support::{CallKind, RecordingControl};
    use crate::throttle::Throttle;

    #[tokio::test(start_paused = true)]
    async fn should_refresh_on_start_and_every_interval() {
        let control = Arc::new(RecordingControl::default());
        let roster = Roster::new(fleet::builtin()).unwrap();
        let dispatcher = Arc::new(Dispatcher::new(
            Arc::clone(&control),
            roster.addresses(),
            Throttle::default(),
        ));
        let service = Arc::new(RosterService::new(roster, dispatcher));

        let handle = spawn(Arc::clone(&service), Duration::from_secs(120));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(control.targets(CallKind::Probe).len(), 28);
        assert!(service.summary().await.1.is_some());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(control.targets(CallKind::Probe).len(), 56);

        handle.abort();
    }
}
