//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use avdash_app::ports::DeviceControl;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// `/` serves the dashboard on `GET` and the action endpoint on `POST`.
/// API routes are nested under `/api` and the remaining dashboard pages are
/// merged at the root. Includes a [`TraceLayer`] that logs each HTTP
/// request/response at the `DEBUG` level.
pub fn build<C>(state: AppState<C>) -> Router
where
    C: DeviceControl + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route(
            "/",
            get(crate::dashboard::home::index::<C>).post(crate::api::actions::dispatch::<C>),
        )
        .nest("/api", crate::api::routes())
        .merge(crate::dashboard::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::test_support::{StubControl, body_text, test_state};

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let app = build(test_state(Arc::new(StubControl::default())));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "OK");
    }

    #[tokio::test]
    async fn should_not_perform_action_on_get() {
        let control = Arc::new(StubControl::default());
        let app = build(test_state(Arc::clone(&control)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/?action=reboot_all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(control.reboots().is_empty());
    }
}
