//! Manual status refresh.

use axum::extract::State;
use axum::response::Redirect;

use avdash_app::ports::DeviceControl;

use crate::state::AppState;

/// `POST /refresh`: probe every device now, then redirect with a notice.
pub async fn refresh<C>(State(state): State<AppState<C>>) -> Redirect
where
    C: DeviceControl + Send + Sync + 'static,
{
    state.roster_service.refresh().await;
    Redirect::to("/?notice=refreshed")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::router::build;
    use crate::test_support::{StubControl, body_json, test_state};

    #[tokio::test]
    async fn should_merge_statuses_and_redirect() {
        let control = Arc::new(StubControl::default());
        control.set_offline("192.168.8.70".parse().unwrap());
        control.set_offline("192.168.8.81".parse().unwrap());
        let state = test_state(Arc::clone(&control));

        let response = build(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/?notice=refreshed");

        let summary = build(state)
            .oneshot(
                Request::builder()
                    .uri("/api/summary")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = body_json(summary).await;
        assert_eq!(body["online"], 26);
        assert!(body["last_checked"].is_string());
    }
}
