use crate::presentation::http::error::HttpError;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;

/// Bounds the whole request. On expiry the handler future, and any store call
/// inside it, is dropped and the client gets the standard JSON 408 body.
pub async fn request_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis(), "request timed out");
            HttpError::request_timeout().into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::util::ServiceExt as _;

    fn router(limit: Duration) -> Router {
        Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_millis(200)).await;
                    "done"
                }),
            )
            .route("/fast", get(|| async { "done" }))
            .layer(middleware::from_fn_with_state(limit, request_timeout))
    }

    #[tokio::test]
    async fn slow_handler_gets_json_408() {
        let resp = router(Duration::from_millis(20))
            .oneshot(
                axum::http::Request::builder()
                    .uri("/slow")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = axum::body::to_bytes(resp.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Request Timeout");
        assert_eq!(body["message"], "request timed out");
    }

    #[tokio::test]
    async fn fast_handler_is_untouched() {
        let resp = router(Duration::from_secs(1))
            .oneshot(
                axum::http::Request::builder()
                    .uri("/fast")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }
}
