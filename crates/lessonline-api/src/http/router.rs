//! Axum router configuration with middleware.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use lessonline_core::collaborator::{ContentFetcher, LessonRecords, ReplySender};

use crate::http::handlers;
use crate::state::AppState;

/// Build the router with all routes and middleware.
pub fn build_router<C, R, P>(state: AppState<C, R, P>) -> Router
where
    C: ContentFetcher + 'static,
    R: LessonRecords + 'static,
    P: ReplySender + 'static,
{
    Router::new()
        .route("/line/webhook", post(handlers::webhook::receive_webhook::<C, R, P>))
        .route(
            "/line/delete/lessons/{key}",
            get(handlers::lesson::delete_lesson::<C, R, P>),
        )
        .route("/health", get(handlers::health::health::<C, R, P>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::handlers::lesson::LINE_PREVIEW_AGENT;
    use crate::http::testing::{Fixture, fixture};
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode, header};
    use lessonline_infra::line::{SIGNATURE_HEADER, sign};
    use std::sync::atomic::Ordering;
    use std::time::Duration;
    use tower::ServiceExt;

    const PING: &str = r#"{"destination":"Ubot","events":[]}"#;

    fn message_delivery(user: &str) -> String {
        serde_json::json!({
            "destination": "Ubot",
            "events": [
                {
                    "type": "message",
                    "replyToken": "rt-text",
                    "timestamp": 1,
                    "source": { "type": "user", "userId": user },
                    "message": { "id": "m-1", "type": "text", "text": "present simple" }
                },
                {
                    "type": "message",
                    "replyToken": "rt-image",
                    "timestamp": 2,
                    "source": { "type": "user", "userId": user },
                    "message": { "id": "m-2", "type": "image" }
                }
            ]
        })
        .to_string()
    }

    fn post_webhook(body: impl Into<String>, signature: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/line/webhook")
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(signature) = signature {
            builder = builder.header(SIGNATURE_HEADER, signature);
        }
        builder.body(Body::from(body.into())).unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    async fn wait_for_replies(fx: &Fixture, count: usize) {
        for _ in 0..200 {
            if fx.replies.sent.lock().unwrap().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("timed out waiting for {count} replies");
    }

    #[tokio::test]
    async fn health_reports_pending_halves() {
        let fx = fixture(None);
        fx.state.store.set(
            "update-lesson_message_U1",
            lessonline_types::fragment::Fragment::Text("x".into()),
            lessonline_types::ttl::Ttl::OneHour,
        );
        let app = build_router(fx.state.clone());

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["pending_halves"], 1);
        assert!(json["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn verification_ping_echoes_destination() {
        let fx = fixture(None);
        let app = build_router(fx.state.clone());

        let response = app.oneshot(post_webhook(PING, None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain"
        );
        assert_eq!(&body_bytes(response).await[..], b"Ubot");
    }

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let fx = fixture(None);
        let app = build_router(fx.state.clone());

        let response = app.oneshot(post_webhook("{not json", None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["errors"][0]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn signature_is_enforced_when_secret_configured() {
        let fx = fixture(Some("channel-secret"));
        let app = build_router(fx.state.clone());

        let missing = app.clone().oneshot(post_webhook(PING, None)).await.unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let forged = sign(b"wrong-secret", PING.as_bytes()).unwrap();
        let wrong = app
            .clone()
            .oneshot(post_webhook(PING, Some(&forged)))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        let valid = sign(b"channel-secret", PING.as_bytes()).unwrap();
        let ok = app.oneshot(post_webhook(PING, Some(&valid))).await.unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn message_delivery_is_processed_in_background() {
        let fx = fixture(None);
        fx.content
            .images
            .lock()
            .unwrap()
            .insert("m-2".to_string(), Bytes::from_static(b"cover"));
        let app = build_router(fx.state.clone());

        let response = app.oneshot(post_webhook(message_delivery("U1"), None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        wait_for_replies(&fx, 1).await;
        let created = fx.records.created.lock().unwrap().clone();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].text, "present simple");
        let sent = fx.replies.sent.lock().unwrap().clone();
        assert_eq!(sent[0].0, "rt-image");
        assert!(sent[0].1.contains("https://bot.example.com/line/delete/lessons/abc"));
        assert!(fx.state.store.is_empty());
    }

    #[tokio::test]
    async fn delete_link_deletes_lesson() {
        let fx = fixture(None);
        let app = build_router(fx.state.clone());

        let response = app
            .oneshot(
                Request::get("/line/delete/lessons/abc")
                    .header(header::USER_AGENT, "Mozilla/5.0")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(*fx.records.deleted.lock().unwrap(), vec!["abc".to_string()]);
    }

    #[tokio::test]
    async fn link_preview_does_not_delete() {
        let fx = fixture(None);
        let app = build_router(fx.state.clone());

        let response = app
            .oneshot(
                Request::get("/line/delete/lessons/abc")
                    .header(header::USER_AGENT, LINE_PREVIEW_AGENT)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(fx.records.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_failure_maps_to_bad_gateway() {
        let fx = fixture(None);
        fx.records.fail_delete.store(true, Ordering::SeqCst);
        let app = build_router(fx.state.clone());

        let response = app
            .oneshot(Request::get("/line/delete/lessons/abc").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["errors"][0]["code"], "UPSTREAM_ERROR");
    }
}
