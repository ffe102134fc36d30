//! POST /line/webhook - LINE Messaging API webhook receiver.
//!
//! Verifies the body signature when a channel secret is configured, answers
//! LINE's verification ping (no events) with the destination, and otherwise
//! hands the events to the dispatcher on a background task and returns
//! `204` straight away.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use secrecy::ExposeSecret;

use lessonline_core::collaborator::{ContentFetcher, LessonRecords, ReplySender};
use lessonline_core::dispatch::Dispatch;
use lessonline_infra::line::{SIGNATURE_HEADER, verify_signature};
use lessonline_types::line::WebhookRequest;

use crate::http::error::AppError;
use crate::state::AppState;

pub async fn receive_webhook<C, R, P>(
    State(state): State<AppState<C, R, P>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError>
where
    C: ContentFetcher + 'static,
    R: LessonRecords + 'static,
    P: ReplySender + 'static,
{
    if let Some(secret) = &state.channel_secret {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok());
        verify_signature(secret.expose_secret().as_bytes(), &body, signature)?;
    }

    let request: WebhookRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("invalid webhook body: {e}")))?;

    if request.events.is_empty() {
        tracing::info!(destination = %request.destination, "webhook verification ping");
        return Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain")],
            request.destination,
        )
            .into_response());
    }

    tracing::debug!(events = request.events.len(), "webhook delivery accepted");

    let dispatcher = Arc::clone(&state.dispatcher);
    tokio::spawn(async move {
        let outcomes = dispatcher.dispatch_all(&request).await;
        let failed = outcomes
            .iter()
            .filter(|o| matches!(o, Dispatch::Failed(_)))
            .count();
        tracing::debug!(events = outcomes.len(), failed, "webhook delivery processed");
    });

    Ok(StatusCode::NO_CONTENT.into_response())
}
