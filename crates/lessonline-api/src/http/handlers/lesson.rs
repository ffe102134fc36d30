//! GET /line/delete/lessons/{key} - delete link sent in lesson replies.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};

use lessonline_core::collaborator::{ContentFetcher, LessonRecords, ReplySender};

use crate::http::error::AppError;
use crate::state::AppState;

/// User agent of LINE's link-preview crawler. It fetches every link posted
/// in a chat, so its requests must not delete anything.
pub const LINE_PREVIEW_AGENT: &str = "facebookexternalhit/1.1;line-poker/1.0";

pub async fn delete_lesson<C, R, P>(
    State(state): State<AppState<C, R, P>>,
    Path(key): Path<String>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError>
where
    C: ContentFetcher + 'static,
    R: LessonRecords + 'static,
    P: ReplySender + 'static,
{
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    if user_agent == Some(LINE_PREVIEW_AGENT) {
        tracing::debug!(%key, "ignoring link preview request");
        return Ok(StatusCode::NO_CONTENT);
    }

    state.dispatcher.records().delete(&key).await?;
    tracing::info!(%key, "lesson deleted via link");
    Ok(StatusCode::NO_CONTENT)
}
