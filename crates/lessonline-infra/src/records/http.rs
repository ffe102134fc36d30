//! HTTP client for the lesson-record service.
//!
//! The service classifies the note (class level, subject), matches the cover
//! photo to a book and stores the lesson. Endpoints:
//!
//! - `POST   /lessons`          `{note, image_base64}` -> `LessonRecord`
//! - `GET    /lessons/latest?q` -> `LessonRecord` or `404`
//! - `DELETE /lessons/{key}`    -> `2xx`, `404` tolerated

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use lessonline_core::collaborator::LessonRecords;
use lessonline_types::config::RecordsConfig;
use lessonline_types::error::CollaboratorError;
use lessonline_types::fragment::CompletedPair;
use lessonline_types::lesson::LessonRecord;

use crate::http::{DEFAULT_TIMEOUT, build_client, check_status, endpoint, parse_base, transport};

#[derive(Debug, Serialize)]
struct CreateLesson<'a> {
    note: &'a str,
    image_base64: String,
}

impl<'a> CreateLesson<'a> {
    fn from_pair(pair: &'a CompletedPair) -> Self {
        Self {
            note: &pair.text,
            image_base64: STANDARD.encode(&pair.image),
        }
    }
}

pub struct HttpLessonRecords {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpLessonRecords {
    pub fn new(config: &RecordsConfig) -> Result<Self, CollaboratorError> {
        Ok(Self {
            client: build_client(DEFAULT_TIMEOUT)?,
            base_url: parse_base(&config.base_url)?,
        })
    }

    fn url(&self, segments: &[&str]) -> Result<reqwest::Url, CollaboratorError> {
        endpoint(&self.base_url, segments)
    }
}

async fn decode_record(response: reqwest::Response) -> Result<LessonRecord, CollaboratorError> {
    response
        .json::<LessonRecord>()
        .await
        .map_err(|e| CollaboratorError::Decode(format!("failed to parse lesson record: {e}")))
}

impl LessonRecords for HttpLessonRecords {
    async fn create(&self, pair: CompletedPair) -> Result<LessonRecord, CollaboratorError> {
        let body = CreateLesson::from_pair(&pair);
        let response = self
            .client
            .post(self.url(&["lessons"])?)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        decode_record(check_status(response).await?).await
    }

    async fn latest(&self, query: &str) -> Result<Option<LessonRecord>, CollaboratorError> {
        let response = self
            .client
            .get(self.url(&["lessons", "latest"])?)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(transport)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode_record(check_status(response).await?).await.map(Some)
    }

    async fn delete(&self, key: &str) -> Result<(), CollaboratorError> {
        let response = self
            .client
            .delete(self.url(&["lessons", key])?)
            .send()
            .await
            .map_err(transport)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(key, "lesson already gone");
            return Ok(());
        }
        check_status(response).await?;
        Ok(())
    }
}
