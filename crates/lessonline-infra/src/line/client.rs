//! LINE Messaging API client.
//!
//! Implements [`ContentFetcher`] (image bytes by message id, served from the
//! data API host) and [`ReplySender`] (reply API). The channel access token
//! is a [`SecretString`] and is only exposed when building the
//! `Authorization` header.

use bytes::Bytes;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use lessonline_core::collaborator::{ContentFetcher, ReplySender};
use lessonline_types::config::LineConfig;
use lessonline_types::error::CollaboratorError;

use crate::http::{DEFAULT_TIMEOUT, build_client, check_status, endpoint, parse_base, transport};

/// Maximum text length of a single LINE text message.
pub const MAX_TEXT_LEN: usize = 5000;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: Vec<TextMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct TextMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Client for the LINE reply and content APIs.
pub struct LineClient {
    client: reqwest::Client,
    access_token: Option<SecretString>,
    api_base: reqwest::Url,
    data_api_base: reqwest::Url,
}

impl LineClient {
    pub fn new(config: &LineConfig) -> Result<Self, CollaboratorError> {
        Ok(Self {
            client: build_client(DEFAULT_TIMEOUT)?,
            access_token: config
                .access_token
                .as_ref()
                .map(|t| SecretString::from(t.expose_secret())),
            api_base: parse_base(&config.api_base)?,
            data_api_base: parse_base(&config.data_api_base)?,
        })
    }

    fn token(&self) -> Result<&str, CollaboratorError> {
        self.access_token
            .as_ref()
            .map(|t| t.expose_secret())
            .ok_or_else(|| CollaboratorError::NotConfigured("LINE access token".to_string()))
    }

    fn content_url(&self, message_id: &str) -> Result<reqwest::Url, CollaboratorError> {
        endpoint(
            &self.data_api_base,
            &["v2", "bot", "message", message_id, "content"],
        )
    }

    fn reply_url(&self) -> Result<reqwest::Url, CollaboratorError> {
        endpoint(&self.api_base, &["v2", "bot", "message", "reply"])
    }
}

impl ContentFetcher for LineClient {
    async fn fetch_content(&self, message_id: &str) -> Result<Bytes, CollaboratorError> {
        let token = self.token()?;
        let response = self
            .client
            .get(self.content_url(message_id)?)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport)?;
        let response = check_status(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CollaboratorError::Decode(format!("failed to read content: {e}")))?;
        tracing::debug!(message_id, size = bytes.len(), "fetched message content");
        Ok(bytes)
    }
}

impl ReplySender for LineClient {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), CollaboratorError> {
        let token = self.token()?;
        let body = ReplyRequest {
            reply_token,
            messages: vec![TextMessage {
                kind: "text",
                text: truncate(text, MAX_TEXT_LEN),
            }],
        };
        let response = self
            .client
            .post(self.reply_url()?)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;
        Ok(())
    }
}

/// Cut `text` to at most `max` characters on a char boundary.
fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
