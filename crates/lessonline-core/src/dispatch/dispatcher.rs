//! Routes LINE webhook events to the lesson query or the correlator.

use std::sync::Arc;

use lessonline_types::error::CollaboratorError;
use lessonline_types::fragment::Fragment;
use lessonline_types::line::{MessageType, WebhookEvent, WebhookRequest};
use lessonline_types::ttl::Ttl;

use super::reply::{NOT_FOUND, ReplyFormatter};
use crate::cache::ExpiringStore;
use crate::collaborator::{ContentFetcher, LessonRecords, ReplySender};
use crate::correlate::{Correlation, FragmentCorrelator};

/// Text messages starting with this prefix ("view") ask for the latest
/// lesson instead of submitting a note.
pub const QUERY_PREFIX: &str = "ดู";

/// Outcome of dispatching one event.
#[derive(Debug)]
pub enum Dispatch {
    /// Not a user message the bot handles.
    Ignored,
    /// A latest-lesson query was answered.
    Query { found: bool },
    /// The event fed a fragment to the correlator.
    Correlated(Correlation),
    /// A collaborator call needed before correlation or querying failed.
    Failed(CollaboratorError),
}

/// Dispatches webhook events to collaborators.
///
/// Generic over the collaborator ports so tests can run it against
/// in-memory fakes.
pub struct WebhookDispatcher<C, R, P> {
    content: Arc<C>,
    records: Arc<R>,
    replies: Arc<P>,
    correlator: FragmentCorrelator<R>,
    formatter: ReplyFormatter,
}

impl<C, R, P> WebhookDispatcher<C, R, P>
where
    C: ContentFetcher,
    R: LessonRecords,
    P: ReplySender,
{
    pub fn new(
        content: Arc<C>,
        records: Arc<R>,
        replies: Arc<P>,
        store: Arc<ExpiringStore<Fragment>>,
        half_ttl: Ttl,
        formatter: ReplyFormatter,
    ) -> Self {
        let correlator = FragmentCorrelator::new(store, Arc::clone(&records), half_ttl);
        Self {
            content,
            records,
            replies,
            correlator,
            formatter,
        }
    }

    pub fn correlator(&self) -> &FragmentCorrelator<R> {
        &self.correlator
    }

    pub fn records(&self) -> &Arc<R> {
        &self.records
    }

    /// Dispatch every event of a delivery, in order.
    pub async fn dispatch_all(&self, request: &WebhookRequest) -> Vec<Dispatch> {
        let mut outcomes = Vec::with_capacity(request.events.len());
        for event in &request.events {
            outcomes.push(self.dispatch(event).await);
        }
        outcomes
    }

    /// Dispatch a single event.
    pub async fn dispatch(&self, event: &WebhookEvent) -> Dispatch {
        if event.event_type != "message" {
            tracing::debug!(event_type = %event.event_type, "ignoring non-message event");
            return Dispatch::Ignored;
        }
        let (Some(user_id), Some(message)) = (event.user_id(), event.message.as_ref()) else {
            tracing::debug!("ignoring message event without user or message");
            return Dispatch::Ignored;
        };
        if event.is_redelivery() {
            tracing::debug!(user_id, message_id = %message.id, "processing redelivered event");
        }

        let fragment = match message.message_type {
            MessageType::Text => {
                let text = message.text.clone().unwrap_or_default();
                if text.starts_with(QUERY_PREFIX) {
                    return self.answer_query(event, &text).await;
                }
                Fragment::Text(text)
            }
            MessageType::Image => match self.content.fetch_content(&message.id).await {
                Ok(bytes) => Fragment::Image(bytes),
                Err(e) => {
                    tracing::error!(user_id, message_id = %message.id, error = %e, "failed to fetch image content");
                    return Dispatch::Failed(e);
                }
            },
            MessageType::Other => {
                tracing::debug!(user_id, "ignoring unsupported message type");
                return Dispatch::Ignored;
            }
        };

        let correlation = self.correlator.submit(user_id, fragment).await;
        if let Correlation::Completed(Ok(record)) = &correlation {
            self.send_reply(event, &self.formatter.recorded(record)).await;
        }
        Dispatch::Correlated(correlation)
    }

    async fn answer_query(&self, event: &WebhookEvent, query: &str) -> Dispatch {
        match self.records.latest(query).await {
            Ok(Some(lesson)) => {
                self.send_reply(event, &self.formatter.latest(&lesson)).await;
                Dispatch::Query { found: true }
            }
            Ok(None) => {
                self.send_reply(event, NOT_FOUND).await;
                Dispatch::Query { found: false }
            }
            Err(e) => {
                tracing::error!(error = %e, "latest lesson lookup failed");
                Dispatch::Failed(e)
            }
        }
    }

    async fn send_reply(&self, event: &WebhookEvent, text: &str) {
        let Some(token) = event.reply_token.as_deref() else {
            tracing::warn!("event has no reply token; reply dropped");
            return;
        };
        if let Err(e) = self.replies.reply(token, text).await {
            tracing::warn!(error = %e, "failed to send reply");
        }
    }
}
