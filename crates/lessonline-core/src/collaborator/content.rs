//! Message content download.

use bytes::Bytes;
use lessonline_types::error::CollaboratorError;

/// Fetches the binary content (image bytes) attached to a chat message.
pub trait ContentFetcher: Send + Sync {
    /// Download the content of message `message_id`.
    fn fetch_content(
        &self,
        message_id: &str,
    ) -> impl std::future::Future<Output = Result<Bytes, CollaboratorError>> + Send;
}
