//! Reply delivery.

use lessonline_types::error::CollaboratorError;

/// Sends a text reply to the chat that produced an event.
///
/// Failures are reported but never retried by the caller.
pub trait ReplySender: Send + Sync {
    fn reply(
        &self,
        reply_token: &str,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), CollaboratorError>> + Send;
}
