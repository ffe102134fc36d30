//! Webhook event dispatch and reply formatting.

pub mod dispatcher;
pub mod reply;

pub use dispatcher::{Dispatch, QUERY_PREFIX, WebhookDispatcher};
pub use reply::{NOT_FOUND, ReplyFormatter};
