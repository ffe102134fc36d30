//! Application state shared by the HTTP handlers.
//!
//! The dispatcher is generic over its collaborator ports; [`AppState`]
//! defaults them to the concrete LINE and record-service clients.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use lessonline_core::cache::ExpiringStore;
use lessonline_core::dispatch::{ReplyFormatter, WebhookDispatcher};
use lessonline_infra::line::LineClient;
use lessonline_infra::records::HttpLessonRecords;
use lessonline_types::config::AppConfig;
use lessonline_types::fragment::Fragment;

/// Shared state: the dispatcher, the store it correlates through, and the
/// channel secret used to verify webhook signatures.
pub struct AppState<C = LineClient, R = HttpLessonRecords, P = LineClient> {
    pub dispatcher: Arc<WebhookDispatcher<C, R, P>>,
    pub store: Arc<ExpiringStore<Fragment>>,
    pub channel_secret: Option<Arc<SecretString>>,
}

impl<C, R, P> Clone for AppState<C, R, P> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            store: Arc::clone(&self.store),
            channel_secret: self.channel_secret.clone(),
        }
    }
}

impl AppState {
    /// Wire the concrete clients from configuration.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let line = Arc::new(LineClient::new(&config.line)?);
        let records = Arc::new(HttpLessonRecords::new(&config.records)?);
        let store = Arc::new(ExpiringStore::default());

        if config.line.access_token.is_none() {
            tracing::warn!("no LINE access token configured; images and replies will fail");
        }
        if config.line.channel_secret.is_none() {
            tracing::warn!("no LINE channel secret configured; webhook signatures are not verified");
        }

        let dispatcher = WebhookDispatcher::new(
            Arc::clone(&line),
            records,
            line,
            Arc::clone(&store),
            config.cache.half_ttl,
            ReplyFormatter::new(config.server.link_base(), config.server.utc_offset_minutes),
        );

        let channel_secret = config
            .line
            .channel_secret
            .as_ref()
            .map(|s| SecretString::from(s.expose_secret()));

        Ok(Self::new(Arc::new(dispatcher), store, channel_secret))
    }
}

impl<C, R, P> AppState<C, R, P> {
    pub fn new(
        dispatcher: Arc<WebhookDispatcher<C, R, P>>,
        store: Arc<ExpiringStore<Fragment>>,
        channel_secret: Option<SecretString>,
    ) -> Self {
        Self {
            dispatcher,
            store,
            channel_secret: channel_secret.map(Arc::new),
        }
    }
}
