//! In-memory collaborators and state for router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use secrecy::SecretString;

use lessonline_core::cache::ExpiringStore;
use lessonline_core::collaborator::{ContentFetcher, LessonRecords, ReplySender};
use lessonline_core::dispatch::{ReplyFormatter, WebhookDispatcher};
use lessonline_types::error::CollaboratorError;
use lessonline_types::fragment::CompletedPair;
use lessonline_types::lesson::LessonRecord;
use lessonline_types::ttl::Ttl;

use crate::state::AppState;

#[derive(Default)]
pub struct Content {
    pub images: Mutex<HashMap<String, Bytes>>,
}

impl ContentFetcher for Content {
    async fn fetch_content(&self, message_id: &str) -> Result<Bytes, CollaboratorError> {
        self.images
            .lock()
            .unwrap()
            .get(message_id)
            .cloned()
            .ok_or_else(|| CollaboratorError::Status {
                status: 404,
                body: String::new(),
            })
    }
}

#[derive(Default)]
pub struct Records {
    pub created: Mutex<Vec<CompletedPair>>,
    pub deleted: Mutex<Vec<String>>,
    pub fail_delete: AtomicBool,
}

impl LessonRecords for Records {
    async fn create(&self, pair: CompletedPair) -> Result<LessonRecord, CollaboratorError> {
        let note = pair.text.clone();
        self.created.lock().unwrap().push(pair);
        Ok(LessonRecord {
            key: "abc".to_string(),
            class_level: 3,
            subject: "English".to_string(),
            note,
            created_at: None,
            book: None,
        })
    }

    async fn latest(&self, _query: &str) -> Result<Option<LessonRecord>, CollaboratorError> {
        Ok(None)
    }

    async fn delete(&self, key: &str) -> Result<(), CollaboratorError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Transport("connection refused".to_string()));
        }
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct Replies {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl ReplySender for Replies {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), CollaboratorError> {
        self.sent
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.to_string()));
        Ok(())
    }
}

pub struct Fixture {
    pub content: Arc<Content>,
    pub records: Arc<Records>,
    pub replies: Arc<Replies>,
    pub state: AppState<Content, Records, Replies>,
}

pub fn fixture(channel_secret: Option<&str>) -> Fixture {
    let content = Arc::new(Content::default());
    let records = Arc::new(Records::default());
    let replies = Arc::new(Replies::default());
    let store = Arc::new(ExpiringStore::default());
    let dispatcher = WebhookDispatcher::new(
        Arc::clone(&content),
        Arc::clone(&records),
        Arc::clone(&replies),
        Arc::clone(&store),
        Ttl::OneHour,
        ReplyFormatter::new("https://bot.example.com", 420),
    );
    let state = AppState::new(
        Arc::new(dispatcher),
        store,
        channel_secret.map(SecretString::from),
    );
    Fixture {
        content,
        records,
        replies,
        state,
    }
}
