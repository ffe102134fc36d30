//! In-memory collaborator fakes shared by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use bytes::Bytes;
use lessonline_types::error::CollaboratorError;
use lessonline_types::fragment::CompletedPair;
use lessonline_types::lesson::{BookRef, LessonRecord};

use super::{ContentFetcher, LessonRecords, ReplySender};

pub fn sample_record(key: &str, note: &str) -> LessonRecord {
    LessonRecord {
        key: key.to_string(),
        class_level: 4,
        subject: "Math".to_string(),
        note: note.to_string(),
        created_at: None,
        book: Some(BookRef {
            title: "Fractions Made Easy".to_string(),
            google_drive_url: "https://drive.google.com/drive/u/0/folders/abc".to_string(),
        }),
    }
}

/// Records every pair it is given; can be told to fail.
#[derive(Default)]
pub struct FakeRecords {
    pub created: Mutex<Vec<CompletedPair>>,
    pub deleted: Mutex<Vec<String>>,
    pub latest: Mutex<Option<LessonRecord>>,
    pub queries: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

impl FakeRecords {
    pub fn failing() -> Self {
        let records = Self::default();
        records.fail.store(true, Ordering::SeqCst);
        records
    }

    pub fn created(&self) -> Vec<CompletedPair> {
        self.created.lock().unwrap().clone()
    }
}

impl LessonRecords for FakeRecords {
    async fn create(&self, pair: CompletedPair) -> Result<LessonRecord, CollaboratorError> {
        let note = pair.text.clone();
        let mut created = self.created.lock().unwrap();
        created.push(pair);
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Status {
                status: 500,
                body: "classifier unavailable".to_string(),
            });
        }
        Ok(sample_record(&format!("key{}", created.len()), &note))
    }

    async fn latest(&self, query: &str) -> Result<Option<LessonRecord>, CollaboratorError> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.latest.lock().unwrap().clone())
    }

    async fn delete(&self, key: &str) -> Result<(), CollaboratorError> {
        self.deleted.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

/// Serves preloaded image bytes by message id.
#[derive(Default)]
pub struct FakeContent {
    pub images: Mutex<HashMap<String, Bytes>>,
}

impl FakeContent {
    pub fn with_image(message_id: &str, bytes: &'static [u8]) -> Self {
        let content = Self::default();
        content
            .images
            .lock()
            .unwrap()
            .insert(message_id.to_string(), Bytes::from_static(bytes));
        content
    }
}

impl ContentFetcher for FakeContent {
    async fn fetch_content(&self, message_id: &str) -> Result<Bytes, CollaboratorError> {
        self.images
            .lock()
            .unwrap()
            .get(message_id)
            .cloned()
            .ok_or_else(|| CollaboratorError::Status {
                status: 404,
                body: format!("no content for {message_id}"),
            })
    }
}

/// Collects replies instead of sending them.
#[derive(Default)]
pub struct FakeReplies {
    pub sent: Mutex<Vec<(String, String)>>,
    pub fail: AtomicBool,
}

impl FakeReplies {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl ReplySender for FakeReplies {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), CollaboratorError> {
        self.sent
            .lock()
            .unwrap()
            .push((reply_token.to_string(), text.to_string()));
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollaboratorError::Transport("connection reset".to_string()));
        }
        Ok(())
    }
}
