//! Lesson records returned by the lesson-record service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded lesson: what was taught, to which class, from which book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    /// Opaque key used to build the delete link.
    pub key: String,
    pub class_level: u8,
    pub subject: String,
    pub note: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub book: Option<BookRef>,
}

/// The textbook matched from the submitted cover photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRef {
    pub title: String,
    pub google_drive_url: String,
}
