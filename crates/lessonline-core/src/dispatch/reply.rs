//! Text of the chat replies.

use chrono::{FixedOffset, Offset, Utc};
use lessonline_types::lesson::LessonRecord;

/// Sent when a lookup finds nothing ("this lesson is not in the system").
pub const NOT_FOUND: &str = "ไม่พบบทเรียนนี้ในระบบ";

const DELETE_HINT: &str =
    "หากมีข้อผิดพลาดในการบันทึกการสอน สามารถกดที่ลิงก์นี้เพื่อลบและเขียนใหม่ได้";

/// Formats replies for recorded and looked-up lessons.
#[derive(Debug, Clone)]
pub struct ReplyFormatter {
    link_base: String,
    offset: FixedOffset,
}

impl ReplyFormatter {
    /// `link_base` is the public URL delete links are built on; dates are
    /// rendered at `utc_offset_minutes` east of UTC.
    pub fn new(link_base: impl Into<String>, utc_offset_minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix());
        Self {
            link_base: link_base.into().trim_end_matches('/').to_string(),
            offset,
        }
    }

    pub fn delete_link(&self, key: &str) -> String {
        format!("{}/line/delete/lessons/{key}", self.link_base)
    }

    /// Confirmation for a freshly recorded lesson, with the delete link.
    pub fn recorded(&self, lesson: &LessonRecord) -> String {
        let mut reply = format!(
            "🏫 Class: {}\n✏️ Subject: {}",
            lesson.class_level, lesson.subject
        );
        if let Some(book) = &lesson.book {
            reply.push_str(&format!("\n📗 Book: {}\n{}", book.title, book.google_drive_url));
        }
        reply.push_str(&format!(
            "\n\n⚠️ {DELETE_HINT}: {}",
            self.delete_link(&lesson.key)
        ));
        reply
    }

    /// Full view of the latest lesson, answered to a query.
    pub fn latest(&self, lesson: &LessonRecord) -> String {
        let mut reply = String::new();
        if let Some(created_at) = lesson.created_at {
            let local = created_at.with_timezone(&self.offset);
            reply.push_str(&format!("[{}]\n", local.format("%-m/%-d/%Y, %-I:%M:%S %p")));
        }
        reply.push_str(&format!(
            "🏫 Class: {}\n✏️ Subject: {}\n\n📃 เนื้อหา:\n{}",
            lesson.class_level, lesson.subject, lesson.note
        ));
        if let Some(book) = &lesson.book {
            reply.push_str(&format!("\n\n📗 Book: {}\n{}", book.title, book.google_drive_url));
        }
        reply
    }
}
