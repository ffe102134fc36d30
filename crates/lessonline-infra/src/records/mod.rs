//! Lesson-record service client.

pub mod http;

pub use http::HttpLessonRecords;
