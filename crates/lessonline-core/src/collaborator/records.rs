//! Lesson-record service trait.

use lessonline_types::error::CollaboratorError;
use lessonline_types::fragment::CompletedPair;
use lessonline_types::lesson::LessonRecord;

/// Creates, looks up and deletes lesson records.
///
/// Classification of the note text (class level, subject) and matching the
/// cover photo to a book happen behind this trait.
pub trait LessonRecords: Send + Sync {
    /// Turn a completed text/image pair into a stored lesson record.
    ///
    /// Called exactly once per completed pair.
    fn create(
        &self,
        pair: CompletedPair,
    ) -> impl std::future::Future<Output = Result<LessonRecord, CollaboratorError>> + Send;

    /// Most recent lesson matching a free-text query ("view math class 4").
    fn latest(
        &self,
        query: &str,
    ) -> impl std::future::Future<Output = Result<Option<LessonRecord>, CollaboratorError>> + Send;

    /// Delete the lesson with the given key. Deleting an unknown key is not
    /// an error.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), CollaboratorError>> + Send;
}
