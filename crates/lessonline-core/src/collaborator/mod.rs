//! Collaborator trait definitions (ports).
//!
//! The dispatcher and correlator reach the outside world only through these
//! traits; `lessonline-infra` provides the HTTP implementations. All use
//! RPITIT (native async fn in traits, Rust 2024 edition).

pub mod content;
pub mod records;
pub mod reply;

#[cfg(test)]
pub(crate) mod testing;

pub use content::ContentFetcher;
pub use records::LessonRecords;
pub use reply::ReplySender;
