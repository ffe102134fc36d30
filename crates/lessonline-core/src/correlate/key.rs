//! Cache keys for pending halves.
//!
//! A key encodes the purpose, the field it holds and the session:
//! `update-lesson_message_U4af4980629` / `update-lesson_image_U4af4980629`.

use lessonline_types::fragment::FragmentKind;

/// Purpose under which lesson-note submissions are correlated.
pub const UPDATE_LESSON: &str = "update-lesson";

/// Build the key holding the `kind` half of `session`'s `purpose` pair.
pub fn correlation_key(purpose: &str, kind: FragmentKind, session: &str) -> String {
    format!("{purpose}_{}_{session}", kind.field())
}

/// A purpose is usable as a key prefix when it cannot be confused with the
/// field separator.
pub fn is_valid_purpose(purpose: &str) -> bool {
    !purpose.is_empty() && !purpose.contains('_')
}
