//! Message fragments and the pair they assemble into.
//!
//! A lesson submission arrives as two independent LINE messages: the note
//! text and a photo of the book. Each one is a [`Fragment`]; once both halves
//! are known they become a [`CompletedPair`].

use bytes::Bytes;

/// The two kinds of fragment the correlator pairs together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentKind {
    Text,
    Image,
}

impl FragmentKind {
    /// The kind this one pairs with.
    pub fn counterpart(self) -> Self {
        match self {
            FragmentKind::Text => FragmentKind::Image,
            FragmentKind::Image => FragmentKind::Text,
        }
    }

    /// Field label used when building cache keys.
    pub fn field(self) -> &'static str {
        match self {
            FragmentKind::Text => "message",
            FragmentKind::Image => "image",
        }
    }
}

impl std::fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FragmentKind::Text => write!(f, "text"),
            FragmentKind::Image => write!(f, "image"),
        }
    }
}

/// One half of a two-part submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Image(Bytes),
}

impl Fragment {
    pub fn kind(&self) -> FragmentKind {
        match self {
            Fragment::Text(_) => FragmentKind::Text,
            Fragment::Image(_) => FragmentKind::Image,
        }
    }

    /// Payload size in bytes, for logging without exposing content.
    pub fn len(&self) -> usize {
        match self {
            Fragment::Text(text) => text.len(),
            Fragment::Image(image) => image.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Combine this fragment with its stored counterpart.
    ///
    /// When both fragments are of the same kind there is nothing to pair and
    /// `self` is handed back; the counterpart is dropped.
    pub fn pair_with(self, counterpart: Fragment) -> Result<CompletedPair, Fragment> {
        match (self, counterpart) {
            (Fragment::Text(text), Fragment::Image(image))
            | (Fragment::Image(image), Fragment::Text(text)) => Ok(CompletedPair { text, image }),
            (fragment, _) => Err(fragment),
        }
    }
}

/// Text and image of one submission, handed to the record service and
/// then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedPair {
    pub text: String,
    pub image: Bytes,
}
