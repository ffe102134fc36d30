//! Pairing of text and image fragments per session.

pub mod correlator;
pub mod key;

pub use correlator::{Correlation, FragmentCorrelator};
pub use key::{UPDATE_LESSON, correlation_key, is_valid_purpose};
