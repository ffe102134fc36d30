//! Shared domain types for lessonline.
//!
//! Fragments and their TTLs, LINE webhook payloads, lesson records,
//! configuration and the error enums shared across crates.
//!
//! Zero infrastructure dependencies -- only serde, chrono, bytes, thiserror.

pub mod config;
pub mod error;
pub mod fragment;
pub mod lesson;
pub mod line;
pub mod ttl;
