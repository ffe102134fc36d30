//! Infrastructure for lessonline: HTTP clients for the LINE Messaging API
//! and the lesson-record service, webhook signature checks, and config
//! loading.

pub mod config;
pub mod http;
pub mod line;
pub mod records;

#[cfg(test)]
pub(crate) mod testing;
