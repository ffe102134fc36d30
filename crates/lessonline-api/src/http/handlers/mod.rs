//! Route handlers.

pub mod health;
pub mod lesson;
pub mod webhook;
