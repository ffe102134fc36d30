//! HTTP layer: the LINE webhook, the delete link target and a health probe.
//!
//! Errors and JSON payloads use the `{data, meta, errors}` envelope.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

#[cfg(test)]
mod testing;
