//! LINE Messaging API: outbound client and webhook signature checks.

pub mod client;
pub mod signature;

pub use client::LineClient;
pub use signature::{SIGNATURE_HEADER, SignatureError, sign, verify_signature};
