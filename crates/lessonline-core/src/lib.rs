//! Core logic for lessonline.
//!
//! Holds the ephemeral correlation layer (expiring store, sweeper, fragment
//! correlator), the periodic scheduling facility, the webhook dispatcher and
//! the collaborator traits (ports) that `lessonline-infra` implements. This
//! crate depends only on `lessonline-types` -- never on HTTP clients.

pub mod cache;
pub mod collaborator;
pub mod correlate;
pub mod dispatch;
pub mod schedule;
