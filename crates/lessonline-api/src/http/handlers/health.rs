//! GET /health - liveness probe with the number of pending halves.

use std::time::Instant;

use axum::extract::State;
use serde::Serialize;

use crate::http::response::{ApiMeta, ApiResponse};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
    /// Entries currently held by the fragment store, expired or not.
    pub pending_halves: usize,
}

pub async fn health<C, R, P>(State(state): State<AppState<C, R, P>>) -> ApiResponse<Health>
where
    C: Send + Sync + 'static,
    R: Send + Sync + 'static,
    P: Send + Sync + 'static,
{
    let started = Instant::now();
    let health = Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        pending_halves: state.store.len(),
    };
    ApiResponse::success(health, ApiMeta::since(started))
}
