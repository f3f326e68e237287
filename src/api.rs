//! HTTP API for BrasilConnect
//!
//! The interface layer: every route turns into one event for the runtime,
//! and every accepted event shows up on the SSE stream.

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::runtime::RuntimeHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct ApiState {
    pub runtime: RuntimeHandle,
}

impl ApiState {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self { runtime }
    }
}
