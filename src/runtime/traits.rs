//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::number::draw_virtual_number;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Source of simulated latency
#[async_trait]
pub trait Clock: Send + Sync {
    /// Resolve after `duration`
    async fn sleep(&self, duration: Duration);
}

/// The assistant, as seen by the runtime
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Answer one utterance. Infallible: failures come back as text.
    async fn ask(&self, utterance: &str) -> String;
}

/// Where fresh virtual numbers come from
pub trait NumberSource: Send + Sync {
    fn next_number(&self) -> String;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: Clock + ?Sized> Clock for Arc<T> {
    async fn sleep(&self, duration: Duration) {
        (**self).sleep(duration).await;
    }
}

#[async_trait]
impl<T: AssistantClient + ?Sized> AssistantClient for Arc<T> {
    async fn ask(&self, utterance: &str) -> String {
        (**self).ask(utterance).await
    }
}

impl<T: NumberSource + ?Sized> NumberSource for Arc<T> {
    fn next_number(&self) -> String {
        (**self).next_number()
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Wall-clock delays on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Uniform random numbers from the thread-local generator
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNumberSource;

impl NumberSource for RandomNumberSource {
    fn next_number(&self) -> String {
        draw_virtual_number(&mut rand::thread_rng())
    }
}
