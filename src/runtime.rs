//! Runtime for the application state
//!
//! A single task owns the [`AppState`]. Callers talk to it through a
//! [`RuntimeHandle`]: commands go in over an mpsc channel, snapshots come
//! out over a watch channel, and client-facing events over a broadcast
//! channel.

mod executor;
pub mod traits;


pub use executor::AppRuntime;
pub use traits::*;

use crate::state_machine::{AppState, Event, TransitionError};
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot, watch};

/// An event on its way into the runtime, with an optional channel for the
/// transition outcome
#[derive(Debug)]
pub struct Command {
    pub event: Event,
    pub reply: Option<oneshot::Sender<Result<(), TransitionError>>>,
}

impl Command {
    /// Completion events are fed back without anyone waiting on them
    pub fn completion(event: Event) -> Self {
        Self { event, reply: None }
    }
}

/// Events sent to SSE clients
#[derive(Debug, Clone)]
pub enum SseEvent {
    StateChange { state: Box<AppState> },
    Notice { message: String },
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Rejected(#[from] TransitionError),
    #[error("Runtime is not running")]
    Stopped,
}

/// Handle to interact with the running application
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    state_rx: watch::Receiver<AppState>,
}

impl RuntimeHandle {
    /// Apply a user event and wait for the transition to be decided.
    ///
    /// Returns once the new state is published; effects may still be
    /// pending.
    pub async fn dispatch(&self, event: Event) -> Result<(), DispatchError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(Command {
                event,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| DispatchError::Stopped)?;

        reply_rx.await.map_err(|_| DispatchError::Stopped)??;
        Ok(())
    }

    /// Current state
    pub fn snapshot(&self) -> AppState {
        self.state_rx.borrow().clone()
    }

    /// Receiver that observes every published state
    #[allow(dead_code)] // Tests await state through it
    pub fn watch(&self) -> watch::Receiver<AppState> {
        self.state_rx.clone()
    }

    /// Subscribe to client-facing updates
    pub fn subscribe(&self) -> broadcast::Receiver<SseEvent> {
        self.broadcast_tx.subscribe()
    }
}
