//! Application state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! The runtime owns the current [`AppState`] and feeds every [`Event`]
//! through [`transition`]; the returned [`Effect`]s carry all I/O.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{AppContext, AppState, ProvisioningPhase};
pub use transition::{transition, TransitionError};
