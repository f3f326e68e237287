//! Effects produced by state transitions

use super::Event;
use std::time::Duration;

/// Effects to be executed after state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Feed `event` back after `delay`
    Schedule { delay: Duration, event: Box<Event> },

    /// Wait `delay`, draw a fresh number, feed back `NumberGenerated`
    ProvisionNumber { delay: Duration },

    /// Ask the assistant gateway, feed back `AssistantReplied`
    AskAssistant { utterance: String },

    /// Show a notice to connected clients
    NotifyClient { notice: String },
}

impl Effect {
    pub fn schedule(delay: Duration, event: Event) -> Self {
        Effect::Schedule {
            delay,
            event: Box::new(event),
        }
    }

    pub fn notify(notice: impl Into<String>) -> Self {
        Effect::NotifyClient {
            notice: notice.into(),
        }
    }
}
