//! Events that can occur in a session

use crate::model::Tab;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    SetActiveTab {
        tab: Tab,
    },
    GenerateNumber,
    /// Answer to the ad confirmation prompt
    WatchAd {
        confirmed: bool,
    },
    UpdateDraft {
        text: String,
    },
    SendChat {
        text: String,
    },

    // Completion events, fed back by the runtime
    BootComplete,
    NumberGenerated {
        number: String,
    },
    AdCompleted,
    AssistantReplied {
        text: String,
    },
}

impl Event {
    /// Whether the event comes from the runtime rather than a user
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Event::BootComplete
                | Event::NumberGenerated { .. }
                | Event::AdCompleted
                | Event::AssistantReplied { .. }
        )
    }
}
