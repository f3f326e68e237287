//! API request and response types

use crate::model::Tab;
use crate::state_machine::{AppState, ProvisioningPhase};
use serde::{Deserialize, Serialize};

/// Request to switch tabs
#[derive(Debug, Deserialize)]
pub struct TabRequest {
    pub tab: Tab,
}

/// Answer to the advertisement prompt
#[derive(Debug, Deserialize)]
pub struct WatchAdRequest {
    pub confirmed: bool,
}

/// Request to replace the chat input buffer
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    pub text: String,
}

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Response for chat action
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub queued: bool,
}

/// Response for actions that complete in the background
#[derive(Debug, Serialize)]
pub struct AcceptedResponse {
    pub accepted: bool,
}

/// Response for immediate actions
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Advertisement confirmation prompt
#[derive(Debug, Serialize)]
pub struct AdPromptResponse {
    pub prompt: &'static str,
    pub reward: u32,
}

/// State snapshot plus the values the interface derives from it
#[derive(Debug, Serialize)]
pub struct StateView {
    #[serde(flatten)]
    pub state: AppState,
    pub loading: bool,
    pub unread_count: usize,
    pub provisioning: ProvisioningPhase,
}

impl From<AppState> for StateView {
    fn from(state: AppState) -> Self {
        Self {
            loading: state.is_loading(),
            unread_count: state.unread_count(),
            provisioning: state.provisioning_phase(),
            state,
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
