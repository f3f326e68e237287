//! Application state types

use crate::model::{seed_messages, Call, ChatTurn, Message, Tab, UserProfile, ASSISTANT_GREETING};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Credits spent on one virtual number
pub const NUMBER_COST: u32 = 10;
/// Credits earned from one advertisement
pub const AD_REWARD: u32 = 10;

/// Confirmation shown before an advertisement plays
pub const AD_PROMPT: &str = "Assista este vídeo de 30s para ganhar 10 créditos?";

pub const BOOT_DELAY: Duration = Duration::from_secs(2);
pub const NUMBER_GENERATION_DELAY: Duration = Duration::from_secs(3);
pub const AD_DELAY: Duration = Duration::from_secs(2);

/// Phase of the number provisioning sub-flow. `Provisioned` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningPhase {
    Unprovisioned,
    Provisioning,
    Provisioned,
}

/// Everything the interface renders from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// True until the startup delay resolves
    pub booting: bool,
    pub active_tab: Tab,
    pub profile: UserProfile,
    pub messages: Vec<Message>,
    pub calls: Vec<Call>,
    /// Append-only assistant transcript
    pub chat: Vec<ChatTurn>,
    /// Chat input buffer
    pub chat_draft: String,
    /// A number is being generated
    pub generating_number: bool,
    /// An advertisement is playing
    pub watching_ad: bool,
    /// An assistant request is in flight
    pub assistant_thinking: bool,
}

impl AppState {
    /// Seeded state for a fresh session
    pub fn initial(now: DateTime<Utc>) -> Self {
        Self {
            booting: true,
            active_tab: Tab::Home,
            profile: UserProfile::seeded(),
            messages: seed_messages(now),
            calls: Vec::new(),
            chat: vec![ChatTurn::assistant(ASSISTANT_GREETING)],
            chat_draft: String::new(),
            generating_number: false,
            watching_ad: false,
            assistant_thinking: false,
        }
    }

    pub fn provisioning_phase(&self) -> ProvisioningPhase {
        if self.profile.has_number() {
            ProvisioningPhase::Provisioned
        } else if self.generating_number {
            ProvisioningPhase::Provisioning
        } else {
            ProvisioningPhase::Unprovisioned
        }
    }

    /// Full-screen loading: startup, or an ad playing
    pub fn is_loading(&self) -> bool {
        self.booting || self.watching_ad
    }

    pub fn unread_count(&self) -> usize {
        self.messages.iter().filter(|m| !m.is_read).count()
    }
}

/// Fixed economics and timings of a session (immutable configuration)
#[derive(Debug, Clone)]
pub struct AppContext {
    pub number_cost: u32,
    pub ad_reward: u32,
    pub boot_delay: Duration,
    pub number_generation_delay: Duration,
    pub ad_delay: Duration,
}

impl Default for AppContext {
    fn default() -> Self {
        Self {
            number_cost: NUMBER_COST,
            ad_reward: AD_REWARD,
            boot_delay: BOOT_DELAY,
            number_generation_delay: NUMBER_GENERATION_DELAY,
            ad_delay: AD_DELAY,
        }
    }
}
