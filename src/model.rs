//! Account, inbox, call log and chat records
//!
//! Plain values owned by the application state. None of these carry
//! behavior beyond small queries; every mutation goes through the state
//! machine.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

pub const SEED_UID: &str = "user_777";
pub const SEED_SOCIAL_ID: &str = "BC-9921";
pub const SEED_CREDITS: u32 = 15;

pub const ASSISTANT_GREETING: &str =
    "Olá! Sou seu assistente BrasilConnect. Como posso te ajudar hoje?";

/// Account standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[allow(dead_code)] // Nothing suspends an account yet
pub enum AccountStatus {
    #[default]
    Active,
    Suspended,
}

/// The single mutable account of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub social_id: String,
    pub virtual_number: Option<String>,
    pub credits: u32,
    pub status: AccountStatus,
}

impl UserProfile {
    pub fn seeded() -> Self {
        Self {
            uid: SEED_UID.to_string(),
            social_id: SEED_SOCIAL_ID.to_string(),
            virtual_number: None,
            credits: SEED_CREDITS,
            status: AccountStatus::Active,
        }
    }

    pub fn has_number(&self) -> bool {
        self.virtual_number.is_some()
    }
}

/// Inbound notification shown in the inbox
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

impl Message {
    pub fn new(
        id: impl Into<String>,
        sender: impl Into<String>,
        text: impl Into<String>,
        timestamp: DateTime<Utc>,
        is_read: bool,
    ) -> Self {
        Self {
            id: id.into(),
            sender: sender.into(),
            text: text.into(),
            timestamp,
            is_read,
        }
    }
}

/// The two inbox entries every session starts with
pub fn seed_messages(now: DateTime<Utc>) -> Vec<Message> {
    vec![
        Message::new(
            "1",
            "WhatsApp",
            "Seu código de confirmação é: 482-192",
            now,
            false,
        ),
        Message::new(
            "2",
            "BrasilConnect",
            "Bem-vindo! Seu número virtual está pronto para uso.",
            now - Duration::hours(1),
            true,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(dead_code)] // The dialer does not place calls
pub enum CallDirection {
    Incoming,
    Outgoing,
    Missed,
}

/// Call-log record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(dead_code)] // The dialer does not place calls
pub struct Call {
    pub id: String,
    pub number: String,
    pub duration: String,
    pub direction: CallDirection,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One entry of the assistant transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            text: text.into(),
        }
    }
}

/// Which view is in front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    #[default]
    Home,
    Calls,
    Inbox,
    #[serde(alias = "ai")]
    Assistant,
    Profile,
}
