//! Pure state transition function

use super::{AppContext, AppState, Effect, Event};
use crate::model::ChatTurn;
use crate::number::is_virtual_number;
use thiserror::Error;

/// Substituted when the assistant answers with nothing
pub const EMPTY_REPLY: &str = "Erro ao conectar com o servidor.";

pub const INSUFFICIENT_CREDITS_NOTICE: &str =
    "Créditos insuficientes! Assista um anúncio para ganhar mais.";

pub const NUMBER_FAILED_NOTICE: &str = "Não foi possível gerar seu número. Tente novamente.";

pub const CREDIT_LIMIT_NOTICE: &str = "Limite de créditos atingido.";

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: AppState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: AppState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition. None of them mutate state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Créditos insuficientes! Assista um anúncio para ganhar mais.")]
    InsufficientCredits { credits: u32, cost: u32 },
    #[error("Você já possui um número virtual.")]
    NumberAlreadyAssigned,
    #[error("Sua linha já está sendo gerada.")]
    ProvisioningInProgress,
    #[error("Um anúncio já está em andamento.")]
    AdInProgress,
    #[error("Limite de créditos atingido.")]
    CreditLimitReached { credits: u32 },
    #[error("O assistente ainda está respondendo.")]
    AssistantBusy,
    #[error("Empty chat message")]
    EmptyMessage,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl TransitionError {
    /// Rejections the user never hears about
    pub fn is_silent(&self) -> bool {
        matches!(self, TransitionError::EmptyMessage)
    }

    /// Completion events arriving in the wrong state; these indicate a
    /// runtime bug, not a user mistake
    pub fn is_internal(&self) -> bool {
        matches!(self, TransitionError::InvalidTransition(_))
    }
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs and performs no
/// I/O. Anything impure (waiting, drawing a number, calling the assistant)
/// is requested through the returned effects.
pub fn transition(
    state: &AppState,
    context: &AppContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match event {
        // ============================================================
        // Startup
        // ============================================================
        Event::BootComplete if state.booting => {
            let mut next = state.clone();
            next.booting = false;
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Navigation
        // ============================================================
        Event::SetActiveTab { tab } => {
            let mut next = state.clone();
            next.active_tab = tab;
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Number provisioning: Unprovisioned -> Provisioning -> Provisioned
        // ============================================================
        Event::GenerateNumber => {
            if state.profile.has_number() {
                return Err(TransitionError::NumberAlreadyAssigned);
            }
            if state.generating_number {
                return Err(TransitionError::ProvisioningInProgress);
            }
            if state.profile.credits < context.number_cost {
                return Err(TransitionError::InsufficientCredits {
                    credits: state.profile.credits,
                    cost: context.number_cost,
                });
            }

            let mut next = state.clone();
            next.generating_number = true;
            Ok(TransitionResult::new(next).with_effect(Effect::ProvisionNumber {
                delay: context.number_generation_delay,
            }))
        }

        Event::NumberGenerated { number } if state.generating_number => {
            let mut next = state.clone();
            next.generating_number = false;

            if !is_virtual_number(&number) {
                return Ok(TransitionResult::new(next)
                    .with_effect(Effect::notify(NUMBER_FAILED_NOTICE)));
            }

            // Credits only grow while provisioning, so this is the
            // GenerateNumber guard re-checked at debit time.
            match state.profile.credits.checked_sub(context.number_cost) {
                Some(remaining) => {
                    next.profile.credits = remaining;
                    next.profile.virtual_number = Some(number);
                    Ok(TransitionResult::new(next))
                }
                None => Ok(TransitionResult::new(next)
                    .with_effect(Effect::notify(INSUFFICIENT_CREDITS_NOTICE))),
            }
        }

        // ============================================================
        // Advertisement reward
        // ============================================================
        Event::WatchAd { confirmed: false } => Ok(TransitionResult::new(state.clone())),

        Event::WatchAd { confirmed: true } => {
            if state.watching_ad {
                return Err(TransitionError::AdInProgress);
            }
            if state.profile.credits.checked_add(context.ad_reward).is_none() {
                return Err(TransitionError::CreditLimitReached {
                    credits: state.profile.credits,
                });
            }

            let mut next = state.clone();
            next.watching_ad = true;
            Ok(TransitionResult::new(next)
                .with_effect(Effect::schedule(context.ad_delay, Event::AdCompleted)))
        }

        Event::AdCompleted if state.watching_ad => {
            let mut next = state.clone();
            next.watching_ad = false;

            // Only a debit can land while the ad plays, so the WatchAd
            // guard still holds here.
            match state.profile.credits.checked_add(context.ad_reward) {
                Some(total) => {
                    next.profile.credits = total;
                    Ok(TransitionResult::new(next))
                }
                None => Ok(TransitionResult::new(next)
                    .with_effect(Effect::notify(CREDIT_LIMIT_NOTICE))),
            }
        }

        // ============================================================
        // Assistant chat
        // ============================================================
        Event::UpdateDraft { text } => {
            let mut next = state.clone();
            next.chat_draft = text;
            Ok(TransitionResult::new(next))
        }

        Event::SendChat { text } => {
            if text.trim().is_empty() {
                return Err(TransitionError::EmptyMessage);
            }
            if state.assistant_thinking {
                return Err(TransitionError::AssistantBusy);
            }

            let mut next = state.clone();
            next.chat.push(ChatTurn::user(text.clone()));
            next.chat_draft.clear();
            next.assistant_thinking = true;
            Ok(TransitionResult::new(next).with_effect(Effect::AskAssistant { utterance: text }))
        }

        Event::AssistantReplied { text } if state.assistant_thinking => {
            let reply = if text.is_empty() {
                EMPTY_REPLY.to_string()
            } else {
                text
            };

            let mut next = state.clone();
            next.chat.push(ChatTurn::assistant(reply));
            next.assistant_thinking = false;
            Ok(TransitionResult::new(next))
        }

        // ============================================================
        // Completion events with nothing pending
        // ============================================================
        event @ (Event::BootComplete
        | Event::NumberGenerated { .. }
        | Event::AdCompleted
        | Event::AssistantReplied { .. }) => Err(TransitionError::InvalidTransition(format!(
            "No pending operation for {event:?}"
        ))),
    }
}
