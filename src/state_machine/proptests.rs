//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::state::*;
use super::transition::*;
use super::*;
use crate::model::{ChatTurn, Tab};
use crate::number::{format_virtual_number, is_virtual_number, FIRST_BLOCK, SECOND_BLOCK};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> AppContext {
    AppContext::default()
}

fn base_state() -> AppState {
    AppState::initial(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap())
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_tab() -> impl Strategy<Value = Tab> {
    prop_oneof![
        Just(Tab::Home),
        Just(Tab::Calls),
        Just(Tab::Inbox),
        Just(Tab::Assistant),
        Just(Tab::Profile),
    ]
}

fn arb_number() -> impl Strategy<Value = String> {
    (FIRST_BLOCK, SECOND_BLOCK).prop_map(|(a, b)| format_virtual_number(a, b))
}

fn arb_chat_turn() -> impl Strategy<Value = ChatTurn> {
    ("[a-zA-Z ]{1,30}", any::<bool>()).prop_map(|(text, from_user)| {
        if from_user {
            ChatTurn::user(text)
        } else {
            ChatTurn::assistant(text)
        }
    })
}

/// Any state reachable from the seed: a number and a pending generation
/// never coexist.
fn arb_state() -> impl Strategy<Value = AppState> {
    (
        any::<bool>(),
        arb_tab(),
        0u32..100,
        proptest::option::of(arb_number()),
        any::<bool>(),
        any::<bool>(),
        any::<bool>(),
        proptest::collection::vec(arb_chat_turn(), 0..4),
        "[a-z ]{0,10}",
    )
        .prop_map(
            |(booting, tab, credits, number, generating, watching, thinking, turns, draft)| {
                let mut state = base_state();
                state.booting = booting;
                state.active_tab = tab;
                state.profile.credits = credits;
                state.generating_number = generating && number.is_none();
                state.profile.virtual_number = number;
                state.watching_ad = watching;
                state.assistant_thinking = thinking;
                state.chat.extend(turns);
                state.chat_draft = draft;
                state
            },
        )
}

fn arb_unprovisioned_state() -> impl Strategy<Value = AppState> {
    arb_state().prop_map(|mut state| {
        state.profile.virtual_number = None;
        state.generating_number = false;
        state
    })
}

fn arb_blank() -> impl Strategy<Value = String> {
    "[ \t\n]{0,8}"
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        arb_tab().prop_map(|tab| Event::SetActiveTab { tab }),
        Just(Event::GenerateNumber),
        any::<bool>().prop_map(|confirmed| Event::WatchAd { confirmed }),
        "[a-zA-Z ]{0,20}".prop_map(|text| Event::UpdateDraft { text }),
        "[a-zA-Z ]{0,20}".prop_map(|text| Event::SendChat { text }),
        Just(Event::BootComplete),
        arb_number().prop_map(|number| Event::NumberGenerated { number }),
        Just(Event::AdCompleted),
        "[a-zA-Z ]{0,20}".prop_map(|text| Event::AssistantReplied { text }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Determinism: the same state and event always give the same outcome
    #[test]
    fn prop_transition_is_deterministic(state in arb_state(), event in arb_event()) {
        let first = transition(&state, &test_context(), event.clone());
        let second = transition(&state, &test_context(), event);

        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.new_state, b.new_state);
                prop_assert_eq!(a.effects, b.effects);
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "outcomes diverged"),
        }
    }

    /// Enough credits: generation succeeds and costs exactly the fixed price
    #[test]
    fn prop_generation_with_enough_credits(
        state in arb_unprovisioned_state(),
        credits in 10u32..10_000,
        number in arb_number(),
    ) {
        let mut state = state;
        state.profile.credits = credits;

        let started = transition(&state, &test_context(), Event::GenerateNumber).unwrap();
        prop_assert!(started.new_state.generating_number);

        let done = transition(
            &started.new_state,
            &test_context(),
            Event::NumberGenerated { number },
        )
        .unwrap();

        prop_assert_eq!(done.new_state.profile.credits, credits - NUMBER_COST);
        let assigned = done.new_state.profile.virtual_number.clone().unwrap();
        prop_assert!(is_virtual_number(&assigned));
        prop_assert_eq!(done.new_state.provisioning_phase(), ProvisioningPhase::Provisioned);
    }

    /// Not enough credits: rejected and reported
    #[test]
    fn prop_generation_without_credits(state in arb_unprovisioned_state(), credits in 0u32..10) {
        let mut state = state;
        state.profile.credits = credits;

        let result = transition(&state, &test_context(), Event::GenerateNumber);
        prop_assert_eq!(
            result.unwrap_err(),
            TransitionError::InsufficientCredits { credits, cost: NUMBER_COST }
        );
    }

    /// A confirmed ad pays exactly the reward, whatever the balance
    #[test]
    fn prop_ad_reward_is_exact(state in arb_state(), credits in 0u32..1_000_000) {
        let mut state = state;
        state.profile.credits = credits;
        state.watching_ad = false;

        let watching = transition(&state, &test_context(), Event::WatchAd { confirmed: true }).unwrap();
        let done = transition(&watching.new_state, &test_context(), Event::AdCompleted).unwrap();

        prop_assert_eq!(done.new_state.profile.credits, credits + AD_REWARD);
    }

    /// Declining the ad is a no-op
    #[test]
    fn prop_declined_ad_changes_nothing(state in arb_state()) {
        let result = transition(&state, &test_context(), Event::WatchAd { confirmed: false }).unwrap();
        prop_assert_eq!(&result.new_state, &state);
        prop_assert!(result.effects.is_empty());
    }

    /// Blank messages never reach the transcript
    #[test]
    fn prop_blank_chat_rejected(state in arb_state(), text in arb_blank()) {
        let result = transition(&state, &test_context(), Event::SendChat { text });
        prop_assert_eq!(result.unwrap_err(), TransitionError::EmptyMessage);
    }

    /// Tab changes touch nothing else
    #[test]
    fn prop_set_tab_only_changes_tab(state in arb_state(), tab in arb_tab()) {
        let result = transition(&state, &test_context(), Event::SetActiveTab { tab }).unwrap();

        let mut expected = state.clone();
        expected.active_tab = tab;
        prop_assert_eq!(result.new_state, expected);
        prop_assert!(result.effects.is_empty());
    }

    /// The transcript only grows, one turn at a time
    #[test]
    fn prop_chat_is_append_only(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, &test_context(), event) {
            let old = &state.chat;
            let new = &result.new_state.chat;
            prop_assert!(new.len() == old.len() || new.len() == old.len() + 1);
            prop_assert_eq!(&new[..old.len()], &old[..]);
        }
    }

    /// Credits move only by the fixed cost or the fixed reward
    #[test]
    fn prop_credits_change_by_fixed_amounts(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, &test_context(), event.clone()) {
            let before = state.profile.credits;
            let after = result.new_state.profile.credits;
            match event {
                Event::NumberGenerated { .. } if after != before => {
                    prop_assert_eq!(after, before - NUMBER_COST);
                }
                Event::AdCompleted => prop_assert_eq!(after, before + AD_REWARD),
                _ => prop_assert_eq!(after, before),
            }
        }
    }

    /// Provisioned is absorbing: once assigned, the number never changes
    #[test]
    fn prop_provisioned_is_absorbing(
        state in arb_state(),
        number in arb_number(),
        events in proptest::collection::vec(arb_event(), 1..20),
    ) {
        let mut state = state;
        state.generating_number = false;
        state.profile.virtual_number = Some(number.clone());

        for event in events {
            if let Ok(result) = transition(&state, &test_context(), event) {
                state = result.new_state;
            }
            prop_assert_eq!(state.profile.virtual_number.as_deref(), Some(number.as_str()));
            prop_assert_eq!(state.provisioning_phase(), ProvisioningPhase::Provisioned);
        }
    }

    /// Busy flags are only raised together with the effect that will clear them
    #[test]
    fn prop_busy_flags_come_with_effects(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(&state, &test_context(), event) {
            let next = &result.new_state;
            if next.generating_number && !state.generating_number {
                let provisions = result
                    .effects
                    .iter()
                    .any(|e| matches!(e, Effect::ProvisionNumber { .. }));
                prop_assert!(provisions);
            }
            if next.watching_ad && !state.watching_ad {
                let schedules_reward = result.effects.iter().any(|e| {
                    matches!(e, Effect::Schedule { event, .. } if **event == Event::AdCompleted)
                });
                prop_assert!(schedules_reward);
            }
            if next.assistant_thinking && !state.assistant_thinking {
                let asks = result
                    .effects
                    .iter()
                    .any(|e| matches!(e, Effect::AskAssistant { .. }));
                prop_assert!(asks);
            }
        }
    }

    /// Credits never go negative: any sequence of events from a valid state
    /// keeps the generation guard honest
    #[test]
    fn prop_random_walk_keeps_invariants(
        events in proptest::collection::vec(arb_event(), 1..40),
    ) {
        let mut state = base_state();
        for event in events {
            if let Ok(result) = transition(&state, &test_context(), event) {
                state = result.new_state;
            }
            prop_assert!(!(state.generating_number && state.profile.virtual_number.is_some()));
            prop_assert!(!state.chat.is_empty());
        }
    }
}
