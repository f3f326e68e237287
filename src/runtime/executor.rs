//! Application runtime executor

use super::traits::{AssistantClient, Clock, NumberSource};
use super::{Command, RuntimeHandle, SseEvent};

use crate::state_machine::{transition, AppContext, AppState, Effect, Event, TransitionError};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, watch};

/// Generic runtime that can work with any clock, assistant, and number source
pub struct AppRuntime<C, A, N>
where
    C: Clock + 'static,
    A: AssistantClient + 'static,
    N: NumberSource + 'static,
{
    context: AppContext,
    state: AppState,
    clock: Arc<C>,
    assistant: Arc<A>,
    numbers: Arc<N>,
    command_rx: mpsc::Receiver<Command>,
    /// Sender half kept for feeding completion events back
    command_tx: mpsc::Sender<Command>,
    broadcast_tx: broadcast::Sender<SseEvent>,
    state_tx: watch::Sender<AppState>,
}

impl<C, A, N> AppRuntime<C, A, N>
where
    C: Clock + 'static,
    A: AssistantClient + 'static,
    N: NumberSource + 'static,
{
    pub fn new(
        context: AppContext,
        state: AppState,
        clock: C,
        assistant: A,
        numbers: N,
    ) -> (Self, RuntimeHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);
        let (broadcast_tx, _) = broadcast::channel(128);
        let (state_tx, state_rx) = watch::channel(state.clone());

        let handle = RuntimeHandle {
            command_tx: command_tx.clone(),
            broadcast_tx: broadcast_tx.clone(),
            state_rx,
        };

        let runtime = Self {
            context,
            state,
            clock: Arc::new(clock),
            assistant: Arc::new(assistant),
            numbers: Arc::new(numbers),
            command_rx,
            command_tx,
            broadcast_tx,
            state_tx,
        };

        (runtime, handle)
    }

    pub async fn run(mut self) {
        tracing::info!("Starting app runtime");

        if self.state.booting {
            self.execute_effect(Effect::schedule(
                self.context.boot_delay,
                Event::BootComplete,
            ));
        }

        // Process commands one at a time; this task is the only writer
        while let Some(command) = self.command_rx.recv().await {
            let outcome = self.process_event(command.event);
            if let Some(reply) = command.reply {
                let _ = reply.send(outcome);
            }
        }

        tracing::info!("App runtime stopped");
    }

    fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        let is_completion = event.is_completion();
        tracing::debug!(?event, "Applying event");

        let result = match transition(&self.state, &self.context, event) {
            Ok(r) => r,
            Err(e) => {
                self.report_rejection(&e, is_completion);
                return Err(e);
            }
        };

        self.state = result.new_state;
        self.publish_state();

        for effect in result.effects {
            self.execute_effect(effect);
        }

        Ok(())
    }

    fn report_rejection(&self, error: &TransitionError, is_completion: bool) {
        if error.is_internal() {
            tracing::warn!(error = %error, is_completion, "Dropped completion event");
        } else if error.is_silent() {
            tracing::debug!(error = %error, "Ignored event");
        } else {
            tracing::info!(error = %error, "Rejected event");
            let _ = self.broadcast_tx.send(SseEvent::Notice {
                message: error.to_string(),
            });
        }
    }

    fn publish_state(&self) {
        self.state_tx.send_replace(self.state.clone());
        let _ = self.broadcast_tx.send(SseEvent::StateChange {
            state: Box::new(self.state.clone()),
        });
    }

    /// Start an effect. Anything that waits runs as a background task and
    /// reports back through the command channel.
    fn execute_effect(&self, effect: Effect) {
        match effect {
            Effect::Schedule { delay, event } => {
                let clock = self.clock.clone();
                let command_tx = self.command_tx.clone();
                tokio::spawn(async move {
                    clock.sleep(delay).await;
                    let _ = command_tx.send(Command::completion(*event)).await;
                });
            }

            Effect::ProvisionNumber { delay } => {
                let clock = self.clock.clone();
                let numbers = self.numbers.clone();
                let command_tx = self.command_tx.clone();
                tokio::spawn(async move {
                    clock.sleep(delay).await;
                    let number = numbers.next_number();
                    tracing::info!(number = %number, "Virtual number generated");
                    let _ = command_tx
                        .send(Command::completion(Event::NumberGenerated { number }))
                        .await;
                });
            }

            Effect::AskAssistant { utterance } => {
                let assistant = self.assistant.clone();
                let command_tx = self.command_tx.clone();
                tokio::spawn(async move {
                    tracing::info!("Asking assistant (background)");
                    let text = assistant.ask(&utterance).await;
                    let _ = command_tx
                        .send(Command::completion(Event::AssistantReplied { text }))
                        .await;
                });
            }

            Effect::NotifyClient { notice } => {
                let _ = self.broadcast_tx.send(SseEvent::Notice { message: notice });
            }
        }
    }
}
