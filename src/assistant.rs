//! Assistant gateway
//!
//! Turns one user utterance into assistant text. Every failure is absorbed
//! here and replaced by [`ASSISTANT_FALLBACK`]; callers never see an error.

use crate::llm::{LlmRequest, LlmService};
use crate::runtime::AssistantClient;
use crate::system_prompt::build_system_prompt;
use async_trait::async_trait;
use std::sync::Arc;

pub const ASSISTANT_FALLBACK: &str =
    "Desculpe, tive um problema ao processar sua solicitação. Tente novamente em alguns instantes.";

/// Stateless gateway: only the latest utterance goes upstream, never the
/// transcript.
pub struct AssistantGateway {
    llm: Arc<dyn LlmService>,
    system_prompt: String,
}

impl AssistantGateway {
    pub fn new(llm: Arc<dyn LlmService>) -> Self {
        Self {
            llm,
            system_prompt: build_system_prompt(),
        }
    }
}

#[async_trait]
impl AssistantClient for AssistantGateway {
    async fn ask(&self, utterance: &str) -> String {
        let request = LlmRequest::single_turn(self.system_prompt.as_str(), utterance);

        match self.llm.complete(&request).await {
            Ok(response) => response.text(),
            Err(e) => {
                tracing::warn!(error = %e.message, kind = ?e.kind, "Assistant request failed");
                ASSISTANT_FALLBACK.to_string()
            }
        }
    }
}
