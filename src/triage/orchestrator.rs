//! Crisis chat orchestration
//!
//! Start → Immediate when the message carries an explicit danger phrase (no
//! LLM call). Otherwise Augmented: one LLM call with the context-aware system
//! prompt, then Analyzed on success or Fallback on any LLM failure.

use super::analyzer::analyze;
use super::augment::{build_system_prompt, CRISIS_SYSTEM_PROMPT};
use super::keywords::matched_crisis_phrase;
use super::types::{ActionTag, ConversationContext, ConversationTurn, CrisisResponse, Urgency};
use crate::catalog::Catalog;
use crate::llm::{DecodingParams, LlmMessage, LlmRequest, LlmService};
use std::sync::Arc;

pub const FALLBACK_MESSAGE: &str = "I'm here for you. If you're in crisis, please call 988 or go to your nearest emergency room. Let's try again - what's happening right now?";

const IMMEDIATE_ACTIONS: [ActionTag; 3] = [
    ActionTag::CallHotline,
    ActionTag::FindEr,
    ActionTag::AlertCaseworker,
];

/// Safe response used whenever a reply cannot be produced
pub fn fallback_response() -> CrisisResponse {
    CrisisResponse {
        message: FALLBACK_MESSAGE.to_string(),
        urgency: Urgency::Error,
        actions: Vec::new(),
        resources: Vec::new(),
        peer_support: false,
        fallback: true,
    }
}

pub struct CrisisOrchestrator {
    llm: Arc<dyn LlmService>,
    catalog: Arc<Catalog>,
    decoding: DecodingParams,
}

impl CrisisOrchestrator {
    pub fn new(llm: Arc<dyn LlmService>, catalog: Arc<Catalog>, decoding: DecodingParams) -> Self {
        Self {
            llm,
            catalog,
            decoding,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Produce the reply for one chat message. Never fails: LLM errors become
    /// the fallback response.
    pub async fn handle_crisis_chat(
        &self,
        message: &str,
        history: &[ConversationTurn],
        context: &ConversationContext,
    ) -> CrisisResponse {
        if let Some(phrase) = matched_crisis_phrase(message) {
            tracing::warn!(
                phrase,
                language = %context.language,
                "Immediate crisis detected; returning emergency response"
            );
            return self.immediate_response(&context.language);
        }

        let request = self.build_request(message, history, context);

        match self.llm.complete(&request).await {
            Ok(response) => {
                let reply = response.content;
                let triage = analyze(message, &reply, context);
                tracing::info!(
                    urgency = %triage.urgency,
                    actions = triage.actions.len(),
                    resources = triage.resources.len(),
                    peer_support = triage.needs_peer_support,
                    "Crisis chat analyzed"
                );
                CrisisResponse::from_triage(reply, triage)
            }
            Err(e) => {
                tracing::error!(
                    kind = ?e.kind,
                    error = %e.message,
                    "Crisis chat LLM call failed; returning fallback"
                );
                fallback_response()
            }
        }
    }

    fn immediate_response(&self, language: &str) -> CrisisResponse {
        CrisisResponse {
            message: self.catalog.emergency_message(language).to_string(),
            urgency: Urgency::Immediate,
            actions: IMMEDIATE_ACTIONS.to_vec(),
            resources: Vec::new(),
            peer_support: true,
            fallback: false,
        }
    }

    /// System prompt, then history in order, then the new message as the final user turn.
    pub fn build_request(
        &self,
        message: &str,
        history: &[ConversationTurn],
        context: &ConversationContext,
    ) -> LlmRequest {
        let mut messages: Vec<LlmMessage> = history
            .iter()
            .map(|turn| {
                if turn.is_bot {
                    LlmMessage::assistant(turn.text.clone())
                } else {
                    LlmMessage::user(turn.text.clone())
                }
            })
            .collect();
        messages.push(LlmMessage::user(message));

        LlmRequest {
            system: build_system_prompt(CRISIS_SYSTEM_PROMPT, context, &self.catalog),
            messages,
            temperature: Some(self.decoding.temperature),
            max_tokens: Some(self.decoding.max_tokens),
        }
    }
}
