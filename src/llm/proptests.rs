//! Property-based tests for LLM provider translation layers
//!
//! These tests verify that translating our request type into provider wire
//! formats preserves key invariants:
//! - The system prompt is sent exactly once, ahead of the conversation
//! - Conversation order and content survive translation
//! - Anthropic translation starts with a user turn and never emits two
//!   adjacent turns with the same role

use super::anthropic::AnthropicService;
use super::openai::OpenAIService;
use super::types::{LlmMessage, LlmRequest, MessageRole};
use proptest::prelude::*;
use std::time::Duration;

fn arb_message() -> impl Strategy<Value = LlmMessage> {
    (any::<bool>(), "[a-zA-Z0-9 _.!?,']{1,80}").prop_map(|(is_bot, text)| {
        if is_bot {
            LlmMessage::assistant(text)
        } else {
            LlmMessage::user(text)
        }
    })
}

fn arb_request() -> impl Strategy<Value = LlmRequest> {
    (
        "[a-zA-Z .]{0,60}",
        proptest::collection::vec(arb_message(), 1..12),
        proptest::option::of(0.0f32..2.0),
        proptest::option::of(1u32..4096),
    )
        .prop_map(|(system, messages, temperature, max_tokens)| LlmRequest {
            system,
            messages,
            temperature,
            max_tokens,
        })
}

fn openai() -> OpenAIService {
    OpenAIService::new("k".to_string(), "gpt-4", None, Duration::from_secs(1)).unwrap()
}

fn anthropic() -> AnthropicService {
    AnthropicService::new("k".to_string(), "claude", None, Duration::from_secs(1)).unwrap()
}

proptest! {
    #[test]
    fn openai_preserves_order_and_content(request in arb_request()) {
        let wire = openai().translate_request(&request);
        let offset = usize::from(!request.system.is_empty());

        prop_assert_eq!(wire.messages.len(), request.messages.len() + offset);
        if offset == 1 {
            prop_assert_eq!(wire.messages[0].role.as_str(), "system");
            prop_assert_eq!(wire.messages[0].content.as_deref(), Some(request.system.as_str()));
        }
        for (sent, original) in wire.messages.iter().skip(offset).zip(&request.messages) {
            prop_assert_eq!(sent.role.as_str(), original.role.as_str());
            prop_assert_eq!(sent.content.as_deref(), Some(original.content.as_str()));
        }
        prop_assert_eq!(wire.max_tokens, request.max_tokens);
    }

    #[test]
    fn anthropic_roles_alternate(request in arb_request()) {
        let wire = anthropic().translate_request(&request);
        for pair in wire.messages.windows(2) {
            prop_assert_ne!(&pair[0].role, &pair[1].role);
        }
        if let Some(first) = wire.messages.first() {
            prop_assert_eq!(first.role.as_str(), "user");
        }
        prop_assert!(wire.messages.len() <= request.messages.len());
    }

    #[test]
    fn anthropic_keeps_every_turn(request in arb_request()) {
        let wire = anthropic().translate_request(&request);
        let Some(first_user) = request.messages.iter().position(|m| m.role == MessageRole::User) else {
            prop_assert!(wire.messages.is_empty());
            return Ok(());
        };
        let joined: String = wire.messages.iter().map(|m| m.content.as_str()).collect::<Vec<_>>().join("\n\n");
        for msg in &request.messages[first_user..] {
            prop_assert!(joined.contains(&msg.content));
        }
        let last = request.messages.last().unwrap();
        let last_wire = wire.messages.last().unwrap();
        prop_assert!(last_wire.content.ends_with(&last.content));
        prop_assert_eq!(last_wire.role == "user", last.role == MessageRole::User);
    }
}
