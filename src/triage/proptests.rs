//! Property-based tests for triage
//!
//! - Danger phrases are found regardless of casing or surrounding text
//! - The orchestrator never calls the LLM for those messages, and calls it
//!   exactly once with the message as the final turn otherwise
//! - Analyzer output only grows when more rule triggers are present, and
//!   urgency comes from the last matching rule that sets one
//! - The same chat input always yields the same response and LLM request
//! - Prompt fragments keep their fixed order

use super::*;
use crate::catalog::Catalog;
use crate::llm::testing::MockLlmClient;
use crate::llm::{DecodingParams, MessageRole};
use proptest::prelude::*;
use std::sync::Arc;

/// Filler that cannot accidentally contain a danger phrase or rule trigger
fn arb_filler() -> impl Strategy<Value = String> {
    "[xyzqjkXYZQJK .,!?]{0,30}"
}

fn arb_casing(phrase: &'static str) -> impl Strategy<Value = String> {
    proptest::collection::vec(any::<bool>(), phrase.len()).prop_map(move |upper| {
        phrase
            .chars()
            .zip(upper)
            .map(|(c, u)| if u { c.to_ascii_uppercase() } else { c })
            .collect()
    })
}

fn arb_crisis_message() -> impl Strategy<Value = String> {
    (
        arb_filler(),
        prop::sample::select(IMMEDIATE_CRISIS_PHRASES).prop_flat_map(arb_casing),
        arb_filler(),
    )
        .prop_map(|(before, phrase, after)| format!("{before}{phrase}{after}"))
}

fn arb_emotion() -> impl Strategy<Value = Option<Emotion>> {
    prop_oneof![
        Just(None),
        Just(Some(Emotion::Calm)),
        Just(Some(Emotion::Panicked)),
        Just(Some(Emotion::Other)),
    ]
}

fn arb_mood() -> impl Strategy<Value = Option<Mood>> {
    prop_oneof![
        Just(None),
        Just(Some(Mood::Okay)),
        Just(Some(Mood::Anxious)),
        Just(Some(Mood::Crisis)),
    ]
}

fn arb_context() -> impl Strategy<Value = ConversationContext> {
    (
        prop::sample::select(vec!["en", "es", "zh", "ar", "ru", "fr"]),
        arb_emotion(),
        arb_mood(),
        proptest::option::of((-90.0f64..90.0, -180.0f64..180.0)),
    )
        .prop_map(|(language, emotion, mood, location)| ConversationContext {
            language: language.to_string(),
            emotion,
            mood,
            location: location.map(|(latitude, longitude)| Location {
                latitude,
                longitude,
            }),
            session_id: None,
        })
}

fn arb_history() -> impl Strategy<Value = Vec<ConversationTurn>> {
    proptest::collection::vec(
        ("[a-z ]{1,20}", any::<bool>()).prop_map(|(text, is_bot)| ConversationTurn { text, is_bot }),
        0..6,
    )
}

const RULE_TRIGGERS: &[&str] = &["voices", "drugs", "hungry", "cold", "lonely", "wifi"];

/// Urgency each trigger's rule sets, in rule table order
const TRIGGER_URGENCY: &[(&str, Option<Urgency>)] = &[
    ("voices", Some(Urgency::Medium)),
    ("drugs", Some(Urgency::Medium)),
    ("hungry", None),
    ("cold", Some(Urgency::High)),
    ("lonely", None),
    ("wifi", None),
];

fn orchestrator(llm: Arc<MockLlmClient>) -> CrisisOrchestrator {
    CrisisOrchestrator::new(
        llm,
        Arc::new(Catalog::builtin().unwrap()),
        DecodingParams::default(),
    )
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn crisis_phrases_match_any_casing(message in arb_crisis_message()) {
        prop_assert!(is_immediate_crisis(&message));
    }

    #[test]
    fn filler_never_matches(message in arb_filler()) {
        prop_assert!(!is_immediate_crisis(&message));
        prop_assert_eq!(analyze(&message, "", &ConversationContext::default()), TriageResult::default());
    }

    #[test]
    fn immediate_path_never_calls_llm(
        message in arb_crisis_message(),
        history in arb_history(),
        context in arb_context(),
    ) {
        let llm = Arc::new(MockLlmClient::always("unused"));
        let orch = orchestrator(llm.clone());
        let response = block_on(orch.handle_crisis_chat(&message, &history, &context));

        prop_assert_eq!(response.urgency, Urgency::Immediate);
        prop_assert_eq!(llm.call_count(), 0);
    }

    #[test]
    fn llm_path_calls_once_with_message_last(
        message in arb_filler(),
        history in arb_history(),
        context in arb_context(),
    ) {
        let llm = Arc::new(MockLlmClient::always("I'm listening."));
        let orch = orchestrator(llm.clone());
        let response = block_on(orch.handle_crisis_chat(&message, &history, &context));

        prop_assert_eq!(response.message.as_str(), "I'm listening.");
        let requests = llm.recorded_requests();
        prop_assert_eq!(requests.len(), 1);
        let request = &requests[0];
        prop_assert_eq!(request.messages.len(), history.len() + 1);
        let last = request.messages.last().unwrap();
        prop_assert_eq!(last.role, MessageRole::User);
        prop_assert_eq!(&last.content, &message);
        prop_assert!(request.system.starts_with(CRISIS_SYSTEM_PROMPT));
    }

    #[test]
    fn adding_triggers_only_grows_the_result(
        first in prop::sample::subsequence(RULE_TRIGGERS, 0..=RULE_TRIGGERS.len()),
        extra in prop::sample::select(RULE_TRIGGERS),
        context in arb_context(),
    ) {
        let base = first.join(" ");
        let extended = format!("{base} {extra}");
        let before = analyze(&base, "", &context);
        let after = analyze(&extended, "", &context);

        prop_assert!(after.actions.len() >= before.actions.len());
        prop_assert!(after.resources.len() >= before.resources.len());
        prop_assert!(after.needs_peer_support || !before.needs_peer_support);
        for action in &before.actions {
            prop_assert!(after.actions.contains(action));
        }
    }

    #[test]
    fn urgency_comes_from_last_matching_rule(
        triggers in prop::sample::subsequence(RULE_TRIGGERS, 0..=RULE_TRIGGERS.len()).prop_shuffle(),
        context in arb_context(),
    ) {
        let message = triggers.join(" and ");
        let acute = context.emotion == Some(Emotion::Panicked) || context.mood == Some(Mood::Crisis);

        let expected = TRIGGER_URGENCY
            .iter()
            .filter(|(trigger, _)| triggers.contains(trigger))
            .filter_map(|(_, urgency)| *urgency)
            .last()
            .or(acute.then_some(Urgency::High))
            .unwrap_or(Urgency::Low);

        prop_assert_eq!(analyze(&message, "", &context).urgency, expected);
    }

    #[test]
    fn repeated_chats_give_identical_responses(
        message in arb_filler(),
        history in arb_history(),
        context in arb_context(),
    ) {
        let llm = Arc::new(MockLlmClient::always("You're not alone."));
        let orch = orchestrator(llm.clone());
        let (first, second) = block_on(async {
            let first = orch.handle_crisis_chat(&message, &history, &context).await;
            let second = orch.handle_crisis_chat(&message, &history, &context).await;
            (first, second)
        });

        prop_assert_eq!(&first, &second);
        let requests = llm.recorded_requests();
        prop_assert_eq!(requests.len(), 2);
        prop_assert_eq!(&requests[0], &requests[1]);
    }

    #[test]
    fn prompt_fragments_keep_order(context in arb_context()) {
        let catalog = Catalog::builtin().unwrap();
        let prompt = build_system_prompt(CRISIS_SYSTEM_PROMPT, &context, &catalog);
        prop_assert!(prompt.starts_with(CRISIS_SYSTEM_PROMPT));

        let calm = prompt.find("breathing exercise");
        let lang = prompt.find("Respond in ");
        let loc = prompt.find("The person is near latitude");

        let calming_expected = context.emotion == Some(Emotion::Panicked)
            || context.mood == Some(Mood::Anxious);
        prop_assert_eq!(calm.is_some(), calming_expected);
        prop_assert_eq!(lang.is_some(), context.language != "en");
        prop_assert_eq!(loc.is_some(), context.location.is_some());

        let positions: Vec<usize> = [calm, lang, loc].into_iter().flatten().collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
