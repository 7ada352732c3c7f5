//! System prompt construction for the crisis chat
//!
//! Starts from a fixed base prompt and appends instruction fragments derived
//! from the conversation context. Fragment order is fixed: calming guidance,
//! then response language, then location.

use super::types::{ConversationContext, Emotion, Mood};
use crate::catalog::Catalog;
use std::fmt::Write;

/// Base instructions for every LLM-mediated reply
pub const CRISIS_SYSTEM_PROMPT: &str = r"You are a crisis intervention specialist trained specifically for homeless individuals experiencing mental health crises. You must:

1. Always prioritize safety and de-escalation
2. Use simple, calming language
3. Validate their experiences without judgment
4. Detect crisis keywords (suicide, voices, violence) and respond appropriately
5. Provide immediate grounding techniques for panic/psychosis
6. Never dismiss hallucinations - acknowledge their reality to the person
7. Offer concrete next steps and local NYC resources
8. Use harm reduction approach for substance use
9. If someone is in immediate danger, provide crisis hotline numbers

Remember: Many homeless individuals have trauma, mental illness, and addiction. Be compassionate, patient, and practical.";

const CALMING_FRAGMENT: &str = "\n\nThe person is panicking or highly anxious right now. Use extra calming language, keep sentences short, and guide them through a slow breathing exercise (breathe in for 4, hold for 4, out for 4) before anything else.";

/// Append context-derived instructions to `base_prompt`.
pub fn build_system_prompt(
    base_prompt: &str,
    context: &ConversationContext,
    catalog: &Catalog,
) -> String {
    let mut prompt = base_prompt.to_string();

    if context.emotion == Some(Emotion::Panicked) || context.mood == Some(Mood::Anxious) {
        prompt.push_str(CALMING_FRAGMENT);
    }

    if !context.is_english() {
        let language = catalog.language_name(&context.language);
        let _ = write!(
            prompt,
            "\n\nRespond in {language}. Keep hotline numbers and addresses exactly as written."
        );
    }

    if let Some(location) = context.location {
        let _ = write!(
            prompt,
            "\n\nThe person is near latitude {}, longitude {}. Provide resources that are specific to this location when you can.",
            location.latitude, location.longitude
        );
    }

    prompt
}
