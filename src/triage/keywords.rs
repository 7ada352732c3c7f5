//! Immediate-danger phrase matching
//!
//! A message that contains any of these phrases skips the LLM entirely and
//! gets the hardcoded emergency response.

/// Phrases signalling explicit self-harm intent. Compared against lower-cased input.
pub const IMMEDIATE_CRISIS_PHRASES: &[&str] = &["kill myself", "suicide", "want to die", "end it"];

/// Returns the first phrase contained in `message`, ignoring case.
pub fn matched_crisis_phrase(message: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();
    IMMEDIATE_CRISIS_PHRASES
        .iter()
        .copied()
        .find(|phrase| lowered.contains(phrase))
}

/// True when `message` contains any immediate-danger phrase, ignoring case.
#[allow(dead_code)] // Boolean form for callers that don't log the phrase
pub fn is_immediate_crisis(message: &str) -> bool {
    matched_crisis_phrase(message).is_some()
}
