//! Crisis message triage
//!
//! Keyword matching for immediate danger, context-aware prompt augmentation,
//! rule-based post-analysis and the orchestrator tying them to the LLM.

mod analyzer;
mod augment;
mod keywords;
mod orchestrator;
pub mod types;

#[cfg(test)]
mod proptests;

#[allow(unused_imports)] // Public API re-exports
pub use analyzer::analyze;
#[allow(unused_imports)]
pub use augment::{build_system_prompt, CRISIS_SYSTEM_PROMPT};
#[allow(unused_imports)]
pub use keywords::{is_immediate_crisis, matched_crisis_phrase, IMMEDIATE_CRISIS_PHRASES};
#[allow(unused_imports)]
pub use orchestrator::{fallback_response, CrisisOrchestrator, FALLBACK_MESSAGE};
#[allow(unused_imports)]
pub use types::*;
