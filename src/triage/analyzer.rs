//! Post-exchange triage: urgency, follow-up actions and resource categories
//!
//! Rules are evaluated in table order. Each matching rule appends its actions
//! and resources; a rule that carries an urgency overwrites the current one,
//! so the last matching rule with an urgency decides the result.

use super::types::{
    ActionTag, ConversationContext, Emotion, Mood, ResourceCategory, TriageResult, Urgency,
};

enum Trigger {
    Context(fn(&ConversationContext) -> bool),
    /// Any of these substrings in the lower-cased message
    Phrases(&'static [&'static str]),
}

struct Rule {
    trigger: Trigger,
    urgency: Option<Urgency>,
    actions: &'static [ActionTag],
    resources: &'static [ResourceCategory],
    peer_support: bool,
}

fn is_acute_distress(context: &ConversationContext) -> bool {
    context.emotion == Some(Emotion::Panicked) || context.mood == Some(Mood::Crisis)
}

const RULES: &[Rule] = &[
    Rule {
        trigger: Trigger::Context(is_acute_distress),
        urgency: Some(Urgency::High),
        actions: &[ActionTag::BreathingExercise],
        resources: &[],
        peer_support: false,
    },
    Rule {
        trigger: Trigger::Phrases(&["voices", "hearing things"]),
        urgency: Some(Urgency::Medium),
        actions: &[ActionTag::GroundingExercise],
        resources: &[ResourceCategory::MentalHealth],
        peer_support: true,
    },
    Rule {
        trigger: Trigger::Phrases(&["drugs", "withdrawal"]),
        urgency: Some(Urgency::Medium),
        actions: &[ActionTag::FindDetox],
        resources: &[ResourceCategory::SubstanceAbuse],
        peer_support: true,
    },
    Rule {
        trigger: Trigger::Phrases(&["hungry", "food"]),
        urgency: None,
        actions: &[ActionTag::FindFood],
        resources: &[ResourceCategory::FoodPantry],
        peer_support: false,
    },
    Rule {
        trigger: Trigger::Phrases(&["cold", "shelter"]),
        urgency: Some(Urgency::High),
        actions: &[ActionTag::FindShelter],
        resources: &[ResourceCategory::EmergencyShelter],
        peer_support: false,
    },
    Rule {
        trigger: Trigger::Phrases(&["lonely", "alone", "nobody"]),
        urgency: None,
        actions: &[ActionTag::PeerConnection],
        resources: &[],
        peer_support: true,
    },
    Rule {
        trigger: Trigger::Phrases(&["phone", "charge", "wifi"]),
        urgency: None,
        actions: &[ActionTag::FindCharging],
        resources: &[ResourceCategory::TechResources],
        peer_support: false,
    },
];

impl Rule {
    fn matches(&self, lowered: &str, context: &ConversationContext) -> bool {
        match self.trigger {
            Trigger::Context(predicate) => predicate(context),
            Trigger::Phrases(phrases) => phrases.iter().any(|p| lowered.contains(p)),
        }
    }

    fn apply(&self, result: &mut TriageResult) {
        if let Some(urgency) = self.urgency {
            result.urgency = urgency;
        }
        result.actions.extend_from_slice(self.actions);
        result.resources.extend_from_slice(self.resources);
        result.needs_peer_support |= self.peer_support;
    }
}

/// Classify an exchange.
///
/// `_ai_response` is accepted so response-content rules can be added without
/// changing callers; no current rule reads it.
pub fn analyze(message: &str, _ai_response: &str, context: &ConversationContext) -> TriageResult {
    let lowered = message.to_lowercase();
    let mut result = TriageResult::default();

    for rule in RULES.iter().filter(|rule| rule.matches(&lowered, context)) {
        rule.apply(&mut result);
    }

    result
}
