//! Request-scoped value types for crisis triage

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Language assumed when a request does not name one
pub const DEFAULT_LANGUAGE: &str = "en";

/// One prior turn of the conversation, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationTurn {
    #[serde(default, deserialize_with = "or_default")]
    pub text: String,
    #[serde(default, deserialize_with = "or_default")]
    pub is_bot: bool,
}

/// Emotion reported by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Calm,
    Sad,
    Angry,
    Scared,
    Panicked,
    #[serde(other)]
    Other,
}

/// Mood reported by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Okay,
    Low,
    Anxious,
    Crisis,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Signals accompanying a chat message. Every field is independently
/// optional; a null or mistyped value reads as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContext {
    #[serde(default = "default_language", deserialize_with = "language_or_default")]
    pub language: String,
    #[serde(default, deserialize_with = "or_default")]
    pub emotion: Option<Emotion>,
    #[serde(default, deserialize_with = "or_default")]
    pub mood: Option<Mood>,
    #[serde(default, deserialize_with = "or_default")]
    pub location: Option<Location>,
    #[serde(default, deserialize_with = "or_default")]
    pub session_id: Option<String>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Decode a field, using `T::default()` when the value is null or has the
/// wrong shape instead of failing the whole body.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn language_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(code) if !code.trim().is_empty() => code,
        _ => default_language(),
    })
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self {
            language: default_language(),
            emotion: None,
            mood: None,
            location: None,
            session_id: None,
        }
    }
}

impl ConversationContext {
    #[cfg(test)]
    pub fn with_language(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            ..Self::default()
        }
    }

    pub fn is_english(&self) -> bool {
        self.language == DEFAULT_LANGUAGE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Immediate,
    Error,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Immediate => "immediate",
            Urgency::Error => "error",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Follow-up step surfaced to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionTag {
    CallHotline,
    FindEr,
    AlertCaseworker,
    BreathingExercise,
    GroundingExercise,
    FindDetox,
    FindFood,
    FindShelter,
    PeerConnection,
    FindCharging,
}

/// Class of real-world aid the conversation points toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    MentalHealth,
    SubstanceAbuse,
    FoodPantry,
    EmergencyShelter,
    TechResources,
}

/// Outcome of analyzing one exchange.
///
/// `actions` and `resources` keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageResult {
    pub urgency: Urgency,
    pub actions: Vec<ActionTag>,
    pub resources: Vec<ResourceCategory>,
    pub needs_peer_support: bool,
}

impl Default for TriageResult {
    fn default() -> Self {
        Self {
            urgency: Urgency::Low,
            actions: Vec::new(),
            resources: Vec::new(),
            needs_peer_support: false,
        }
    }
}

/// Payload returned to the client for every chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrisisResponse {
    pub message: String,
    pub urgency: Urgency,
    #[serde(default)]
    pub actions: Vec<ActionTag>,
    #[serde(default)]
    pub resources: Vec<ResourceCategory>,
    #[serde(default)]
    pub peer_support: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
}

impl CrisisResponse {
    pub fn from_triage(message: String, triage: TriageResult) -> Self {
        Self {
            message,
            urgency: triage.urgency,
            actions: triage.actions,
            resources: triage.resources,
            peer_support: triage.needs_peer_support,
            fallback: false,
        }
    }
}
