//! API request and response types

use crate::catalog::ResourceEntry;
use crate::triage::types::or_default;
use crate::triage::{ConversationContext, ConversationTurn};
use serde::{Deserialize, Serialize};

/// Body of `POST /crisis-chat`.
///
/// Only `message` is required. Null or mistyped history and context read as
/// absent so the danger check still runs on the message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "or_default")]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub conversation_history: Vec<ConversationTurn>,
    #[serde(default, deserialize_with = "or_default")]
    pub context: ConversationContext,
}

/// Body of `POST /resources/nearby`
#[derive(Debug, Deserialize)]
pub struct NearbyRequest {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "type", default)]
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
    pub resources: Vec<ResourceEntry>,
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub tips: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
