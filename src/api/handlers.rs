//! HTTP request handlers

use super::types::{
    ChatRequest, ErrorResponse, HealthResponse, NearbyRequest, NearbyResponse, TipsResponse,
};
use super::AppState;
use crate::triage::fallback_response;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tracing::Instrument;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/crisis-chat", post(crisis_chat))
        .route("/resources/nearby", post(nearby_resources))
        .route("/survival-tips/:category", get(survival_tips))
        .route("/health", get(health));

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .with_state(state)
}

// ============================================================
// Crisis Chat
// ============================================================

/// Always answers with a `CrisisResponse`. The fallback body goes out with
/// a 500 so clients can tell it apart from a normal reply.
async fn crisis_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();

    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::warn!(%request_id, error = %rejection.body_text(), "Rejected crisis chat body");
            return fallback_reply();
        }
    };

    let Some(message) = req.message else {
        tracing::warn!(%request_id, "Crisis chat body has no message");
        return fallback_reply();
    };

    let span = tracing::info_span!(
        "crisis_chat",
        %request_id,
        session_id = req.context.session_id.as_deref(),
        language = %req.context.language,
        history = req.conversation_history.len(),
    );

    let response = state
        .orchestrator
        .handle_crisis_chat(&message, &req.conversation_history, &req.context)
        .instrument(span)
        .await;

    let status = if response.fallback {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };
    (status, Json(response)).into_response()
}

fn fallback_reply() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, Json(fallback_response())).into_response()
}

// ============================================================
// Lookups
// ============================================================

async fn nearby_resources(
    State(state): State<AppState>,
    payload: Result<Json<NearbyRequest>, JsonRejection>,
) -> Result<Json<NearbyResponse>, AppError> {
    let Json(req) = payload.map_err(AppError::from)?;

    tracing::debug!(
        category = %req.category,
        latitude = ?req.latitude,
        longitude = ?req.longitude,
        "Nearby resource lookup"
    );

    Ok(Json(NearbyResponse {
        resources: state
            .orchestrator
            .catalog()
            .lookup_resources(&req.category)
            .to_vec(),
    }))
}

async fn survival_tips(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<TipsResponse> {
    Json(TipsResponse {
        tips: state.orchestrator.catalog().lookup_tips(&category).to_vec(),
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: state.service_name.to_string(),
    })
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::BytesRejection(e) => AppError::Internal(e.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
