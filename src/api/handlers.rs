//! HTTP request handlers

use super::sse::sse_stream;
use super::types::{
    AcceptedResponse, AdPromptResponse, ChatRequest, ChatResponse, DraftRequest, ErrorResponse,
    StateView, SuccessResponse, TabRequest, WatchAdRequest,
};
use super::ApiState;
use crate::runtime::DispatchError;
use crate::state_machine::state::{AD_PROMPT, AD_REWARD};
use crate::state_machine::{Event, TransitionError};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Snapshot
        .route("/api/state", get(get_state))
        // SSE streaming
        .route("/api/stream", get(stream_state))
        // Navigation
        .route("/api/tab", post(set_tab))
        // Number provisioning
        .route("/api/number/generate", post(generate_number))
        // Advertisement reward
        .route("/api/ads/prompt", get(ad_prompt))
        .route("/api/ads/watch", post(watch_ad))
        // Assistant
        .route("/api/assistant/draft", put(update_draft))
        .route("/api/assistant/chat", post(send_chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// State
// ============================================================

async fn get_state(State(state): State<ApiState>) -> Json<StateView> {
    Json(StateView::from(state.runtime.snapshot()))
}

async fn stream_state(State(state): State<ApiState>) -> impl IntoResponse {
    // Subscribe before taking the snapshot so no change falls in between
    let broadcast_rx = state.runtime.subscribe();
    let initial = state.runtime.snapshot();
    sse_stream(initial, broadcast_rx)
}

// ============================================================
// User actions
// ============================================================

async fn set_tab(
    State(state): State<ApiState>,
    Json(req): Json<TabRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .runtime
        .dispatch(Event::SetActiveTab { tab: req.tab })
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn generate_number(
    State(state): State<ApiState>,
) -> Result<(StatusCode, Json<AcceptedResponse>), AppError> {
    state.runtime.dispatch(Event::GenerateNumber).await?;
    Ok((StatusCode::ACCEPTED, Json(AcceptedResponse { accepted: true })))
}

async fn ad_prompt() -> Json<AdPromptResponse> {
    Json(AdPromptResponse {
        prompt: AD_PROMPT,
        reward: AD_REWARD,
    })
}

async fn watch_ad(
    State(state): State<ApiState>,
    Json(req): Json<WatchAdRequest>,
) -> Result<Response, AppError> {
    state
        .runtime
        .dispatch(Event::WatchAd {
            confirmed: req.confirmed,
        })
        .await?;

    if req.confirmed {
        Ok((StatusCode::ACCEPTED, Json(AcceptedResponse { accepted: true })).into_response())
    } else {
        Ok(Json(AcceptedResponse { accepted: false }).into_response())
    }
}

async fn update_draft(
    State(state): State<ApiState>,
    Json(req): Json<DraftRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .runtime
        .dispatch(Event::UpdateDraft { text: req.text })
        .await?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn send_chat(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    match state
        .runtime
        .dispatch(Event::SendChat { text: req.text })
        .await
    {
        Ok(()) => Ok(Json(ChatResponse { queued: true })),
        Err(DispatchError::Rejected(e)) if e.is_silent() => Ok(Json(ChatResponse { queued: false })),
        Err(e) => Err(e.into()),
    }
}

async fn get_version() -> &'static str {
    concat!("brasilconnect ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl From<DispatchError> for AppError {
    fn from(error: DispatchError) -> Self {
        match error {
            DispatchError::Rejected(e) => match e {
                TransitionError::InsufficientCredits { .. }
                | TransitionError::NumberAlreadyAssigned
                | TransitionError::ProvisioningInProgress
                | TransitionError::AdInProgress
                | TransitionError::CreditLimitReached { .. }
                | TransitionError::AssistantBusy => AppError::Conflict(e.to_string()),
                TransitionError::EmptyMessage => AppError::BadRequest(e.to_string()),
                TransitionError::InvalidTransition(_) => AppError::Internal(e.to_string()),
            },
            DispatchError::Stopped => AppError::Unavailable(error.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
