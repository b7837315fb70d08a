//! HTTP Endpoints
//!
//! REST API over dialogue sessions.

use axum::{
    extract::{Json, Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use plan_assistant_agent::DialogueState;
use plan_assistant_core::Response;

use crate::metrics::record_turn;
use crate::session::SessionSummary;
use crate::state::AppState;
use crate::ServerError;

/// Longest utterance accepted on a turn
const MAX_TURN_CHARS: usize = 2_000;

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let cors_layer = build_cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/api/sessions", post(create_session).get(list_sessions))
        .route("/api/sessions/:id", get(get_session).delete(delete_session))
        .route("/api/sessions/:id/turns", post(take_turn))
        .route("/api/sessions/:id/cancel", post(cancel))
        .route("/api/sessions/:id/back", post(go_back))
        .route("/api/sessions/:id/reset", post(reset))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Configured origins, or any origin when none are configured
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!(%origin, "Invalid CORS origin");
                None
            })
        })
        .collect();

    tracing::info!(origins = parsed.len(), "CORS configured");
    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(methods)
        .allow_headers(Any)
}

#[derive(Debug, Serialize)]
struct CreateSessionResponse {
    session_id: String,
    response: Response,
}

/// Start a conversation and return its greeting
async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), ServerError> {
    let session = state.create_session()?;
    let response = session.greeting();

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session.id.clone(),
            response,
        }),
    ))
}

#[derive(Debug, Serialize)]
struct SessionList {
    sessions: Vec<SessionSummary>,
    count: usize,
}

async fn list_sessions(State(state): State<AppState>) -> Json<SessionList> {
    let sessions = state.sessions.list();
    Json(SessionList {
        count: sessions.len(),
        sessions,
    })
}

/// Dialogue state snapshot
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DialogueState>, ServerError> {
    let session = state.sessions.require(&id)?;
    Ok(Json(session.snapshot()))
}

async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    if state.sessions.remove(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ServerError::SessionNotFound(id))
    }
}

#[derive(Debug, Deserialize)]
struct TurnRequest {
    text: String,
}

/// One user utterance
async fn take_turn(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<TurnRequest>,
) -> Result<Json<Response>, ServerError> {
    if request.text.chars().count() > MAX_TURN_CHARS {
        return Err(ServerError::InvalidRequest(format!(
            "text longer than {} characters",
            MAX_TURN_CHARS
        )));
    }

    let session = state.sessions.require(&id)?;
    let response = session.handle_turn(&request.text);

    tracing::debug!(
        session_id = %id,
        ui_hint = response.ui_hint.as_str(),
        error_kind = ?response.error_kind,
        "Turn processed"
    );
    record_turn(response.ui_hint);

    Ok(Json(response))
}

async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Response>, ServerError> {
    let session = state.sessions.require(&id)?;
    Ok(Json(session.cancel()))
}

async fn go_back(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Response>, ServerError> {
    let session = state.sessions.require(&id)?;
    Ok(Json(session.go_back()))
}

async fn reset(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ServerError> {
    let session = state.sessions.require(&id)?;
    session.reset();
    Ok(StatusCode::NO_CONTENT)
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": state.config.environment,
        "sessions": state.sessions.count(),
    }))
}

/// Prometheus text exposition
async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics_handle() {
        Some(handle) if state.config.observability.metrics_enabled => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        ),
        _ => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain")],
            "metrics disabled".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plan_assistant_config::Settings;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Settings::default());
        let _ = create_router(state);
    }

    #[test]
    fn test_cors_with_origins() {
        let _ = build_cors_layer(&["http://localhost:3000".to_string()]);
        let _ = build_cors_layer(&[]);
    }
}
