//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::state::{AppState, SessionAction, SessionError};
use super::responses::{
    ApiError, CreateSessionRequest, HealthResponse, NowQuery, SessionActionRequest, SessionInfo,
    StatusResponse,
};

/// Unwrap an extractor, turning its rejection into a JSON error
fn decoded<T, R>(extracted: Result<T, R>, context: &str) -> Result<T, ApiError>
where
    R: std::fmt::Display,
    ApiError: From<R>,
{
    extracted.map_err(|rejection| {
        warn!("{}: {}", context, rejection);
        ApiError::from(rejection)
    })
}

fn log_failure(context: &str, err: &SessionError) {
    match err {
        SessionError::LockPoisoned(_) => error!("{}: {}", context, err),
        _ => warn!("{}: {}", context, err),
    }
}

/// Handle POST /api/v1/sessions - Start a new timer session
pub async fn create_session_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<Json<SessionInfo>, ApiError> {
    let Json(body) = decoded(payload, "Rejected session body")?;
    match state.create_session(body.duration_ms, body.now_ms) {
        Ok(view) => Ok(Json(view.into())),
        Err(e) => {
            log_failure("Failed to create session", &e);
            Err(e.into())
        }
    }
}

/// Handle GET /api/v1/sessions/:id - Read a session
pub async fn get_session_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    query: Result<Query<NowQuery>, QueryRejection>,
) -> Result<Json<SessionInfo>, ApiError> {
    let Query(query) = decoded(query, "Rejected session query")?;
    match state.get_session(&id, query.now_ms) {
        Ok(view) => Ok(Json(view.into())),
        Err(e) => {
            log_failure("Failed to read session", &e);
            Err(e.into())
        }
    }
}

/// Handle PATCH /api/v1/sessions/:id - Pause, resume, stop or skip a session
pub async fn session_action_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<SessionActionRequest>, JsonRejection>,
) -> Result<Json<SessionInfo>, ApiError> {
    let Json(body) = decoded(payload, "Rejected action body")?;
    let result = body
        .action
        .parse::<SessionAction>()
        .and_then(|action| state.apply_action(&id, action, body.now_ms));

    match result {
        Ok(view) => {
            info!("Action '{}' applied to session {}", body.action, id);
            Ok(Json(view.into()))
        }
        Err(e) => {
            log_failure("Failed to apply session action", &e);
            Err(e.into())
        }
    }
}

/// Handle GET /status - Return server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let sessions = match state.session_count() {
        Ok(count) => count,
        Err(e) => {
            error!("Failed to count sessions: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    Ok(Json(StatusResponse {
        sessions,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
