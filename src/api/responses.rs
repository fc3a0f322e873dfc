//! API request and response structures

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{SessionError, SessionView},
    timer::{TimerError, TimerStatus},
};

/// Body of POST /api/v1/sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub duration_ms: i64,
    #[serde(default)]
    pub now_ms: Option<i64>,
}

/// Body of PATCH /api/v1/sessions/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionActionRequest {
    /// pause, resume, stop or skip
    pub action: String,
    #[serde(default)]
    pub now_ms: Option<i64>,
}

/// Query of GET /api/v1/sessions/:id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NowQuery {
    pub now_ms: Option<i64>,
}

/// Timer session as seen by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub id: String,
    pub status: TimerStatus,
    pub duration_ms: i64,
    pub remaining_ms: i64,
    pub start_ts: Option<i64>,
    pub paused_since: Option<i64>,
    pub paused_accum_ms: i64,
    pub end_ts: Option<i64>,
}

impl From<SessionView> for SessionInfo {
    fn from(view: SessionView) -> Self {
        Self {
            id: view.id,
            status: view.snapshot.status,
            duration_ms: view.snapshot.duration_ms,
            remaining_ms: view.remaining_ms,
            start_ts: view.snapshot.start_ts,
            paused_since: view.snapshot.paused_since,
            paused_accum_ms: view.snapshot.paused_accum_ms,
            end_ts: view.snapshot.end_ts,
        }
    }
}

/// Server status response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub sessions: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error body returned with every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

/// Handler error, rendered as a status code plus [`ErrorResponse`]
#[derive(Debug)]
pub enum ApiError {
    /// The session store refused the request
    Session(SessionError),
    /// The request body or query could not be decoded
    BadRequest { status: StatusCode, detail: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Session(SessionError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Session(SessionError::UnknownAction(_)) => StatusCode::BAD_REQUEST,
            ApiError::Session(SessionError::Timer(TimerError::InvalidArgument(_))) => StatusCode::BAD_REQUEST,
            ApiError::Session(SessionError::Timer(TimerError::InvalidTransition { .. })) => StatusCode::CONFLICT,
            ApiError::Session(SessionError::LockPoisoned(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest { status, .. } => *status,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Session(SessionError::NotFound(_)) => "not_found",
            ApiError::Session(SessionError::UnknownAction(_)) => "unknown_action",
            ApiError::Session(SessionError::Timer(TimerError::InvalidArgument(_))) => "invalid_argument",
            ApiError::Session(SessionError::Timer(TimerError::InvalidTransition { .. })) => "invalid_transition",
            ApiError::Session(SessionError::LockPoisoned(_)) => "internal",
            ApiError::BadRequest { .. } => "bad_request",
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Session(err) => err.to_string(),
            ApiError::BadRequest { detail, .. } => detail.clone(),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.kind().to_string(),
            detail: self.detail(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
