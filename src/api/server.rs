//! axum server for the writing endpoints.

use std::fmt;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{info, warn};
use tokio::net::TcpListener;

use super::{
    CONTINUE_PATH, ContinueWritingRequest, ErrorDetail, ErrorResponse, GENERATE_PATH,
    GenerateWritingRequest, GeneratedTextResponse, HEALTH_PATH, HealthResponse,
};
use crate::gateway::{GenerationError, WritingBackend};

// ============================================================================
// State
// ============================================================================

pub struct ServerState {
    pub backend: Arc<dyn WritingBackend>,
}

impl ServerState {
    pub fn new(backend: Arc<dyn WritingBackend>) -> Self {
        Self { backend }
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug)]
pub enum ApiError {
    /// The request was well-formed JSON but not usable (e.g. blank prompt).
    BadRequest(String),
    /// The backend could not produce text.
    Generation(GenerationError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Generation(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Generation(_) => "generation_failed",
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "bad request: {msg}"),
            ApiError::Generation(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<GenerationError> for ApiError {
    fn from(e: GenerationError) -> Self {
        ApiError::Generation(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Routes
// ============================================================================

pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route(HEALTH_PATH, get(health))
        .route(GENERATE_PATH, post(generate_writing))
        .route(CONTINUE_PATH, post(continue_writing))
        .with_state(state)
}

/// Binds `addr` and serves until the process is stopped.
pub async fn serve(addr: &str, backend: Arc<dyn WritingBackend>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Writing API listening on {}", listener.local_addr()?);
    axum::serve(listener, router(Arc::new(ServerState::new(backend)))).await
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn generate_writing(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<GenerateWritingRequest>,
) -> Result<Json<GeneratedTextResponse>, ApiError> {
    require_prompt(&body.prompt)?;

    let generated_text = state.backend.generate(&body.prompt).await.map_err(|e| {
        warn!("generateWriting failed: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(GeneratedTextResponse { generated_text }))
}

async fn continue_writing(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<ContinueWritingRequest>,
) -> Result<Json<GeneratedTextResponse>, ApiError> {
    require_prompt(&body.original_prompt)?;

    let generated_text = state
        .backend
        .continue_writing(&body.original_prompt, &body.original_generated_text)
        .await
        .map_err(|e| {
            warn!("continueWriting failed: {}", e);
            ApiError::from(e)
        })?;
    Ok(Json(GeneratedTextResponse { generated_text }))
}

fn require_prompt(prompt: &str) -> Result<(), ApiError> {
    if prompt.trim().is_empty() {
        return Err(ApiError::BadRequest("prompt must not be blank".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::ProviderError;

    #[test]
    fn blank_prompt_is_rejected() {
        for blank in ["", "   ", "\n"] {
            assert!(matches!(require_prompt(blank), Err(ApiError::BadRequest(_))));
        }
        assert!(require_prompt("hello").is_ok());
    }

    #[test]
    fn error_codes_map_to_statuses() {
        let bad = ApiError::BadRequest("x".to_string());
        assert_eq!(bad.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(bad.error_code(), "bad_request");

        let failed = ApiError::from(GenerationError::Provider(ProviderError::Network(
            "refused".to_string(),
        )));
        assert_eq!(failed.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(failed.error_code(), "generation_failed");
        assert!(failed.to_string().starts_with("generation failed"));
    }

    #[test]
    fn error_response_has_status_and_json_body() {
        let response = ApiError::BadRequest("prompt must not be blank".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("application/json"));
    }
}
