//! JSON endpoints over the question pipeline.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use campus_agent::AgentRuntime;
use campus_core::domain::extraction::ExtractionResult;
use campus_core::errors::InterfaceError;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

pub const CORRELATION_HEADER: &str = "x-correlation-id";

#[derive(Clone)]
pub struct ApiState {
    runtime: Arc<AgentRuntime>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct RosterReloadResponse {
    pub entries: usize,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    correlation_id: String,
}

/// User-safe error response; the internal message only goes to the log.
pub struct ApiError(InterfaceError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = ErrorBody {
            error: self.0.user_message(),
            correlation_id: self.0.correlation_id().to_string(),
        };
        with_correlation(body.correlation_id.clone(), (status, Json(body)).into_response())
    }
}

pub fn router(runtime: Arc<AgentRuntime>) -> Router {
    Router::new()
        .route("/v1/classify", post(classify))
        .route("/v1/ask", post(ask))
        .route("/v1/roster/reload", post(reload_roster))
        .with_state(ApiState { runtime })
}

/// `204 No Content` for bot commands, which are never classified.
async fn classify(
    State(state): State<ApiState>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let correlation_id = new_correlation_id();
    let request = read_question(payload, &correlation_id)?;
    let Some(result) = state.runtime.classify(&request.text) else {
        return Ok(with_correlation(correlation_id, StatusCode::NO_CONTENT.into_response()));
    };

    log_classified("api.classify.completed", &correlation_id, &result);
    Ok(with_correlation(correlation_id, Json(result).into_response()))
}

async fn ask(
    State(state): State<ApiState>,
    payload: Result<Json<QuestionRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let correlation_id = new_correlation_id();
    let request = read_question(payload, &correlation_id)?;
    let Some(reply) = state.runtime.handle_message(&request.text).await else {
        return Ok(with_correlation(correlation_id, StatusCode::NO_CONTENT.into_response()));
    };

    log_classified("api.ask.completed", &correlation_id, &reply.result);
    Ok(with_correlation(correlation_id, Json(reply).into_response()))
}

fn read_question(
    payload: Result<Json<QuestionRequest>, JsonRejection>,
    correlation_id: &str,
) -> Result<QuestionRequest, ApiError> {
    payload.map(|Json(request)| request).map_err(|rejection| {
        warn!(
            event_name = "api.request.rejected",
            correlation_id = %correlation_id,
            status = %rejection.status(),
            error = %rejection.body_text(),
            "question body rejected"
        );
        ApiError(InterfaceError::BadRequest {
            message: rejection.body_text(),
            correlation_id: correlation_id.to_string(),
        })
    })
}

async fn reload_roster(State(state): State<ApiState>) -> Result<Response, ApiError> {
    let correlation_id = new_correlation_id();

    match state.runtime.reload_roster().await {
        Ok(entries) => {
            info!(
                event_name = "api.roster.reloaded",
                correlation_id = %correlation_id,
                entries,
                "roster reloaded on request"
            );
            let body = Json(RosterReloadResponse { entries });
            Ok(with_correlation(correlation_id, body.into_response()))
        }
        Err(error) => {
            warn!(
                event_name = "api.roster.reload_failed",
                correlation_id = %correlation_id,
                error = %error,
                "roster reload failed; previous roster stays active"
            );
            Err(ApiError(error.into_interface(correlation_id)))
        }
    }
}

fn log_classified(event_name: &'static str, correlation_id: &str, result: &ExtractionResult) {
    info!(
        event_name,
        correlation_id = %correlation_id,
        category = %result.category,
        entity_count = result.entities.len(),
        "question classified"
    );
}

fn new_correlation_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn with_correlation(correlation_id: String, mut response: Response) -> Response {
    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        response.headers_mut().insert(HeaderName::from_static(CORRELATION_HEADER), value);
    }
    response
}
