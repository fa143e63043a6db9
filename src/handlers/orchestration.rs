//! # AI Orchestration Handler
//!
//! Handles `POST /process`, the endpoint the DAIW host application calls to
//! hand a request to the AI layer. Orchestration itself is not implemented
//! yet: the handler accepts any JSON object, ignores its contents, and
//! answers 200 with a fixed payload saying so. "Not implemented" travels in
//! the response body rather than as an HTTP error status so the host
//! application can treat the service as reachable while the AI layer is
//! being built.
//!
//! ## Endpoint:
//! - `POST /process` - body: arbitrary JSON object (ignored)

use crate::error::AppError;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::debug;

/// Response body for `POST /process`.
///
/// `commands` is the ordered list of actions the orchestrator wants the host
/// application to perform. No command schema exists yet, so the list is
/// always empty and the elements stay untyped JSON.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub response: String,
    pub commands: Vec<serde_json::Value>,
}

pub async fn process_request(
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    // The request payload carries whatever the host application wants the AI
    // to see. Until orchestration exists there is nothing to do with it.
    debug!(
        fields = body.as_object().map(|m| m.len()).unwrap_or(0),
        "Orchestration request received, returning placeholder"
    );

    Ok(HttpResponse::Ok().json(ProcessResponse {
        response: "AI service is running. Orchestration not yet implemented.".to_string(),
        commands: Vec::new(),
    }))
}
