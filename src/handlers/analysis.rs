//! # Audio Analysis Handler
//!
//! Handles `POST /analyze`, the endpoint the DAIW host application calls to
//! request analysis of an audio file (tempo, key, chords, song sections,
//! mood). The analysis pipeline is not implemented yet: the handler notes the
//! requested `audio_path` if one was sent, never touches the file, and
//! answers 200 with a fixed payload whose `error` field says analysis is
//! unavailable.
//!
//! ## Endpoint:
//! - `POST /analyze` - body: JSON object, optionally carrying `audio_path`

use crate::error::AppError;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::debug;

/// Response body for `POST /analyze`.
///
/// `bpm` and `key` are null until the analysis pipeline can compute them.
/// `chords` and `sections` have no element schema yet, so they stay untyped
/// JSON lists. Unavailability is reported through `error`, not through the
/// HTTP status.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub bpm: Option<f64>,
    pub key: Option<String>,
    pub chords: Vec<serde_json::Value>,
    pub sections: Vec<serde_json::Value>,
    pub mood: String,
    pub error: String,
}

pub async fn analyze_audio(
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    // Record which file the host application wanted analyzed. The file is
    // not opened - there is no pipeline to feed it to yet.
    let audio_path = body.get("audio_path").and_then(|v| v.as_str());
    debug!(
        audio_path = audio_path.unwrap_or("<none>"),
        "Analysis request received, returning placeholder"
    );

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        bpm: None,
        key: None,
        chords: Vec::new(),
        sections: Vec::new(),
        mood: String::new(),
        error: "Audio analysis not yet implemented".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::json;

    fn expected_body() -> serde_json::Value {
        json!({
            "bpm": null,
            "key": null,
            "chords": [],
            "sections": [],
            "mood": "",
            "error": "Audio analysis not yet implemented"
        })
    }

    #[actix_web::test]
    async fn test_analyze_with_audio_path() {
        let app = test::init_service(
            App::new().route("/analyze", web::post().to(analyze_audio)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_json(json!({"audio_path": "/tmp/song.wav"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, expected_body());
    }

    #[actix_web::test]
    async fn test_analyze_without_audio_path() {
        let app = test::init_service(
            App::new().route("/analyze", web::post().to(analyze_audio)),
        )
        .await;

        // Absence of audio_path does not change the output
        let req = test::TestRequest::post()
            .uri("/analyze")
            .set_json(json!({}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, expected_body());
    }

    #[actix_web::test]
    async fn test_analyze_is_idempotent() {
        let app = test::init_service(
            App::new().route("/analyze", web::post().to(analyze_audio)),
        )
        .await;

        let first = test::call_and_read_body(
            &app,
            test::TestRequest::post()
                .uri("/analyze")
                .set_json(json!({"audio_path": "/tmp/song.wav"}))
                .to_request(),
        )
        .await;
        let second = test::call_and_read_body(
            &app,
            test::TestRequest::post()
                .uri("/analyze")
                .set_json(json!({"audio_path": "/tmp/other.wav", "extra": true}))
                .to_request(),
        )
        .await;
        // Byte-identical regardless of input - no file access, no state
        assert_eq!(first, second);
    }
}
