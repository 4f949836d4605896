//! HTTP surface.
//!
//! Thin handlers over a shared [`QueryPipeline`]. The pipeline never fails a
//! request, so every `/ask` gets a 200 with an answer envelope.

use std::sync::Arc;

use agrigenius_pipeline::{AnswerEnvelope, QueryPipeline};
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

/// Shared across handlers; built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QueryPipeline>,
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    #[serde(rename = "messageText", default)]
    pub message_text: String,
    pub language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GreetingRequest {
    pub language: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/languages", get(languages))
        .route("/greeting", post(greeting))
        .route("/health", get(health))
        .with_state(state)
}

async fn ask(State(state): State<AppState>, Form(form): Form<AskForm>) -> Json<AnswerEnvelope> {
    let resolution = state
        .pipeline
        .resolve(&form.message_text, form.language.as_deref())
        .await;
    tracing::info!(
        source = %resolution.source,
        language = %resolution.envelope.detected_language,
        "Answered /ask"
    );
    Json(resolution.envelope)
}

async fn languages(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "languages": state.pipeline.language().supported_languages() }))
}

// A missing or malformed body falls back to English.
async fn greeting(
    State(state): State<AppState>,
    body: Option<Json<GreetingRequest>>,
) -> Json<Value> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let tag = request.language.as_deref().unwrap_or("en");
    Json(json!({ "greeting": state.pipeline.language().greeting(tag) }))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "mode": state.pipeline.capabilities().mode(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrigenius_core::Capabilities;
    use agrigenius_knowledge::{KnowledgeStore, RuleResponder};
    use agrigenius_language::LanguageService;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn app() -> Router {
        let pipeline = QueryPipeline::new(
            Arc::new(LanguageService::passthrough()),
            Arc::new(KnowledgeStore::default()),
            Arc::new(RuleResponder::default()),
            None,
            Capabilities::default(),
        );
        router(AppState {
            pipeline: Arc::new(pipeline),
        })
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn form(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/ask")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_ask_returns_envelope() {
        let (status, body) = send(form("messageText=how+to+grow+tomato")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["detectedLanguage"], "en");
        assert!(body["answer"].as_str().unwrap().to_lowercase().contains("tomato"));
    }

    #[tokio::test]
    async fn test_ask_empty_message_prompts() {
        let (status, body) = send(form("messageText=%20%20")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "Please enter a question.");
    }

    #[tokio::test]
    async fn test_ask_missing_field_uses_hint() {
        let (_, body) = send(form("language=es")).await;
        assert_eq!(body["detectedLanguage"], "es");
    }

    #[tokio::test]
    async fn test_languages_lists_english_first() {
        let request = Request::builder().uri("/languages").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        let languages = body["languages"].as_array().unwrap();
        assert!(languages.len() >= 10);
        assert_eq!(languages[0]["code"], "en");
        assert_eq!(languages[0]["name"], "English");
    }

    #[tokio::test]
    async fn test_greeting_by_language() {
        let request = Request::builder()
            .method("POST")
            .uri("/greeting")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"language":"hi"}"#))
            .unwrap();
        let (_, body) = send(request).await;
        assert!(body["greeting"].as_str().unwrap().contains("नमस्ते"));
    }

    #[tokio::test]
    async fn test_greeting_without_body_is_english() {
        let request = Request::builder()
            .method("POST")
            .uri("/greeting")
            .body(Body::empty())
            .unwrap();
        let (_, body) = send(request).await;
        assert!(body["greeting"].as_str().unwrap().contains("Welcome to AgriGenius"));
    }

    #[tokio::test]
    async fn test_health_reports_fallback_mode() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "mode": "fallback"}));
    }
}
