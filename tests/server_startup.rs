//! Server Startup Tests
//!
//! Router wiring, command dispatch and configuration loading.

use std::io::Write;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use bytes::Bytes;
use serial_test::serial;
use tempfile::NamedTempFile;
use tokio::time::timeout;
use tower::util::ServiceExt;

use azure_tts_bot::command::help_text;
use azure_tts_bot::config::{ENV_SPEECH_KEY, ENV_SPEECH_REGION};
use azure_tts_bot::{
    AppState, SpeechSynthesizer, SynthesisResult, SynthesizerFactory, TTSResult, TtsConfig,
    routes,
};

/// Backend that returns a fixed payload without touching the network.
struct StaticFactory;

struct StaticSynthesizer;

#[async_trait]
impl SpeechSynthesizer for StaticSynthesizer {
    async fn speak_ssml(&mut self, _ssml: &str) -> TTSResult<SynthesisResult> {
        Ok(SynthesisResult::completed(
            Bytes::from_static(b"RIFF-static"),
            Duration::from_millis(300),
        ))
    }

    async fn close(&mut self) {}
}

impl SynthesizerFactory for StaticFactory {
    fn create_synthesizer(&self) -> TTSResult<Box<dyn SpeechSynthesizer>> {
        Ok(Box::new(StaticSynthesizer))
    }

    fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({ "provider": "static" })
    }
}

fn create_minimal_config(port: u16) -> TtsConfig {
    TtsConfig {
        host: "127.0.0.1".to_string(),
        port,
        speech_key: "test-key".into(),
        speech_region: "eastus".to_string(),
        ..Default::default()
    }
}

fn test_app() -> Router {
    let state = AppState::with_factory(create_minimal_config(3001), Arc::new(StaticFactory));
    routes::api::create_api_router().with_state(state)
}

/// Find an available port for testing
fn find_available_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn post_command(app: Router, message: &str) -> (StatusCode, Option<String>, Bytes) {
    let request = Request::builder()
        .method("POST")
        .uri("/command")
        .body(Body::from(message.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, body)
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "OK");
    assert_eq!(json["provider"]["provider"], "static");
}

#[tokio::test]
async fn test_tts_command_returns_audio() {
    let (status, content_type, body) = post_command(test_app(), "tts hello there").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("audio/x-wav"));
    assert_eq!(body, Bytes::from_static(b"RIFF-static"));
}

#[tokio::test]
async fn test_help_tts() {
    let (status, content_type, body) = post_command(test_app(), "help tts").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("text/plain; charset=utf-8"));
    assert_eq!(String::from_utf8(body.to_vec()).unwrap(), help_text());
}

#[tokio::test]
async fn test_tts_help_flag() {
    let (status, _, body) = post_command(test_app(), "tts --help").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body.to_vec()).unwrap(), help_text());
}

#[tokio::test]
async fn test_bare_help() {
    let (status, _, body) = post_command(test_app(), "help").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body.to_vec()).unwrap(), help_text());
}

#[tokio::test]
async fn test_unknown_command() {
    let (status, _, body) = post_command(test_app(), "weather tomorrow").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "Unknown command: weather"
    );

    let (status, _, _) = post_command(test_app(), "help weather").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_server_serves_requests() {
    let port = find_available_port();
    let state = AppState::with_factory(create_minimal_config(port), Arc::new(StaticFactory));
    let app = routes::api::create_api_router().with_state(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let result = timeout(Duration::from_secs(5), async {
        reqwest::Client::new()
            .post(format!("http://127.0.0.1:{}/command", port))
            .body("tts ping")
            .send()
            .await
    })
    .await
    .expect("request timed out")
    .expect("request failed");

    assert_eq!(result.status(), reqwest::StatusCode::OK);
    assert_eq!(result.bytes().await.unwrap(), Bytes::from_static(b"RIFF-static"));
    server.abort();
}

#[test]
#[serial]
fn test_config_file_loading() {
    // SAFETY: Test-only environment setup, serialized with #[serial]
    unsafe {
        std::env::remove_var(ENV_SPEECH_KEY);
        std::env::remove_var(ENV_SPEECH_REGION);
    }

    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "server:\n  port: 4100\nspeechKey: file-key\nspeechRegion: uksouth\ndefaultPitch: 1.5"
    )
    .unwrap();

    let config = TtsConfig::from_file(file.path()).unwrap();
    assert_eq!(config.port, 4100);
    assert_eq!(config.speech_region, "uksouth");
    assert_eq!(config.default_pitch, 1.5);

    let state = AppState::new(config).unwrap();
    assert_eq!(state.config.speech_key.expose(), "file-key");
}

#[test]
#[serial]
fn test_config_file_missing_credentials() {
    // SAFETY: Test-only environment setup, serialized with #[serial]
    unsafe {
        std::env::remove_var(ENV_SPEECH_KEY);
        std::env::remove_var(ENV_SPEECH_REGION);
    }

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "defaultLang: en-GB").unwrap();

    assert!(TtsConfig::from_file(file.path()).is_err());
}
