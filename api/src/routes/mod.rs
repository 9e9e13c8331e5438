use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::config::ServerConfig;
use crate::schemas::{ANALYZE_PATH, HEALTH_PATH};

mod analyze;
mod health;

pub use analyze::analyze;
pub use health::{health_check, HealthReport};

/// Headroom for the non-file form fields and multipart framing.
const FORM_OVERHEAD_BYTES: u64 = 64 * 1024;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

pub fn router(config: ServerConfig) -> Router {
    let body_limit: usize = config
        .max_video_bytes()
        .saturating_add(FORM_OVERHEAD_BYTES)
        .try_into()
        .unwrap_or(usize::MAX);
    let static_dir = config.static_dir.clone();
    let state = AppState {
        config: Arc::new(config),
    };

    let app = Router::new()
        .route(HEALTH_PATH, get(health_check))
        .route(ANALYZE_PATH, post(analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    const BOUNDARY: &str = "javelink-test-boundary";

    enum Part<'a> {
        Text(&'a str, &'a str),
        File(&'a str, &'a [u8]),
    }

    fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File(filename, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: video/mp4\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn post_analyze(config: ServerConfig, parts: &[Part<'_>]) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(ANALYZE_PATH)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        let response = router(config).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn analyze_echoes_options_and_returns_metrics() {
        let (status, body) = post_analyze(
            ServerConfig::default(),
            &[
                Part::File("throw.mp4", b"fake video"),
                Part::Text("view", "rear"),
                Part::Text("handedness", "left"),
                Part::Text("scale_method", "auto"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["view"], "rear");
        assert_eq!(body["meta"]["handedness"], "left");
        assert_eq!(body["meta"]["scale_method"], "auto");
        assert_eq!(body["qc"]["overall_status"], "GOOD");
        assert_eq!(body["metrics"]["release_angle_deg"], 35.0);
        assert!(body.get("error").is_none());
    }

    #[tokio::test]
    async fn scale_method_defaults_to_marker() {
        let (status, body) = post_analyze(
            ServerConfig::default(),
            &[
                Part::File("throw.mov", b"fake video"),
                Part::Text("view", "side"),
                Part::Text("handedness", "right"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["meta"]["scale_method"], "marker");
    }

    #[tokio::test]
    async fn missing_file_is_reported_as_error_body() {
        let (status, body) = post_analyze(
            ServerConfig::default(),
            &[Part::Text("view", "side"), Part::Text("handedness", "right")],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "missing form field: file");
    }

    #[tokio::test]
    async fn unknown_view_is_rejected() {
        let (status, body) = post_analyze(
            ServerConfig::default(),
            &[
                Part::File("throw.mp4", b"fake video"),
                Part::Text("view", "overhead"),
                Part::Text("handedness", "right"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid view: \"overhead\"");
    }

    #[tokio::test]
    async fn disallowed_extension_is_rejected() {
        let (status, body) = post_analyze(
            ServerConfig::default(),
            &[
                Part::File("notes.txt", b"not a video"),
                Part::Text("view", "side"),
                Part::Text("handedness", "right"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(body["error"], "unsupported video format: notes.txt");
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let config = ServerConfig {
            max_video_mb: 0,
            ..ServerConfig::default()
        };
        let (status, body) = post_analyze(
            config,
            &[
                Part::File("throw.mp4", b"one byte is already too much"),
                Part::Text("view", "side"),
                Part::Text("handedness", "right"),
            ],
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["error"], "video exceeds the 0 MB upload limit");
    }

    #[tokio::test]
    async fn health_reports_service_name() {
        let request = Request::builder()
            .uri(HEALTH_PATH)
            .body(Body::empty())
            .unwrap();
        let response = router(ServerConfig::default())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "Javelink Lite");
        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(time::OffsetDateTime::parse(
            timestamp,
            &time::format_description::well_known::Rfc3339
        )
        .is_ok());
    }
}
