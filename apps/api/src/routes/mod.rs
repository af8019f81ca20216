pub mod health;
pub mod pages;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::state::AppState;
use crate::{chat, jobs, prediction};

pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(pages::handle_index))
        .route("/chat", get(pages::handle_chat_page))
        .route("/jobs", get(pages::handle_jobs_page))
        .nest_service("/static", static_files)
        // JSON API
        .route("/predict", post(prediction::handlers::handle_predict))
        .route("/get_jobs", get(jobs::handlers::handle_get_jobs))
        .route("/api", post(chat::handlers::handle_chat))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::llm_client::{ChatBackend, LlmError, DEFAULT_MODEL};
    use crate::model::fixtures::sample_model;
    use crate::prediction::predictor::DEFAULT_THRESHOLD;
    use crate::prediction::video_links::PLACEHOLDER_LINKS;
    use crate::prediction::RolePredictor;

    struct CannedReply(&'static str);

    #[async_trait]
    impl ChatBackend for CannedReply {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Ok(self.0.to_string())
        }
    }

    struct QuotaExceeded;

    #[async_trait]
    impl ChatBackend for QuotaExceeded {
        async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 429,
                message: "Resource has been exhausted".to_string(),
            })
        }
    }

    fn app(dir: &Path, chat: Arc<dyn ChatBackend>) -> Router {
        let config = Config {
            port: 0,
            rust_log: "info".to_string(),
            model_path: dir.join("attached_assets/job_model.json"),
            jobs_csv_path: dir.join("attached_assets/jobs.csv"),
            templates_dir: dir.join("templates"),
            static_dir: dir.join("static"),
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: None,
            chat_timeout: None,
            prediction_threshold: DEFAULT_THRESHOLD,
        };
        build_router(AppState {
            predictor: Arc::new(RolePredictor::new(sample_model(), DEFAULT_THRESHOLD)),
            chat,
            config,
        })
    }

    fn default_app(dir: &Path) -> Router {
        app(dir, Arc::new(CannedReply("**Tip:** learn SQL")))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    async fn send_raw(app: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = send_raw(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_predict_returns_roles_with_two_links() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            default_app(dir.path()),
            post_json("/predict", r#"{"skills": ["Python", "SQL"], "interest": "Data"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([{
                "role": "Data Analyst",
                "video_links": [
                    "https://www.youtube.com/embed/o2mDheV9GFU?si=J-WUihm-mHmX90g_",
                    "https://www.youtube.com/embed/dMn2QFTyXUQ?si=czy-sidD8n3UHbv0"
                ]
            }])
        );
    }

    #[tokio::test]
    async fn test_predict_unknown_interest_uses_fallback_pair() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            default_app(dir.path()),
            post_json("/predict", r#"{"skills": ["Python"], "interest": "Astronomy"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["role"], "Data Analyst");
        assert_eq!(entries[1]["role"], "Software Developer");
        assert_eq!(entries[1]["video_links"], json!(PLACEHOLDER_LINKS));
    }

    #[tokio::test]
    async fn test_predict_missing_fields_is_400() {
        let dir = tempfile::tempdir().unwrap();
        for body in [
            r#"{"interest": "Data"}"#,
            r#"{"skills": [], "interest": "Data"}"#,
            r#"{"skills": ["Python"]}"#,
            r#"{"skills": ["Python"], "interest": ""}"#,
            r#"{"skills": null, "interest": null}"#,
        ] {
            let (status, json_body) = send(default_app(dir.path()), post_json("/predict", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
            assert_eq!(json_body, json!({ "error": "Missing skills or interest" }));
        }
    }

    #[tokio::test]
    async fn test_predict_non_string_skills_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            default_app(dir.path()),
            post_json("/predict", r#"{"skills": [1, 2], "interest": "Data"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let roles: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|entry| entry["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["Data Analyst", "Software Developer"]);
    }

    #[tokio::test]
    async fn test_predict_malformed_body_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(default_app(dir.path()), post_json("/predict", "not json")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_get_jobs_returns_every_row() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("attached_assets")).unwrap();
        std::fs::write(
            dir.path().join("attached_assets/jobs.csv"),
            "job_role,skills,interest\n\
             Data Analyst,\"SQL, Excel\",Data\n\
             Frontend Developer,\"React, CSS\",Web\n\
             DevOps Engineer,\"Docker, Kubernetes\",Cloud\n",
        )
        .unwrap();

        let (status, body) = send(default_app(dir.path()), get("/get_jobs")).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[1],
            json!({ "job_role": "Frontend Developer", "skills": "React, CSS", "interest": "Web" })
        );
    }

    #[tokio::test]
    async fn test_get_jobs_missing_file_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(default_app(dir.path()), get("/get_jobs")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Error fetching job listings" }));
    }

    #[tokio::test]
    async fn test_chat_returns_stripped_reply() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            default_app(dir.path()),
            post_json("/api", r#"{"message": "What should I learn?"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "response": "Tip: learn SQL" }));
    }

    #[tokio::test]
    async fn test_chat_empty_message_is_400() {
        let dir = tempfile::tempdir().unwrap();
        for body in [r#"{"message": ""}"#, "{}"] {
            let (status, json_body) = send(default_app(dir.path()), post_json("/api", body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json_body, json!({ "error": "Please enter a message" }));
        }
    }

    #[tokio::test]
    async fn test_chat_backend_failure_surfaces_error_text() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(
            app(dir.path(), Arc::new(QuotaExceeded)),
            post_json("/api", r#"{"message": "hello"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({ "error": "API error (status 429): Resource has been exhausted" })
        );
    }

    #[tokio::test]
    async fn test_pages_are_served_from_templates_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("templates")).unwrap();
        std::fs::write(dir.path().join("templates/index.html"), "<h1>Career Path</h1>").unwrap();

        let (status, bytes) = send_raw(default_app(dir.path()), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"<h1>Career Path</h1>");

        let (status, body) = send(default_app(dir.path()), get("/chat")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
    }

    #[tokio::test]
    async fn test_static_assets_are_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("static/js")).unwrap();
        std::fs::write(dir.path().join("static/js/chat.js"), "sendMessage();").unwrap();

        let (status, bytes) = send_raw(default_app(dir.path()), get("/static/js/chat.js")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"sendMessage();");
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = send(default_app(dir.path()), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["roles"], 4);
    }
}
