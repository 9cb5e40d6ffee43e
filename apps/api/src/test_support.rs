//! Router-test harness: the real router over in-memory collaborators.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::memory::MemoryAuth;
use crate::config::Config;
use crate::llm_client::canned::CannedGenerator;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::memory::MemoryObjectStore;
use crate::store::memory::MemoryStore;

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://localhost/jobtrack_test".to_string(),
        s3_endpoint: "http://localhost:9000".to_string(),
        s3_region: "us-east-1".to_string(),
        aws_access_key_id: "test".to_string(),
        aws_secret_access_key: "test".to_string(),
        resume_bucket: "resumes".to_string(),
        documents_bucket: "custom-documents".to_string(),
        storage_public_url: "https://storage.test".to_string(),
        auth_url: "https://auth.test".to_string(),
        auth_anon_key: "anon".to_string(),
        openai_api_key: "sk-test".to_string(),
        llm_api_url: "https://llm.test/v1/chat/completions".to_string(),
        llm_model: "gpt-4".to_string(),
        site_url: "http://localhost:8080".to_string(),
        port: 8080,
        rust_log: "info".to_string(),
        run_migrations: false,
    }
}

/// Handles on every double so tests can seed and inspect them.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub storage: Arc<MemoryObjectStore>,
    pub auth: Arc<MemoryAuth>,
    pub generator: Arc<CannedGenerator>,
    pub config: Config,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_store(MemoryStore::new())
    }

    pub fn with_store(store: MemoryStore) -> Self {
        Self {
            store: Arc::new(store),
            storage: Arc::new(MemoryObjectStore::new()),
            auth: Arc::new(MemoryAuth::new()),
            generator: Arc::new(CannedGenerator::new()),
            config: test_config(),
        }
    }

    pub fn state(&self) -> AppState {
        AppState {
            store: self.store.clone(),
            storage: self.storage.clone(),
            auth: self.auth.clone(),
            generator: self.generator.clone(),
            config: self.config.clone(),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state())
    }

    /// Registers a user and returns (user id, bearer token).
    pub fn sign_in(&self, email: &str) -> (uuid::Uuid, String) {
        let (user, token) = self.auth.register(email);
        (user.id, token)
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.send(request).await;
        let status = response.status();
        (status, read_json(response).await)
    }
}

pub async fn read_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// Minimal multipart body with a single file field.
pub fn multipart_body(field: &str, file_name: &str, content_type: &str, data: &[u8]) -> (String, Vec<u8>) {
    let boundary = "jobtrack-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={boundary}"), body)
}
