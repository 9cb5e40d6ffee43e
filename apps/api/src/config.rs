use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub s3_endpoint: String,
    pub s3_region: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    /// Bucket holding uploaded résumé PDFs.
    pub resume_bucket: String,
    /// Bucket holding generated résumés and cover letters.
    pub documents_bucket: String,
    /// Base URL objects are publicly reachable under.
    pub storage_public_url: String,
    pub auth_url: String,
    pub auth_anon_key: String,
    pub openai_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    /// Where the auth service sends the browser back after an OAuth round trip.
    pub site_url: String,
    pub port: u16,
    pub rust_log: String,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_endpoint = require_env("S3_ENDPOINT")?;

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            storage_public_url: optional_env("STORAGE_PUBLIC_URL", &s3_endpoint),
            s3_endpoint,
            s3_region: optional_env("S3_REGION", "us-east-1"),
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            resume_bucket: optional_env("RESUME_BUCKET", "resumes"),
            documents_bucket: optional_env("DOCUMENTS_BUCKET", "custom-documents"),
            auth_url: require_env("AUTH_URL")?,
            auth_anon_key: require_env("AUTH_ANON_KEY")?,
            openai_api_key: require_env("OPENAI_API_KEY")?,
            llm_api_url: optional_env(
                "LLM_API_URL",
                "https://api.openai.com/v1/chat/completions",
            ),
            llm_model: optional_env("LLM_MODEL", "gpt-4"),
            site_url: optional_env("SITE_URL", "http://localhost:8080"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info"),
            run_migrations: parse_flag(std::env::var("RUN_MIGRATIONS").ok().as_deref()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
