use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Metadata for the AI-customised documents generated for one listing.
/// One row per (user_id, job_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CustomDocuments {
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub resume_path: String,
    pub cover_letter_path: String,
    pub keywords_used: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    /// File stem used in storage keys.
    pub fn file_stem(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::CoverLetter => "cover_letter",
        }
    }
}
