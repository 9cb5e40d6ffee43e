use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An email outreach record, joined with the title of the application it
/// belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmailOutreach {
    pub id: i64,
    pub user_id: Uuid,
    pub application_id: Option<i64>,
    pub recipient_email: String,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub status: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub job_title: Option<String>,
}
