use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    pub id: i64,
    pub user_id: Uuid,
    pub company_name: String,
    pub job_title: String,
    pub job_url: Option<String>,
    pub platform: Option<String>,
    pub status: String,
    pub application_date: DateTime<Utc>,
    pub next_follow_up: Option<DateTime<Utc>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Interviewing,
    Offered,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Applied,
        ApplicationStatus::Interviewing,
        ApplicationStatus::Offered,
        ApplicationStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Interviewing => "interviewing",
            ApplicationStatus::Offered => "offered",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    /// Parses a stored status. Older rows were written capitalised ("Applied").
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

/// A validated application ready to be inserted.
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub company_name: String,
    pub job_title: String,
    pub job_url: Option<String>,
    pub platform: Option<String>,
    pub status: ApplicationStatus,
    pub application_date: DateTime<Utc>,
    pub next_follow_up: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationUpdate {
    pub status: Option<ApplicationStatus>,
    pub notes: Option<String>,
    pub next_follow_up: Option<DateTime<Utc>>,
}

impl ApplicationUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.notes.is_none() && self.next_follow_up.is_none()
    }
}
