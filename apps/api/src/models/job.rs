use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row of the shared `jobs` listing table. Not user-scoped.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobListing {
    pub id: Uuid,
    pub job_title: String,
    pub company: String,
    pub platform: Option<String>,
    pub location: Option<String>,
    pub remote: bool,
    pub job_description: String,
    pub requirements: String,
    pub posted_date: DateTime<Utc>,
    pub salary_range: Option<String>,
    pub job_type: Option<String>,
    pub work_preference: Option<String>,
    pub industry: Option<String>,
}

/// Filters applied to the listing table; every `Some` narrows the result.
#[derive(Debug, Clone, Default)]
pub struct JobSearch {
    pub title_contains: Option<String>,
    pub industry: Option<String>,
    pub work_preference: Option<String>,
}

impl JobSearch {
    /// In-memory equivalent of the SQL filter in `PgStore::search_jobs`.
    #[cfg(test)]
    pub fn matches(&self, job: &JobListing) -> bool {
        let title_ok = self.title_contains.as_deref().map_or(true, |t| {
            job.job_title.to_lowercase().contains(&t.to_lowercase())
        });
        let industry_ok = self
            .industry
            .as_deref()
            .map_or(true, |i| job.industry.as_deref() == Some(i));
        let mode_ok = self
            .work_preference
            .as_deref()
            .map_or(true, |w| job.work_preference.as_deref() == Some(w));
        title_ok && industry_ok && mode_ok
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobMatch {
    pub id: i64,
    pub user_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub job_url: Option<String>,
    pub match_score: i32,
    pub match_reasons: Vec<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Applied,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Rejected => "rejected",
            MatchStatus::Applied => "applied",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewJobMatch {
    pub job_title: String,
    pub company_name: String,
    pub job_url: Option<String>,
    pub match_score: i32,
    pub match_reasons: Vec<String>,
    pub status: MatchStatus,
}
