use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserPreferences {
    pub user_id: Uuid,
    pub job_title: String,
    pub location: String,
    pub is_remote: bool,
    pub industry: Option<String>,
    pub salary_range: Option<String>,
    /// `remote` | `hybrid` | `onsite`
    pub work_preference: Option<String>,
    pub portfolio_url: Option<String>,
    pub resume_url: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkPreference {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkPreference::Remote => "remote",
            WorkPreference::Hybrid => "hybrid",
            WorkPreference::Onsite => "onsite",
        }
    }
}

/// Profile fields accepted from the client. `resume_url` left as `None` keeps
/// the stored value; it is cleared through the résumé endpoints instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub location: Option<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub resume_url: Option<String>,
}

/// Preferences that passed validation and may be written.
#[derive(Debug, Clone)]
pub struct PreferencesUpdate {
    pub job_title: String,
    pub location: String,
    pub is_remote: bool,
    pub industry: Option<String>,
    pub salary_range: Option<String>,
    pub work_preference: Option<WorkPreference>,
    pub portfolio_url: Option<String>,
    pub resume_url: Option<String>,
}
