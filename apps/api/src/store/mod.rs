//! Store: the seam in front of the managed relational store.
//!
//! Every table the service touches is reached through `Store`. The production
//! implementation is `PgStore` (sqlx over the managed Postgres); tests run
//! against `MemoryStore`. `AppState` holds an `Arc<dyn Store>`.
//!
//! All user-owned rows are scoped by `user_id`: a row owned by somebody else
//! behaves exactly like a missing row.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationUpdate, JobApplication, NewApplication};
use crate::models::document::CustomDocuments;
use crate::models::job::{JobListing, JobMatch, JobSearch, MatchStatus, NewJobMatch};
use crate::models::outreach::EmailOutreach;
use crate::models::profile::{PreferencesUpdate, ProfileUpdate, UserPreferences, UserProfile};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgStore;

/// Rows removed per table by an account deletion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeletionReport {
    pub profiles: u64,
    pub preferences: u64,
    pub applications: u64,
    pub matches: u64,
    pub documents: u64,
    pub outreach: u64,
}

impl DeletionReport {
    pub fn total(&self) -> u64 {
        self.profiles
            + self.preferences
            + self.applications
            + self.matches
            + self.documents
            + self.outreach
    }
}

#[async_trait]
pub trait Store: Send + Sync {
    // Profiles
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AppError>;
    async fn upsert_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AppError>;
    async fn set_profile_resume_url(
        &self,
        user_id: Uuid,
        resume_url: Option<&str>,
    ) -> Result<(), AppError>;

    // Preferences
    async fn get_preferences(&self, user_id: Uuid) -> Result<Option<UserPreferences>, AppError>;
    async fn upsert_preferences(
        &self,
        user_id: Uuid,
        update: &PreferencesUpdate,
    ) -> Result<UserPreferences, AppError>;
    async fn touch_last_login(&self, user_id: Uuid) -> Result<(), AppError>;

    // Applications
    async fn list_applications(&self, user_id: Uuid) -> Result<Vec<JobApplication>, AppError>;
    async fn insert_application(
        &self,
        user_id: Uuid,
        application: &NewApplication,
    ) -> Result<JobApplication, AppError>;
    async fn update_application(
        &self,
        user_id: Uuid,
        id: i64,
        update: &ApplicationUpdate,
    ) -> Result<JobApplication, AppError>;
    async fn delete_application(&self, user_id: Uuid, id: i64) -> Result<(), AppError>;

    // Matches
    async fn list_matches(&self, user_id: Uuid) -> Result<Vec<JobMatch>, AppError>;
    async fn update_match_status(
        &self,
        user_id: Uuid,
        id: i64,
        status: MatchStatus,
    ) -> Result<JobMatch, AppError>;
    async fn replace_matches(
        &self,
        user_id: Uuid,
        matches: &[NewJobMatch],
    ) -> Result<Vec<JobMatch>, AppError>;

    // Listings
    async fn search_jobs(&self, search: &JobSearch) -> Result<Vec<JobListing>, AppError>;
    async fn get_job(&self, id: Uuid) -> Result<Option<JobListing>, AppError>;

    // Generated documents
    async fn get_custom_documents(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<CustomDocuments>, AppError>;
    async fn upsert_custom_documents(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        resume_path: &str,
        cover_letter_path: &str,
        keywords_used: &[String],
    ) -> Result<CustomDocuments, AppError>;

    // Outreach
    async fn list_outreach(&self, user_id: Uuid) -> Result<Vec<EmailOutreach>, AppError>;

    // Account
    async fn delete_user_data(&self, user_id: Uuid) -> Result<DeletionReport, AppError>;
}
