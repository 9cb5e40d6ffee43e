//! In-memory `Store` used by unit and router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationUpdate, JobApplication, NewApplication};
use crate::models::document::CustomDocuments;
use crate::models::job::{JobListing, JobMatch, JobSearch, MatchStatus, NewJobMatch};
use crate::models::outreach::EmailOutreach;
use crate::models::profile::{PreferencesUpdate, ProfileUpdate, UserPreferences, UserProfile};
use crate::store::{DeletionReport, Store};

#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, UserProfile>,
    preferences: HashMap<Uuid, UserPreferences>,
    applications: Vec<JobApplication>,
    matches: Vec<JobMatch>,
    jobs: Vec<JobListing>,
    documents: HashMap<(Uuid, Uuid), CustomDocuments>,
    outreach: Vec<EmailOutreach>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    writes: AtomicUsize,
    last_login_fails: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<JobListing>) -> Self {
        let store = Self::new();
        store.lock().jobs = jobs;
        store
    }

    /// Makes every later `touch_last_login` return a database error.
    pub fn fail_last_login(&self) {
        self.last_login_fails.store(true, Ordering::SeqCst);
    }

    /// Number of mutating calls made so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn add_outreach(&self, user_id: Uuid, recipient_email: &str, application_id: Option<i64>) {
        let mut tables = self.lock();
        let id = tables.next_id();
        tables.outreach.push(EmailOutreach {
            id,
            user_id,
            application_id,
            recipient_email: recipient_email.to_string(),
            subject: None,
            body: None,
            status: "queued".to_string(),
            sent_at: Some(Utc::now()),
            job_title: None,
        });
    }

    /// Counts every row owned by `user_id`, across all tables.
    pub fn rows_for_user(&self, user_id: Uuid) -> usize {
        let tables = self.lock();
        usize::from(tables.profiles.contains_key(&user_id))
            + usize::from(tables.preferences.contains_key(&user_id))
            + tables.applications.iter().filter(|a| a.user_id == user_id).count()
            + tables.matches.iter().filter(|m| m.user_id == user_id).count()
            + tables.documents.keys().filter(|(u, _)| *u == user_id).count()
            + tables.outreach.iter().filter(|o| o.user_id == user_id).count()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store lock poisoned")
    }

    fn write(&self) -> MutexGuard<'_, Tables> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.lock()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AppError> {
        Ok(self.lock().profiles.get(&user_id).cloned())
    }

    async fn upsert_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AppError> {
        let mut tables = self.write();
        let now = Utc::now();
        let existing = tables.profiles.get(&user_id).cloned();
        let profile = UserProfile {
            user_id,
            first_name: update.first_name.clone(),
            last_name: update.last_name.clone(),
            phone_number: update.phone_number.clone(),
            location: update.location.clone(),
            portfolio_url: update.portfolio_url.clone(),
            linkedin_url: update.linkedin_url.clone(),
            resume_url: update
                .resume_url
                .clone()
                .or_else(|| existing.as_ref().and_then(|p| p.resume_url.clone())),
            created_at: existing.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        };
        tables.profiles.insert(user_id, profile.clone());
        Ok(profile)
    }

    async fn set_profile_resume_url(
        &self,
        user_id: Uuid,
        resume_url: Option<&str>,
    ) -> Result<(), AppError> {
        let mut tables = self.write();
        let now = Utc::now();
        let profile = tables.profiles.entry(user_id).or_insert_with(|| UserProfile {
            user_id,
            first_name: None,
            last_name: None,
            phone_number: None,
            location: None,
            portfolio_url: None,
            linkedin_url: None,
            resume_url: None,
            created_at: now,
            updated_at: now,
        });
        profile.resume_url = resume_url.map(String::from);
        profile.updated_at = now;
        Ok(())
    }

    async fn get_preferences(&self, user_id: Uuid) -> Result<Option<UserPreferences>, AppError> {
        Ok(self.lock().preferences.get(&user_id).cloned())
    }

    async fn upsert_preferences(
        &self,
        user_id: Uuid,
        update: &PreferencesUpdate,
    ) -> Result<UserPreferences, AppError> {
        let mut tables = self.write();
        let now = Utc::now();
        let existing = tables.preferences.get(&user_id).cloned();
        let prefs = UserPreferences {
            user_id,
            job_title: update.job_title.clone(),
            location: update.location.clone(),
            is_remote: update.is_remote,
            industry: update.industry.clone(),
            salary_range: update.salary_range.clone(),
            work_preference: update.work_preference.map(|w| w.as_str().to_string()),
            portfolio_url: update.portfolio_url.clone(),
            resume_url: update
                .resume_url
                .clone()
                .or_else(|| existing.as_ref().and_then(|p| p.resume_url.clone())),
            last_login: existing.as_ref().and_then(|p| p.last_login),
            created_at: existing.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        };
        tables.preferences.insert(user_id, prefs.clone());
        Ok(prefs)
    }

    async fn touch_last_login(&self, user_id: Uuid) -> Result<(), AppError> {
        if self.last_login_fails.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        if let Some(prefs) = self.write().preferences.get_mut(&user_id) {
            prefs.last_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn list_applications(&self, user_id: Uuid) -> Result<Vec<JobApplication>, AppError> {
        let mut rows: Vec<_> = self
            .lock()
            .applications
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| {
            b.application_date
                .cmp(&a.application_date)
                .then(b.id.cmp(&a.id))
        });
        Ok(rows)
    }

    async fn insert_application(
        &self,
        user_id: Uuid,
        application: &NewApplication,
    ) -> Result<JobApplication, AppError> {
        let mut tables = self.write();
        let now = Utc::now();
        let row = JobApplication {
            id: tables.next_id(),
            user_id,
            company_name: application.company_name.clone(),
            job_title: application.job_title.clone(),
            job_url: application.job_url.clone(),
            platform: application.platform.clone(),
            status: application.status.as_str().to_string(),
            application_date: application.application_date,
            next_follow_up: application.next_follow_up,
            notes: application.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.applications.push(row.clone());
        Ok(row)
    }

    async fn update_application(
        &self,
        user_id: Uuid,
        id: i64,
        update: &ApplicationUpdate,
    ) -> Result<JobApplication, AppError> {
        let mut tables = self.write();
        let row = tables
            .applications
            .iter_mut()
            .find(|a| a.id == id && a.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))?;
        if let Some(status) = update.status {
            row.status = status.as_str().to_string();
        }
        if let Some(notes) = &update.notes {
            row.notes = Some(notes.clone());
        }
        if let Some(follow_up) = update.next_follow_up {
            row.next_follow_up = Some(follow_up);
        }
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete_application(&self, user_id: Uuid, id: i64) -> Result<(), AppError> {
        let mut tables = self.write();
        let before = tables.applications.len();
        tables
            .applications
            .retain(|a| !(a.id == id && a.user_id == user_id));
        if tables.applications.len() == before {
            return Err(AppError::NotFound(format!("Application {id} not found")));
        }
        Ok(())
    }

    async fn list_matches(&self, user_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
        let mut rows: Vec<_> = self
            .lock()
            .matches
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.match_score.cmp(&a.match_score).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn update_match_status(
        &self,
        user_id: Uuid,
        id: i64,
        status: MatchStatus,
    ) -> Result<JobMatch, AppError> {
        let mut tables = self.write();
        let row = tables
            .matches
            .iter_mut()
            .find(|m| m.id == id && m.user_id == user_id)
            .ok_or_else(|| AppError::NotFound(format!("Match {id} not found")))?;
        row.status = status.as_str().to_string();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn replace_matches(
        &self,
        user_id: Uuid,
        matches: &[NewJobMatch],
    ) -> Result<Vec<JobMatch>, AppError> {
        let mut tables = self.write();
        tables.matches.retain(|m| m.user_id != user_id);
        let now = Utc::now();
        let mut inserted = Vec::with_capacity(matches.len());
        for m in matches {
            let row = JobMatch {
                id: tables.next_id(),
                user_id,
                job_title: m.job_title.clone(),
                company_name: m.company_name.clone(),
                job_url: m.job_url.clone(),
                match_score: m.match_score,
                match_reasons: m.match_reasons.clone(),
                status: m.status.as_str().to_string(),
                created_at: now,
                updated_at: now,
            };
            tables.matches.push(row.clone());
            inserted.push(row);
        }
        Ok(inserted)
    }

    async fn search_jobs(&self, search: &JobSearch) -> Result<Vec<JobListing>, AppError> {
        let mut rows: Vec<_> = self
            .lock()
            .jobs
            .iter()
            .filter(|j| search.matches(j))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.posted_date.cmp(&a.posted_date));
        Ok(rows)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobListing>, AppError> {
        Ok(self.lock().jobs.iter().find(|j| j.id == id).cloned())
    }

    async fn get_custom_documents(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<CustomDocuments>, AppError> {
        Ok(self.lock().documents.get(&(user_id, job_id)).cloned())
    }

    async fn upsert_custom_documents(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        resume_path: &str,
        cover_letter_path: &str,
        keywords_used: &[String],
    ) -> Result<CustomDocuments, AppError> {
        let row = CustomDocuments {
            user_id,
            job_id,
            resume_path: resume_path.to_string(),
            cover_letter_path: cover_letter_path.to_string(),
            keywords_used: keywords_used.to_vec(),
            updated_at: Utc::now(),
        };
        self.write().documents.insert((user_id, job_id), row.clone());
        Ok(row)
    }

    async fn list_outreach(&self, user_id: Uuid) -> Result<Vec<EmailOutreach>, AppError> {
        let tables = self.lock();
        let mut rows: Vec<_> = tables
            .outreach
            .iter()
            .filter(|o| o.user_id == user_id)
            .map(|o| {
                let mut row = o.clone();
                row.job_title = o.application_id.and_then(|app_id| {
                    tables
                        .applications
                        .iter()
                        .find(|a| a.id == app_id)
                        .map(|a| a.job_title.clone())
                });
                row
            })
            .collect();
        rows.sort_by(|a, b| b.sent_at.cmp(&a.sent_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn delete_user_data(&self, user_id: Uuid) -> Result<DeletionReport, AppError> {
        let mut tables = self.write();

        fn drain<T>(rows: &mut Vec<T>, owned: impl Fn(&T) -> bool) -> u64 {
            let before = rows.len();
            rows.retain(|r| !owned(r));
            (before - rows.len()) as u64
        }

        let outreach = drain(&mut tables.outreach, |o| o.user_id == user_id);
        let matches = drain(&mut tables.matches, |m| m.user_id == user_id);
        let applications = drain(&mut tables.applications, |a| a.user_id == user_id);
        let documents_before = tables.documents.len();
        tables.documents.retain(|(u, _), _| *u != user_id);
        let documents = (documents_before - tables.documents.len()) as u64;

        Ok(DeletionReport {
            profiles: u64::from(tables.profiles.remove(&user_id).is_some()),
            preferences: u64::from(tables.preferences.remove(&user_id).is_some()),
            applications,
            matches,
            documents,
            outreach,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::application::ApplicationStatus;

    fn new_application(title: &str) -> NewApplication {
        NewApplication {
            company_name: "Acme".to_string(),
            job_title: title.to_string(),
            job_url: None,
            platform: None,
            status: ApplicationStatus::Applied,
            application_date: Utc::now(),
            next_follow_up: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_rows_are_scoped_to_their_owner() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let row = store
            .insert_application(alice, &new_application("Engineer"))
            .await
            .unwrap();

        assert!(store.list_applications(bob).await.unwrap().is_empty());
        let err = store.delete_application(bob, row.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(store.list_applications(alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_write_count_ignores_reads() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        store.get_profile(user).await.unwrap();
        store.list_applications(user).await.unwrap();
        assert_eq!(store.write_count(), 0);
        store.insert_application(user, &new_application("Engineer")).await.unwrap();
        assert_eq!(store.write_count(), 1);
    }
}
