use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationUpdate, JobApplication, NewApplication};
use crate::models::document::CustomDocuments;
use crate::models::job::{JobListing, JobMatch, JobSearch, MatchStatus, NewJobMatch};
use crate::models::outreach::EmailOutreach;
use crate::models::profile::{PreferencesUpdate, ProfileUpdate, UserPreferences, UserProfile};
use crate::store::{DeletionReport, Store};

/// `Store` backed by the managed Postgres instance.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<UserProfile>, AppError> {
        Ok(
            sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn upsert_profile(
        &self,
        user_id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, AppError> {
        Ok(sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles
                (user_id, first_name, last_name, phone_number, location,
                 portfolio_url, linkedin_url, resume_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                phone_number = EXCLUDED.phone_number,
                location = EXCLUDED.location,
                portfolio_url = EXCLUDED.portfolio_url,
                linkedin_url = EXCLUDED.linkedin_url,
                resume_url = COALESCE(EXCLUDED.resume_url, user_profiles.resume_url),
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.phone_number)
        .bind(&update.location)
        .bind(&update.portfolio_url)
        .bind(&update.linkedin_url)
        .bind(&update.resume_url)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn set_profile_resume_url(
        &self,
        user_id: Uuid,
        resume_url: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, resume_url)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET
                resume_url = EXCLUDED.resume_url,
                updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(resume_url)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_preferences(&self, user_id: Uuid) -> Result<Option<UserPreferences>, AppError> {
        Ok(sqlx::query_as::<_, UserPreferences>(
            "SELECT * FROM user_preferences WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn upsert_preferences(
        &self,
        user_id: Uuid,
        update: &PreferencesUpdate,
    ) -> Result<UserPreferences, AppError> {
        Ok(sqlx::query_as::<_, UserPreferences>(
            r#"
            INSERT INTO user_preferences
                (user_id, job_title, location, is_remote, industry, salary_range,
                 work_preference, portfolio_url, resume_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id) DO UPDATE SET
                job_title = EXCLUDED.job_title,
                location = EXCLUDED.location,
                is_remote = EXCLUDED.is_remote,
                industry = EXCLUDED.industry,
                salary_range = EXCLUDED.salary_range,
                work_preference = EXCLUDED.work_preference,
                portfolio_url = EXCLUDED.portfolio_url,
                resume_url = COALESCE(EXCLUDED.resume_url, user_preferences.resume_url),
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&update.job_title)
        .bind(&update.location)
        .bind(update.is_remote)
        .bind(&update.industry)
        .bind(&update.salary_range)
        .bind(update.work_preference.map(|w| w.as_str()))
        .bind(&update.portfolio_url)
        .bind(&update.resume_url)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn touch_last_login(&self, user_id: Uuid) -> Result<(), AppError> {
        sqlx::query("UPDATE user_preferences SET last_login = now() WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_applications(&self, user_id: Uuid) -> Result<Vec<JobApplication>, AppError> {
        Ok(sqlx::query_as::<_, JobApplication>(
            "SELECT * FROM job_applications WHERE user_id = $1 ORDER BY application_date DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn insert_application(
        &self,
        user_id: Uuid,
        application: &NewApplication,
    ) -> Result<JobApplication, AppError> {
        Ok(sqlx::query_as::<_, JobApplication>(
            r#"
            INSERT INTO job_applications
                (user_id, company_name, job_title, job_url, platform, status,
                 application_date, next_follow_up, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&application.company_name)
        .bind(&application.job_title)
        .bind(&application.job_url)
        .bind(&application.platform)
        .bind(application.status.as_str())
        .bind(application.application_date)
        .bind(application.next_follow_up)
        .bind(&application.notes)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn update_application(
        &self,
        user_id: Uuid,
        id: i64,
        update: &ApplicationUpdate,
    ) -> Result<JobApplication, AppError> {
        sqlx::query_as::<_, JobApplication>(
            r#"
            UPDATE job_applications SET
                status = COALESCE($3, status),
                notes = COALESCE($4, notes),
                next_follow_up = COALESCE($5, next_follow_up),
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(update.status.map(|s| s.as_str()))
        .bind(&update.notes)
        .bind(update.next_follow_up)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {id} not found")))
    }

    async fn delete_application(&self, user_id: Uuid, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Application {id} not found")));
        }
        Ok(())
    }

    async fn list_matches(&self, user_id: Uuid) -> Result<Vec<JobMatch>, AppError> {
        Ok(sqlx::query_as::<_, JobMatch>(
            "SELECT * FROM job_matches WHERE user_id = $1 ORDER BY match_score DESC, id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn update_match_status(
        &self,
        user_id: Uuid,
        id: i64,
        status: MatchStatus,
    ) -> Result<JobMatch, AppError> {
        sqlx::query_as::<_, JobMatch>(
            r#"
            UPDATE job_matches SET status = $3, updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Match {id} not found")))
    }

    async fn replace_matches(
        &self,
        user_id: Uuid,
        matches: &[NewJobMatch],
    ) -> Result<Vec<JobMatch>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM job_matches WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let mut inserted = Vec::with_capacity(matches.len());
        for m in matches {
            let row = sqlx::query_as::<_, JobMatch>(
                r#"
                INSERT INTO job_matches
                    (user_id, job_title, company_name, job_url, match_score, match_reasons, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
                "#,
            )
            .bind(user_id)
            .bind(&m.job_title)
            .bind(&m.company_name)
            .bind(&m.job_url)
            .bind(m.match_score)
            .bind(&m.match_reasons)
            .bind(m.status.as_str())
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(row);
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn search_jobs(&self, search: &JobSearch) -> Result<Vec<JobListing>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM jobs WHERE TRUE");
        if let Some(title) = &search.title_contains {
            query
                .push(" AND job_title ILIKE ")
                .push_bind(format!("%{}%", escape_like(title)));
        }
        if let Some(industry) = &search.industry {
            query.push(" AND industry = ").push_bind(industry.clone());
        }
        if let Some(mode) = &search.work_preference {
            query.push(" AND work_preference = ").push_bind(mode.clone());
        }
        query.push(" ORDER BY posted_date DESC");

        Ok(query
            .build_query_as::<JobListing>()
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<JobListing>, AppError> {
        Ok(
            sqlx::query_as::<_, JobListing>("SELECT * FROM jobs WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn get_custom_documents(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> Result<Option<CustomDocuments>, AppError> {
        Ok(sqlx::query_as::<_, CustomDocuments>(
            "SELECT * FROM custom_documents WHERE user_id = $1 AND job_id = $2",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn upsert_custom_documents(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        resume_path: &str,
        cover_letter_path: &str,
        keywords_used: &[String],
    ) -> Result<CustomDocuments, AppError> {
        Ok(sqlx::query_as::<_, CustomDocuments>(
            r#"
            INSERT INTO custom_documents
                (user_id, job_id, resume_path, cover_letter_path, keywords_used, updated_at)
            VALUES ($1, $2, $3, $4, $5, now())
            ON CONFLICT (user_id, job_id) DO UPDATE SET
                resume_path = EXCLUDED.resume_path,
                cover_letter_path = EXCLUDED.cover_letter_path,
                keywords_used = EXCLUDED.keywords_used,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(job_id)
        .bind(resume_path)
        .bind(cover_letter_path)
        .bind(keywords_used)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list_outreach(&self, user_id: Uuid) -> Result<Vec<EmailOutreach>, AppError> {
        Ok(sqlx::query_as::<_, EmailOutreach>(
            r#"
            SELECT o.id, o.user_id, o.application_id, o.recipient_email, o.subject,
                   o.body, o.status, o.sent_at, a.job_title
            FROM email_outreach o
            LEFT JOIN job_applications a ON a.id = o.application_id
            WHERE o.user_id = $1
            ORDER BY o.sent_at DESC NULLS LAST, o.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete_user_data(&self, user_id: Uuid) -> Result<DeletionReport, AppError> {
        let mut tx = self.pool.begin().await?;
        let mut report = DeletionReport::default();

        // Children before parents: outreach rows reference applications.
        for (table, slot) in [
            ("email_outreach", &mut report.outreach),
            ("custom_documents", &mut report.documents),
            ("job_matches", &mut report.matches),
            ("job_applications", &mut report.applications),
            ("user_preferences", &mut report.preferences),
            ("user_profiles", &mut report.profiles),
        ] {
            *slot = sqlx::query(&format!("DELETE FROM {table} WHERE user_id = $1"))
                .bind(user_id)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        info!(
            "Deleted {} rows across all tables for user {user_id}",
            report.total()
        );
        Ok(report)
    }
}

/// Escapes LIKE wildcards so user input is matched literally.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
