use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::matching::{matching_jobs, seed::sample_matches, CatalogJob};
use crate::models::application::{ApplicationStatus, NewApplication};
use crate::models::job::{JobListing, JobMatch, JobSearch, MatchStatus};
use crate::state::AppState;

#[derive(Serialize)]
pub struct MatchRunResponse {
    /// Catalog entries that passed the filter.
    pub matched: usize,
    /// Applications actually written; lower than `matched` if inserts failed.
    pub recorded: usize,
    pub jobs: Vec<CatalogJob>,
}

#[derive(Deserialize)]
pub struct MatchStatusUpdate {
    pub status: MatchStatus,
}

#[derive(Serialize)]
pub struct JobSearchResponse {
    pub preferences_set: bool,
    pub jobs: Vec<JobListing>,
}

fn preferences_missing() -> AppError {
    AppError::Validation("Please set your job preferences first".into())
}

/// POST /api/v1/matching/run
///
/// Filters the catalog by the caller's preferences and records an
/// application for every match. A failed insert is logged and skipped.
pub async fn handle_run_matching(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<MatchRunResponse>, AppError> {
    let prefs = state
        .store
        .get_preferences(user.id)
        .await?
        .ok_or_else(preferences_missing)?;

    let jobs = matching_jobs(&prefs);
    let mut recorded = 0;
    for job in &jobs {
        let application = NewApplication {
            company_name: job.company.to_string(),
            job_title: job.job_title.to_string(),
            job_url: None,
            platform: Some(job.platform.to_string()),
            status: ApplicationStatus::Applied,
            application_date: Utc::now(),
            next_follow_up: None,
            notes: None,
        };
        match state.store.insert_application(user.id, &application).await {
            Ok(_) => recorded += 1,
            Err(e) => warn!(
                "Failed to record application to {} at {}: {e}",
                job.job_title, job.company
            ),
        }
    }

    info!(
        "Matching for user {}: {} matched, {} recorded",
        user.id,
        jobs.len(),
        recorded
    );
    Ok(Json(MatchRunResponse {
        matched: jobs.len(),
        recorded,
        jobs,
    }))
}

/// GET /api/v1/matches
pub async fn handle_list_matches(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<JobMatch>>, AppError> {
    Ok(Json(state.store.list_matches(user.id).await?))
}

/// PATCH /api/v1/matches/:id
pub async fn handle_update_match(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<MatchStatusUpdate>,
) -> Result<Json<JobMatch>, AppError> {
    let updated = state
        .store
        .update_match_status(user.id, id, req.status)
        .await?;
    Ok(Json(updated))
}

/// POST /api/v1/matches/seed
pub async fn handle_seed_matches(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<JobMatch>>, AppError> {
    let matches = state
        .store
        .replace_matches(user.id, &sample_matches())
        .await?;
    Ok(Json(matches))
}

/// GET /api/v1/jobs
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<JobSearchResponse>, AppError> {
    let Some(prefs) = state.store.get_preferences(user.id).await? else {
        return Ok(Json(JobSearchResponse {
            preferences_set: false,
            jobs: Vec::new(),
        }));
    };

    let search = JobSearch {
        title_contains: Some(prefs.job_title).filter(|t| !t.is_empty()),
        industry: prefs.industry,
        work_preference: prefs.work_preference,
    };
    let jobs = state.store.search_jobs(&search).await?;
    Ok(Json(JobSearchResponse {
        preferences_set: true,
        jobs,
    }))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<JobListing>, AppError> {
    let job = state
        .store
        .get_job(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(Json(job))
}

#[cfg(test)]
pub(crate) fn listing(title: &str, industry: Option<&str>, work_preference: Option<&str>) -> JobListing {
    JobListing {
        id: Uuid::new_v4(),
        job_title: title.into(),
        company: "Acme".into(),
        platform: Some("LinkedIn".into()),
        location: Some("London".into()),
        remote: false,
        job_description: format!("We are hiring a {title}. You will work with React and AWS."),
        requirements: "3+ years of experience, strong communication".into(),
        posted_date: Utc::now(),
        salary_range: None,
        job_type: Some("Full-time".into()),
        work_preference: work_preference.map(str::to_string),
        industry: industry.map(str::to_string),
    }
}
