pub mod handlers;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplication, NewApplication};

/// Body of `POST /api/v1/applications`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationInput {
    pub company_name: String,
    pub job_title: String,
    pub job_url: Option<String>,
    pub platform: Option<String>,
    pub status: Option<ApplicationStatus>,
    pub application_date: Option<DateTime<Utc>>,
    pub next_follow_up: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn validate_application(input: &ApplicationInput) -> Result<NewApplication, AppError> {
    let company_name = input.company_name.trim();
    let job_title = input.job_title.trim();
    if company_name.is_empty() || job_title.is_empty() {
        return Err(AppError::Validation(
            "company_name and job_title are required".into(),
        ));
    }

    Ok(NewApplication {
        company_name: company_name.to_string(),
        job_title: job_title.to_string(),
        job_url: non_blank(input.job_url.as_deref()),
        platform: non_blank(input.platform.as_deref()),
        status: input.status.unwrap_or_default(),
        application_date: input.application_date.unwrap_or_else(Utc::now),
        next_follow_up: input.next_follow_up,
        notes: non_blank(input.notes.as_deref()),
    })
}

/// Dashboard counters.
#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationSummary {
    pub total: usize,
    pub applied: usize,
    pub interviewing: usize,
    pub offered: usize,
    pub rejected: usize,
}

pub fn summarize(applications: &[JobApplication]) -> ApplicationSummary {
    let mut summary = ApplicationSummary {
        total: applications.len(),
        ..Default::default()
    };
    for application in applications {
        match ApplicationStatus::parse(&application.status) {
            Some(ApplicationStatus::Applied) => summary.applied += 1,
            Some(ApplicationStatus::Interviewing) => summary.interviewing += 1,
            Some(ApplicationStatus::Offered) => summary.offered += 1,
            Some(ApplicationStatus::Rejected) => summary.rejected += 1,
            None => {}
        }
    }
    summary
}
