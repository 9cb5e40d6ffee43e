//! Input checks for profile and preference saves. Everything here runs
//! before the store is touched; a rejected input writes nothing.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::profile::{PreferencesUpdate, ProfileUpdate, WorkPreference};

pub const CITIES: &[&str] = &["New York", "London", "Mumbai", "Bangalore", "Remote"];

pub const INDUSTRIES: &[&str] = &[
    "Technology",
    "Healthcare",
    "Finance",
    "Education",
    "Manufacturing",
    "Retail",
    "Marketing",
    "Design",
    "Sales",
    "Other",
];

pub const SALARY_RANGES: &[&str] = &[
    "0-3 LPA",
    "3-6 LPA",
    "6-10 LPA",
    "10-15 LPA",
    "15-25 LPA",
    "25+ LPA",
];

/// Preferences as submitted by the settings or onboarding form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesInput {
    pub job_title: String,
    pub location: String,
    pub is_remote: bool,
    pub industry: Option<String>,
    pub salary_range: Option<String>,
    pub work_preference: Option<WorkPreference>,
    pub portfolio_url: Option<String>,
    pub resume_url: Option<String>,
}

/// Trims and turns blank strings into `None`.
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn check_url(field: &str, value: Option<String>) -> Result<Option<String>, AppError> {
    match value {
        Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => Err(
            AppError::Validation(format!("{field} must start with http:// or https://")),
        ),
        other => Ok(other),
    }
}

fn check_choice(field: &str, value: Option<String>, choices: &[&str]) -> Result<Option<String>, AppError> {
    match value {
        Some(v) if !choices.contains(&v.as_str()) => {
            Err(AppError::Validation(format!("{field} '{v}' is not one of the offered choices")))
        }
        other => Ok(other),
    }
}

pub fn validate_preferences(input: &PreferencesInput) -> Result<PreferencesUpdate, AppError> {
    let job_title = input.job_title.trim();
    if job_title.is_empty() {
        return Err(AppError::Validation("job_title is required".into()));
    }
    let location = input.location.trim();
    if location.is_empty() {
        return Err(AppError::Validation("location is required".into()));
    }

    Ok(PreferencesUpdate {
        job_title: job_title.to_string(),
        location: location.to_string(),
        is_remote: input.is_remote,
        industry: check_choice("industry", non_blank(&input.industry), INDUSTRIES)?,
        salary_range: check_choice("salary_range", non_blank(&input.salary_range), SALARY_RANGES)?,
        work_preference: input.work_preference,
        portfolio_url: check_url("portfolio_url", non_blank(&input.portfolio_url))?,
        resume_url: check_url("resume_url", non_blank(&input.resume_url))?,
    })
}

pub fn validate_profile(input: &ProfileUpdate) -> Result<ProfileUpdate, AppError> {
    Ok(ProfileUpdate {
        first_name: non_blank(&input.first_name),
        last_name: non_blank(&input.last_name),
        phone_number: non_blank(&input.phone_number),
        location: non_blank(&input.location),
        portfolio_url: check_url("portfolio_url", non_blank(&input.portfolio_url))?,
        linkedin_url: check_url("linkedin_url", non_blank(&input.linkedin_url))?,
        resume_url: check_url("resume_url", non_blank(&input.resume_url))?,
    })
}
