//! Job matching against the built-in catalog, plus the listing search and
//! scored-match endpoints that back the find-jobs page.

pub mod handlers;
pub mod seed;

use serde::Serialize;

use crate::models::profile::UserPreferences;

/// One opening in the built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogJob {
    pub job_title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub platform: &'static str,
    pub remote: bool,
}

const fn job(
    job_title: &'static str,
    company: &'static str,
    location: &'static str,
    platform: &'static str,
    remote: bool,
) -> CatalogJob {
    CatalogJob {
        job_title,
        company,
        location,
        platform,
        remote,
    }
}

pub const CATALOG: [CatalogJob; 10] = [
    job("Software Engineer", "TechCorp", "New York", "LinkedIn", false),
    job("Frontend Developer", "WebWizards", "London", "Indeed", true),
    job("React Developer", "AppGenius", "Bangalore", "Naukri", true),
    job("Full Stack Developer", "StackInnovate", "New York", "Glassdoor", false),
    job("UI Engineer", "DesignMasters", "Remote", "LinkedIn", true),
    job("JavaScript Developer", "CodeCrafters", "London", "Indeed", false),
    job("Software Developer", "DevSolutions", "Mumbai", "Naukri", false),
    job("React Native Developer", "MobileMinds", "Bangalore", "Glassdoor", true),
    job("Frontend Engineer", "UXPioneers", "New York", "LinkedIn", true),
    job("Web Developer", "DigitalDreamers", "Remote", "Indeed", true),
];

/// Title must contain the preferred title; location must equal the preferred
/// one, unless the user accepts remote work and the job is remote.
/// Comparisons ignore case.
pub fn matches(prefs: &UserPreferences, job: &CatalogJob) -> bool {
    let title_match = job
        .job_title
        .to_lowercase()
        .contains(&prefs.job_title.to_lowercase());
    let location_match = job.location.to_lowercase() == prefs.location.to_lowercase()
        || (prefs.is_remote && job.remote);
    title_match && location_match
}

pub fn matching_jobs(prefs: &UserPreferences) -> Vec<CatalogJob> {
    CATALOG.iter().filter(|job| matches(prefs, job)).copied().collect()
}

#[cfg(test)]
pub(crate) fn prefs(job_title: &str, location: &str, is_remote: bool) -> UserPreferences {
    let now = chrono::Utc::now();
    UserPreferences {
        user_id: uuid::Uuid::new_v4(),
        job_title: job_title.into(),
        location: location.into(),
        is_remote,
        industry: None,
        salary_range: None,
        work_preference: None,
        portfolio_url: None,
        resume_url: None,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}
