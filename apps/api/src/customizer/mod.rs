//! Customizer: a tailored résumé and cover letter for one job listing.
//!
//! Pipeline: listing → latest résumé text → résumé generation → cover-letter
//! generation → upload both → upsert the metadata row. Each step must succeed
//! before the next runs; the metadata row is only written once both files are
//! stored, so a failure never leaves a row pointing at missing documents.

pub mod handlers;
pub mod prompts;

use bytes::Bytes;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::document::{CustomDocuments, DocumentKind};
use crate::models::job::JobListing;
use crate::resume::text::latest_resume_text;
use crate::state::AppState;
use crate::storage::document_key;

/// Keywords tracked on generated résumés. Display only.
pub const TRACKED_KEYWORDS: &[&str] = &[
    "python",
    "javascript",
    "react",
    "node.js",
    "aws",
    "docker",
    "kubernetes",
    "machine learning",
    "agile",
    "leadership",
    "team management",
    "communication",
];

const DOCUMENT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Tracked keywords that occur in `text`, in list order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let haystack = text.to_lowercase();
    TRACKED_KEYWORDS
        .iter()
        .filter(|k| haystack.contains(*k))
        .map(|k| k.to_string())
        .collect()
}

/// Loads the listing and the caller's résumé, then runs the generation pipeline.
pub async fn customize_documents(
    state: &AppState,
    user_id: Uuid,
    job_id: Uuid,
) -> Result<CustomDocuments, AppError> {
    let job = state
        .store
        .get_job(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

    let original_resume =
        latest_resume_text(state.storage.as_ref(), &state.config.resume_bucket, user_id)
            .await?
            .ok_or_else(|| AppError::Validation("Please upload your resume first".into()))?;

    generate_and_store(state, user_id, &job, &original_resume).await
}

pub async fn generate_and_store(
    state: &AppState,
    user_id: Uuid,
    job: &JobListing,
    original_resume: &str,
) -> Result<CustomDocuments, AppError> {
    let resume = state
        .generator
        .complete(
            prompts::RESUME_SYSTEM,
            &prompts::resume_prompt(job, original_resume),
        )
        .await?;

    let cover_letter = state
        .generator
        .complete(
            prompts::COVER_LETTER_SYSTEM,
            &prompts::cover_letter_prompt(job, original_resume),
        )
        .await?;

    let now = Utc::now();
    let bucket = &state.config.documents_bucket;
    let resume_path = document_key(user_id, job.id, DocumentKind::Resume, now);
    let cover_letter_path = document_key(user_id, job.id, DocumentKind::CoverLetter, now);

    state
        .storage
        .upload(bucket, &resume_path, Bytes::from(resume.clone()), DOCUMENT_CONTENT_TYPE)
        .await?;
    state
        .storage
        .upload(
            bucket,
            &cover_letter_path,
            Bytes::from(cover_letter),
            DOCUMENT_CONTENT_TYPE,
        )
        .await?;

    let keywords = extract_keywords(&resume);
    let documents = state
        .store
        .upsert_custom_documents(user_id, job.id, &resume_path, &cover_letter_path, &keywords)
        .await?;

    info!(
        "Customized documents for user {user_id}, job {} ({} keywords)",
        job.id,
        keywords.len()
    );
    Ok(documents)
}
