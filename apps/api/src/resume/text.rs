use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::storage::{user_prefix, ObjectStore};

/// Plain text of the user's most recently uploaded résumé, or `None` when
/// they have not uploaded one.
pub async fn latest_resume_text(
    storage: &dyn ObjectStore,
    bucket: &str,
    user_id: Uuid,
) -> Result<Option<String>, AppError> {
    let objects = storage.list(bucket, &user_prefix(user_id)).await?;
    let Some(latest) = objects.into_iter().next() else {
        return Ok(None);
    };

    debug!("Extracting text from {}", latest.key);
    let data = storage.download(bucket, &latest.key).await?;

    // The extractor panics on some malformed files; a panic is treated like an error.
    let extracted = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data)).await;
    let text = match extracted {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Could not extract text from {}: {e}", latest.key);
            return Err(unreadable());
        }
        Err(e) => {
            warn!("PDF extraction for {} aborted: {e}", latest.key);
            return Err(unreadable());
        }
    };

    let text = normalize_whitespace(&text);
    if text.is_empty() {
        return Err(AppError::Validation(
            "Your resume does not contain any readable text".into(),
        ));
    }
    Ok(Some(text))
}

fn unreadable() -> AppError {
    AppError::Validation(
        "Could not read text from your resume. Please upload a text-based PDF.".into(),
    )
}

/// Collapses runs of blank lines and trims trailing spaces left by PDF extraction.
pub fn normalize_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(line);
        out.push('\n');
    }
    out.trim().to_string()
}
