use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::resume::{check_pdf, ResumeUpload};
use crate::state::AppState;
use crate::storage::{is_owned_by, resume_key, sanitize_file_name, user_prefix};

const RESUME_FIELD: &str = "resume";

#[derive(Deserialize)]
pub struct KeyQuery {
    pub key: String,
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub key: String,
    pub public_url: String,
}

#[derive(Serialize)]
pub struct ResumeEntry {
    pub key: String,
    pub name: String,
    pub size: i64,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub public_url: String,
}

async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to parse multipart data: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        return Ok(ResumeUpload {
            file_name,
            content_type,
            data,
        });
    }
    Err(AppError::Validation(format!(
        "Missing '{RESUME_FIELD}' file field"
    )))
}

/// Name shown to the user: the key without the user prefix and upload timestamp.
fn display_name(key: &str) -> String {
    let file = key.rsplit('/').next().unwrap_or(key);
    match file.split_once('-') {
        Some((millis, rest)) if millis.chars().all(|c| c.is_ascii_digit()) => rest.to_string(),
        _ => file.to_string(),
    }
}

/// POST /api/v1/resume
pub async fn handle_upload(
    State(state): State<AppState>,
    user: CurrentUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let upload = read_upload(multipart).await?;
    check_pdf(&upload)?;

    let bucket = &state.config.resume_bucket;
    let key = resume_key(user.id, &upload.file_name, Utc::now());
    state
        .storage
        .upload(bucket, &key, upload.data, "application/pdf")
        .await?;

    let public_url = state.storage.public_url(bucket, &key);
    state
        .store
        .set_profile_resume_url(user.id, Some(&public_url))
        .await?;

    info!("Stored resume {key} for user {}", user.id);
    Ok((StatusCode::CREATED, Json(UploadResponse { key, public_url })))
}

/// GET /api/v1/resume
pub async fn handle_list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<ResumeEntry>>, AppError> {
    let bucket = &state.config.resume_bucket;
    let objects = state.storage.list(bucket, &user_prefix(user.id)).await?;
    let entries = objects
        .into_iter()
        .map(|o| ResumeEntry {
            name: display_name(&o.key),
            public_url: state.storage.public_url(bucket, &o.key),
            size: o.size,
            uploaded_at: o.last_modified,
            key: o.key,
        })
        .collect();
    Ok(Json(entries))
}

/// GET /api/v1/resume/file?key=
pub async fn handle_download(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<KeyQuery>,
) -> Result<Response, AppError> {
    if !is_owned_by(&query.key, user.id) {
        return Err(AppError::Forbidden);
    }
    let data = state
        .storage
        .download(&state.config.resume_bucket, &query.key)
        .await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        sanitize_file_name(&display_name(&query.key))
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        data,
    )
        .into_response())
}

/// DELETE /api/v1/resume?key=
pub async fn handle_delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<KeyQuery>,
) -> Result<StatusCode, AppError> {
    if !is_owned_by(&query.key, user.id) {
        return Err(AppError::Forbidden);
    }
    let bucket = &state.config.resume_bucket;
    state
        .storage
        .delete(bucket, std::slice::from_ref(&query.key))
        .await?;

    let public_url = state.storage.public_url(bucket, &query.key);
    if let Some(profile) = state.store.get_profile(user.id).await? {
        if profile.resume_url.as_deref() == Some(public_url.as_str()) {
            state.store.set_profile_resume_url(user.id, None).await?;
        }
    }
    Ok(StatusCode::NO_CONTENT)
}
