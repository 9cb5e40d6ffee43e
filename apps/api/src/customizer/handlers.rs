use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::customizer::customize_documents;
use crate::errors::AppError;
use crate::models::document::{CustomDocuments, DocumentKind};
use crate::state::AppState;

fn no_documents(job_id: Uuid) -> AppError {
    AppError::NotFound(format!("No customized documents for job {job_id}"))
}

/// POST /api/v1/jobs/:id/documents
pub async fn handle_customize(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<CustomDocuments>, AppError> {
    Ok(Json(customize_documents(&state, user.id, job_id).await?))
}

/// GET /api/v1/jobs/:id/documents
pub async fn handle_get_documents(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<CustomDocuments>, AppError> {
    let documents = state
        .store
        .get_custom_documents(user.id, job_id)
        .await?
        .ok_or_else(|| no_documents(job_id))?;
    Ok(Json(documents))
}

/// GET /api/v1/jobs/:id/documents/:kind
pub async fn handle_get_document_text(
    State(state): State<AppState>,
    user: CurrentUser,
    Path((job_id, kind)): Path<(Uuid, DocumentKind)>,
) -> Result<Response, AppError> {
    let documents = state
        .store
        .get_custom_documents(user.id, job_id)
        .await?
        .ok_or_else(|| no_documents(job_id))?;
    let path = match kind {
        DocumentKind::Resume => &documents.resume_path,
        DocumentKind::CoverLetter => &documents.cover_letter_path,
    };
    let data = state
        .storage
        .download(&state.config.documents_bucket, path)
        .await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], data).into_response())
}
