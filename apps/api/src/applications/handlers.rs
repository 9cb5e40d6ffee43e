use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::applications::{summarize, validate_application, ApplicationInput, ApplicationSummary};
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::application::{ApplicationUpdate, JobApplication};
use crate::state::AppState;

/// GET /api/v1/applications
pub async fn handle_list(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<JobApplication>>, AppError> {
    Ok(Json(state.store.list_applications(user.id).await?))
}

/// GET /api/v1/applications/summary
pub async fn handle_summary(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<ApplicationSummary>, AppError> {
    let applications = state.store.list_applications(user.id).await?;
    Ok(Json(summarize(&applications)))
}

/// POST /api/v1/applications
pub async fn handle_create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ApplicationInput>,
) -> Result<(StatusCode, Json<JobApplication>), AppError> {
    let application = validate_application(&req)?;
    let row = state.store.insert_application(user.id, &application).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/applications/:id
pub async fn handle_update(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(req): Json<ApplicationUpdate>,
) -> Result<Json<JobApplication>, AppError> {
    if req.is_empty() {
        return Err(AppError::Validation("Nothing to update".into()));
    }
    Ok(Json(state.store.update_application(user.id, id, &req).await?))
}

/// DELETE /api/v1/applications/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.store.delete_application(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
