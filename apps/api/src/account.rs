//! Account deletion: every stored object and row belonging to the caller.

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::state::AppState;
use crate::storage::{user_prefix, ObjectStore};
use crate::store::DeletionReport;

#[derive(Debug, Serialize)]
pub struct AccountDeletion {
    pub rows: DeletionReport,
    pub objects_removed: usize,
}

async fn purge_bucket(storage: &dyn ObjectStore, bucket: &str, user_id: Uuid) -> Result<usize, AppError> {
    let keys: Vec<String> = storage
        .list(bucket, &user_prefix(user_id))
        .await?
        .into_iter()
        .map(|o| o.key)
        .collect();
    if !keys.is_empty() {
        storage.delete(bucket, &keys).await?;
    }
    Ok(keys.len())
}

/// DELETE /api/v1/account
///
/// Objects in both buckets are removed before any row.
pub async fn handle_delete_account(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<AccountDeletion>, AppError> {
    let mut objects_removed = 0;
    for bucket in [&state.config.resume_bucket, &state.config.documents_bucket] {
        objects_removed += purge_bucket(state.storage.as_ref(), bucket, user.id).await?;
    }

    let rows = state.store.delete_user_data(user.id).await?;

    if let Err(e) = state.auth.sign_out(&user.access_token).await {
        warn!("Sign-out after account deletion failed for {}: {e}", user.id);
    }

    info!(
        "Deleted account data for {}: {} rows, {objects_removed} objects",
        user.id,
        rows.total()
    );
    Ok(Json(AccountDeletion {
        rows,
        objects_removed,
    }))
}
