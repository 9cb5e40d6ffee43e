//! Email outreach: the history list and the send-emails function endpoint.
//! Sending is not implemented; the endpoint accepts and logs the batch.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::{json, Value};
use tracing::{error, info};

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::outreach::EmailOutreach;
use crate::state::AppState;

/// GET /api/v1/outreach
pub async fn handle_list_outreach(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<EmailOutreach>>, AppError> {
    Ok(Json(state.store.list_outreach(user.id).await?))
}

/// The `emails` field of the request body. Bodies that are valid JSON but
/// not an object carry no batch; only malformed JSON and `null` are errors.
fn parse_emails(body: &[u8]) -> Result<Value, String> {
    match serde_json::from_slice::<Value>(body).map_err(|e| e.to_string())? {
        Value::Object(mut fields) => Ok(fields.remove("emails").unwrap_or(Value::Null)),
        Value::Null => Err("request body must not be null".to_string()),
        _ => Ok(Value::Null),
    }
}

/// POST /functions/v1/send-job-emails
///
/// Keeps the function's own response shape: `{"message"}` on success,
/// `{"error"}` with status 500 otherwise.
pub async fn handle_send_job_emails(body: Bytes) -> Response {
    match parse_emails(&body) {
        Ok(emails) => {
            info!("Preparing to send emails: {emails}");
            (StatusCode::OK, Json(json!({ "message": "Emails processed" }))).into_response()
        }
        Err(message) => {
            error!("Error in send job emails function: {message}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": message })),
            )
                .into_response()
        }
    }
}
