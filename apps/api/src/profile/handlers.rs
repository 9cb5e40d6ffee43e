use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::profile::{ProfileUpdate, UserPreferences, UserProfile, WorkPreference};
use crate::profile::validation::{
    validate_preferences, validate_profile, PreferencesInput, CITIES, INDUSTRIES, SALARY_RANGES,
};
use crate::state::AppState;

#[derive(Serialize)]
pub struct PreferenceOptions {
    pub cities: &'static [&'static str],
    pub industries: &'static [&'static str],
    pub salary_ranges: &'static [&'static str],
    pub work_preferences: [WorkPreference; 3],
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Option<UserProfile>>, AppError> {
    Ok(Json(state.store.get_profile(user.id).await?))
}

/// PUT /api/v1/profile
pub async fn handle_put_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    let update = validate_profile(&req)?;
    let profile = state.store.upsert_profile(user.id, &update).await?;
    Ok(Json(profile))
}

/// GET /api/v1/preferences
pub async fn handle_get_preferences(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Option<UserPreferences>>, AppError> {
    Ok(Json(state.store.get_preferences(user.id).await?))
}

/// PUT /api/v1/preferences
pub async fn handle_put_preferences(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<PreferencesInput>,
) -> Result<Json<UserPreferences>, AppError> {
    let update = validate_preferences(&req)?;
    let prefs = state.store.upsert_preferences(user.id, &update).await?;
    Ok(Json(prefs))
}

/// POST /api/v1/onboarding
///
/// First-time save from the onboarding form. Same rules as the settings
/// page; the form only offers title, location, remote, portfolio and résumé.
pub async fn handle_onboarding(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<PreferencesInput>,
) -> Result<Json<UserPreferences>, AppError> {
    let input = PreferencesInput {
        industry: None,
        salary_range: None,
        work_preference: None,
        ..req
    };
    let update = validate_preferences(&input)?;
    let prefs = state.store.upsert_preferences(user.id, &update).await?;
    info!("User {} completed onboarding", user.id);
    Ok(Json(prefs))
}

/// GET /api/v1/preferences/options
pub async fn handle_preference_options() -> Json<PreferenceOptions> {
    Json(PreferenceOptions {
        cities: CITIES,
        industries: INDUSTRIES,
        salary_ranges: SALARY_RANGES,
        work_preferences: [
            WorkPreference::Remote,
            WorkPreference::Hybrid,
            WorkPreference::Onsite,
        ],
    })
}
