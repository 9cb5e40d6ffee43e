pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::customizer::handlers as customizer;
use crate::matching::handlers as matching;
use crate::profile::handlers as profile;
use crate::resume::{handlers as resume, MAX_RESUME_BYTES};
use crate::state::AppState;
use crate::{account, applications, outreach, pages, plans};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/sign-up", post(auth::handle_sign_up))
        .route("/api/v1/auth/sign-in", post(auth::handle_sign_in))
        .route("/api/v1/auth/sign-out", post(auth::handle_sign_out))
        .route("/api/v1/auth/oauth/:provider", get(auth::handle_oauth))
        .route("/api/v1/auth/session", get(auth::handle_session))
        .route("/api/v1/auth/me", get(auth::handle_me))
        // Profile & preferences
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).put(profile::handle_put_profile),
        )
        .route(
            "/api/v1/preferences",
            get(profile::handle_get_preferences).put(profile::handle_put_preferences),
        )
        .route(
            "/api/v1/preferences/options",
            get(profile::handle_preference_options),
        )
        .route("/api/v1/onboarding", post(profile::handle_onboarding))
        // Résumé storage
        .route(
            "/api/v1/resume",
            post(resume::handle_upload)
                .layer(DefaultBodyLimit::max(MAX_RESUME_BYTES))
                .get(resume::handle_list)
                .delete(resume::handle_delete),
        )
        .route("/api/v1/resume/file", get(resume::handle_download))
        // Matching & listings
        .route("/api/v1/matching/run", post(matching::handle_run_matching))
        .route("/api/v1/matches", get(matching::handle_list_matches))
        .route("/api/v1/matches/seed", post(matching::handle_seed_matches))
        .route("/api/v1/matches/:id", patch(matching::handle_update_match))
        .route("/api/v1/jobs", get(matching::handle_search_jobs))
        .route("/api/v1/jobs/:id", get(matching::handle_get_job))
        // Customized documents
        .route(
            "/api/v1/jobs/:id/documents",
            get(customizer::handle_get_documents).post(customizer::handle_customize),
        )
        .route(
            "/api/v1/jobs/:id/documents/:kind",
            get(customizer::handle_get_document_text),
        )
        // Applications
        .route(
            "/api/v1/applications",
            get(applications::handlers::handle_list).post(applications::handlers::handle_create),
        )
        .route(
            "/api/v1/applications/summary",
            get(applications::handlers::handle_summary),
        )
        .route(
            "/api/v1/applications/:id",
            patch(applications::handlers::handle_update).delete(applications::handlers::handle_delete),
        )
        // Outreach
        .route("/api/v1/outreach", get(outreach::handle_list_outreach))
        .route(
            "/functions/v1/send-job-emails",
            post(outreach::handle_send_job_emails),
        )
        // Account & plans
        .route("/api/v1/account", delete(account::handle_delete_account))
        .route("/api/v1/plans", get(plans::handle_list_plans))
        // Client pages behind the session gate
        .merge(pages::router(state.clone()))
        .with_state(state)
}
