use std::sync::Arc;

use crate::auth::AuthProvider;
use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::storage::ObjectStore;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Each external collaborator sits behind a trait object so tests can swap in
/// in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    /// Managed relational store.
    pub store: Arc<dyn Store>,
    /// Managed object storage (résumé and generated-document buckets).
    pub storage: Arc<dyn ObjectStore>,
    /// Managed auth service.
    pub auth: Arc<dyn AuthProvider>,
    /// Hosted text-generation endpoint.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Config,
}
