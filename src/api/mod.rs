mod handlers;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::agent::AgentInvoker;
use crate::fetch::ContentFetcher;
use crate::session::SessionStore;
use crate::store::{ArtifactStore, CapabilityStore};

/// Injected collaborators shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionStore>,
    pub artifacts: Arc<dyn ArtifactStore>,
    pub capabilities: Arc<dyn CapabilityStore>,
    pub fetcher: Arc<dyn ContentFetcher>,
    pub agent: Arc<dyn AgentInvoker>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/agent/invoke", post(handlers::invoke_agent))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
