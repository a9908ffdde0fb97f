use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::AppState;
use crate::context;
use crate::models::{InvokeRequest, InvokeResponse};
use crate::stages::{self, ArtifactWrite, StageError, StageInput};

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
/// The full error is logged server-side for debugging, but clients only
/// see a generic message to avoid leaking collaborator details.
fn internal_error(e: impl std::fmt::Display) -> (StatusCode, String) {
    tracing::error!("Internal error: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

// ============================================================
// Root
// ============================================================

pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({ "message": "Hello World" }))
}

// ============================================================
// Agent invocation
// ============================================================

/// Run one workflow stage for the request's session.
///
/// Flow: look up the session's phase, accumulate the stage context
/// (capability records and remote file contents, both fetched concurrently),
/// dispatch the stage, apply the artifact writes, and advance the session.
/// The session only advances after every write has succeeded, so a store
/// failure leaves the stage retryable.
pub async fn invoke_agent(
    State(state): State<AppState>,
    Json(request): Json<InvokeRequest>,
) -> Result<Json<InvokeResponse>, (StatusCode, String)> {
    let phase = state.sessions.get(&request.session_id);

    let capabilities =
        context::gather_capabilities(state.capabilities.as_ref(), &request.capability_refs)
            .await
            .map_err(internal_error)?;
    let file_contents =
        context::gather_file_contents(state.fetcher.as_ref(), &request.suggested_file_urls).await;

    let input = StageInput {
        request: &request,
        capabilities: &capabilities,
        file_contents: &file_contents,
    };

    let outcome = stages::run(phase, input, state.agent.as_ref(), state.artifacts.as_ref())
        .await
        .map_err(|e| match e {
            StageError::SessionComplete => (StatusCode::CONFLICT, e.to_string()),
            other => internal_error(other),
        })?;

    for write in outcome.writes {
        match write {
            ArtifactWrite::Put(file) => {
                tracing::info!(name = %file.name, stage = outcome.stage, "persisting artifact");
                state.artifacts.put(file).await.map_err(internal_error)?;
            }
            ArtifactWrite::UpdateCode { name, code } => {
                tracing::info!(%name, stage = outcome.stage, "updating artifact");
                state
                    .artifacts
                    .update_code(&name, &code)
                    .await
                    .map_err(internal_error)?;
            }
        }
    }

    state.sessions.put(&request.session_id, outcome.next);

    Ok(Json(InvokeResponse {
        stage: outcome.stage,
        message: outcome.message,
        output: outcome.output,
    }))
}
