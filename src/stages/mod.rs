//! The staged workflow state machine.
//!
//! [`run`] dispatches on a session's current [`Phase`]: it builds the stage
//! prompt, invokes the agent, post-processes the output, and returns a
//! [`StageOutcome`] describing the caller-visible response, the artifact
//! writes to apply, and the next phase. Stage execution is a single unit —
//! the outcome is computed first, the request handler applies the writes,
//! and only then does the session advance. A failed write leaves the session
//! on its current stage.
//!
//! Every stage substitutes a fixed "no action performed" sentinel when the
//! agent returns nothing usable, and strips code fences from the output
//! before persisting or returning it (except the API-key step list, which is
//! returned raw).

pub mod format;
pub mod prompts;

use thiserror::Error;

use crate::agent::{AgentError, AgentInvoker, InvokeContext, Prompt};
use crate::models::{
    CapabilityFields, InvokeRequest, Phase, ProjectFile, StageOutput,
};
use crate::store::{ArtifactStore, StoreError};

// ============================================================
// Fixed artifact names and per-stage sentinels
// ============================================================

/// Backend code lands here when no suggested file ends in `.py`.
pub const DEFAULT_BACKEND_FILE: &str = "app.py";
/// Doc-review output artifact.
pub const STRATEGY_FILE: &str = "integrationStrategy.txt";
/// Integration-test output artifact.
pub const TESTS_FILE: &str = "integration_tests.py";

pub const NO_BACKEND_ACTION: &str = "No backend endpoint action performed.";
pub const NO_UI_ACTION: &str = "No UI update action performed.";
pub const NO_ACTION: &str = "No action performed.";
pub const NO_TESTS_ACTION: &str = "No integration tests action performed.";
pub const NO_REVIEW_ACTION: &str = "No impact analysis action performed.";
pub const NO_DOCS_ACTION: &str = "No documentation action performed.";

/// Substituted for the stored frontend code when the `.js` record (or any
/// `.js` candidate among the suggested files) is missing.
pub const MISSING_FRONTEND: &str = "No code found in the document for the '.js' file.";

// ============================================================
// Inputs and outcomes
// ============================================================

/// Everything a stage may consume, accumulated per request.
#[derive(Debug, Clone, Copy)]
pub struct StageInput<'a> {
    pub request: &'a InvokeRequest,
    pub capabilities: &'a CapabilityFields,
    /// Fetched suggested-file contents, already decoded and joined.
    pub file_contents: &'a str,
}

/// One artifact-store side effect produced by a stage.
#[derive(Debug, Clone)]
pub enum ArtifactWrite {
    /// Create or overwrite a record.
    Put(ProjectFile),
    /// Patch the code of an existing record.
    UpdateCode { name: String, code: String },
}

/// The computed result of one stage execution.
#[derive(Debug)]
pub struct StageOutcome {
    /// The stage that ran (1..=9).
    pub stage: u8,
    pub message: String,
    pub output: StageOutput,
    pub writes: Vec<ArtifactWrite>,
    /// Phase the session advances to once the writes have been applied.
    pub next: Phase,
}

/// Stage execution errors.
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("session has already completed all stages")]
    SessionComplete,
}

// ============================================================
// Dispatch
// ============================================================

/// Execute the stage the session is currently on.
///
/// `artifacts` is only read here (the review and styling stages read the
/// frontend file back); all writes are returned in the outcome.
pub async fn run(
    phase: Phase,
    input: StageInput<'_>,
    agent: &dyn AgentInvoker,
    artifacts: &dyn ArtifactStore,
) -> Result<StageOutcome, StageError> {
    let stage = phase.number();
    tracing::debug!(stage, session_id = %input.request.session_id, "entering stage");

    match phase {
        Phase::DocReview => doc_review(input, agent).await,
        Phase::Backend { .. } => backend(input, agent).await,
        Phase::Ui { backend_code } => ui(input, agent, backend_code).await,
        Phase::RequestHandler {
            backend_code,
            ui_code,
        } => request_handler(input, agent, backend_code, ui_code).await,
        Phase::Tests {
            backend_code,
            handler_code,
        } => integration_tests(input, agent, backend_code, handler_code).await,
        Phase::Review => review(input, agent, artifacts).await,
        Phase::Styling => styling(input, agent, artifacts).await,
        Phase::Docs {
            backend_code,
            frontend_code,
        } => documentation(input, agent, backend_code, frontend_code).await,
        Phase::ApiKeys => api_keys(input, agent).await,
        Phase::Done => Err(StageError::SessionComplete),
    }
}

/// Invoke the agent and substitute `sentinel` when it returns nothing usable.
async fn invoke(
    agent: &dyn AgentInvoker,
    prompt: &Prompt,
    input: StageInput<'_>,
    sentinel: &str,
) -> Result<String, StageError> {
    let ctx = InvokeContext {
        docslink: input.request.docslink.clone(),
        chat_history: input.request.chat_history.clone(),
    };
    let reply = agent.invoke(prompt, &ctx).await?;
    Ok(reply.output.unwrap_or_else(|| sentinel.to_string()))
}

// ============================================================
// Stage 1: doc review
// ============================================================

async fn doc_review(
    input: StageInput<'_>,
    agent: &dyn AgentInvoker,
) -> Result<StageOutcome, StageError> {
    let prompt = prompts::doc_review(&input.request.docslink);
    let output = invoke(agent, &prompt, input, NO_BACKEND_ACTION).await?;

    let write = ArtifactWrite::Put(ProjectFile::new(
        STRATEGY_FILE,
        output.clone(),
        &input.request.project,
    ));

    Ok(StageOutcome {
        stage: 1,
        message: "Doc review generated".to_string(),
        output: StageOutput::Text(format::strip_fences(&output)),
        writes: vec![write],
        next: Phase::Backend {
            doc_review: Some(output),
        },
    })
}

// ============================================================
// Stage 2: backend proxy route
// ============================================================

async fn backend(
    input: StageInput<'_>,
    agent: &dyn AgentInvoker,
) -> Result<StageOutcome, StageError> {
    let prompt = prompts::backend(input.capabilities);
    let output = invoke(agent, &prompt, input, NO_BACKEND_ACTION).await?;
    let formatted = format::strip_fences(&output);

    // The generated route goes to the first suggested Python file, or to the
    // default file name when none applies.
    let file_name = input
        .request
        .suggested_files
        .iter()
        .find(|name| name.ends_with(".py"))
        .map(String::as_str)
        .unwrap_or(DEFAULT_BACKEND_FILE);

    let write = ArtifactWrite::Put(ProjectFile::new(
        file_name,
        formatted.clone(),
        &input.request.project,
    ));

    Ok(StageOutcome {
        stage: 2,
        message: "Backend endpoints generated".to_string(),
        output: StageOutput::Text(formatted),
        writes: vec![write],
        next: Phase::Ui {
            backend_code: output,
        },
    })
}

// ============================================================
// Stage 3: frontend UI elements
// ============================================================

async fn ui(
    input: StageInput<'_>,
    agent: &dyn AgentInvoker,
    backend_code: String,
) -> Result<StageOutcome, StageError> {
    let prompt = prompts::ui(input.capabilities);
    let output = invoke(agent, &prompt, input, NO_UI_ACTION).await?;
    let formatted = format::strip_fences(&output);

    // Every suggested file receives the component, with its repository path
    // recorded when the path sequence has an entry at that index.
    let writes = input
        .request
        .suggested_files
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let mut file = ProjectFile::new(name, formatted.clone(), &input.request.project);
            if let Some(path) = input.request.suggested_file_paths.get(index) {
                file = file.with_repo_path(path);
            }
            ArtifactWrite::Put(file)
        })
        .collect();

    Ok(StageOutcome {
        stage: 3,
        message: "UI components created or updated".to_string(),
        output: StageOutput::Text(formatted),
        writes,
        next: Phase::RequestHandler {
            backend_code,
            ui_code: output,
        },
    })
}

// ============================================================
// Stage 4: frontend request handler
// ============================================================

async fn request_handler(
    input: StageInput<'_>,
    agent: &dyn AgentInvoker,
    backend_code: String,
    ui_code: String,
) -> Result<StageOutcome, StageError> {
    let prompt = prompts::request_handler(&backend_code, &ui_code, input.capabilities);
    let output = invoke(agent, &prompt, input, NO_ACTION).await?;
    let formatted = format::strip_fences(&output);

    // Updates, not inserts: the UI stage already created these records.
    let writes = input
        .request
        .suggested_files
        .iter()
        .map(|name| ArtifactWrite::UpdateCode {
            name: name.clone(),
            code: formatted.clone(),
        })
        .collect();

    Ok(StageOutcome {
        stage: 4,
        message: "Refactoring performed on suggested files".to_string(),
        output: StageOutput::Text(formatted),
        writes,
        next: Phase::ApiKeys,
    })
}

// ============================================================
// Stage 5: integration tests
// ============================================================

async fn integration_tests(
    input: StageInput<'_>,
    agent: &dyn AgentInvoker,
    backend_code: String,
    handler_code: String,
) -> Result<StageOutcome, StageError> {
    let prompt =
        prompts::integration_tests(&handler_code, &backend_code, &input.request.docslink);
    let output = invoke(agent, &prompt, input, NO_TESTS_ACTION).await?;

    let write = ArtifactWrite::Put(ProjectFile::new(
        TESTS_FILE,
        output.clone(),
        &input.request.project,
    ));

    Ok(StageOutcome {
        stage: 5,
        message: "Integration tests created".to_string(),
        output: StageOutput::Text(format::strip_fences(&output)),
        writes: vec![write],
        next: Phase::Docs {
            backend_code,
            frontend_code: String::new(),
        },
    })
}

// ============================================================
// Stages 6 and 7: review and styling
// ============================================================

/// Read the frontend component back from the store: the first suggested file
/// ending in `.js`. Returns the record name (when a candidate exists) and
/// its code, falling back to [`MISSING_FRONTEND`] for a missing record or
/// missing candidate.
async fn read_back_frontend(
    input: StageInput<'_>,
    artifacts: &dyn ArtifactStore,
) -> Result<(Option<String>, String), StageError> {
    let candidate = input
        .request
        .suggested_files
        .iter()
        .find(|name| name.ends_with(".js"));

    let Some(name) = candidate else {
        tracing::warn!("no '.js' file among suggested files; nothing to read back");
        return Ok((None, MISSING_FRONTEND.to_string()));
    };

    let code = match artifacts.get(name).await? {
        Some(file) => file.code,
        None => MISSING_FRONTEND.to_string(),
    };
    Ok((Some(name.clone()), code))
}

async fn review(
    input: StageInput<'_>,
    agent: &dyn AgentInvoker,
    artifacts: &dyn ArtifactStore,
) -> Result<StageOutcome, StageError> {
    let (file_name, frontend_code) = read_back_frontend(input, artifacts).await?;

    let prompt = prompts::review(&frontend_code, input.capabilities);
    let output = invoke(agent, &prompt, input, NO_REVIEW_ACTION).await?;

    // Only write back when there is a target file and the agent actually
    // produced something.
    let writes = match file_name {
        Some(name) if output != NO_REVIEW_ACTION => vec![ArtifactWrite::UpdateCode {
            name,
            code: output.clone(),
        }],
        _ => Vec::new(),
    };

    Ok(StageOutcome {
        stage: 6,
        message: "Code review completed".to_string(),
        output: StageOutput::Text(format::strip_fences(&output)),
        writes,
        next: Phase::Styling,
    })
}

async fn styling(
    input: StageInput<'_>,
    agent: &dyn AgentInvoker,
    artifacts: &dyn ArtifactStore,
) -> Result<StageOutcome, StageError> {
    let (file_name, frontend_code) = read_back_frontend(input, artifacts).await?;

    let prompt = prompts::styling(&frontend_code, input.file_contents);
    let output = invoke(agent, &prompt, input, NO_REVIEW_ACTION).await?;

    let writes = match file_name {
        Some(name) if output != NO_REVIEW_ACTION => vec![ArtifactWrite::UpdateCode {
            name,
            code: output.clone(),
        }],
        _ => Vec::new(),
    };

    Ok(StageOutcome {
        stage: 7,
        message: "Code review completed".to_string(),
        output: StageOutput::Text(format::strip_fences(&output)),
        writes,
        next: Phase::Docs {
            backend_code: String::new(),
            frontend_code: String::new(),
        },
    })
}

// ============================================================
// Stage 8: documentation
// ============================================================

/// Documentation artifact name, derived from the first capability endpoint
/// with every `/`, `:` and `?` replaced so the name stays store-safe.
fn documentation_file_name(caps: &CapabilityFields) -> String {
    let name = match caps.end_points.first() {
        Some(end_point) => {
            format!("TechnicalDocumentation_{}.txt", end_point.replace('/', "_"))
        }
        None => "TechnicalDocumentation.txt".to_string(),
    };
    name.replace(':', "_").replace('?', "_")
}

async fn documentation(
    input: StageInput<'_>,
    agent: &dyn AgentInvoker,
    backend_code: String,
    frontend_code: String,
) -> Result<StageOutcome, StageError> {
    let prompt =
        prompts::documentation(&backend_code, &frontend_code, &input.request.docslink);
    let output = invoke(agent, &prompt, input, NO_DOCS_ACTION).await?;

    let file_name = documentation_file_name(input.capabilities);
    tracing::debug!(%file_name, "persisting documentation");
    let write = ArtifactWrite::Put(ProjectFile::new(
        file_name,
        output.clone(),
        &input.request.project,
    ));

    Ok(StageOutcome {
        stage: 8,
        message: "Documentation sent".to_string(),
        output: StageOutput::Text(format::strip_fences(&output)),
        writes: vec![write],
        next: Phase::ApiKeys,
    })
}

// ============================================================
// Stage 9: API key steps
// ============================================================

async fn api_keys(
    input: StageInput<'_>,
    agent: &dyn AgentInvoker,
) -> Result<StageOutcome, StageError> {
    let prompt = prompts::api_keys(&input.request.docslink);
    let output = invoke(agent, &prompt, input, NO_BACKEND_ACTION).await?;

    // The step list is returned raw, one entry per line.
    let steps = output.split('\n').map(str::to_string).collect();

    Ok(StageOutcome {
        stage: 9,
        message: "API Key info sent".to_string(),
        output: StageOutput::Steps(steps),
        writes: Vec::new(),
        next: Phase::Done,
    })
}
