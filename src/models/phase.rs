use serde::{Deserialize, Serialize};

/// The session state machine, one variant per workflow stage.
///
/// Each variant's payload is exactly the prior-stage output that stage
/// consumes, so a stage can never read an artifact that was not produced on
/// its path. The review and styling stages carry nothing: they read the
/// frontend file back from the artifact store instead.
///
/// Progression is not linear. The request-handler stage jumps straight to the
/// API-key stage, and the test stage jumps to documentation:
///
/// ```text
/// DocReview -> Backend -> Ui -> RequestHandler -> ApiKeys -> Done
/// Tests -> Docs -> ApiKeys          Review -> Styling -> Docs
/// ```
///
/// Tests, Review, and Styling are only reached when a caller seeds a session
/// at those stages explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Phase {
    /// Stage 1: summarize the provider's request/response schema from docs.
    DocReview,
    /// Stage 2: generate the backend proxy route.
    Backend {
        /// Doc-review text from stage 1. Carried but not interpolated.
        doc_review: Option<String>,
    },
    /// Stage 3: generate frontend UI elements.
    Ui { backend_code: String },
    /// Stage 4: generate the frontend request handler wired to the backend.
    RequestHandler {
        backend_code: String,
        ui_code: String,
    },
    /// Stage 5: generate integration tests.
    Tests {
        backend_code: String,
        handler_code: String,
    },
    /// Stage 6: review and harden the stored frontend code.
    Review,
    /// Stage 7: style the frontend code to match a fetched reference page.
    Styling,
    /// Stage 8: write integration documentation.
    Docs {
        backend_code: String,
        frontend_code: String,
    },
    /// Stage 9: extract API-key acquisition steps from the docs.
    ApiKeys,
    /// Terminal. Invoking a completed session is rejected.
    Done,
}

impl Phase {
    /// The wire stage number (1..=10).
    pub fn number(&self) -> u8 {
        match self {
            Self::DocReview => 1,
            Self::Backend { .. } => 2,
            Self::Ui { .. } => 3,
            Self::RequestHandler { .. } => 4,
            Self::Tests { .. } => 5,
            Self::Review => 6,
            Self::Styling => 7,
            Self::Docs { .. } => 8,
            Self::ApiKeys => 9,
            Self::Done => 10,
        }
    }
}

impl Default for Phase {
    /// Sessions never seen before start at the backend stage, not doc review.
    ///
    /// This mirrors the upstream service's default for absent sessions. It
    /// silently skips the doc-review stage for any session that was not
    /// explicitly seeded at stage 1; callers that want doc review must put
    /// `Phase::DocReview` first.
    fn default() -> Self {
        Self::Backend { doc_review: None }
    }
}
