use serde::{Deserialize, Serialize};

/// One prior conversation message, forwarded to the agent verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Request body for `POST /agent/invoke`.
///
/// The session id selects which stage runs; everything else is raw input for
/// that stage. The three `suggested_*` sequences are index-aligned: the file
/// at position `i` corresponds to the URL and repository path at position `i`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeRequest {
    /// Free-text input. Unused by the current stages but part of the wire contract.
    #[serde(default)]
    pub input: String,
    pub session_id: String,
    /// Link to the API provider's documentation pages.
    pub docslink: String,
    /// Repository reference (e.g. `org/repo`).
    #[serde(default)]
    pub repo: String,
    /// Project identifier the generated artifacts belong to.
    pub project: String,
    #[serde(default)]
    pub suggested_files: Vec<String>,
    #[serde(default)]
    pub suggested_file_urls: Vec<String>,
    #[serde(default)]
    pub suggested_file_paths: Vec<String>,
    /// Capability record reference paths, fetched concurrently.
    #[serde(default, rename = "capabilityRefs")]
    pub capability_refs: Vec<String>,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

/// Stage output: a single text block for most stages, an ordered step list
/// for the API-key stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StageOutput {
    Text(String),
    Steps(Vec<String>),
}

impl StageOutput {
    /// The text form, if this is a single-block output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Steps(_) => None,
        }
    }
}

/// Response body for `POST /agent/invoke`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvokeResponse {
    /// The stage that just executed (1..=9).
    pub stage: u8,
    pub message: String,
    pub output: StageOutput,
}
