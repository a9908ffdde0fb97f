//! The language-model agent collaborator.
//!
//! The stage machine only needs one capability: run a prompt against some
//! conversation context and get text back. [`AgentInvoker`] is that seam;
//! [`client::ChatClient`] implements it over an OpenAI-compatible
//! chat-completions API. Retrieval over the provider docs is the agent
//! side's concern — the docs link travels in the [`InvokeContext`].

pub mod client;
mod prompt;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::ChatMessage;

pub use prompt::{Prompt, PromptBuilder};

/// Errors from agent invocation.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Per-request conversation context passed alongside the stage prompt.
#[derive(Debug, Clone, Default)]
pub struct InvokeContext {
    /// Link to the provider docs, available to the agent's retrieval tools.
    pub docslink: String,
    pub chat_history: Vec<ChatMessage>,
}

/// What the agent produced. `output` is `None` when the agent returned
/// nothing usable; each stage substitutes its own fixed sentinel.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub output: Option<String>,
}

/// One prompt in, generated text out.
#[async_trait]
pub trait AgentInvoker: Send + Sync {
    async fn invoke(&self, prompt: &Prompt, ctx: &InvokeContext) -> Result<AgentReply, AgentError>;
}
