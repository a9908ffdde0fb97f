//! Server configuration loaded from environment variables.

/// Default chat-completions host.
const DEFAULT_AGENT_URL: &str = "https://api.openai.com";
/// Default model for stage prompts.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default document store API (local development).
const DEFAULT_STORE_URL: &str = "http://localhost:9090";

/// Configuration for the server and its collaborators.
///
/// - `WELD_AGENT_API_KEY` (falls back to `OPENAI_API_KEY`) — agent API key
/// - `WELD_AGENT_URL` — chat-completions base URL
/// - `WELD_MODEL` — model name
/// - `WELD_STORE_URL` — document store base URL
/// - `WELD_STORE_API_KEY` — document store API key (optional for local)
#[derive(Clone, Debug)]
pub struct Config {
    pub agent_api_key: String,
    pub agent_url: String,
    pub model: String,
    pub store_url: String,
    pub store_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let agent_api_key = std::env::var("WELD_AGENT_API_KEY")
            .or_else(|_| std::env::var("OPENAI_API_KEY"))
            .unwrap_or_default();
        let agent_url =
            std::env::var("WELD_AGENT_URL").unwrap_or_else(|_| DEFAULT_AGENT_URL.to_string());
        let model = std::env::var("WELD_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let store_url =
            std::env::var("WELD_STORE_URL").unwrap_or_else(|_| DEFAULT_STORE_URL.to_string());
        let store_api_key = std::env::var("WELD_STORE_API_KEY").ok();

        Self {
            agent_api_key,
            agent_url,
            model,
            store_url,
            store_api_key,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
