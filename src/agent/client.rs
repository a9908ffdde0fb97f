//! HTTP client for an OpenAI-compatible chat-completions API.
//!
//! No stage awareness — serializes one prompt plus the conversation history
//! into a messages array and returns the first choice's content.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AgentError, AgentInvoker, AgentReply, InvokeContext, Prompt};
use async_trait::async_trait;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Chat-completions client implementing [`AgentInvoker`].
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ChatClient {
    /// Create a client against the default API host.
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL.to_string())
    }

    /// Create a client with a custom base URL (for testing with mock servers).
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url,
            model,
        }
    }

    fn messages<'a>(&self, prompt: &'a Prompt, ctx: &'a InvokeContext) -> Vec<WireMessage<'a>> {
        let mut messages = Vec::with_capacity(ctx.chat_history.len() + 2);
        messages.push(WireMessage {
            role: "system",
            content: &prompt.system,
        });
        for msg in &ctx.chat_history {
            messages.push(WireMessage {
                role: &msg.role,
                content: &msg.content,
            });
        }
        messages.push(WireMessage {
            role: "user",
            content: &prompt.user,
        });
        messages
    }
}

#[async_trait]
impl AgentInvoker for ChatClient {
    async fn invoke(&self, prompt: &Prompt, ctx: &InvokeContext) -> Result<AgentReply, AgentError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = CompletionRequest {
            model: &self.model,
            messages: self.messages(prompt, ctx),
            temperature: 0.0,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.text().await.unwrap_or_else(|_| "(no body)".into());
            return Err(AgentError::Api { status, message });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AgentError::InvalidResponse(format!("failed to parse response: {e}")))?;

        let output = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty());

        Ok(AgentReply { output })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatMessage;

    #[test]
    fn client_defaults_to_openai_host() {
        let client = ChatClient::new("key".into(), "gpt-4o-mini".into());
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn messages_order_system_history_user() {
        let client = ChatClient::new("key".into(), "gpt-4o-mini".into());
        let prompt = Prompt {
            system: "sys".to_string(),
            user: "do it".to_string(),
        };
        let ctx = InvokeContext {
            docslink: "https://docs".to_string(),
            chat_history: vec![ChatMessage {
                role: "user".to_string(),
                content: "earlier".to_string(),
            }],
        };

        let messages = client.messages(&prompt, &ctx);
        let roles: Vec<&str> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["system", "user", "user"]);
        assert_eq!(messages[0].content, "sys");
        assert_eq!(messages[1].content, "earlier");
        assert_eq!(messages[2].content, "do it");
    }

    #[test]
    fn request_serializes_with_zero_temperature() {
        let request = CompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![WireMessage {
                role: "system",
                content: "sys",
            }],
            temperature: 0.0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["temperature"], 0.0);
        assert_eq!(json["messages"][0]["role"], "system");
    }

    #[test]
    fn empty_choice_content_maps_to_none() {
        let body = serde_json::json!({
            "choices": [{ "message": { "content": "" } }]
        });
        let completion: CompletionResponse = serde_json::from_value(body).unwrap();
        let output = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.is_empty());
        assert!(output.is_none());
    }
}
