//! Remote content fetching.
//!
//! Suggested-file URLs point at a contents API that wraps each file in a JSON
//! envelope: `{"content": "<base64>", "encoding": "base64", ...}`. The
//! fetcher returns the raw response body; [`decode_envelope`] unwraps it.
//! Anything that does not match the envelope contract decodes to a fixed
//! fallback string rather than failing the request.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Substituted when an envelope is malformed, the payload is not valid
/// base64, or the decoded bytes are not UTF-8.
pub const CONTENT_FALLBACK: &str = "Content not found or not in base64 encoding.";

/// Fetch errors. Only transport failures surface; envelope problems are
/// absorbed into [`CONTENT_FALLBACK`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Remote content fetch by URL.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// The raw response body for this URL.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// reqwest-backed fetcher.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }
}

#[derive(Debug, Deserialize)]
struct FileEnvelope {
    content: Option<String>,
    encoding: Option<String>,
}

/// Decode a contents-API envelope into the file's text.
///
/// The payload must declare `"encoding": "base64"` and carry a `content`
/// field. Base64 payloads arrive with embedded newlines, so whitespace is
/// stripped before decoding. Every failure path returns
/// [`CONTENT_FALLBACK`] instead of an error.
pub fn decode_envelope(body: &str) -> String {
    let envelope: FileEnvelope = match serde_json::from_str(body) {
        Ok(env) => env,
        Err(_) => return CONTENT_FALLBACK.to_string(),
    };

    let (content, encoding) = match (envelope.content, envelope.encoding) {
        (Some(c), Some(e)) => (c, e),
        _ => return CONTENT_FALLBACK.to_string(),
    };
    if encoding != "base64" {
        return CONTENT_FALLBACK.to_string();
    }

    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    match STANDARD.decode(compact.as_bytes()) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => CONTENT_FALLBACK.to_string(),
        },
        Err(_) => CONTENT_FALLBACK.to_string(),
    }
}
