//! REST client for an external document store.
//!
//! Configuration comes from [`crate::config::Config`]:
//! - base URL of the store's HTTP API
//! - optional API key sent as a bearer token
//!
//! Project files live under `projectFiles/{name}`; capability records are
//! addressed by their full reference path (e.g. `capabilities/flight-search`).

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};

use super::{ArtifactStore, CapabilityStore, StoreError};
use crate::models::{Capability, ProjectFile};

/// HTTP-backed document store implementing both store traits.
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpDocumentStore {
    /// Create with explicit configuration.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            client: Client::new(),
        }
    }

    /// Build a request with optional auth header.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let mut req = self.client.request(method, &url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    /// Check a write response, converting HTTP errors to [`StoreError`].
    async fn check(&self, response: reqwest::Response, name: &str) -> Result<(), StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Server(format!("{}: {}", status, body)))
    }
}

#[async_trait]
impl ArtifactStore for HttpDocumentStore {
    async fn put(&self, file: ProjectFile) -> Result<(), StoreError> {
        let path = format!("projectFiles/{}", file.name);
        let response = self
            .request(Method::PUT, &path)
            .json(&file)
            .send()
            .await?;
        self.check(response, &file.name).await
    }

    async fn update_code(&self, name: &str, code: &str) -> Result<(), StoreError> {
        let path = format!("projectFiles/{}", name);
        let response = self
            .request(Method::PATCH, &path)
            .json(&serde_json::json!({ "code": code }))
            .send()
            .await?;
        self.check(response, name).await
    }

    async fn get(&self, name: &str) -> Result<Option<ProjectFile>, StoreError> {
        let path = format!("projectFiles/{}", name);
        let response = self.request(Method::GET, &path).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Server(format!("{}: {}", status, body)));
        }
        Ok(Some(response.json().await?))
    }
}

#[async_trait]
impl CapabilityStore for HttpDocumentStore {
    async fn get(&self, path: &str) -> Result<Option<Capability>, StoreError> {
        let response = self.request(Method::GET, path).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Server(format!("{}: {}", status, body)));
        }
        Ok(Some(response.json().await?))
    }
}
