//! Document store collaborators.
//!
//! The persistent store is external to this service (the upstream system used
//! Firestore). These traits are the seam: the stage machine reads and writes
//! [`ProjectFile`] records through [`ArtifactStore`], and the context
//! accumulator reads [`Capability`] records through [`CapabilityStore`].
//!
//! [`MemoryArtifactStore`] and [`MemoryCapabilityStore`] back tests;
//! [`http::HttpDocumentStore`] talks to a real store over REST.

pub mod http;

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Capability, ProjectFile};

/// Document store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no record named {0}")]
    NotFound(String),

    #[error("store error: {0}")]
    Server(String),
}

/// Project-file persistence.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Create or overwrite a record, keyed by its name.
    async fn put(&self, file: ProjectFile) -> Result<(), StoreError>;

    /// Patch the code of an existing record. Fails with [`StoreError::NotFound`]
    /// when no record with that name exists.
    async fn update_code(&self, name: &str, code: &str) -> Result<(), StoreError>;

    /// Read a record back by name.
    async fn get(&self, name: &str) -> Result<Option<ProjectFile>, StoreError>;
}

/// Read-only capability record access, keyed by reference path.
#[async_trait]
pub trait CapabilityStore: Send + Sync {
    /// `Ok(None)` means the path resolves to no record; that is recoverable
    /// and the caller skips it. `Err` means the store itself failed.
    async fn get(&self, path: &str) -> Result<Option<Capability>, StoreError>;
}

/// In-memory artifact store backed by a mutexed map. Used by tests and useful
/// for running the server without an external store.
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    inner: Mutex<HashMap<String, ProjectFile>>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArtifactStore for MemoryArtifactStore {
    async fn put(&self, file: ProjectFile) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("artifact store lock poisoned");
        inner.insert(file.name.clone(), file);
        Ok(())
    }

    async fn update_code(&self, name: &str, code: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().expect("artifact store lock poisoned");
        match inner.get_mut(name) {
            Some(file) => {
                file.code = code.to_string();
                Ok(())
            }
            None => Err(StoreError::NotFound(name.to_string())),
        }
    }

    async fn get(&self, name: &str) -> Result<Option<ProjectFile>, StoreError> {
        let inner = self.inner.lock().expect("artifact store lock poisoned");
        Ok(inner.get(name).cloned())
    }
}

/// In-memory capability store keyed by reference path.
#[derive(Debug, Default)]
pub struct MemoryCapabilityStore {
    inner: Mutex<HashMap<String, Capability>>,
}

impl MemoryCapabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record under a reference path.
    pub fn insert(&self, path: impl Into<String>, cap: Capability) {
        let mut inner = self.inner.lock().expect("capability store lock poisoned");
        inner.insert(path.into(), cap);
    }
}

#[async_trait]
impl CapabilityStore for MemoryCapabilityStore {
    async fn get(&self, path: &str) -> Result<Option<Capability>, StoreError> {
        let inner = self.inner.lock().expect("capability store lock poisoned");
        Ok(inner.get(path).cloned())
    }
}
