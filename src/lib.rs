//! weld — staged API-integration agent server.
//!
//! A single `POST /agent/invoke` endpoint drives a session through the
//! integration workflow: doc review, backend proxy generation, frontend UI
//! and request-handler generation, integration tests, review, styling,
//! documentation, and API-key setup steps. Each stage prompts a language
//! model agent and persists the result to a document store.
//!
//! The interesting part is [`stages`], the session state machine. Everything
//! the machine talks to — the agent, the document store, remote content
//! fetching — sits behind a trait so servers and tests compose the same
//! router from different collaborators.

pub mod agent;
pub mod api;
pub mod config;
pub mod context;
pub mod fetch;
pub mod models;
pub mod session;
pub mod stages;
pub mod store;
