//! Domain models for weld.
//!
//! # Core Concepts
//!
//! ## Wire Types
//!
//! - [`InvokeRequest`]: The single `POST /agent/invoke` request body. Carries the
//!   session id, provider docs link, and the optional ordered sequences of
//!   suggested files / file URLs / file paths / capability reference paths.
//! - [`InvokeResponse`]: `{stage, message, output}` returned to the caller.
//!   `output` is a plain string for every stage except the API-key stage,
//!   which returns the newline-split step list.
//!
//! ## Session State
//!
//! - [`Phase`]: The session state machine, one variant per stage. Each variant
//!   carries exactly the prior-stage artifacts that stage consumes, so a stage
//!   can never reference output that was not produced on its path.
//!
//! ## Collaborator Records
//!
//! - [`Capability`]: A read-only integration capability record fetched by
//!   reference path (endpoint, headers, request/response schemas, guidance).
//! - [`CapabilityFields`]: Index-aligned parallel sequences of capability
//!   fields, accumulated across the fetched records in input order.
//! - [`ProjectFile`]: A named unit of generated content (source file,
//!   documentation, or tests) tied to a project. Overwritten wholesale by the
//!   latest stage that touches it; no versioning.

mod artifact;
mod capability;
mod phase;
mod request;

pub use artifact::*;
pub use capability::*;
pub use phase::*;
pub use request::*;
