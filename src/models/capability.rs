use serde::{Deserialize, Serialize};

/// An integration capability record, fetched by reference path from the
/// document store.
///
/// Records describe one callable provider operation: where to send the
/// request, what the bodies look like, and free-text guidance on using them.
/// Every field is optional on the wire; missing fields fall back to a fixed
/// placeholder so downstream prompts always have something to interpolate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capability {
    #[serde(default = "no_name")]
    pub name: String,
    #[serde(default = "no_end_point", rename = "endPoint")]
    pub end_point: String,
    #[serde(default = "no_headers")]
    pub headers: String,
    #[serde(default = "no_route_name", rename = "routeName")]
    pub route_name: String,
    #[serde(default = "no_error_body", rename = "errorBody")]
    pub error_body: String,
    #[serde(default = "no_request_body", rename = "requestBody")]
    pub request_body: String,
    #[serde(default = "no_response_body", rename = "responseBody")]
    pub response_body: String,
    #[serde(default = "no_request_guidance", rename = "requestGuidance")]
    pub request_guidance: String,
    #[serde(default = "no_response_guidance", rename = "responseGuidance")]
    pub response_guidance: String,
}

fn no_name() -> String {
    "No name".to_string()
}
fn no_end_point() -> String {
    "No endPoint".to_string()
}
fn no_headers() -> String {
    "No headers".to_string()
}
fn no_route_name() -> String {
    "No routeName".to_string()
}
fn no_error_body() -> String {
    "No errorBody".to_string()
}
fn no_request_body() -> String {
    "No requestBody".to_string()
}
fn no_response_body() -> String {
    "No responseBody".to_string()
}
fn no_request_guidance() -> String {
    "No requestGuidance".to_string()
}
fn no_response_guidance() -> String {
    "No responseGuidance".to_string()
}

/// Capability fields accumulated into index-aligned parallel sequences.
///
/// Position `i` of every sequence belongs to the same record. Records that
/// could not be fetched are skipped entirely, so the sequences stay aligned
/// with each other (and ordered relative to the surviving inputs), just
/// shorter than the reference list.
#[derive(Debug, Clone, Default)]
pub struct CapabilityFields {
    pub names: Vec<String>,
    pub end_points: Vec<String>,
    pub headers: Vec<String>,
    pub route_names: Vec<String>,
    pub error_bodies: Vec<String>,
    pub request_bodies: Vec<String>,
    pub response_bodies: Vec<String>,
    pub request_guidance: Vec<String>,
    pub response_guidance: Vec<String>,
}

impl CapabilityFields {
    /// Append one record's fields to every sequence.
    pub fn push(&mut self, cap: Capability) {
        self.names.push(cap.name);
        self.end_points.push(cap.end_point);
        self.headers.push(cap.headers);
        self.route_names.push(cap.route_name);
        self.error_bodies.push(cap.error_body);
        self.request_bodies.push(cap.request_body);
        self.response_bodies.push(cap.response_body);
        self.request_guidance.push(cap.request_guidance);
        self.response_guidance.push(cap.response_guidance);
    }

    /// Number of accumulated records.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
