//! Wire DTOs of the marketplace backend.

use serde::{Deserialize, Serialize};

/// Body of the agreement (`allowed`) and accept endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedResponse {
    pub allowed: bool,
}

/// Result of accepting the usage terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptOutcome {
    /// The terms were accepted by this call (HTTP 201).
    NewlyAgreed,
    /// The terms had been accepted before (HTTP 200).
    AlreadyAgreed,
}
