//! Service contracts the guard consumes.
//!
//! The guard is decoupled from transport: the application crate provides
//! HTTP implementations, tests provide scripted ones.

use async_trait::async_trait;
use thiserror::Error;

/// Failure of one external query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("undecodable response: {0}")]
    Decode(String),

    #[error("query timed out")]
    Timeout,
}

impl QueryError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

/// "Am I authenticated" query.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Succeeds when the session is authenticated.
    async fn authenticated(&self) -> Result<(), QueryError>;
}

/// "Is usage agreed" query.
#[async_trait]
pub trait AgreementService: Send + Sync {
    /// The `allowed` flag reported by the agreement endpoint.
    async fn allowed(&self) -> Result<bool, QueryError>;
}
