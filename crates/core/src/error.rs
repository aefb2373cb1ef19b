//! Routing error model.

use thiserror::Error;

/// Result type used by the route table.
pub type RouteResult<T> = Result<T, RouteError>;

/// Failure to resolve a requested location into a declared route.
///
/// These never reach the user as a message; the host routing layer decides
/// what an unmatched location means.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No declared route matches the requested path.
    #[error("no route matches path '{0}'")]
    NoMatch(String),

    /// The route name is not part of the declared table.
    #[error("unknown route name '{0}'")]
    UnknownName(String),

    /// The path is not an absolute in-app path (e.g. missing leading `/`).
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl RouteError {
    pub fn no_match(path: impl Into<String>) -> Self {
        Self::NoMatch(path.into())
    }

    pub fn unknown_name(name: impl Into<String>) -> Self {
        Self::UnknownName(name.into())
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::InvalidPath(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
