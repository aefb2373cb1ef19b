//! HTTP implementations of the guard's services, backed by `reqwest`.

use async_trait::async_trait;
use jukebox_auth::{AgreementService, AuthService, QueryError};
use reqwest::StatusCode;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use thiserror::Error;
use url::Url;

use crate::config::{AppConfig, Endpoints};
use crate::dto::{AcceptOutcome, AllowedResponse};

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("session cookie is not a valid header value")]
    InvalidCookie,
}

/// Client for the marketplace backend.
///
/// One instance serves both the authentication and the agreement query; it
/// holds no per-request state, so every transition re-queries.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = &config.session_cookie {
            let value = HeaderValue::from_str(cookie).map_err(|_| BackendError::InvalidCookie)?;
            headers.insert(COOKIE, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.query_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.clone(),
            endpoints: config.endpoints.clone(),
        })
    }

    fn url(&self, endpoint: &str) -> Result<Url, QueryError> {
        self.base_url
            .join(endpoint)
            .map_err(|e| QueryError::network(format!("invalid endpoint '{endpoint}': {e}")))
    }

    async fn get(&self, endpoint: &str) -> Result<reqwest::Response, QueryError> {
        let url = self.url(endpoint)?;
        tracing::debug!(%url, "querying backend");

        let resp = self.client.get(url).send().await.map_err(query_error)?;
        if !resp.status().is_success() {
            return Err(QueryError::Status(resp.status().as_u16()));
        }
        Ok(resp)
    }

    /// Record that the current user accepts the usage terms.
    ///
    /// Unlike the guard queries, failures here are returned to the caller:
    /// accepting is an explicit user action.
    pub async fn accept(&self) -> Result<AcceptOutcome, QueryError> {
        let resp = self.get(&self.endpoints.accept).await?;
        let status = resp.status();
        let body: AllowedResponse = resp.json().await.map_err(query_error)?;

        if !body.allowed {
            return Err(QueryError::decode("accept endpoint reported allowed = false"));
        }

        let outcome = if status == StatusCode::CREATED {
            AcceptOutcome::NewlyAgreed
        } else {
            AcceptOutcome::AlreadyAgreed
        };
        tracing::info!(?outcome, "usage terms accepted");
        Ok(outcome)
    }
}

#[async_trait]
impl AuthService for HttpBackend {
    async fn authenticated(&self) -> Result<(), QueryError> {
        self.get(&self.endpoints.authenticated).await.map(|_| ())
    }
}

#[async_trait]
impl AgreementService for HttpBackend {
    async fn allowed(&self) -> Result<bool, QueryError> {
        let resp = self.get(&self.endpoints.allowed).await?;
        let body: AllowedResponse = resp.json().await.map_err(query_error)?;
        Ok(body.allowed)
    }
}

fn query_error(err: reqwest::Error) -> QueryError {
    if err.is_timeout() {
        QueryError::Timeout
    } else if err.is_decode() {
        QueryError::decode(err.to_string())
    } else {
        QueryError::network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_base_url;

    #[test]
    fn endpoints_join_onto_base_url() {
        let config = AppConfig::new(parse_base_url("https://marketplace.example.com/jukebox/").unwrap());
        let backend = HttpBackend::new(&config).unwrap();

        assert_eq!(
            backend.url("/jukebox/api/allowed").unwrap().as_str(),
            "https://marketplace.example.com/jukebox/api/allowed"
        );
        assert_eq!(
            backend.url("api/allowed").unwrap().as_str(),
            "https://marketplace.example.com/jukebox/api/allowed"
        );
    }

    #[test]
    fn invalid_cookie_is_rejected() {
        let mut config = AppConfig::new(parse_base_url("http://localhost").unwrap());
        config.session_cookie = Some("bad\ncookie".to_string());
        assert!(matches!(HttpBackend::new(&config), Err(BackendError::InvalidCookie)));
    }
}
