//! Marketplace application shell: configuration, backend client, and the
//! navigator that runs the navigation guard before every route transition.

pub mod config;
pub mod dto;
pub mod http;
pub mod navigator;

use std::sync::Arc;

use jukebox_auth::{GuardPolicy, NavigationGuard};
use jukebox_core::RouteTable;

pub use config::{AppConfig, ConfigError, Endpoints, Theme};
pub use http::{BackendError, HttpBackend};
pub use navigator::{
    BrowsingContext, LoggingBrowsingContext, NavigationError, NavigationOutcome, Navigator,
};

/// Everything the application builds once at startup.
pub struct App<B: BrowsingContext> {
    pub config: AppConfig,
    pub backend: Arc<HttpBackend>,
    pub navigator: Navigator<B>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("route table has no license page: {0}")]
    Routes(#[from] jukebox_core::RouteError),
}

/// Build the guard for a route table against the HTTP backend.
pub fn build_guard(
    config: &AppConfig,
    routes: &RouteTable,
    backend: Arc<HttpBackend>,
) -> Result<NavigationGuard, BuildError> {
    let policy = GuardPolicy::for_routes(routes, config.login.clone())?;
    Ok(NavigationGuard::new(backend.clone(), backend, policy))
}

/// Wire the standard route table, backend and navigator (public entrypoint used by `main.rs`).
pub fn build_app<B: BrowsingContext>(config: AppConfig, browsing_context: B) -> Result<App<B>, BuildError> {
    let routes = RouteTable::standard();
    let backend = Arc::new(HttpBackend::new(&config)?);
    let guard = build_guard(&config, &routes, backend.clone())?;

    Ok(App {
        navigator: Navigator::new(routes, guard, browsing_context),
        backend,
        config,
    })
}
