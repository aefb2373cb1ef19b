//! The routing layer: runs the guard for each transition attempt and acts on
//! its single decision.
//!
//! An in-app redirect starts a new transition attempt to the redirect target
//! (which runs the guard again); leaving for the external login hands the URL
//! to the [`BrowsingContext`] and ends the attempt.

use std::collections::BTreeMap;

use jukebox_auth::{NavigationContext, NavigationDecision, NavigationGuard};
use jukebox_core::{RouteError, RouteName, RouteTable};
use serde::Serialize;
use thiserror::Error;

/// The host document, able to perform a full page load.
pub trait BrowsingContext: Send + Sync {
    /// Navigate the whole browsing context to `url`, leaving the application.
    fn assign(&self, url: &str);
}

/// A browsing context that only logs where it would go.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingBrowsingContext;

impl BrowsingContext for LoggingBrowsingContext {
    fn assign(&self, url: &str) {
        tracing::info!(url, "leaving application");
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("too many redirects while navigating to '{0}'")]
    TooManyRedirects(String),
}

/// What one call to [`Navigator::navigate`] ended in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// An in-app route is now current.
    Committed {
        route: RouteName,
        path: String,
        params: BTreeMap<String, String>,
        logged_in: bool,
        /// Paths that were redirected away from, in order.
        redirected_from: Vec<String>,
    },
    /// The browsing context was sent to the external login.
    LeftApplication { url: String },
}

pub struct Navigator<B: BrowsingContext> {
    routes: RouteTable,
    guard: NavigationGuard,
    browsing_context: B,
    current: Option<NavigationContext>,
}

impl<B: BrowsingContext> Navigator<B> {
    /// Upper bound of in-app redirects followed for one call to `navigate`.
    pub const MAX_REDIRECTS: usize = 8;

    pub fn new(routes: RouteTable, guard: NavigationGuard, browsing_context: B) -> Self {
        Self {
            routes,
            guard,
            browsing_context,
            current: None,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Context of the currently committed route, if any.
    pub fn current(&self) -> Option<&NavigationContext> {
        self.current.as_ref()
    }

    /// Attempt a transition to `location`.
    ///
    /// Every guard run yields exactly one decision and each decision is acted
    /// upon exactly once. The current route only changes on `Proceed`.
    pub async fn navigate(&mut self, location: &str) -> Result<NavigationOutcome, NavigationError> {
        let mut target = location.to_string();
        let mut redirected_from = Vec::new();

        loop {
            let request = self.routes.resolve(&target)?;
            let outcome = self.guard.check(request).await;

            match outcome.decision {
                NavigationDecision::Proceed => {
                    let context = outcome.context;
                    let committed = NavigationOutcome::Committed {
                        route: context.request().target_route_name(),
                        path: context.request().target_path().to_string(),
                        params: context.request().route_params().clone(),
                        logged_in: context.logged_in(),
                        redirected_from,
                    };
                    self.current = Some(context);
                    return Ok(committed);
                }
                NavigationDecision::RedirectTo(path) => {
                    if redirected_from.len() >= Self::MAX_REDIRECTS {
                        tracing::warn!(location, "redirect limit reached");
                        return Err(NavigationError::TooManyRedirects(location.to_string()));
                    }
                    tracing::debug!(from = %target, to = %path, "redirecting");
                    redirected_from.push(std::mem::replace(&mut target, path));
                }
                NavigationDecision::DeferToExternalLogin(url) => {
                    self.browsing_context.assign(&url);
                    return Ok(NavigationOutcome::LeftApplication { url });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jukebox_auth::{AgreementService, AuthService, GuardPolicy, LoginRedirect, QueryError};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingContext {
        assigned: Mutex<Vec<String>>,
    }

    impl BrowsingContext for Arc<RecordingContext> {
        fn assign(&self, url: &str) {
            self.assigned.lock().unwrap().push(url.to_string());
        }
    }

    struct Backend {
        authenticated: bool,
        allowed: Result<bool, QueryError>,
        agreement_calls: AtomicUsize,
    }

    #[async_trait]
    impl AuthService for Backend {
        async fn authenticated(&self) -> Result<(), QueryError> {
            if self.authenticated {
                Ok(())
            } else {
                Err(QueryError::Status(401))
            }
        }
    }

    #[async_trait]
    impl AgreementService for Backend {
        async fn allowed(&self) -> Result<bool, QueryError> {
            self.agreement_calls.fetch_add(1, Ordering::SeqCst);
            self.allowed.clone()
        }
    }

    fn navigator(
        allowed: Result<bool, QueryError>,
        policy: GuardPolicy,
    ) -> (Navigator<Arc<RecordingContext>>, Arc<Backend>, Arc<RecordingContext>) {
        let backend = Arc::new(Backend {
            authenticated: true,
            allowed,
            agreement_calls: AtomicUsize::new(0),
        });
        let recording = Arc::new(RecordingContext::default());
        let guard = NavigationGuard::new(backend.clone(), backend.clone(), policy);
        (
            Navigator::new(RouteTable::standard(), guard, recording.clone()),
            backend,
            recording,
        )
    }

    #[tokio::test]
    async fn not_agreed_redirect_commits_license_page() {
        let (mut nav, backend, recording) = navigator(Ok(false), GuardPolicy::default());

        let outcome = nav.navigate("/terms").await.unwrap();
        assert_eq!(
            outcome,
            NavigationOutcome::Committed {
                route: RouteName::License,
                path: "/license".to_string(),
                params: BTreeMap::new(),
                logged_in: true,
                redirected_from: vec!["/terms".to_string()],
            }
        );
        assert_eq!(nav.current().unwrap().request().target_route_name(), RouteName::License);
        // One guard run for /terms, one for the /license redirect.
        assert_eq!(backend.agreement_calls.load(Ordering::SeqCst), 2);
        assert!(recording.assigned.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn external_login_assigns_exactly_once_and_keeps_current_route() {
        let (mut nav, backend, recording) = navigator(Ok(false), GuardPolicy::default());
        nav.navigate("/license").await.unwrap();

        let outcome = nav.navigate("/solutions/cooking").await.unwrap();
        let expected = "/auth/login?next_url=%2Fvdc_dashboard%2F%23%2Fsolutions%2Fcooking";
        assert_eq!(outcome, NavigationOutcome::LeftApplication { url: expected.to_string() });
        assert_eq!(*recording.assigned.lock().unwrap(), vec![expected.to_string()]);
        assert_eq!(nav.current().unwrap().request().target_route_name(), RouteName::License);
        assert_eq!(backend.agreement_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn agreed_navigation_commits_with_params() {
        let (mut nav, _, recording) = navigator(Ok(true), GuardPolicy::default());

        let outcome = nav.navigate("/solutions/dash").await.unwrap();
        let NavigationOutcome::Committed { route, params, redirected_from, .. } = outcome else {
            panic!("expected committed navigation");
        };
        assert_eq!(route, RouteName::SolutionChatflow);
        assert_eq!(params.get("topic").map(String::as_str), Some("dash"));
        assert!(redirected_from.is_empty());
        assert!(recording.assigned.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unmatched_path_is_reported_without_guard_run() {
        let (mut nav, backend, _) = navigator(Ok(true), GuardPolicy::default());

        let err = nav.navigate("/a/b/c").await.unwrap_err();
        assert_eq!(err, NavigationError::Route(RouteError::NoMatch("/a/b/c".to_string())));
        assert_eq!(backend.agreement_calls.load(Ordering::SeqCst), 0);
        assert!(nav.current().is_none());
    }

    #[tokio::test]
    async fn redirect_loop_is_bounded() {
        // A policy whose "license" page is itself guarded never settles.
        let policy = GuardPolicy::new("/terms", LoginRedirect::default());
        let (mut nav, backend, _) = navigator(Ok(false), policy);

        let err = nav.navigate("/marketplace").await.unwrap_err();
        assert_eq!(err, NavigationError::TooManyRedirects("/marketplace".to_string()));
        assert_eq!(
            backend.agreement_calls.load(Ordering::SeqCst),
            Navigator::<Arc<RecordingContext>>::MAX_REDIRECTS + 1
        );
    }
}
