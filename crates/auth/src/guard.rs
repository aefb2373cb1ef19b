//! Navigation guard: decides whether an attempted transition may complete.
//!
//! The guard is a pure async function of one [`NavigationRequest`]: it issues
//! the authentication and agreement queries together, waits for both to
//! settle, and returns exactly one [`NavigationDecision`]. It never proceeds
//! before the agreement query has settled, and it has no path that yields two
//! decisions for the same request.

use std::sync::Arc;

use jukebox_core::{NavigationRequest, RouteName, RouteResult, RouteTable};
use tracing::Instrument;

use crate::context::NavigationContext;
use crate::decision::{DecisionReason, NavigationDecision};
use crate::login::LoginRedirect;
use crate::services::{AgreementService, AuthService};
use crate::status::{AgreementStatus, AuthStatus};

/// Where the guard sends users that have not agreed to the terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardPolicy {
    license_path: String,
    login: LoginRedirect,
}

impl GuardPolicy {
    pub fn new(license_path: impl Into<String>, login: LoginRedirect) -> Self {
        Self {
            license_path: license_path.into(),
            login,
        }
    }

    /// Policy for a route table, taking the license path from its `License` route.
    pub fn for_routes(routes: &RouteTable, login: LoginRedirect) -> RouteResult<Self> {
        Ok(Self::new(routes.path_of(RouteName::License)?, login))
    }

    pub fn license_path(&self) -> &str {
        &self.license_path
    }
}

impl Default for GuardPolicy {
    fn default() -> Self {
        Self::new("/license", LoginRedirect::default())
    }
}

/// A decision together with the reason it was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub decision: NavigationDecision,
    pub reason: DecisionReason,
}

/// Decide a transition once the agreement status is known.
///
/// - No IO
/// - AuthStatus never influences the decision
pub fn evaluate(request: &NavigationRequest, agreement: AgreementStatus, policy: &GuardPolicy) -> Verdict {
    let target = request.target_route_name();

    let (decision, reason) = match (target, agreement) {
        (RouteName::License, _) => (NavigationDecision::Proceed, DecisionReason::TargetIsLicense),
        (_, AgreementStatus::Agreed) => (NavigationDecision::Proceed, DecisionReason::Agreed),
        (RouteName::SolutionChatflow, AgreementStatus::NotAgreed | AgreementStatus::Unknown) => (
            NavigationDecision::DeferToExternalLogin(policy.login.url_for(request.target_path())),
            DecisionReason::LoginRequired,
        ),
        (_, AgreementStatus::NotAgreed) => (
            NavigationDecision::RedirectTo(policy.license_path.clone()),
            DecisionReason::NotAgreed,
        ),
        (_, AgreementStatus::Unknown) => {
            (NavigationDecision::Proceed, DecisionReason::AgreementUnavailable)
        }
    };

    Verdict { decision, reason }
}

/// Everything one guard run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOutcome {
    pub context: NavigationContext,
    pub agreement: AgreementStatus,
    pub decision: NavigationDecision,
    pub reason: DecisionReason,
}

/// The guard run before every route transition.
#[derive(Clone)]
pub struct NavigationGuard {
    auth: Arc<dyn AuthService>,
    agreement: Arc<dyn AgreementService>,
    policy: GuardPolicy,
}

impl NavigationGuard {
    pub fn new(
        auth: Arc<dyn AuthService>,
        agreement: Arc<dyn AgreementService>,
        policy: GuardPolicy,
    ) -> Self {
        Self {
            auth,
            agreement,
            policy,
        }
    }

    /// Run the guard for one transition attempt.
    ///
    /// Query failures never escape: a failed authentication query resolves to
    /// [`AuthStatus::Unauthenticated`], a failed agreement query to
    /// [`AgreementStatus::Unknown`].
    pub async fn check(&self, request: NavigationRequest) -> GuardOutcome {
        let span = tracing::info_span!(
            "navigation",
            id = %request.id(),
            route = %request.target_route_name(),
            path = request.target_path(),
        );

        async move {
            let (auth, agreement) =
                tokio::join!(self.auth.authenticated(), self.agreement.allowed());

            if let Err(e) = &auth {
                tracing::debug!(error = %e, "authentication query failed; treating session as unauthenticated");
            }
            if let Err(e) = &agreement {
                tracing::warn!(error = %e, "agreement query failed");
            }

            let auth_status = AuthStatus::from_query(&auth);
            let agreement = AgreementStatus::from_query(&agreement);
            let Verdict { decision, reason } = evaluate(&request, agreement, &self.policy);

            tracing::info!(
                decision = ?decision,
                %reason,
                logged_in = auth_status.is_authenticated(),
                "navigation decided"
            );

            GuardOutcome {
                context: NavigationContext::new(request, auth_status),
                agreement,
                decision,
                reason,
            }
        }
        .instrument(span)
        .await
    }
}
