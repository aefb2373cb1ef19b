use serde::{Deserialize, Serialize};

/// The single output of the navigation guard for one transition attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum NavigationDecision {
    /// Let the in-app transition complete.
    Proceed,
    /// Replace the transition with one to another in-app path.
    RedirectTo(String),
    /// Leave the application: load the given login URL in the whole browsing context.
    DeferToExternalLogin(String),
}

/// Why the guard decided the way it did (audit/logging only).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    /// The license page is always reachable.
    TargetIsLicense,
    /// Usage terms are agreed.
    Agreed,
    /// Usage terms are not agreed; the user is sent to the license page.
    NotAgreed,
    /// The agreement service could not be queried; ordinary routes fail open.
    AgreementUnavailable,
    /// The chat-flow route requires the external login when agreement is not established.
    LoginRequired,
}

impl DecisionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionReason::TargetIsLicense => "target_is_license",
            DecisionReason::Agreed => "agreed",
            DecisionReason::NotAgreed => "not_agreed",
            DecisionReason::AgreementUnavailable => "agreement_unavailable",
            DecisionReason::LoginRequired => "login_required",
        }
    }
}

impl core::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
