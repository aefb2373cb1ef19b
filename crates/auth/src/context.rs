use jukebox_core::NavigationRequest;

use crate::status::AuthStatus;

/// Per-transition context handed to the target page.
///
/// The guard annotates it with the resolved [`AuthStatus`]; pages may read it
/// to adjust their own behavior. It is never shared between transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    request: NavigationRequest,
    auth_status: AuthStatus,
}

impl NavigationContext {
    pub fn new(request: NavigationRequest, auth_status: AuthStatus) -> Self {
        Self {
            request,
            auth_status,
        }
    }

    pub fn request(&self) -> &NavigationRequest {
        &self.request
    }

    pub fn auth_status(&self) -> AuthStatus {
        self.auth_status
    }

    /// The `loggedin` flag pages consult.
    pub fn logged_in(&self) -> bool {
        self.auth_status.is_authenticated()
    }
}
